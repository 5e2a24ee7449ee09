//! Signed-token authentication strategy: claim policies, freshness windows, and remote
//! credential exchange for web authentication middleware.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod exchange;
pub mod http;
pub mod obs;
pub mod strategy;
pub mod token;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// crates.io
	use jsonwebtoken::{EncodingKey, Header};
	use serde_json::Value;
	// self
	use crate::{config::StrategyConfig, http::ReqwestHttpClient, strategy::Strategy};

	/// Strategy type alias used by reqwest-backed integration tests.
	pub type ReqwestTestStrategy = Strategy<ReqwestHttpClient>;

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.redirect(reqwest::redirect::Policy::none())
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Constructs a [`Strategy`] backed by the insecure reqwest transport.
	pub fn build_reqwest_test_strategy(config: StrategyConfig) -> ReqwestTestStrategy {
		Strategy::with_http_client(config, test_reqwest_http_client())
	}

	/// Parses a mock-server URL.
	pub fn mock_url(raw: &str) -> Url {
		Url::parse(raw).expect("Failed to parse mock server URL.")
	}

	/// Signs `payload` with HS256 under `secret`.
	pub fn sign_hs256(payload: &Value, secret: &str) -> String {
		jsonwebtoken::encode(
			&Header::new(Algorithm::HS256),
			payload,
			&EncodingKey::from_secret(secret.as_bytes()),
		)
		.expect("Failed to sign test token.")
	}

	/// Current UNIX timestamp in whole seconds.
	pub fn unix_now() -> i64 {
		OffsetDateTime::now_utc().unix_timestamp()
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use jsonwebtoken::Algorithm;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use jsonwebtoken;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use httpmock as _;
