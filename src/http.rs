//! Transport primitives for the credential exchange.
//!
//! [`ExchangeHttpClient`] is the strategy's only dependency on an HTTP stack. The
//! exchange hands it a fully built [`ExchangeRequest`] and reads back the raw
//! [`ExchangeResponse`]; status interpretation and body parsing stay in
//! [`exchange`](crate::exchange) so custom transports only move bytes.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")] use reqwest::{header::CONTENT_TYPE, redirect::Policy};
// self
use crate::{_prelude::*, auth::TokenSecret};
#[cfg(feature = "reqwest")] use crate::error::ConfigError;

/// Boxed future returned by [`ExchangeHttpClient`] implementations.
pub type HttpFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + 'a + Send>>;

/// Outbound JSON POST to the identity endpoint.
#[derive(Clone, Debug)]
pub struct ExchangeRequest {
	/// Target endpoint.
	pub url: Url,
	/// Bearer credential placed in the `Authorization` header.
	pub bearer: TokenSecret,
	/// Serialized JSON body.
	pub body: Vec<u8>,
}

/// Raw response returned by the identity endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExchangeResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body bytes.
	pub body: Vec<u8>,
}

/// Abstraction over HTTP transports capable of posting a credential exchange.
///
/// Implementations send exactly one request per call: no retries, no redirects, and no
/// timeout beyond whatever the underlying client was configured with. A response with
/// any status code is a success at this layer; only failures to obtain a response are
/// reported as errors.
pub trait ExchangeHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `request` as `POST` with `Content-Type: application/json` and a bearer
	/// `Authorization` header.
	fn post_json<'a>(
		&'a self,
		request: ExchangeRequest,
	) -> HttpFuture<'a, ExchangeResponse, Self::TransportError>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
/// Identity endpoints answer directly, so the client built by [`ReqwestHttpClient::new`]
/// never follows redirects; configure any custom client passed to
/// [`ReqwestHttpClient::with_client`] the same way.
#[cfg(feature = "reqwest")]
#[derive(Clone)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Builds a client that refuses to follow redirects.
	pub fn new() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().redirect(Policy::none()).build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ExchangeHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn post_json<'a>(
		&'a self,
		request: ExchangeRequest,
	) -> HttpFuture<'a, ExchangeResponse, Self::TransportError> {
		Box::pin(async move {
			let response = self
				.0
				.post(request.url)
				.bearer_auth(request.bearer.expose())
				.header(CONTENT_TYPE, "application/json")
				.body(request.body)
				.send()
				.await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok(ExchangeResponse { status, body })
		})
	}
}
