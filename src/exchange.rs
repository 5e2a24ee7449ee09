//! Credential exchange against the remote identity endpoint.
//!
//! The exchanger posts `{username, password, appToken}` once and hands back the
//! `userToken` string from a `200` reply. Any other status is a credential rejection;
//! the body of a rejection is never parsed.

// crates.io
use serde_json::json;
// self
use crate::{
	_prelude::*,
	config::ExchangeConfig,
	error::TransportError,
	http::{ExchangeHttpClient, ExchangeRequest},
	obs::{self, ExchangeOutcome},
};

#[derive(Deserialize)]
struct ExchangeReply {
	#[serde(rename = "userToken")]
	user_token: String,
}

/// Trades a username/password pair for a signed token.
pub struct CredentialExchanger<C>
where
	C: ?Sized + ExchangeHttpClient,
{
	/// Identity endpoint settings.
	pub config: ExchangeConfig,
	/// Transport used for the POST.
	pub http_client: Arc<C>,
}
impl<C> CredentialExchanger<C>
where
	C: ?Sized + ExchangeHttpClient,
{
	/// Creates an exchanger bound to one identity endpoint.
	pub fn new(config: ExchangeConfig, http_client: impl Into<Arc<C>>) -> Self {
		Self { config, http_client: http_client.into() }
	}

	/// Posts the credentials and returns the signed `userToken` on HTTP 200.
	///
	/// Empty usernames or passwords fail with [`Error::MissingCredentials`] before any
	/// network traffic.
	pub async fn exchange(&self, username: &str, password: &str) -> Result<String> {
		if username.is_empty() || password.is_empty() {
			return Err(Error::MissingCredentials);
		}

		let result = self.post(username, password).await;

		obs::record_exchange_outcome(match &result {
			Ok(_) => ExchangeOutcome::Accepted,
			Err(Error::InvalidCredentials { .. }) => ExchangeOutcome::Rejected,
			Err(_) => ExchangeOutcome::Failed,
		});

		result
	}

	async fn post(&self, username: &str, password: &str) -> Result<String> {
		let body = json!({
			"username": username,
			"password": password,
			"appToken": self.config.app_token.expose(),
		});
		let request = ExchangeRequest {
			url: self.config.endpoint.clone(),
			bearer: self.config.app_token.clone(),
			body: body.to_string().into_bytes(),
		};
		let response =
			self.http_client.post_json(request).await.map_err(TransportError::network)?;

		if response.status != 200 {
			return Err(Error::InvalidCredentials { status: response.status });
		}

		let de = &mut serde_json::Deserializer::from_slice(&response.body);
		let reply: ExchangeReply = serde_path_to_error::deserialize(de)
			.map_err(|source| TransportError::ResponseParse { source })?;

		Ok(reply.user_token)
	}
}
impl<C> Clone for CredentialExchanger<C>
where
	C: ?Sized + ExchangeHttpClient,
{
	fn clone(&self) -> Self {
		Self { config: self.config.clone(), http_client: self.http_client.clone() }
	}
}
impl<C> Debug for CredentialExchanger<C>
where
	C: ?Sized + ExchangeHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CredentialExchanger")
			.field("endpoint", &self.config.endpoint.as_str())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::Mutex;
	// self
	use super::*;
	use crate::http::{ExchangeResponse, HttpFuture};

	#[derive(Debug)]
	struct Unreachable;
	impl Display for Unreachable {
		fn fmt(&self, f: &mut Formatter) -> FmtResult {
			f.write_str("Endpoint unreachable.")
		}
	}
	impl StdError for Unreachable {}

	#[derive(Default)]
	struct ScriptedClient {
		reply: Option<ExchangeResponse>,
		seen: Mutex<Vec<ExchangeRequest>>,
	}
	impl ExchangeHttpClient for ScriptedClient {
		type TransportError = Unreachable;

		fn post_json<'a>(
			&'a self,
			request: ExchangeRequest,
		) -> HttpFuture<'a, ExchangeResponse, Self::TransportError> {
			Box::pin(async move {
				self.seen.lock().expect("Lock should not be poisoned.").push(request);

				self.reply.clone().ok_or(Unreachable)
			})
		}
	}

	fn exchanger(reply: Option<ExchangeResponse>) -> CredentialExchanger<ScriptedClient> {
		let config = ExchangeConfig::new(
			Url::parse("https://idp.example.com/api/login").expect("Test URL should parse."),
			"app-token",
		);

		CredentialExchanger::new(config, ScriptedClient { reply, ..Default::default() })
	}

	fn reply(status: u16, body: &str) -> Option<ExchangeResponse> {
		Some(ExchangeResponse { status, body: body.as_bytes().to_vec() })
	}

	#[tokio::test]
	async fn empty_credentials_skip_the_network() {
		let exchanger = exchanger(reply(200, "{\"userToken\":\"t\"}"));

		for (username, password) in [("", ""), ("user", ""), ("", "pass")] {
			let err = exchanger
				.exchange(username, password)
				.await
				.expect_err("Empty credentials must fail.");

			assert!(matches!(err, Error::MissingCredentials));
		}

		assert!(exchanger.http_client.seen.lock().expect("Lock.").is_empty());
	}

	#[tokio::test]
	async fn posts_body_with_app_token() {
		let exchanger = exchanger(reply(200, "{\"userToken\":\"signed\",\"other\":1}"));
		let token = exchanger.exchange("ada", "pw").await.expect("Exchange should succeed.");

		assert_eq!(token, "signed");

		let seen = exchanger.http_client.seen.lock().expect("Lock.");
		let body: serde_json::Value =
			serde_json::from_slice(&seen[0].body).expect("Body should be JSON.");

		assert_eq!(seen.len(), 1);
		assert_eq!(seen[0].bearer.expose(), "app-token");
		assert_eq!(body, json!({ "username": "ada", "password": "pw", "appToken": "app-token" }));
		assert_eq!(
			String::from_utf8_lossy(&seen[0].body),
			"{\"username\":\"ada\",\"password\":\"pw\",\"appToken\":\"app-token\"}"
		);
	}

	#[tokio::test]
	async fn non_200_is_a_rejection_without_parsing() {
		let err = exchanger(reply(401, "not json"))
			.exchange("ada", "pw")
			.await
			.expect_err("401 must be rejected.");

		assert!(matches!(err, Error::InvalidCredentials { status: 401 }));
	}

	#[tokio::test]
	async fn malformed_200_and_network_errors_are_transport_failures() {
		let err = exchanger(reply(200, "{\"token\":\"x\"}"))
			.exchange("ada", "pw")
			.await
			.expect_err("Missing userToken must fail.");

		assert!(matches!(err, Error::Transport(TransportError::ResponseParse { .. })));

		let err =
			exchanger(None).exchange("ada", "pw").await.expect_err("Network errors must fail.");

		assert!(matches!(err, Error::Transport(TransportError::Network { .. })));
	}
}
