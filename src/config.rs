//! Immutable strategy configuration resolved once per strategy instance.
//!
//! [`StrategyConfig`] values are assembled through [`StrategyConfigBuilder`], which
//! parses the algorithm name, enforces HTTPS endpoints, and checks literal key material
//! up front so attempts never discover configuration mistakes mid-request.

/// Builder API for assembling strategy configurations.
pub mod builder;

pub use builder::*;

// self
use crate::{
	_prelude::*,
	auth::{InfoMap, SecretSource, TokenSecret, UidSource},
};

/// Provider name used when none is configured.
pub const DEFAULT_NAME: &str = "jwt";
/// Payload key used by identity endpoints that wrap user claims.
pub const DEFAULT_CLAIMS_KEY: &str = "userInfo";

/// Which inbound parameters an attempt reads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
	#[default]
	/// A signed token in the `jwt` parameter.
	Token,
	/// A `username`/`password` pair; any missing field fails the attempt.
	Credentials,
	/// A pre-obtained `token`, falling back to a `username`/`password` exchange.
	CredentialsOrToken,
}
impl InputMode {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			InputMode::Token => "token",
			InputMode::Credentials => "credentials",
			InputMode::CredentialsOrToken => "credentials_or_token",
		}
	}

	/// Returns true when the mode may call the identity endpoint.
	pub const fn exchanges(self) -> bool {
		!matches!(self, InputMode::Token)
	}
}
impl Display for InputMode {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Remote identity endpoint used to trade credentials for a signed token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExchangeConfig {
	/// HTTPS endpoint receiving the credential POST.
	pub endpoint: Url,
	/// Application bearer token sent with every exchange.
	pub app_token: TokenSecret,
	/// Payload key whose object becomes the claim set; `None` uses the payload as-is.
	pub claims_key: Option<String>,
}
impl ExchangeConfig {
	/// Creates an exchange configuration that unwraps the default claims key.
	pub fn new(endpoint: Url, app_token: impl Into<String>) -> Self {
		Self {
			endpoint,
			app_token: TokenSecret::new(app_token),
			claims_key: Some(DEFAULT_CLAIMS_KEY.into()),
		}
	}

	/// Overrides (or disables, with `None`) the payload key holding the user claims.
	pub fn with_claims_key(mut self, key: Option<impl Into<String>>) -> Self {
		self.claims_key = key.map(Into::into);

		self
	}
}

/// Immutable configuration consumed by [`Strategy`](crate::strategy::Strategy).
#[derive(Clone, Debug)]
pub struct StrategyConfig {
	/// Provider name reported to the host.
	pub name: String,
	/// Verification secret source.
	pub secret: SecretSource,
	/// Signing algorithm tokens must use.
	pub algorithm: Algorithm,
	/// Source of the user identifier.
	pub uid_claim: UidSource,
	/// Claims that must be present, checked in order.
	pub required_claims: Vec<String>,
	/// Profile field projection.
	pub info_map: InfoMap,
	/// Request-phase redirect target.
	pub auth_url: Option<Url>,
	/// Maximum allowed distance between `iat` and the validation instant.
	pub valid_within: Option<Duration>,
	/// Tolerance in seconds applied to standard `exp`/`nbf` checks.
	pub leeway: u64,
	/// Inbound parameter mode.
	pub input_mode: InputMode,
	/// Identity endpoint for credential modes.
	pub exchange: Option<ExchangeConfig>,
	/// Login-form label.
	pub title: Option<String>,
}
impl StrategyConfig {
	/// Creates a new builder for the provided secret source.
	pub fn builder(secret: impl Into<SecretSource>) -> StrategyConfigBuilder {
		StrategyConfigBuilder::new(secret)
	}
}
