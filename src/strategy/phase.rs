//! Values exchanged with the host at the request and callback phases.

// crates.io
use serde_json::{Map, Value};
// self
use crate::{
	_prelude::*,
	auth::{ClaimSet, UserIdentity},
	config::{InputMode, StrategyConfig},
	error::FailureReason,
};

/// What the host should do when the user starts authenticating.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestPhase {
	/// Redirect the user agent to the configured auth URL.
	Redirect(Url),
	/// Render a login form posting back to the callback.
	LoginForm(LoginForm),
}

/// Host-agnostic description of the login form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginForm {
	/// Form heading.
	pub title: String,
	/// Fields, in display order.
	pub fields: Vec<FormField>,
}
impl LoginForm {
	/// Describes the form needed by the configured input mode.
	pub fn for_config(config: &StrategyConfig) -> Self {
		let title = config.title.clone().unwrap_or_else(|| format!("{} Login", config.name));
		let token = |name: &'static str| FormField { name, label: "Token", secret: true };
		let username = FormField { name: "username", label: "Username", secret: false };
		let password = FormField { name: "password", label: "Password", secret: true };
		let fields = match config.input_mode {
			InputMode::Token => vec![token("jwt")],
			InputMode::Credentials => vec![username, password],
			InputMode::CredentialsOrToken => vec![token("token"), username, password],
		};

		Self { title, fields }
	}
}

/// One login-form input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FormField {
	/// Request parameter name.
	pub name: &'static str,
	/// Display label.
	pub label: &'static str,
	/// Whether the input should be masked.
	pub secret: bool,
}

/// Success payload handed to the host.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AuthHash {
	/// Provider name.
	pub provider: String,
	/// Unique user identifier.
	pub uid: String,
	/// Profile fields.
	pub info: Map<String, Value>,
	/// Extra data carried alongside the profile.
	pub extra: AuthExtra,
}
impl AuthHash {
	/// Wraps an identity under the provider name.
	pub fn new(provider: impl Into<String>, identity: UserIdentity) -> Self {
		Self {
			provider: provider.into(),
			uid: identity.uid,
			info: identity.profile,
			extra: AuthExtra { raw_info: identity.raw },
		}
	}
}

/// Extra section of an [`AuthHash`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AuthExtra {
	/// The full validated claim set.
	pub raw_info: ClaimSet,
}

/// Failure payload handed to the host's failure endpoint.
#[derive(Debug, ThisError)]
#[error("{reason}: {message}")]
pub struct AuthFailure {
	/// Stable failure label.
	pub reason: FailureReason,
	/// Human-readable detail; the exact rule for claim failures.
	pub message: String,
	/// Underlying error.
	#[source]
	pub error: Error,
}
impl From<Error> for AuthFailure {
	fn from(error: Error) -> Self {
		Self { reason: error.reason(), message: error.to_string(), error }
	}
}
