//! Strategy-level error types shared across decoding, claim policies, and exchanges.

// self
use crate::_prelude::*;

/// Strategy-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical strategy error exposed by public APIs.
///
/// Every variant is terminal for the attempt that raised it; nothing is retried internally.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Token signature or format failure.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Secret or uid resolver failure.
	#[error(transparent)]
	Lookup(#[from] LookupError),
	/// Transport failure while calling the identity endpoint.
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Decoded claims violate the configured claim policy.
	#[error("{message}")]
	ClaimInvalid {
		/// Human-readable description of the violated rule.
		message: String,
	},
	/// The request carried no usable token or credential pair.
	#[error("No usable token or credentials were supplied.")]
	MissingCredentials,
	/// The identity endpoint rejected the supplied credentials.
	#[error("Identity endpoint rejected the credentials with HTTP {status}.")]
	InvalidCredentials {
		/// HTTP status code returned by the identity endpoint.
		status: u16,
	},
}
impl Error {
	/// Builds a [`Error::ClaimInvalid`] from any message.
	pub fn claim_invalid(message: impl Into<String>) -> Self {
		Self::ClaimInvalid { message: message.into() }
	}

	/// Returns the failure reason label handed to the host framework.
	pub fn reason(&self) -> FailureReason {
		match self {
			Self::Config(_) => FailureReason::ConfigurationError,
			Self::Decode(_) => FailureReason::InvalidToken,
			Self::Lookup(_) => FailureReason::SecretLookupFailed,
			Self::Transport(_) => FailureReason::TransportError,
			Self::ClaimInvalid { .. } => FailureReason::ClaimInvalid,
			Self::MissingCredentials => FailureReason::MissingCredentials,
			Self::InvalidCredentials { .. } => FailureReason::InvalidCredentials,
		}
	}
}

/// Stable failure labels the host maps onto its failure endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
	/// Token failed signature or format checks.
	InvalidToken,
	/// Claims violated the configured claim policy.
	ClaimInvalid,
	/// No usable token or credential pair was supplied.
	MissingCredentials,
	/// Identity endpoint rejected the credentials.
	InvalidCredentials,
	/// Network or response failure while talking to the identity endpoint.
	TransportError,
	/// A secret or uid resolver could not produce a value.
	SecretLookupFailed,
	/// The strategy is misconfigured.
	ConfigurationError,
}
impl FailureReason {
	/// Returns a stable label suitable for redirects, spans, or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FailureReason::InvalidToken => "invalid_token",
			FailureReason::ClaimInvalid => "claim_invalid",
			FailureReason::MissingCredentials => "missing_credentials",
			FailureReason::InvalidCredentials => "invalid_credentials",
			FailureReason::TransportError => "transport_error",
			FailureReason::SecretLookupFailed => "secret_lookup_failed",
			FailureReason::ConfigurationError => "configuration_error",
		}
	}
}
impl Display for FailureReason {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Configuration and validation failures raised while building a strategy.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Algorithm name is not recognized.
	#[error("Unsupported signing algorithm `{name}`.")]
	UnsupportedAlgorithm {
		/// Algorithm name as configured.
		name: String,
	},
	/// Key material cannot be used with the configured algorithm.
	#[error("Key material is invalid for the {algorithm} algorithm.")]
	InvalidKey {
		/// Algorithm label.
		algorithm: String,
		/// Underlying key parsing failure.
		#[source]
		source: jsonwebtoken::errors::Error,
	},
	/// Endpoints must use HTTPS unless they point at a loopback host.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Credential input modes need an identity endpoint.
	#[error("Input mode `{mode}` requires an exchange configuration.")]
	MissingExchange {
		/// Input mode label.
		mode: &'static str,
	},
	/// Freshness window cannot be negative.
	#[error("The valid_within window must not be negative.")]
	NegativeWindow,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Signature, format, or envelope failures while decoding a token.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Token failed signature verification or standard-claim checks.
	#[error("Token could not be decoded: {0}.")]
	Token(#[from] jsonwebtoken::errors::Error),
	/// Payload lacks the configured envelope key.
	#[error("Token payload is missing the `{key}` object.")]
	MissingEnvelope {
		/// Envelope key expected at the top level of the payload.
		key: String,
	},
}

/// Failures raised by secret or uid resolvers.
#[derive(Debug, ThisError)]
pub enum LookupError {
	/// Resolver could not produce a signing secret.
	#[error("Secret resolver failed: {source}.")]
	Secret {
		/// Resolver-specific failure.
		#[source]
		source: BoxError,
	},
	/// Resolver could not produce a uid.
	#[error("Uid resolver failed: {source}.")]
	Uid {
		/// Resolver-specific failure.
		#[source]
		source: BoxError,
	},
}
impl LookupError {
	/// Wraps a secret resolver failure.
	pub fn secret(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Secret { source: Box::new(src) }
	}

	/// Wraps a uid resolver failure.
	pub fn uid(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Uid { source: Box::new(src) }
	}
}

/// Transport-level failures (network or response body).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the identity endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Identity endpoint answered 200 with a body that is not the expected JSON.
	#[error("Identity endpoint returned malformed JSON.")]
	ResponseParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
