//! Signed-token decoding and claim policy enforcement.
//!
//! [`TokenValidator`] runs the fixed validation order: resolve the secret, verify the
//! signature, unwrap the optional claims envelope, then apply the [`ClaimPolicy`].
//! Signature and format problems surface as [`DecodeError`] and never as a claim
//! policy failure.

pub mod policy;

pub use policy::*;

// crates.io
use jsonwebtoken::{DecodingKey, Validation};
use serde_json::{Map, Value};
// self
use crate::{
	_prelude::*,
	auth::{ClaimSet, SecretSource, TokenSecret},
	config::StrategyConfig,
	error::{ConfigError, DecodeError, LookupError},
	strategy::RequestContext,
};

/// Decodes signed tokens and enforces the configured claim policy.
#[derive(Clone, Debug)]
pub struct TokenValidator {
	/// Signing algorithm tokens must use.
	pub algorithm: Algorithm,
	/// Verification secret source.
	pub secret: SecretSource,
	/// Tolerance in seconds for standard `exp`/`nbf` checks.
	pub leeway: u64,
	/// Payload key whose object becomes the claim set.
	pub claims_key: Option<String>,
	/// Required-claim and freshness rules.
	pub policy: ClaimPolicy,
}
impl TokenValidator {
	/// Creates a validator with an empty claim policy and no envelope.
	pub fn new(algorithm: Algorithm, secret: impl Into<SecretSource>) -> Self {
		Self {
			algorithm,
			secret: secret.into(),
			leeway: 0,
			claims_key: None,
			policy: ClaimPolicy::default(),
		}
	}

	/// Derives the validator described by a strategy configuration.
	///
	/// Credential modes unwrap the exchange's claims key for every token they see,
	/// including tokens supplied directly by the caller.
	pub fn from_config(config: &StrategyConfig) -> Self {
		let claims_key = config
			.exchange
			.as_ref()
			.filter(|_| config.input_mode.exchanges())
			.and_then(|exchange| exchange.claims_key.clone());

		Self {
			algorithm: config.algorithm,
			secret: config.secret.clone(),
			leeway: config.leeway,
			claims_key,
			policy: ClaimPolicy::from_config(config),
		}
	}

	/// Unwraps the claims found under `key` instead of the whole payload.
	pub fn with_claims_key(mut self, key: impl Into<String>) -> Self {
		self.claims_key = Some(key.into());

		self
	}

	/// Replaces the claim policy.
	pub fn with_policy(mut self, policy: ClaimPolicy) -> Self {
		self.policy = policy;

		self
	}

	/// Decodes `raw` and validates it against the policy at the current instant.
	pub async fn validate(&self, ctx: &RequestContext, raw: &str) -> Result<ClaimSet> {
		self.validate_at(ctx, raw, OffsetDateTime::now_utc()).await
	}

	/// Decodes `raw` and validates it against the policy at `now`.
	pub async fn validate_at(
		&self,
		ctx: &RequestContext,
		raw: &str,
		now: OffsetDateTime,
	) -> Result<ClaimSet> {
		let claims = self.decode(ctx, raw).await?;

		self.policy.check(&claims, now)?;

		Ok(claims)
	}

	/// Verifies the signature and returns the (unwrapped) payload without policy checks.
	pub async fn decode(&self, ctx: &RequestContext, raw: &str) -> Result<ClaimSet> {
		let secret = self.secret.secret(ctx).await?;
		let key = match &self.secret {
			SecretSource::Literal(_) => decoding_key(self.algorithm, &secret)?,
			// Resolved key material is request input, not configuration.
			SecretSource::Resolver(_) =>
				decoding_key(self.algorithm, &secret).map_err(LookupError::secret)?,
		};
		let mut validation = Validation::new(self.algorithm);

		validation.required_spec_claims.clear();
		validation.validate_aud = false;
		validation.validate_nbf = true;
		validation.leeway = self.leeway;

		let payload = jsonwebtoken::decode::<Map<String, Value>>(raw, &key, &validation)
			.map_err(DecodeError::from)?
			.claims;

		Ok(unwrap_envelope(payload, self.claims_key.as_deref())?)
	}
}

/// Builds the verification key for `algorithm` from secret material.
///
/// HMAC algorithms use the secret bytes; RSA, EC, and EdDSA algorithms expect a PEM
/// encoded public key.
pub fn decoding_key(algorithm: Algorithm, secret: &TokenSecret) -> Result<DecodingKey, ConfigError> {
	let bytes = secret.expose().as_bytes();
	let key = match algorithm {
		Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 =>
			return Ok(DecodingKey::from_secret(bytes)),
		Algorithm::RS256
		| Algorithm::RS384
		| Algorithm::RS512
		| Algorithm::PS256
		| Algorithm::PS384
		| Algorithm::PS512 => DecodingKey::from_rsa_pem(bytes),
		Algorithm::ES256 | Algorithm::ES384 => DecodingKey::from_ec_pem(bytes),
		Algorithm::EdDSA => DecodingKey::from_ed_pem(bytes),
	};

	key.map_err(|source| ConfigError::InvalidKey { algorithm: format!("{algorithm:?}"), source })
}

fn unwrap_envelope(
	mut payload: Map<String, Value>,
	key: Option<&str>,
) -> Result<ClaimSet, DecodeError> {
	let Some(key) = key else {
		return Ok(ClaimSet::new(payload));
	};

	match payload.remove(key) {
		Some(Value::Object(inner)) => Ok(ClaimSet::new(inner)),
		_ => Err(DecodeError::MissingEnvelope { key: key.to_owned() }),
	}
}
