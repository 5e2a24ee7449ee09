//! Claim presence and `iat` freshness rules.

// crates.io
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	auth::{ClaimSet, ISSUED_AT},
	config::StrategyConfig,
};

/// Rules a decoded claim set must satisfy.
///
/// Checks run in a fixed order and stop at the first violation: required claims in
/// declaration order, then `iat` presence, then `iat` skew. The freshness checks run
/// only when a window is configured, whether or not `iat` is a required claim.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClaimPolicy {
	/// Claims that must be present, checked in order.
	pub required_claims: Vec<String>,
	/// Maximum allowed distance between `iat` and the validation instant.
	pub valid_within: Option<Duration>,
}
impl ClaimPolicy {
	/// Builds the policy described by a strategy configuration.
	pub fn from_config(config: &StrategyConfig) -> Self {
		Self { required_claims: config.required_claims.clone(), valid_within: config.valid_within }
	}

	/// Replaces the required claims.
	pub fn with_required_claims<I, S>(mut self, claims: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.required_claims = claims.into_iter().map(Into::into).collect();

		self
	}

	/// Enables the `iat` freshness check.
	pub fn with_valid_within(mut self, window: Duration) -> Self {
		self.valid_within = Some(window);

		self
	}

	/// Checks `claims` at `now`, failing with [`Error::ClaimInvalid`] on the first violation.
	///
	/// A skew of exactly the window is accepted.
	pub fn check(&self, claims: &ClaimSet, now: OffsetDateTime) -> Result<()> {
		if let Some(missing) = self.required_claims.iter().find(|name| !claims.contains(name)) {
			return Err(Error::claim_invalid(format!("Missing required '{missing}' claim.")));
		}

		let Some(window) = self.valid_within else {
			return Ok(());
		};
		let Some(iat) = claims.issued_at() else {
			return Err(Error::claim_invalid(format!("Missing required '{ISSUED_AT}' claim.")));
		};

		if is_skewed(iat, now, window) {
			return Err(Error::claim_invalid(format!(
				"'{ISSUED_AT}' timestamp claim is too skewed from present."
			)));
		}

		Ok(())
	}
}

// Non-numeric timestamps cannot be placed on the clock and count as skewed.
fn is_skewed(iat: &Value, now: OffsetDateTime, window: Duration) -> bool {
	let Some(iat) = iat.as_f64() else {
		return true;
	};
	let skew = (now.unix_timestamp() as f64 - iat).abs();

	skew > window.as_seconds_f64()
}
