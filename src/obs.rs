//! Optional observability helpers for authentication attempts.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `jwt_strategy.attempt` with the `mode`
//!   (input mode) and `stage` (call site) fields, plus events for rejected attempts.
//! - Enable `metrics` to increment the `jwt_strategy_attempt_total` counter for every
//!   attempt/success/failure, labeled by `mode` + `outcome`, and the
//!   `jwt_strategy_exchange_total` counter labeled by `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttemptOutcome {
	/// Entry to the callback phase.
	Attempt,
	/// Identity produced.
	Success,
	/// Failure propagated back to the host.
	Failure,
}
impl AttemptOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			AttemptOutcome::Attempt => "attempt",
			AttemptOutcome::Success => "success",
			AttemptOutcome::Failure => "failure",
		}
	}
}
impl Display for AttemptOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each credential exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExchangeOutcome {
	/// Endpoint answered 200 with a token.
	Accepted,
	/// Endpoint answered with a non-200 status.
	Rejected,
	/// Transport or response failure.
	Failed,
}
impl ExchangeOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ExchangeOutcome::Accepted => "accepted",
			ExchangeOutcome::Rejected => "rejected",
			ExchangeOutcome::Failed => "failed",
		}
	}
}
impl Display for ExchangeOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
