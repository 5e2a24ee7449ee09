// self
use crate::{_prelude::*, config::InputMode, error::FailureReason};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedAttempt<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedAttempt<F> = F;

/// A span builder used by authentication attempts.
#[derive(Clone, Debug)]
pub struct AttemptSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl AttemptSpan {
	/// Creates a new span tagged with the provided input mode + stage.
	pub fn new(mode: InputMode, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("jwt_strategy.attempt", mode = mode.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (mode, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedAttempt<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a rejection event; messages never include tokens or secrets.
pub fn record_rejection(reason: FailureReason, message: &str) {
	#[cfg(feature = "tracing")]
	{
		match reason {
			FailureReason::TransportError
			| FailureReason::SecretLookupFailed
			| FailureReason::ConfigurationError =>
				tracing::warn!(
					reason = reason.as_str(),
					detail = message,
					"Authentication attempt failed."
				),
			_ => tracing::debug!(
				reason = reason.as_str(),
				detail = message,
				"Authentication attempt rejected."
			),
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (reason, message);
	}
}
