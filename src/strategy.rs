//! Host-facing strategy: request phase, callback phase, and per-attempt state.
//!
//! A [`Strategy`] owns the immutable configuration, the token validator, and (for
//! credential modes) the exchanger. Each callback creates a fresh [`Attempt`] that
//! memoizes its validated claim set; attempts are never shared or pooled.

pub mod attempt;
pub mod context;
pub mod phase;

pub use attempt::*;
pub use context::*;
pub use phase::*;

// self
use crate::{
	_prelude::*,
	config::StrategyConfig,
	exchange::CredentialExchanger,
	http::ExchangeHttpClient,
	obs::{self, AttemptOutcome, AttemptSpan},
	token::TokenValidator,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Strategy specialized for the crate's default reqwest transport.
pub type ReqwestStrategy = Strategy<ReqwestHttpClient>;

/// Signed-token authentication strategy loaded by the host middleware.
pub struct Strategy<C>
where
	C: ?Sized + ExchangeHttpClient,
{
	/// Immutable configuration shared by every attempt.
	pub config: Arc<StrategyConfig>,
	/// Decoder + claim policy derived from the configuration.
	pub validator: TokenValidator,
	/// Credential exchanger, present when an identity endpoint is configured.
	pub exchanger: Option<CredentialExchanger<C>>,
}
impl<C> Strategy<C>
where
	C: ?Sized + ExchangeHttpClient,
{
	/// Creates a strategy that reuses the caller-provided transport.
	pub fn with_http_client(config: StrategyConfig, http_client: impl Into<Arc<C>>) -> Self {
		let validator = TokenValidator::from_config(&config);
		let http_client = http_client.into();
		let exchanger = config
			.exchange
			.clone()
			.map(|exchange| CredentialExchanger::new(exchange, http_client));

		Self { config: Arc::new(config), validator, exchanger }
	}

	/// Tells the host how to start authentication.
	pub fn request_phase(&self) -> RequestPhase {
		match self.config.auth_url.as_ref() {
			Some(url) => RequestPhase::Redirect(url.clone()),
			None => RequestPhase::LoginForm(LoginForm::for_config(&self.config)),
		}
	}

	/// Starts a fresh attempt for one inbound request.
	pub fn begin<'a>(&'a self, ctx: &'a RequestContext) -> Attempt<'a, C> {
		Attempt::new(self, ctx)
	}

	/// Runs one attempt to completion and packages the outcome for the host.
	pub async fn callback_phase(&self, ctx: &RequestContext) -> Result<AuthHash, AuthFailure> {
		let mode = self.config.input_mode;
		let span = AttemptSpan::new(mode, "callback_phase");

		obs::record_attempt_outcome(mode, AttemptOutcome::Attempt);

		let result = span.instrument(async { self.begin(ctx).identity().await }).await;

		match result {
			Ok(identity) => {
				obs::record_attempt_outcome(mode, AttemptOutcome::Success);

				Ok(AuthHash::new(self.config.name.clone(), identity))
			},
			Err(e) => {
				let failure = AuthFailure::from(e);

				obs::record_attempt_outcome(mode, AttemptOutcome::Failure);
				obs::record_rejection(failure.reason, &failure.message);

				Err(failure)
			},
		}
	}
}
#[cfg(feature = "reqwest")]
impl Strategy<ReqwestHttpClient> {
	/// Creates a strategy backed by its own reqwest transport.
	pub fn new(config: StrategyConfig) -> Result<Self> {
		let http_client = ReqwestHttpClient::new()?;

		Ok(Self::with_http_client(config, http_client))
	}
}
impl<C> Debug for Strategy<C>
where
	C: ?Sized + ExchangeHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Strategy")
			.field("name", &self.config.name)
			.field("input_mode", &self.config.input_mode)
			.field("exchanger", &self.exchanger)
			.finish()
	}
}
