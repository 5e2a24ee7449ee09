//! Per-attempt context holding the memoized claim set.

// crates.io
use async_lock::OnceCell;
use serde_json::{Map, Value};
// self
use crate::{
	_prelude::*,
	auth::{ClaimSet, UserIdentity},
	config::InputMode,
	error::ConfigError,
	http::ExchangeHttpClient,
	strategy::{RequestContext, Strategy},
};

/// One authentication attempt for one inbound request.
///
/// The first call to [`decoded`](Self::decoded) obtains the token (exchanging
/// credentials when needed), decodes it, and applies the claim policy. The validated
/// claim set is then reused by every later accessor of the same attempt. A failed
/// attempt caches nothing.
pub struct Attempt<'a, C>
where
	C: ?Sized + ExchangeHttpClient,
{
	strategy: &'a Strategy<C>,
	ctx: &'a RequestContext,
	decoded: OnceCell<ClaimSet>,
}
impl<'a, C> Attempt<'a, C>
where
	C: ?Sized + ExchangeHttpClient,
{
	pub(crate) fn new(strategy: &'a Strategy<C>, ctx: &'a RequestContext) -> Self {
		Self { strategy, ctx, decoded: OnceCell::new() }
	}

	/// Returns the validated claim set, decoding it on first use.
	pub async fn decoded(&self) -> Result<&ClaimSet> {
		self.decoded.get_or_try_init(|| self.decode_once()).await
	}

	/// Returns the uid projected from the claim set.
	pub async fn uid(&self) -> Result<String> {
		let claims = self.decoded().await?;

		self.strategy.config.uid_claim.resolve(self.ctx, claims)
	}

	/// Returns the profile projected through the info map.
	pub async fn info(&self) -> Result<Map<String, Value>> {
		Ok(self.strategy.config.info_map.project(self.decoded().await?))
	}

	/// Returns the raw claim set.
	pub async fn raw_info(&self) -> Result<&ClaimSet> {
		self.decoded().await
	}

	/// Returns the full identity triple.
	pub async fn identity(&self) -> Result<UserIdentity> {
		let uid = self.uid().await?;
		let profile = self.info().await?;
		let raw = self.raw_info().await?.clone();

		Ok(UserIdentity { uid, profile, raw })
	}

	async fn decode_once(&self) -> Result<ClaimSet> {
		let token = self.obtain_token().await?;

		self.strategy.validator.validate(self.ctx, &token).await
	}

	async fn obtain_token(&self) -> Result<String> {
		match self.strategy.config.input_mode {
			InputMode::Token =>
				self.ctx.non_empty_param("jwt").map(ToOwned::to_owned).ok_or(Error::MissingCredentials),
			InputMode::Credentials => self.exchange().await,
			InputMode::CredentialsOrToken => match self.ctx.non_empty_param("token") {
				Some(token) => Ok(token.to_owned()),
				None => self.exchange().await,
			},
		}
	}

	async fn exchange(&self) -> Result<String> {
		let exchanger = self.strategy.exchanger.as_ref().ok_or(ConfigError::MissingExchange {
			mode: self.strategy.config.input_mode.as_str(),
		})?;
		let username = self.ctx.param("username").unwrap_or_default();
		let password = self.ctx.param("password").unwrap_or_default();

		exchanger.exchange(username, password).await
	}
}
impl<C> Debug for Attempt<'_, C>
where
	C: ?Sized + ExchangeHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Attempt")
			.field("mode", &self.strategy.config.input_mode)
			.field("decoded", &self.decoded.get().is_some())
			.finish()
	}
}
