// crates.io
use url::Host;
// self
use crate::{
	_prelude::*,
	auth::{InfoMap, SecretSource, UidSource},
	config::{DEFAULT_NAME, ExchangeConfig, InputMode, StrategyConfig},
	error::ConfigError,
	token,
};

/// Builder for [`StrategyConfig`] values.
#[derive(Debug)]
pub struct StrategyConfigBuilder {
	/// Provider name reported to the host.
	pub name: String,
	/// Verification secret source.
	pub secret: SecretSource,
	/// Algorithm name, parsed during [`build`](Self::build).
	pub algorithm: String,
	/// Source of the user identifier.
	pub uid_claim: UidSource,
	/// Claims that must be present, checked in order.
	pub required_claims: Vec<String>,
	/// Profile field projection.
	pub info_map: InfoMap,
	/// Request-phase redirect target.
	pub auth_url: Option<Url>,
	/// Freshness window for the `iat` claim.
	pub valid_within: Option<Duration>,
	/// Tolerance in seconds for standard `exp`/`nbf` checks.
	pub leeway: u64,
	/// Inbound parameter mode.
	pub input_mode: InputMode,
	/// Identity endpoint for credential modes.
	pub exchange: Option<ExchangeConfig>,
	/// Login-form label.
	pub title: Option<String>,
}
impl StrategyConfigBuilder {
	/// Creates a new builder seeded with the defaults of a token-only strategy.
	pub fn new(secret: impl Into<SecretSource>) -> Self {
		Self {
			name: DEFAULT_NAME.into(),
			secret: secret.into(),
			algorithm: "HS256".into(),
			uid_claim: UidSource::default(),
			required_claims: vec!["name".into(), "email".into()],
			info_map: InfoMap::default(),
			auth_url: None,
			valid_within: None,
			leeway: 0,
			input_mode: InputMode::default(),
			exchange: None,
			title: None,
		}
	}

	/// Overrides the provider name.
	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.name = name.into();

		self
	}

	/// Sets the signing algorithm by name (`HS256`, `RS256`, `ES256`, `EdDSA`, ...).
	pub fn algorithm(mut self, name: impl Into<String>) -> Self {
		self.algorithm = name.into();

		self
	}

	/// Sets the uid source.
	pub fn uid_claim(mut self, source: impl Into<UidSource>) -> Self {
		self.uid_claim = source.into();

		self
	}

	/// Replaces the ordered list of required claims.
	pub fn required_claims<I, S>(mut self, claims: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.required_claims = claims.into_iter().map(Into::into).collect();

		self
	}

	/// Replaces the profile field projection.
	pub fn info_map(mut self, info_map: InfoMap) -> Self {
		self.info_map = info_map;

		self
	}

	/// Sets the request-phase redirect target.
	pub fn auth_url(mut self, url: Url) -> Self {
		self.auth_url = Some(url);

		self
	}

	/// Enables the `iat` freshness check.
	pub fn valid_within(mut self, window: Duration) -> Self {
		self.valid_within = Some(window);

		self
	}

	/// Enables the `iat` freshness check with a window in whole seconds.
	pub fn valid_within_secs(self, secs: i64) -> Self {
		self.valid_within(Duration::seconds(secs))
	}

	/// Overrides the `exp`/`nbf` tolerance.
	pub fn leeway(mut self, secs: u64) -> Self {
		self.leeway = secs;

		self
	}

	/// Overrides the inbound parameter mode.
	pub fn input_mode(mut self, mode: InputMode) -> Self {
		self.input_mode = mode;

		self
	}

	/// Configures the identity endpoint.
	pub fn exchange(mut self, exchange: ExchangeConfig) -> Self {
		self.exchange = Some(exchange);

		self
	}

	/// Sets the login-form label.
	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<StrategyConfig, ConfigError> {
		let algorithm = Algorithm::from_str(&self.algorithm)
			.map_err(|_| ConfigError::UnsupportedAlgorithm { name: self.algorithm.clone() })?;

		if let SecretSource::Literal(secret) = &self.secret {
			token::decoding_key(algorithm, secret)?;
		}
		if let Some(url) = self.auth_url.as_ref() {
			validate_endpoint("auth", url)?;
		}
		if let Some(exchange) = self.exchange.as_ref() {
			validate_endpoint("exchange", &exchange.endpoint)?;
		} else if self.input_mode.exchanges() {
			return Err(ConfigError::MissingExchange { mode: self.input_mode.as_str() });
		}
		if self.valid_within.is_some_and(Duration::is_negative) {
			return Err(ConfigError::NegativeWindow);
		}

		Ok(StrategyConfig {
			name: self.name,
			secret: self.secret,
			algorithm,
			uid_claim: self.uid_claim,
			required_claims: self.required_claims,
			info_map: self.info_map,
			auth_url: self.auth_url,
			valid_within: self.valid_within,
			leeway: self.leeway,
			input_mode: self.input_mode,
			exchange: self.exchange,
			title: self.title,
		})
	}
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), ConfigError> {
	if url.scheme() == "https" || (url.scheme() == "http" && is_loopback(url)) {
		Ok(())
	} else {
		Err(ConfigError::InsecureEndpoint { endpoint: name, url: url.to_string() })
	}
}

fn is_loopback(url: &Url) -> bool {
	match url.host() {
		Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
		Some(Host::Ipv4(ip)) => ip.is_loopback(),
		Some(Host::Ipv6(ip)) => ip.is_loopback(),
		None => false,
	}
}
