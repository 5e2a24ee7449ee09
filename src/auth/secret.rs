//! Signing secrets and the per-request secret resolution seam.

// self
use crate::{_prelude::*, error::LookupError, strategy::RequestContext};

/// Boxed future returned by resolver capabilities.
pub type LookupFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, LookupError>> + 'a + Send>>;

/// Redacted secret wrapper keeping key material and app tokens out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner secret value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Capability that produces the verification secret for one request.
///
/// Implementations typically consult a key service keyed by something in the inbound
/// request (tenant header, host, etc.). The resolver is invoked at most once per attempt,
/// right before the token signature is verified.
pub trait SecretResolver
where
	Self: Send + Sync,
{
	/// Produces the secret (HMAC key or PEM public key) for the request.
	fn resolve<'a>(&'a self, ctx: &'a RequestContext) -> LookupFuture<'a, TokenSecret>;
}

/// Where the verification secret comes from; selected once at configuration time.
#[derive(Clone)]
pub enum SecretSource {
	/// Static secret shared by every request.
	Literal(TokenSecret),
	/// Capability consulted for every attempt.
	Resolver(Arc<dyn SecretResolver>),
}
impl SecretSource {
	/// Wraps a resolver capability.
	pub fn resolver(resolver: impl 'static + SecretResolver) -> Self {
		Self::Resolver(Arc::new(resolver))
	}

	/// Returns the secret for the current request.
	pub async fn secret(&self, ctx: &RequestContext) -> Result<TokenSecret> {
		match self {
			Self::Literal(secret) => Ok(secret.clone()),
			Self::Resolver(resolver) => Ok(resolver.resolve(ctx).await?),
		}
	}
}
impl From<TokenSecret> for SecretSource {
	fn from(value: TokenSecret) -> Self {
		Self::Literal(value)
	}
}
impl From<&str> for SecretSource {
	fn from(value: &str) -> Self {
		Self::Literal(TokenSecret::new(value))
	}
}
impl From<String> for SecretSource {
	fn from(value: String) -> Self {
		Self::Literal(TokenSecret::new(value))
	}
}
impl Debug for SecretSource {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Literal(secret) => f.debug_tuple("Literal").field(secret).finish(),
			Self::Resolver(_) => f.write_str("Resolver(..)"),
		}
	}
}
