//! Projection of a validated claim set into the identity handed to the host.
//!
//! The uid and each profile field come from either a named claim or a capability
//! chosen at configuration time. Nothing here is cached: every projection reads
//! straight from the attempt's [`ClaimSet`].

// crates.io
use serde_json::{Map, Value};
// self
use crate::{_prelude::*, auth::ClaimSet, error::LookupError, strategy::RequestContext};

/// Derivation function computing a profile field from the full claim set.
pub type DeriveFn = dyn Fn(&ClaimSet) -> Value + Send + Sync;

/// Capability that computes the uid from the full claim set.
pub trait UidResolver
where
	Self: Send + Sync,
{
	/// Returns the uid for the request's claims.
	fn uid(&self, ctx: &RequestContext, claims: &ClaimSet) -> Result<String, LookupError>;
}

/// Where the uid comes from; selected once at configuration time.
#[derive(Clone)]
pub enum UidSource {
	/// Value of the named claim.
	Claim(String),
	/// Capability invoked with the full claim set.
	Resolver(Arc<dyn UidResolver>),
}
impl UidSource {
	/// Wraps a resolver capability.
	pub fn resolver(resolver: impl 'static + UidResolver) -> Self {
		Self::Resolver(Arc::new(resolver))
	}

	/// Computes the uid for a validated claim set.
	///
	/// String claims are used verbatim and other scalars use their JSON rendering. An
	/// absent or `null` uid claim is reported as a missing required claim.
	pub fn resolve(&self, ctx: &RequestContext, claims: &ClaimSet) -> Result<String> {
		match self {
			Self::Claim(name) => match claims.get(name) {
				None | Some(Value::Null) =>
					Err(Error::claim_invalid(format!("Missing required '{name}' claim."))),
				Some(Value::String(value)) => Ok(value.clone()),
				Some(other) => Ok(other.to_string()),
			},
			Self::Resolver(resolver) => Ok(resolver.uid(ctx, claims)?),
		}
	}
}
impl Default for UidSource {
	fn default() -> Self {
		Self::Claim("email".into())
	}
}
impl From<&str> for UidSource {
	fn from(value: &str) -> Self {
		Self::Claim(value.into())
	}
}
impl From<String> for UidSource {
	fn from(value: String) -> Self {
		Self::Claim(value)
	}
}
impl Debug for UidSource {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Claim(name) => f.debug_tuple("Claim").field(name).finish(),
			Self::Resolver(_) => f.write_str("Resolver(..)"),
		}
	}
}

/// Source of one profile field.
#[derive(Clone)]
pub enum FieldSource {
	/// Value of the named claim; `null` when the claim is absent.
	ClaimName(String),
	/// Derivation over the full claim set.
	Derive(Arc<DeriveFn>),
}
impl FieldSource {
	/// Builds a derived field source.
	pub fn derive(f: impl 'static + Fn(&ClaimSet) -> Value + Send + Sync) -> Self {
		Self::Derive(Arc::new(f))
	}

	/// Evaluates the source against a claim set.
	pub fn evaluate(&self, claims: &ClaimSet) -> Value {
		match self {
			Self::ClaimName(name) => claims.get(name).cloned().unwrap_or(Value::Null),
			Self::Derive(f) => f(claims),
		}
	}
}
impl Debug for FieldSource {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::ClaimName(name) => f.debug_tuple("ClaimName").field(name).finish(),
			Self::Derive(_) => f.write_str("Derive(..)"),
		}
	}
}

/// Ordered mapping from profile field name to its [`FieldSource`].
#[derive(Clone, Debug)]
pub struct InfoMap(Vec<(String, FieldSource)>);
impl InfoMap {
	/// Creates an empty map.
	pub fn empty() -> Self {
		Self(Vec::new())
	}

	/// Maps `field` to the value of `claim`.
	pub fn claim(self, field: impl Into<String>, claim: impl Into<String>) -> Self {
		self.insert(field, FieldSource::ClaimName(claim.into()))
	}

	/// Maps `field` to a derivation over the full claim set.
	pub fn derive(
		self,
		field: impl Into<String>,
		f: impl 'static + Fn(&ClaimSet) -> Value + Send + Sync,
	) -> Self {
		self.insert(field, FieldSource::derive(f))
	}

	/// Inserts or replaces `field`, keeping its original position when replacing.
	pub fn insert(mut self, field: impl Into<String>, source: FieldSource) -> Self {
		let field = field.into();

		match self.0.iter().position(|(name, _)| *name == field) {
			Some(idx) => self.0[idx].1 = source,
			None => self.0.push((field, source)),
		}

		self
	}

	/// Number of mapped fields.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if no fields are mapped.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterator over `(field, source)` pairs in declaration order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSource)> {
		self.0.iter().map(|(field, source)| (field.as_str(), source))
	}

	/// Builds the profile for a claim set; missing source claims become `null`.
	pub fn project(&self, claims: &ClaimSet) -> Map<String, Value> {
		self.0.iter().map(|(field, source)| (field.clone(), source.evaluate(claims))).collect()
	}
}
impl Default for InfoMap {
	fn default() -> Self {
		Self::empty().claim("name", "name").claim("email", "email")
	}
}
impl<K, V> FromIterator<(K, V)> for InfoMap
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
	{
		iter.into_iter().fold(Self::empty(), |map, (field, claim)| map.claim(field, claim))
	}
}

/// Identity handed to the host on success.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UserIdentity {
	/// Unique user identifier.
	pub uid: String,
	/// Profile fields projected through the info map.
	pub profile: Map<String, Value>,
	/// The full validated claim set.
	pub raw: ClaimSet,
}
