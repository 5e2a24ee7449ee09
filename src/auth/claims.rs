//! Decoded claim sets.

// crates.io
use serde_json::{Map, Value};
// self
use crate::_prelude::*;

/// Claim name carrying the token issuance timestamp.
pub const ISSUED_AT: &str = "iat";

/// Decoded token payload: claim name to JSON value, in payload order.
///
/// A claim set is produced once per attempt and never mutated afterwards.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet(Map<String, Value>);
impl ClaimSet {
	/// Wraps an already decoded payload.
	pub fn new(claims: Map<String, Value>) -> Self {
		Self(claims)
	}

	/// Returns the value for `name`, if present.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.0.get(name)
	}

	/// Returns true when `name` is a key of the payload, even if its value is `null`.
	pub fn contains(&self, name: &str) -> bool {
		self.0.contains_key(name)
	}

	/// Returns the `iat` claim unless it is absent, `null`, or `false`.
	pub fn issued_at(&self) -> Option<&Value> {
		self.get(ISSUED_AT).filter(|value| !matches!(value, Value::Null | Value::Bool(false)))
	}

	/// Number of claims.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if the payload has no claims.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterator over `(name, value)` pairs in payload order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Borrows the underlying JSON object.
	pub fn as_map(&self) -> &Map<String, Value> {
		&self.0
	}

	/// Consumes the claim set, returning the underlying JSON object.
	pub fn into_inner(self) -> Map<String, Value> {
		self.0
	}
}
impl From<Map<String, Value>> for ClaimSet {
	fn from(value: Map<String, Value>) -> Self {
		Self(value)
	}
}
impl FromIterator<(String, Value)> for ClaimSet {
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = (String, Value)>,
	{
		Self(iter.into_iter().collect())
	}
}
