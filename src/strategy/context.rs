//! Inbound request view handed to attempts and resolvers.

// self
use crate::_prelude::*;

/// Request parameters and headers for one inbound authentication request.
///
/// Header names are matched case-insensitively; parameter names are exact.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestContext {
	params: BTreeMap<String, String>,
	headers: BTreeMap<String, String>,
}
impl RequestContext {
	/// Creates an empty context.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a context from request parameters.
	pub fn from_params<I, K, V>(params: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		params.into_iter().fold(Self::new(), |ctx, (k, v)| ctx.with_param(k, v))
	}

	/// Adds or replaces a request parameter.
	pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.params.insert(name.into(), value.into());

		self
	}

	/// Adds or replaces a request header.
	pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
		self.headers.insert(name.as_ref().to_ascii_lowercase(), value.into());

		self
	}

	/// Returns a request parameter.
	pub fn param(&self, name: &str) -> Option<&str> {
		self.params.get(name).map(String::as_str)
	}

	/// Returns a request parameter unless it is absent or empty.
	pub fn non_empty_param(&self, name: &str) -> Option<&str> {
		self.param(name).filter(|value| !value.is_empty())
	}

	/// Returns a request header.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
	}
}
