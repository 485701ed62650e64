//! Secret wrapper for consumer, temporary, and access token secrets.

// std
use std::borrow::Cow;
// self
use crate::_prelude::*;

/// OAuth1 secret that never reaches `Debug` or `Display` output.
///
/// The empty secret is meaningful in OAuth1: it is the token half of the signing key before a
/// token exists, so formatters render it as `<empty>` instead of `<redacted>`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Placeholder used when no token secret is available.
	pub fn empty() -> Self {
		Self::default()
	}

	/// Returns the inner secret. Only the diagnostics target is expected to log it.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Whether this is the empty placeholder.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// RFC 3986 encoded form, as it appears in a signing key.
	pub fn percent_encoded(&self) -> Cow<'_, str> {
		urlencoding::encode(&self.0)
	}

	fn label(&self) -> &'static str {
		if self.is_empty() { "<empty>" } else { "<redacted>" }
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&self.label()).finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.label())
	}
}
