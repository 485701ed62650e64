//! OAuth1 credential pairs exchanged during the three-legged handshake.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Temporary credential issued by the request-token endpoint.
///
/// Only the `token` half travels through the user's browser; the secret stays with whoever
/// performed the initiate step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestToken {
	/// Public `oauth_token` value echoed back by the provider on callback.
	pub token: String,
	/// Temporary credential secret (`oauth_token_secret`).
	pub secret: TokenSecret,
}
impl RequestToken {
	/// Pairs a temporary token with its secret.
	pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
		Self { token: token.into(), secret: TokenSecret::new(secret) }
	}
}

/// Permanent credential issued by the access-token endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
	/// Access `oauth_token` value.
	pub token: String,
	/// Access token secret (`oauth_token_secret`).
	pub secret: TokenSecret,
}
impl AccessToken {
	/// Pairs an access token with its secret.
	pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
		Self { token: token.into(), secret: TokenSecret::new(secret) }
	}
}

/// Opaque `oauth_verifier` proving the user authorized a request token.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Verifier(String);
impl Verifier {
	/// Wraps a verifier value.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the raw verifier string.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for Verifier {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Display for Verifier {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// Parameters carried by the provider's redirect back to the callback URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationCallback {
	/// Request token echoed by the provider.
	pub token: String,
	/// Verifier issued after the user approved the request token.
	pub verifier: Verifier,
}
