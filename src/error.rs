//! Handshake-level error types shared across flows, transports, and the router.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical handshake error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Provider rejected the exchange or could not be reached.
	#[error(transparent)]
	Upstream(#[from] UpstreamError),
	/// Authorization callback carried missing or malformed parameters.
	#[error(transparent)]
	CallbackParse(#[from] CallbackParseError),
}

/// Configuration and validation failures raised while assembling a consumer.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Provider descriptor failed validation.
	#[error(transparent)]
	InvalidDescriptor(#[from] crate::provider::ProviderDescriptorError),
	/// Provider endpoint URL cannot be parsed.
	#[error("Provider endpoint URL is invalid.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Callback URL cannot be parsed.
	#[error("Callback URL is invalid.")]
	InvalidCallback {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// MAC implementation refused the signing key.
	#[error("Signing key was rejected: {reason}.")]
	InvalidSigningKey {
		/// Rendered MAC construction failure.
		reason: String,
	},
	/// Rendered `Authorization` header is not a valid header value.
	#[error("Authorization header value is invalid.")]
	InvalidAuthorizationHeader {
		/// Underlying header validation failure.
		#[source]
		source: BoxError,
	},
	/// Provider identifier failed validation.
	#[error("Provider identifier is invalid.")]
	InvalidProviderId(#[from] crate::auth::IdentifierError),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Failures reported by, or while talking to, the provider's token endpoints.
#[derive(Debug, ThisError)]
pub enum UpstreamError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the {endpoint} endpoint.")]
	Transport {
		/// Endpoint label (`request_token` or `access_token`).
		endpoint: &'static str,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Provider answered with a non-success status code.
	#[error("The {endpoint} endpoint rejected the request with status {status}: {body}.")]
	Rejected {
		/// Endpoint label (`request_token` or `access_token`).
		endpoint: &'static str,
		/// HTTP status code returned by the provider.
		status: u16,
		/// Response body preview.
		body: String,
	},
	/// Provider answered successfully but the body lacks required credential fields.
	#[error("The {endpoint} endpoint response is missing oauth_token or oauth_token_secret.")]
	MissingCredentials {
		/// Endpoint label (`request_token` or `access_token`).
		endpoint: &'static str,
	},
	/// Request token response did not confirm the callback (OAuth 1.0a requirement).
	#[error("The request_token endpoint did not set oauth_callback_confirmed to true.")]
	CallbackNotConfirmed,
}
impl UpstreamError {
	const BODY_PREVIEW_LIMIT: usize = 256;

	/// Wraps a transport-specific network error.
	pub fn transport(
		endpoint: &'static str,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Transport { endpoint, source: Box::new(src) }
	}

	/// Builds a [`UpstreamError::Rejected`] with a bounded body preview.
	pub fn rejected(endpoint: &'static str, status: u16, body: &str) -> Self {
		let body = if body.chars().count() <= Self::BODY_PREVIEW_LIMIT {
			body.trim().to_owned()
		} else {
			let mut preview: String = body.chars().take(Self::BODY_PREVIEW_LIMIT).collect();

			preview.push('…');

			preview
		};

		Self::Rejected { endpoint, status, body }
	}

	/// HTTP status returned by the provider, when the failure carried one.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Rejected { status, .. } => Some(*status),
			_ => None,
		}
	}
}

/// Callback query failures; the access-token endpoint is never contacted when these occur.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum CallbackParseError {
	/// The callback query lacks `oauth_token` or carries an empty value.
	#[error("Callback is missing the oauth_token parameter.")]
	MissingToken,
	/// The callback query lacks `oauth_verifier` or carries an empty value.
	#[error("Callback is missing the oauth_verifier parameter.")]
	MissingVerifier,
	/// A parameter carries an invalid percent escape or does not decode to UTF-8.
	#[error("Callback carries a malformed {param} value.")]
	Malformed {
		/// Parameter name.
		param: &'static str,
	},
	/// A parameter was supplied more than once with conflicting values.
	///
	/// Deliberately stricter than first-value-wins form parsing: an ambiguous callback is refused.
	#[error("Callback repeats the {param} parameter with conflicting values.")]
	Conflicting {
		/// Parameter name.
		param: &'static str,
	},
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn rejected_bounds_body_preview() {
		let body = "x".repeat(300);
		let err = UpstreamError::rejected("request_token", 401, &body);
		let UpstreamError::Rejected { body, status, .. } = &err else {
			panic!("Expected a rejected upstream error.");
		};

		assert_eq!(*status, 401);
		assert_eq!(body.chars().count(), 257);
		assert!(body.ends_with('…'));
		assert_eq!(err.status(), Some(401));
	}

	#[test]
	fn upstream_errors_surface_transparently() {
		let err = Error::from(UpstreamError::CallbackNotConfirmed);

		assert_eq!(
			err.to_string(),
			"The request_token endpoint did not set oauth_callback_confirmed to true."
		);
	}
}
