//! Request signing contracts that attach OAuth1 `Authorization` headers to arbitrary HTTP
//! requests on behalf of an access token.

// crates.io
#[cfg(feature = "reqwest")]
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
// self
use crate::auth::AccessToken;
#[cfg(feature = "reqwest")]
use crate::{_prelude::*, error::ConfigError, flows::Consumer, http::ProviderHttpClient};

/// Describes how to sign an outbound request with an [`AccessToken`] without constraining the
/// HTTP client type.
pub trait RequestSignerExt<Request, Error>
where
	Self: Send + Sync,
{
	/// Consumes the provided request and returns it with an OAuth1 `Authorization` header.
	fn attach_token(&self, request: Request, token: &AccessToken) -> Result<Request, Error>;
}

#[cfg(feature = "reqwest")]
impl<C> RequestSignerExt<reqwest::Request, Error> for Consumer<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Query parameters and `application/x-www-form-urlencoded` bodies participate in the
	/// signature; other bodies are ignored.
	fn attach_token(
		&self,
		mut request: reqwest::Request,
		token: &AccessToken,
	) -> Result<reqwest::Request> {
		let form = form_params(&request);
		let authorization =
			self.sign_request(request.method().as_str(), request.url(), &form, token)?;
		let value = HeaderValue::from_str(&authorization.header_value())
			.map_err(|e| ConfigError::InvalidAuthorizationHeader { source: Box::new(e) })?;

		request.headers_mut().insert(AUTHORIZATION, value);

		Ok(request)
	}
}

#[cfg(feature = "reqwest")]
fn form_params(request: &reqwest::Request) -> Vec<(String, String)> {
	let is_form = request
		.headers()
		.get(CONTENT_TYPE)
		.and_then(|value| value.to_str().ok())
		.is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

	if !is_form {
		return Vec::new();
	}

	request
		.body()
		.and_then(|body| body.as_bytes())
		.map(|bytes| url::form_urlencoded::parse(bytes).into_owned().collect())
		.unwrap_or_default()
}
