//! Twitter (X) OAuth 1.0a endpoint presets.

// self
use crate::{
	_prelude::*,
	auth::ProviderId,
	error::ConfigError,
	provider::{ProviderDescriptor, ProviderEndpoints},
};

/// Route identifier used for the Twitter presets.
pub const PROVIDER_ID: &str = "twitter";

const REQUEST_TOKEN_URL: &str = "https://api.twitter.com/oauth/request_token";
const AUTHORIZE_URL: &str = "https://api.twitter.com/oauth/authorize";
const AUTHENTICATE_URL: &str = "https://api.twitter.com/oauth/authenticate";
const ACCESS_TOKEN_URL: &str = "https://api.twitter.com/oauth/access_token";

/// Descriptor that sends users to `/oauth/authorize` (explicit approval every time).
pub fn authorize() -> Result<ProviderDescriptor> {
	descriptor(AUTHORIZE_URL)
}

/// Descriptor that sends users to `/oauth/authenticate` ("Sign in with Twitter"; previously
/// approved users are redirected back immediately).
pub fn authenticate() -> Result<ProviderDescriptor> {
	descriptor(AUTHENTICATE_URL)
}

fn descriptor(authorize: &str) -> Result<ProviderDescriptor> {
	let parse =
		|value: &str| Url::parse(value).map_err(|source| ConfigError::InvalidEndpoint { source });
	let endpoints = ProviderEndpoints {
		request_token: parse(REQUEST_TOKEN_URL)?,
		authorize: parse(authorize)?,
		access_token: parse(ACCESS_TOKEN_URL)?,
	};
	let id = ProviderId::new(PROVIDER_ID).map_err(ConfigError::from)?;

	ProviderDescriptor::builder(id)
		.endpoints(endpoints)
		.build()
		.map_err(|e| ConfigError::from(e).into())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn presets_differ_only_in_authorize_endpoint() {
		let authorize = authorize().expect("Authorize preset should build.");
		let authenticate = authenticate().expect("Authenticate preset should build.");

		assert_eq!(authorize.id.as_ref(), "twitter");
		assert_eq!(authorize.endpoints.request_token, authenticate.endpoints.request_token);
		assert_eq!(authorize.endpoints.access_token, authenticate.endpoints.access_token);
		assert_eq!(authorize.endpoints.authorize.path(), "/oauth/authorize");
		assert_eq!(authenticate.endpoints.authorize.path(), "/oauth/authenticate");
	}
}
