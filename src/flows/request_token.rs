//! Initiate leg: obtain a temporary credential and build the authorize redirect.
//!
//! The request-token call announces the consumer's callback URL via `oauth_callback` and is
//! signed with the consumer secret and an empty token secret. OAuth 1.0a providers must answer
//! with `oauth_callback_confirmed=true`; anything else is treated as an upstream failure. The
//! temporary secret is returned to the caller and never stored by the consumer.

// self
use crate::{
	_prelude::*,
	auth::RequestToken,
	error::UpstreamError,
	flows::{
		Consumer,
		common::{self, REQUEST_TOKEN_ENDPOINT},
	},
	http::ProviderHttpClient,
	obs::{self, HandshakeLeg, HandshakeState},
	oauth::SigningRequest,
};

/// Outcome of [`Consumer::initiate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InitiatedHandshake {
	/// Temporary credential issued by the provider.
	pub request_token: RequestToken,
	/// Authorize endpoint carrying `oauth_token`; send the user here with a 302.
	pub authorization_url: Url,
}

impl<C> Consumer<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Requests a temporary credential from the provider's request-token endpoint.
	pub async fn request_token(&self) -> Result<RequestToken> {
		let url = &self.descriptor.endpoints.request_token;
		let request = SigningRequest::new("POST", url)
			.with_oauth_param("oauth_callback", self.callback_url.as_str());
		let response = common::send_signed(self, REQUEST_TOKEN_ENDPOINT, request).await?;
		let credentials = common::parse_credentials(REQUEST_TOKEN_ENDPOINT, &response)?;

		if credentials.extra.get("oauth_callback_confirmed").map(String::as_str) != Some("true") {
			return Err(UpstreamError::CallbackNotConfirmed.into());
		}

		Ok(RequestToken::new(credentials.token, credentials.secret))
	}

	/// Builds the URL the user must visit to approve `request_token`.
	pub fn authorization_url(&self, request_token: &RequestToken) -> Url {
		self.descriptor.authorization_url(&request_token.token)
	}

	/// Runs the whole initiate leg: request token, diagnostics, authorization URL.
	pub async fn initiate(&self) -> Result<InitiatedHandshake> {
		common::observe_leg(HandshakeLeg::Initiate, "initiate", async move {
			let request_token = common::advance(
				HandshakeState::Start,
				HandshakeState::RequestTokenIssued,
				self.request_token().await,
			)?;

			obs::log_request_token(&request_token);

			let authorization_url = self.authorization_url(&request_token);

			obs::log_authorization_url(&authorization_url);

			Ok(InitiatedHandshake { request_token, authorization_url })
		})
		.await
	}
}
