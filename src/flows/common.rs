//! Shared helpers for both legs (signed dispatch, response classification, credential parsing).

// self
use crate::{
	_prelude::*,
	error::UpstreamError,
	flows::Consumer,
	http::{ProviderHttpClient, ProviderRequest, ProviderResponse},
	obs::{self, FlowOutcome, HandshakeLeg, HandshakeState},
	oauth::SigningRequest,
};

/// Endpoint label used in errors for the request-token endpoint.
pub const REQUEST_TOKEN_ENDPOINT: &str = "request_token";
/// Endpoint label used in errors for the access-token endpoint.
pub const ACCESS_TOKEN_ENDPOINT: &str = "access_token";

/// `oauth_token` / `oauth_token_secret` pair plus any remaining response parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct CredentialResponse {
	pub(crate) token: String,
	pub(crate) secret: String,
	pub(crate) extra: BTreeMap<String, String>,
}

/// Signs `request`, POSTs it, and rejects non-2xx responses.
pub(crate) async fn send_signed<C>(
	consumer: &Consumer<C>,
	endpoint: &'static str,
	request: SigningRequest<'_>,
) -> Result<ProviderResponse>
where
	C: ?Sized + ProviderHttpClient,
{
	let authorization = consumer.signer().sign(&request)?;
	let outbound = ProviderRequest {
		url: request.url.clone(),
		authorization: authorization.header_value(),
		form: request.form.clone(),
	};
	let response = consumer
		.http_client
		.execute(outbound)
		.await
		.map_err(|e| UpstreamError::transport(endpoint, e))?;

	if !response.is_success() {
		tracing::warn!(endpoint, status = response.status, "provider rejected the request");
		obs::record_upstream_rejection(endpoint, response.status);

		return Err(UpstreamError::rejected(endpoint, response.status, &response.body).into());
	}

	Ok(response)
}

/// Extracts the credential pair from a form-encoded provider response.
pub(crate) fn parse_credentials(
	endpoint: &'static str,
	response: &ProviderResponse,
) -> Result<CredentialResponse> {
	let mut pairs = response.form_pairs();
	let token = pairs.remove("oauth_token").filter(|value| !value.is_empty());
	let secret = pairs.remove("oauth_token_secret").filter(|value| !value.is_empty());

	match (token, secret) {
		(Some(token), Some(secret)) => Ok(CredentialResponse { token, secret, extra: pairs }),
		_ => Err(UpstreamError::MissingCredentials { endpoint }.into()),
	}
}

/// Runs a leg inside its span and records attempt/outcome metrics.
pub(crate) async fn observe_leg<T, Fut>(
	leg: HandshakeLeg,
	stage: &'static str,
	fut: Fut,
) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	let span = obs::FlowSpan::new(leg, stage);

	obs::record_flow_outcome(leg, FlowOutcome::Attempt);

	let result = obs::FlowSpan::instrument(&span, fut).await;

	match &result {
		Ok(_) => obs::record_flow_outcome(leg, FlowOutcome::Success),
		Err(e) => {
			tracing::warn!(leg = leg.as_str(), error = %e, "handshake leg failed");
			obs::record_flow_outcome(leg, FlowOutcome::Failure);
		},
	}

	result
}

/// Records `from -> to` when `result` is `Ok`, or `from -> Failed` otherwise.
pub(crate) fn advance<T, E>(
	from: HandshakeState,
	to: HandshakeState,
	result: Result<T, E>,
) -> Result<T, E> {
	obs::record_transition(from, if result.is_ok() { to } else { HandshakeState::Failed });

	result
}
