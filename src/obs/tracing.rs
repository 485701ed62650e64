// crates.io
use tracing::{Instrument, instrument::Instrumented};
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, AuthorizationCallback, RequestToken},
	obs::{HandshakeLeg, HandshakeState},
};

const DIAGNOSTICS_TARGET: &str = "oauth1_handshake::diagnostics";

/// A span builder used by handshake legs.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	span: tracing::Span,
}
impl FlowSpan {
	/// Creates a new span tagged with the provided leg + stage.
	pub fn new(leg: HandshakeLeg, stage: &'static str) -> Self {
		Self { span: tracing::info_span!("oauth1_handshake.flow", leg = leg.as_str(), stage) }
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> Instrumented<Fut>
	where
		Fut: Future,
	{
		fut.instrument(self.span.clone())
	}
}

/// Emits a state-machine transition.
pub fn record_transition(from: HandshakeState, to: HandshakeState) {
	tracing::debug!(from = from.as_str(), to = to.as_str(), "handshake state transition");
}

/// Logs the temporary credential issued by the request-token endpoint.
pub fn log_request_token(request_token: &RequestToken) {
	tracing::info!(
		target: DIAGNOSTICS_TARGET,
		request_token = %request_token.token,
		request_secret = %request_token.secret.expose(),
		"request token issued"
	);
}

/// Logs the authorization URL the user is redirected to.
pub fn log_authorization_url(url: &Url) {
	tracing::info!(target: DIAGNOSTICS_TARGET, authorization_url = %url, "redirecting to provider");
}

/// Logs the parameters parsed from the provider's callback.
pub fn log_callback(callback: &AuthorizationCallback) {
	tracing::info!(
		target: DIAGNOSTICS_TARGET,
		request_token = %callback.token,
		verifier = %callback.verifier,
		"authorization callback received"
	);
}

/// Logs the permanent credential issued by the access-token endpoint.
pub fn log_access_token(access_token: &AccessToken) {
	tracing::info!(
		target: DIAGNOSTICS_TARGET,
		access_token = %access_token.token,
		access_secret = %access_token.secret.expose(),
		"access token issued"
	);
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = FlowSpan::new(HandshakeLeg::Initiate, "instrument_wraps_future");
		let value = FlowSpan::instrument(&span, async { 42 }).await;

		assert_eq!(value, 42);
	}

	#[test]
	fn diagnostics_do_not_panic_without_subscriber() {
		record_transition(HandshakeState::Start, HandshakeState::RequestTokenIssued);
		log_request_token(&RequestToken::new("tok", "secret"));
		log_access_token(&AccessToken::new("acc", "sec"));
	}
}
