//! Callback leg: exchange the authorized request token and verifier for an access token.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, TokenSecret, Verifier},
	flows::{
		Consumer,
		callback,
		common::{self, ACCESS_TOKEN_ENDPOINT},
	},
	http::ProviderHttpClient,
	obs::{self, HandshakeLeg, HandshakeState},
	oauth::SigningRequest,
};

impl<C> Consumer<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Exchanges `request_token` + `verifier` at the provider's access-token endpoint.
	///
	/// `request_secret` is the temporary secret from the initiate leg; pass
	/// [`TokenSecret::empty`] when it was not retained.
	pub async fn access_token(
		&self,
		request_token: &str,
		request_secret: &TokenSecret,
		verifier: &Verifier,
	) -> Result<AccessToken> {
		let request = access_token_request(
			&self.descriptor.endpoints.access_token,
			request_token,
			request_secret,
			verifier,
		);
		let response = common::send_signed(self, ACCESS_TOKEN_ENDPOINT, request).await?;
		let credentials = common::parse_credentials(ACCESS_TOKEN_ENDPOINT, &response)?;

		Ok(AccessToken::new(credentials.token, credentials.secret))
	}

	/// Runs the whole callback leg against the raw redirect query string.
	///
	/// The temporary secret is not carried between the two legs, so the exchange is signed with
	/// an empty token secret. Malformed callbacks fail before any provider call.
	pub async fn complete(&self, query: &str) -> Result<AccessToken> {
		common::observe_leg(HandshakeLeg::Callback, "complete", async move {
			let callback = common::advance(
				HandshakeState::RequestTokenIssued,
				HandshakeState::CallbackReceived,
				callback::parse_callback(query),
			)?;

			obs::log_callback(&callback);

			let access_token = common::advance(
				HandshakeState::CallbackReceived,
				HandshakeState::AccessTokenIssued,
				self.access_token(&callback.token, &TokenSecret::empty(), &callback.verifier).await,
			)?;

			obs::log_access_token(&access_token);

			Ok(access_token)
		})
		.await
	}
}

fn access_token_request<'a>(
	url: &'a Url,
	request_token: &'a str,
	request_secret: &TokenSecret,
	verifier: &Verifier,
) -> SigningRequest<'a> {
	SigningRequest::new("POST", url)
		.with_token(request_token, request_secret)
		.with_oauth_param("oauth_verifier", verifier.as_str())
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::Mutex;
	// self
	use super::*;
	use crate::{
		error::CallbackParseError,
		http::{ProviderRequest, ProviderResponse, TransportFuture},
		oauth::{SignatureMethod, Signer},
		provider::{ProviderDescriptor, ProviderEndpoints},
	};

	#[derive(Default)]
	struct RecordingTransport {
		requests: Mutex<Vec<ProviderRequest>>,
	}
	impl ProviderHttpClient for RecordingTransport {
		type TransportError = std::io::Error;

		fn execute(&self, request: ProviderRequest) -> TransportFuture<'_, Self::TransportError> {
			self.requests.lock().expect("Recorder lock should not be poisoned.").push(request);

			Box::pin(async {
				Ok(ProviderResponse::new(200, "oauth_token=acc789&oauth_token_secret=sec000"))
			})
		}
	}

	fn consumer() -> Consumer<RecordingTransport> {
		let url = |path: &str| {
			Url::parse(&format!("https://provider.example.com{path}"))
				.expect("Fixture URL should parse.")
		};
		let descriptor = ProviderDescriptor::builder(
			crate::auth::ProviderId::new("stub").expect("Fixture id should be valid."),
		)
		.endpoints(ProviderEndpoints {
			request_token: url("/oauth/request_token"),
			authorize: url("/oauth/authorize"),
			access_token: url("/oauth/access_token"),
		})
		.build()
		.expect("Fixture descriptor should build.");

		Consumer::with_http_client(
			descriptor,
			"consumer-key",
			"consumer-secret",
			url("/callback"),
			RecordingTransport::default(),
		)
	}

	#[derive(Clone, Default)]
	struct CapturedLogs(Arc<Mutex<Vec<u8>>>);
	impl CapturedLogs {
		fn transitions(&self) -> Vec<String> {
			let bytes = self.0.lock().expect("Log buffer lock should not be poisoned.");

			String::from_utf8_lossy(&bytes)
				.lines()
				.filter(|line| line.contains("handshake state transition"))
				.map(str::to_owned)
				.collect()
		}
	}
	impl std::io::Write for CapturedLogs {
		fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
			self.0.lock().expect("Log buffer lock should not be poisoned.").extend_from_slice(buf);

			Ok(buf.len())
		}

		fn flush(&mut self) -> std::io::Result<()> {
			Ok(())
		}
	}

	fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
		let logs = CapturedLogs::default();
		let writer = logs.clone();
		let subscriber = tracing_subscriber::fmt()
			.with_max_level(tracing::Level::DEBUG)
			.with_ansi(false)
			.with_writer(move || writer.clone())
			.finish();

		(logs, tracing::subscriber::set_default(subscriber))
	}

	fn header_params(header: &str) -> BTreeMap<String, String> {
		header
			.trim_start_matches("OAuth ")
			.split(", ")
			.filter_map(|pair| pair.split_once('='))
			.map(|(k, v)| {
				let value = urlencoding::decode(v.trim_matches('"'))
					.expect("Header values should be valid UTF-8.")
					.into_owned();

				(k.to_owned(), value)
			})
			.collect()
	}

	#[tokio::test]
	async fn complete_signs_with_empty_token_secret() {
		let consumer = consumer();
		let access = consumer
			.complete("oauth_token=tok123&oauth_verifier=ver456")
			.await
			.expect("Callback leg should succeed.");

		assert_eq!(access.token, "acc789");
		assert_eq!(access.secret.expose(), "sec000");

		let requests =
			consumer.http_client.requests.lock().expect("Recorder lock should not be poisoned.");

		assert_eq!(requests.len(), 1);

		let params = header_params(&requests[0].authorization);

		assert_eq!(params["oauth_token"], "tok123");
		assert_eq!(params["oauth_verifier"], "ver456");

		// Re-sign with the captured nonce/timestamp and an empty secret; signatures must agree.
		let verifier = Verifier::new("ver456");
		let request = access_token_request(
			&consumer.descriptor.endpoints.access_token,
			"tok123",
			&TokenSecret::empty(),
			&verifier,
		);
		let expected = Signer::new("consumer-key", "consumer-secret", SignatureMethod::HmacSha1)
			.sign_at(
				&request,
				params["oauth_nonce"].clone(),
				params["oauth_timestamp"].parse().expect("Timestamp should be numeric."),
			)
			.expect("Signing should succeed.");

		assert_eq!(expected.signing_key.expose(), "consumer-secret&");
		assert_eq!(params["oauth_signature"], expected.signature());
	}

	#[tokio::test]
	async fn malformed_callback_never_reaches_provider() {
		let consumer = consumer();
		let err = consumer
			.complete("oauth_token=tok123")
			.await
			.expect_err("Missing verifier must fail.");

		assert!(matches!(err, Error::CallbackParse(CallbackParseError::MissingVerifier)));
		assert!(
			consumer
				.http_client
				.requests
				.lock()
				.expect("Recorder lock should not be poisoned.")
				.is_empty()
		);
	}

	#[tokio::test]
	async fn unparseable_callback_fails_before_callback_is_received() {
		let (logs, _guard) = capture_logs();
		let consumer = consumer();
		let err = consumer
			.complete("oauth_token=tok123&oauth_verifier=%zz")
			.await
			.expect_err("Malformed verifier must fail.");

		assert!(matches!(
			err,
			Error::CallbackParse(CallbackParseError::Malformed { param: "oauth_verifier" })
		));

		let transitions = logs.transitions();

		assert_eq!(transitions.len(), 1);
		assert!(transitions[0].contains("request_token_issued"));
		assert!(transitions[0].contains("failed"));
		assert!(!transitions[0].contains("callback_received"));
	}

	#[tokio::test]
	async fn successful_callback_walks_every_state() {
		let (logs, _guard) = capture_logs();

		consumer()
			.complete("oauth_token=tok123&oauth_verifier=ver456")
			.await
			.expect("Callback leg should succeed.");

		let transitions = logs.transitions();

		assert_eq!(transitions.len(), 2);
		assert!(transitions[0].contains("request_token_issued"));
		assert!(transitions[0].contains("callback_received"));
		assert!(transitions[1].contains("callback_received"));
		assert!(transitions[1].contains("access_token_issued"));
	}

	#[tokio::test]
	async fn explicit_request_secret_enters_signing_key() {
		let consumer = consumer();
		let secret = TokenSecret::new("temp-secret");

		consumer
			.access_token("tok123", &secret, &Verifier::new("ver456"))
			.await
			.expect("Exchange should succeed.");

		let requests =
			consumer.http_client.requests.lock().expect("Recorder lock should not be poisoned.");
		let params = header_params(&requests[0].authorization);
		let verifier = Verifier::new("ver456");
		let request = access_token_request(
			&consumer.descriptor.endpoints.access_token,
			"tok123",
			&secret,
			&verifier,
		);
		let expected = consumer
			.signer()
			.sign_at(
				&request,
				params["oauth_nonce"].clone(),
				params["oauth_timestamp"].parse().expect("Timestamp should be numeric."),
			)
			.expect("Signing should succeed.");

		assert_eq!(expected.signing_key.expose(), "consumer-secret&temp-secret");
		assert_eq!(params["oauth_signature"], expected.signature());
	}
}
