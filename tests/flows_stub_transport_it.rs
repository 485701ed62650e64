// std
use std::{
	collections::HashSet,
	sync::{
		Arc, Mutex,
		atomic::{AtomicUsize, Ordering},
	},
};
// self
use oauth1_handshake::{
	auth::ProviderId,
	error::{Error, UpstreamError},
	flows::Consumer,
	http::{ProviderHttpClient, ProviderRequest, ProviderResponse, TransportFuture},
	provider::{ProviderDescriptor, ProviderEndpoints},
	url::Url,
};

#[derive(Debug, thiserror::Error)]
#[error("stub transport failure")]
struct StubError;

/// Issues a fresh request token per call and honors each verifier exactly once.
#[derive(Default)]
struct StatefulProvider {
	issued: AtomicUsize,
	redeemed: Mutex<HashSet<String>>,
}
impl StatefulProvider {
	fn header_param(request: &ProviderRequest, key: &str) -> Option<String> {
		request
			.authorization
			.trim_start_matches("OAuth ")
			.split(", ")
			.filter_map(|pair| pair.split_once('='))
			.find(|(k, _)| *k == key)
			.map(|(_, v)| v.trim_matches('"').to_owned())
	}
}
impl ProviderHttpClient for StatefulProvider {
	type TransportError = StubError;

	fn execute(&self, request: ProviderRequest) -> TransportFuture<'_, Self::TransportError> {
		Box::pin(async move {
			match request.url.path() {
				"/oauth/request_token" => {
					let n = self.issued.fetch_add(1, Ordering::SeqCst);

					tokio::task::yield_now().await;

					Ok(ProviderResponse::new(
						200,
						format!(
							"oauth_token=tok{n}&oauth_token_secret=tmp{n}&oauth_callback_confirmed=true"
						),
					))
				},
				"/oauth/access_token" => {
					let verifier = Self::header_param(&request, "oauth_verifier").ok_or(StubError)?;
					let fresh = self
						.redeemed
						.lock()
						.expect("Redeemed set lock should not be poisoned.")
						.insert(verifier);

					if fresh {
						Ok(ProviderResponse::new(200, "oauth_token=acc789&oauth_token_secret=sec000"))
					} else {
						Ok(ProviderResponse::new(401, "Invalid or expired token."))
					}
				},
				_ => Err(StubError),
			}
		})
	}
}

fn build_consumer() -> Arc<Consumer<StatefulProvider>> {
	let url = |path: &str| {
		Url::parse(&format!("https://stub.example.com{path}"))
			.expect("Stub endpoint should parse successfully.")
	};
	let descriptor =
		ProviderDescriptor::builder(ProviderId::new("stub").expect("Stub id should be valid."))
			.endpoints(ProviderEndpoints {
				request_token: url("/oauth/request_token"),
				authorize: url("/oauth/authorize"),
				access_token: url("/oauth/access_token"),
			})
			.build()
			.expect("Stub descriptor should build successfully.");

	Arc::new(Consumer::with_http_client(
		descriptor,
		"consumer-it",
		"secret-it",
		url("/callback"),
		StatefulProvider::default(),
	))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_initiates_receive_distinct_tokens() {
	let consumer = build_consumer();
	let handles: Vec<_> = (0..16)
		.map(|_| {
			let consumer = consumer.clone();

			tokio::spawn(async move { consumer.initiate().await })
		})
		.collect();
	let mut tokens = HashSet::new();

	for handle in handles {
		let handshake =
			handle.await.expect("Task should not panic.").expect("Initiate leg should succeed.");
		let suffix = handshake
			.request_token
			.token
			.strip_prefix("tok")
			.expect("Stub tokens carry the tok prefix.");

		// Each flow sees the secret paired with its own token.
		assert_eq!(handshake.request_token.secret.expose(), format!("tmp{suffix}"));
		assert_eq!(
			handshake.authorization_url.query(),
			Some(format!("oauth_token={}", handshake.request_token.token).as_str())
		);
		assert!(tokens.insert(handshake.request_token.token));
	}

	assert_eq!(tokens.len(), 16);
}

#[tokio::test]
async fn replayed_callback_is_rejected_by_provider() {
	let consumer = build_consumer();
	let query = "oauth_token=tok0&oauth_verifier=ver456";
	let first = consumer.complete(query).await.expect("First redemption should succeed.");

	assert_eq!(first.token, "acc789");

	let err = consumer.complete(query).await.expect_err("Replayed verifier must fail.");

	assert!(matches!(err, Error::Upstream(UpstreamError::Rejected { status: 401, .. })));
}
