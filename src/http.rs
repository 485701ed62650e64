//! Transport primitives for OAuth1 credential exchanges.
//!
//! The module exposes [`ProviderHttpClient`] alongside [`ProviderRequest`] and
//! [`ProviderResponse`] so downstream crates (and tests) can plug in custom HTTP stacks or
//! in-process provider stubs. The crate ships [`ReqwestHttpClient`] behind the `reqwest`
//! feature.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")] use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
// self
use crate::_prelude::*;

/// Boxed future returned by [`ProviderHttpClient::execute`].
pub type TransportFuture<'a, E> =
	Pin<Box<dyn Future<Output = Result<ProviderResponse, E>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of POSTing signed OAuth1 requests.
///
/// Implementations must be `Send + Sync + 'static` so one transport can be shared by every
/// concurrent handshake behind an `Arc`, and their futures must be `Send` so handlers can run on
/// a multi-threaded executor. Non-success HTTP statuses are NOT transport errors: return them
/// as a [`ProviderResponse`] and let the flow classify them.
pub trait ProviderHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `request` and resolves with the provider's status and body.
	fn execute(&self, request: ProviderRequest) -> TransportFuture<'_, Self::TransportError>;
}

/// Signed `POST` destined for one of the provider's credential endpoints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderRequest {
	/// Endpoint URL.
	pub url: Url,
	/// Rendered `Authorization: OAuth ...` header value.
	pub authorization: String,
	/// Form body parameters (usually empty; OAuth parameters travel in the header).
	pub form: Vec<(String, String)>,
}

/// Raw provider response captured by the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body decoded as UTF-8.
	pub body: String,
}
impl ProviderResponse {
	/// Convenience constructor used by custom transports and stubs.
	pub fn new(status: u16, body: impl Into<String>) -> Self {
		Self { status, body: body.into() }
	}

	/// Whether the status code is in the 2xx range.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Decodes an `application/x-www-form-urlencoded` body. Later duplicates win.
	pub fn form_pairs(&self) -> BTreeMap<String, String> {
		url::form_urlencoded::parse(self.body.trim().as_bytes()).into_owned().collect()
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`] (for example one configured with a timeout).
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ProviderHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: ProviderRequest) -> TransportFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let body = url::form_urlencoded::Serializer::new(String::new())
				.extend_pairs(request.form.iter())
				.finish();
			let response = client
				.post(request.url)
				.header(AUTHORIZATION, request.authorization)
				.header(CONTENT_TYPE, "application/x-www-form-urlencoded")
				.body(body)
				.send()
				.await?;
			let status = response.status().as_u16();
			let body = response.text().await?;

			Ok(ProviderResponse { status, body })
		})
	}
}
#[cfg(feature = "reqwest")]
impl Debug for ReqwestHttpClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("ReqwestHttpClient(..)")
	}
}
