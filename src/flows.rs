//! Handshake orchestration for the two OAuth1 legs.

pub mod access_token;
pub mod callback;
pub mod common;
pub mod request_token;

pub use access_token::*;
pub use callback::*;
pub use request_token::*;

// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	http::ProviderHttpClient,
	oauth::{Authorization, SignatureMethod, Signer, SigningRequest},
	provider::ProviderDescriptor,
};
#[cfg(feature = "reqwest")] use crate::{error::ConfigError, http::ReqwestHttpClient};

#[cfg(feature = "reqwest")]
/// Consumer specialized for the crate's default reqwest transport.
pub type ReqwestConsumer = Consumer<ReqwestHttpClient>;

/// Shared, read-only OAuth1 configuration for a single provider.
///
/// The consumer owns the HTTP transport, provider descriptor, consumer credentials, and
/// callback URL. It holds no per-flow state: every handshake leg reads it through a shared
/// reference, so one `Arc<Consumer<_>>` serves any number of concurrent flows.
pub struct Consumer<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// HTTP client used for every outbound provider request.
	pub http_client: Arc<C>,
	/// Provider descriptor that defines the OAuth1 endpoints.
	pub descriptor: ProviderDescriptor,
	/// Callback URL announced in `oauth_callback` during the initiate leg.
	pub callback_url: Url,
	signer: Signer,
}
impl<C> Consumer<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Creates a consumer that reuses the caller-provided transport.
	pub fn with_http_client(
		descriptor: ProviderDescriptor,
		consumer_key: impl Into<String>,
		consumer_secret: impl Into<String>,
		callback_url: Url,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			descriptor,
			callback_url,
			signer: Signer::new(consumer_key, consumer_secret, SignatureMethod::default()),
		}
	}

	/// Replaces the signature method (defaults to `HMAC-SHA1`).
	pub fn with_signature_method(mut self, method: SignatureMethod) -> Self {
		self.signer = self.signer.with_method(method);

		self
	}

	/// Consumer key sent as `oauth_consumer_key`.
	pub fn consumer_key(&self) -> &str {
		self.signer.consumer_key()
	}

	/// Signer configured with this consumer's credentials.
	pub fn signer(&self) -> &Signer {
		&self.signer
	}

	/// Signs an arbitrary protected-resource request on behalf of `access_token`.
	pub fn sign_request(
		&self,
		http_method: &str,
		url: &Url,
		form: &[(String, String)],
		access_token: &AccessToken,
	) -> Result<Authorization> {
		let mut request = SigningRequest::new(http_method, url)
			.with_token(&access_token.token, &access_token.secret);

		request.form = form.to_vec();

		self.signer.sign(&request)
	}
}
#[cfg(feature = "reqwest")]
impl Consumer<ReqwestHttpClient> {
	/// Creates a new consumer backed by a default reqwest transport.
	pub fn new(
		descriptor: ProviderDescriptor,
		consumer_key: impl Into<String>,
		consumer_secret: impl Into<String>,
		callback_url: &str,
	) -> Result<Self> {
		let callback_url =
			Url::parse(callback_url).map_err(|source| ConfigError::InvalidCallback { source })?;

		Ok(Self::with_http_client(
			descriptor,
			consumer_key,
			consumer_secret,
			callback_url,
			ReqwestHttpClient::default(),
		))
	}
}
impl<C> Debug for Consumer<C>
where
	C: ?Sized + ProviderHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Consumer")
			.field("descriptor", &self.descriptor)
			.field("callback_url", &self.callback_url.as_str())
			.field("signer", &self.signer)
			.finish()
	}
}
