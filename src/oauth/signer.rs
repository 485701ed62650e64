//! Protocol parameter assembly and `Authorization` header rendering.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use rand::RngCore;
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	oauth::{SignatureMethod, percent_encode, signature_base_string, signing_key},
};

const NONCE_BYTES: usize = 32;
const OAUTH_VERSION: &str = "1.0";

/// Consumer-side signer holding the client credentials and the chosen signature method.
#[derive(Clone)]
pub struct Signer {
	consumer_key: String,
	consumer_secret: TokenSecret,
	method: SignatureMethod,
}
impl Signer {
	/// Creates a signer for the provided consumer credentials.
	pub fn new(
		consumer_key: impl Into<String>,
		consumer_secret: impl Into<String>,
		method: SignatureMethod,
	) -> Self {
		Self {
			consumer_key: consumer_key.into(),
			consumer_secret: TokenSecret::new(consumer_secret),
			method,
		}
	}

	/// Replaces the signature method.
	pub fn with_method(mut self, method: SignatureMethod) -> Self {
		self.method = method;

		self
	}

	/// Consumer key placed in `oauth_consumer_key`.
	pub fn consumer_key(&self) -> &str {
		&self.consumer_key
	}

	/// Signature method placed in `oauth_signature_method`.
	pub fn method(&self) -> SignatureMethod {
		self.method
	}

	/// Signs `request` with a fresh nonce and the current timestamp.
	pub fn sign(&self, request: &SigningRequest) -> Result<Authorization> {
		self.sign_at(request, generate_nonce(), OffsetDateTime::now_utc().unix_timestamp())
	}

	/// Signs `request` with an explicit nonce and timestamp.
	pub fn sign_at(
		&self,
		request: &SigningRequest,
		nonce: impl Into<String>,
		timestamp: i64,
	) -> Result<Authorization> {
		let mut params = BTreeMap::from([
			("oauth_consumer_key", self.consumer_key.clone()),
			("oauth_nonce", nonce.into()),
			("oauth_signature_method", self.method.as_str().to_owned()),
			("oauth_timestamp", timestamp.to_string()),
			("oauth_version", OAUTH_VERSION.to_owned()),
		]);

		if let Some(token) = request.token {
			params.insert("oauth_token", token.to_owned());
		}
		for (key, value) in &request.oauth_extra {
			params.insert(*key, value.clone());
		}

		let base_string =
			signature_base_string(request.http_method, request.url, &params, &request.form);
		let key = signing_key(&self.consumer_secret, &request.token_secret);
		let signature = self.method.sign(&base_string, &key)?;

		params.insert("oauth_signature", signature);

		Ok(Authorization { params, base_string, signing_key: TokenSecret::new(key) })
	}
}
impl Debug for Signer {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Signer")
			.field("consumer_key", &self.consumer_key)
			.field("consumer_secret", &self.consumer_secret)
			.field("method", &self.method)
			.finish()
	}
}

/// Everything about an outbound request that participates in its signature.
#[derive(Clone, Debug)]
pub struct SigningRequest<'a> {
	/// HTTP method (upper-cased during signing).
	pub http_method: &'a str,
	/// Target URL; its query parameters are included in the signature.
	pub url: &'a Url,
	/// `application/x-www-form-urlencoded` body parameters.
	pub form: Vec<(String, String)>,
	/// `oauth_token` value, when signing on behalf of a token.
	pub token: Option<&'a str>,
	/// Secret paired with `token`; empty before any token exists.
	pub token_secret: TokenSecret,
	/// Additional `oauth_*` protocol parameters (`oauth_callback`, `oauth_verifier`).
	pub oauth_extra: Vec<(&'static str, String)>,
}
impl<'a> SigningRequest<'a> {
	/// Starts a request description without a token.
	pub fn new(http_method: &'a str, url: &'a Url) -> Self {
		Self {
			http_method,
			url,
			form: Vec::new(),
			token: None,
			token_secret: TokenSecret::empty(),
			oauth_extra: Vec::new(),
		}
	}

	/// Signs on behalf of `token`, using `secret` in the signing key.
	pub fn with_token(mut self, token: &'a str, secret: &TokenSecret) -> Self {
		self.token = Some(token);
		self.token_secret = secret.clone();

		self
	}

	/// Adds a form body parameter.
	pub fn with_form_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.form.push((key.into(), value.into()));

		self
	}

	/// Adds an extra `oauth_*` protocol parameter.
	pub fn with_oauth_param(mut self, key: &'static str, value: impl Into<String>) -> Self {
		self.oauth_extra.push((key, value.into()));

		self
	}
}

/// Signed protocol parameters ready to be rendered as an `Authorization` header.
#[derive(Clone, Debug)]
pub struct Authorization {
	/// Every `oauth_*` parameter, including `oauth_signature`.
	pub params: BTreeMap<&'static str, String>,
	/// Signature base string the signature was computed over.
	pub base_string: String,
	/// Signing key used for the MAC (redacted in debug output).
	pub signing_key: TokenSecret,
}
impl Authorization {
	/// Computed `oauth_signature` value (unencoded).
	pub fn signature(&self) -> &str {
		self.params.get("oauth_signature").map(String::as_str).unwrap_or_default()
	}

	/// Renders `OAuth k="v", ...` with keys sorted and values percent-encoded.
	pub fn header_value(&self) -> String {
		let mut header = String::from("OAuth ");

		for (idx, (key, value)) in self.params.iter().enumerate() {
			if idx > 0 {
				header.push_str(", ");
			}

			header.push_str(key);
			header.push_str("=\"");
			header.push_str(&percent_encode(value));
			header.push('"');
		}

		header
	}
}

/// Generates a base64 nonce from 32 random bytes.
pub fn generate_nonce() -> String {
	let mut bytes = [0_u8; NONCE_BYTES];

	rand::rng().fill_bytes(&mut bytes);

	STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn signer() -> Signer {
		Signer::new("consumer-key", "consumer-secret", SignatureMethod::HmacSha1)
	}

	#[test]
	fn request_token_leg_signs_with_callback_and_empty_token_secret() {
		let url = Url::parse("https://provider.example.com/oauth/request_token")
			.expect("Fixture URL should parse.");
		let request = SigningRequest::new("POST", &url)
			.with_oauth_param("oauth_callback", "http://localhost:8080/oauth/twitter/callback");
		let auth =
			signer().sign_at(&request, "nonce", 1_700_000_000).expect("Signing should succeed.");

		assert_eq!(auth.signing_key.expose(), "consumer-secret&");
		assert!(!auth.params.contains_key("oauth_token"));
		assert_eq!(auth.params["oauth_version"], "1.0");
		assert!(auth.base_string.starts_with(
			"POST&https%3A%2F%2Fprovider.example.com%2Foauth%2Frequest_token&oauth_callback%3Dhttp%253A%252F%252Flocalhost%253A8080"
		));

		let header = auth.header_value();

		assert!(header.starts_with(
			"OAuth oauth_callback=\"http%3A%2F%2Flocalhost%3A8080%2Foauth%2Ftwitter%2Fcallback\", oauth_consumer_key=\"consumer-key\", oauth_nonce=\"nonce\""
		));

		let expected = format!("oauth_signature=\"{}\"", percent_encode(auth.signature()));

		assert!(header.contains(&expected));
	}

	#[test]
	fn signing_is_deterministic_for_fixed_nonce_and_timestamp() {
		let url = Url::parse("https://provider.example.com/resource?b=2&a=1")
			.expect("Fixture URL should parse.");
		let secret = TokenSecret::new("token-secret");
		let request = SigningRequest::new("GET", &url).with_token("token", &secret);
		let first = signer().sign_at(&request, "n", 1).expect("Signing should succeed.");
		let second = signer().sign_at(&request, "n", 1).expect("Signing should succeed.");
		let third = signer().sign_at(&request, "n", 2).expect("Signing should succeed.");

		assert_eq!(first.signature(), second.signature());
		assert_ne!(first.signature(), third.signature());
		assert_eq!(first.signing_key.expose(), "consumer-secret&token-secret");
		assert!(first.base_string.contains("a%3D1%26b%3D2%26oauth_consumer_key"));
	}

	#[test]
	fn nonces_are_unique_base64() {
		let a = generate_nonce();
		let b = generate_nonce();

		assert_ne!(a, b);
		assert_eq!(a.len(), 44);
	}

	#[test]
	fn debug_output_redacts_consumer_secret() {
		let rendered = format!("{:?}", signer());

		assert!(!rendered.contains("consumer-secret"));
		assert!(rendered.contains("consumer-key"));
	}
}
