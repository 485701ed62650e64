//! Signature base string construction and signature methods.

// std
use std::borrow::Cow;
// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::Sha256;
// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError};

/// Signature methods understood by OAuth 1.0a providers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureMethod {
	/// `HMAC-SHA1` (RFC 5849 §3.4.2), the method every provider accepts.
	#[default]
	#[serde(rename = "HMAC-SHA1")]
	HmacSha1,
	/// `HMAC-SHA256`, offered by some providers as a stronger alternative.
	#[serde(rename = "HMAC-SHA256")]
	HmacSha256,
	/// `PLAINTEXT` (RFC 5849 §3.4.4); only safe over TLS.
	#[serde(rename = "PLAINTEXT")]
	Plaintext,
}
impl SignatureMethod {
	/// Returns the `oauth_signature_method` value.
	pub const fn as_str(self) -> &'static str {
		match self {
			SignatureMethod::HmacSha1 => "HMAC-SHA1",
			SignatureMethod::HmacSha256 => "HMAC-SHA256",
			SignatureMethod::Plaintext => "PLAINTEXT",
		}
	}

	/// Signs `base_string` with `key` and returns the `oauth_signature` value (unencoded).
	///
	/// `PLAINTEXT` ignores the base string and returns the key itself.
	pub fn sign(self, base_string: &str, key: &str) -> Result<String> {
		match self {
			SignatureMethod::HmacSha1 => hmac_base64::<Hmac<Sha1>>(base_string, key),
			SignatureMethod::HmacSha256 => hmac_base64::<Hmac<Sha256>>(base_string, key),
			SignatureMethod::Plaintext => Ok(key.to_owned()),
		}
	}
}
impl Display for SignatureMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for SignatureMethod {
	type Err = UnknownSignatureMethod;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_uppercase().as_str() {
			"HMAC-SHA1" => Ok(SignatureMethod::HmacSha1),
			"HMAC-SHA256" => Ok(SignatureMethod::HmacSha256),
			"PLAINTEXT" => Ok(SignatureMethod::Plaintext),
			_ => Err(UnknownSignatureMethod(s.to_owned())),
		}
	}
}

/// Error returned when parsing an unsupported `oauth_signature_method`.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unsupported signature method `{0}`.")]
pub struct UnknownSignatureMethod(pub String);

/// RFC 3986 percent encoding: everything except `ALPHA / DIGIT / "-" / "." / "_" / "~"`.
pub fn percent_encode(value: &str) -> Cow<'_, str> {
	urlencoding::encode(value)
}

/// Builds the signing key `enc(consumer_secret)&enc(token_secret)`.
///
/// Before a token exists (request-token leg) the token secret is empty and the key ends in `&`.
pub fn signing_key(consumer_secret: &TokenSecret, token_secret: &TokenSecret) -> String {
	format!("{}&{}", consumer_secret.percent_encoded(), token_secret.percent_encoded())
}

/// Base string URI: lowercase scheme and host, default ports dropped, no query or fragment.
pub fn base_string_uri(url: &Url) -> String {
	let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
	let mut uri = format!("{}://{host}", url.scheme().to_ascii_lowercase());

	// `Url::port` is `None` when the port is the scheme's default.
	if let Some(port) = url.port() {
		uri.push(':');
		uri.push_str(&port.to_string());
	}

	uri.push_str(url.path());

	uri
}

/// Normalizes request parameters: encode each key and value, sort, and join as `k=v&k=v`.
pub fn normalize_parameters<'a, I>(params: I) -> String
where
	I: IntoIterator<Item = (&'a str, &'a str)>,
{
	let mut encoded: Vec<(Cow<str>, Cow<str>)> =
		params.into_iter().map(|(k, v)| (percent_encode(k), percent_encode(v))).collect();

	encoded.sort();

	let mut buf = String::new();

	for (idx, (key, value)) in encoded.iter().enumerate() {
		if idx > 0 {
			buf.push('&');
		}

		buf.push_str(key);
		buf.push('=');
		buf.push_str(value);
	}

	buf
}

/// Builds the signature base string for `http_method url` with the given protocol and form
/// parameters. Query parameters are read from `url` itself.
pub fn signature_base_string(
	http_method: &str,
	url: &Url,
	oauth_params: &BTreeMap<&'static str, String>,
	form: &[(String, String)],
) -> String {
	let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
	let params = oauth_params
		.iter()
		.map(|(k, v)| (*k, v.as_str()))
		.chain(query.iter().map(|(k, v)| (k.as_str(), v.as_str())))
		.chain(form.iter().map(|(k, v)| (k.as_str(), v.as_str())));

	format!(
		"{}&{}&{}",
		http_method.to_ascii_uppercase(),
		percent_encode(&base_string_uri(url)),
		percent_encode(&normalize_parameters(params))
	)
}

fn hmac_base64<M>(base_string: &str, key: &str) -> Result<String>
where
	M: Mac + hmac::digest::KeyInit,
{
	let mut mac = <M as hmac::digest::KeyInit>::new_from_slice(key.as_bytes())
		.map_err(|e| ConfigError::InvalidSigningKey { reason: e.to_string() })?;

	mac.update(base_string.as_bytes());

	Ok(STANDARD.encode(mac.finalize().into_bytes()))
}
