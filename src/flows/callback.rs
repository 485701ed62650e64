//! Callback parsing: extract `oauth_token` and `oauth_verifier` from the redirect query.

// self
use crate::{
	_prelude::*,
	auth::{AuthorizationCallback, Verifier},
	error::CallbackParseError,
};

/// Parses the provider's redirect query string (without the leading `?`).
///
/// Both parameters must be present and non-empty, and their values must be well-formed
/// `application/x-www-form-urlencoded` text: every `%` followed by two hex digits, decoding to
/// UTF-8. Repeating a parameter with the same value is tolerated; repeating it with a different
/// value is rejected.
pub fn parse_callback(query: &str) -> Result<AuthorizationCallback, CallbackParseError> {
	let mut token = None;
	let mut verifier = None;

	for pair in query.trim_start_matches('?').split('&').filter(|pair| !pair.is_empty()) {
		let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
		let (slot, param) = match decode_component(raw_key).as_deref() {
			Some("oauth_token") => (&mut token, "oauth_token"),
			Some("oauth_verifier") => (&mut verifier, "oauth_verifier"),
			_ => continue,
		};
		let value = decode_component(raw_value).ok_or(CallbackParseError::Malformed { param })?;

		match slot.as_ref() {
			Some(existing) if existing != &value => {
				return Err(CallbackParseError::Conflicting { param });
			},
			Some(_) => {},
			None => *slot = Some(value),
		}
	}

	let token = token.filter(|value| !value.is_empty()).ok_or(CallbackParseError::MissingToken)?;
	let verifier =
		verifier.filter(|value| !value.is_empty()).ok_or(CallbackParseError::MissingVerifier)?;

	Ok(AuthorizationCallback { token, verifier: Verifier::new(verifier) })
}

/// Parses the query component of a full callback URL.
pub fn parse_callback_url(url: &Url) -> Result<AuthorizationCallback, CallbackParseError> {
	parse_callback(url.query().unwrap_or_default())
}

/// Strictly decodes one form component; `None` on a dangling `%` or non-UTF-8 bytes.
fn decode_component(raw: &str) -> Option<String> {
	let bytes = raw.as_bytes();
	let well_formed = bytes.iter().enumerate().all(|(idx, byte)| {
		*byte != b'%'
			|| (bytes.get(idx + 1).is_some_and(u8::is_ascii_hexdigit)
				&& bytes.get(idx + 2).is_some_and(u8::is_ascii_hexdigit))
	});

	if !well_formed {
		return None;
	}

	urlencoding::decode(&raw.replace('+', " ")).ok().map(|decoded| decoded.into_owned())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn parses_token_and_verifier() {
		let callback =
			parse_callback("oauth_token=tok123&oauth_verifier=ver456").expect("Callback should parse.");

		assert_eq!(callback.token, "tok123");
		assert_eq!(callback.verifier.as_str(), "ver456");
	}

	#[test]
	fn decodes_percent_encoded_values_and_ignores_extras() {
		let url = Url::parse(
			"http://localhost:8080/oauth/twitter/callback?denied=&oauth_token=a%2Bb&oauth_verifier=v%20w",
		)
		.expect("Fixture URL should parse.");
		let callback = parse_callback_url(&url).expect("Callback should parse.");

		assert_eq!(callback.token, "a+b");
		assert_eq!(callback.verifier.as_str(), "v w");
	}

	#[test]
	fn missing_or_empty_parameters_are_rejected() {
		assert_eq!(parse_callback("oauth_token=tok123"), Err(CallbackParseError::MissingVerifier));
		assert_eq!(
			parse_callback("oauth_token=tok123&oauth_verifier="),
			Err(CallbackParseError::MissingVerifier)
		);
		assert_eq!(parse_callback("oauth_verifier=ver456"), Err(CallbackParseError::MissingToken));
		assert_eq!(parse_callback(""), Err(CallbackParseError::MissingToken));
	}

	#[test]
	fn invalid_escapes_are_rejected() {
		assert_eq!(
			parse_callback("oauth_token=tok123&oauth_verifier=%zz"),
			Err(CallbackParseError::Malformed { param: "oauth_verifier" })
		);
		assert_eq!(
			parse_callback("oauth_token=tok%ZZ&oauth_verifier=ver456"),
			Err(CallbackParseError::Malformed { param: "oauth_token" })
		);
		assert_eq!(
			parse_callback("oauth_token=tok123&oauth_verifier=%FF"),
			Err(CallbackParseError::Malformed { param: "oauth_verifier" })
		);
		assert_eq!(
			parse_callback("oauth_token=tok123&oauth_verifier=ver%2"),
			Err(CallbackParseError::Malformed { param: "oauth_verifier" })
		);
	}

	#[test]
	fn malformed_unrelated_parameters_are_ignored() {
		let callback = parse_callback("state=%zz&oauth_token=tok123&oauth_verifier=ver456")
			.expect("Callback should parse.");

		assert_eq!(callback.verifier.as_str(), "ver456");
	}

	#[test]
	fn plus_decodes_to_space_and_encoded_plus_survives() {
		let callback = parse_callback("oauth_token=a+b&oauth_verifier=c%2Bd%E2%98%83")
			.expect("Callback should parse.");

		assert_eq!(callback.token, "a b");
		assert_eq!(callback.verifier.as_str(), "c+d☃");
	}

	#[test]
	fn conflicting_duplicates_are_rejected() {
		assert_eq!(
			parse_callback("oauth_token=a&oauth_verifier=v&oauth_token=b"),
			Err(CallbackParseError::Conflicting { param: "oauth_token" })
		);
		assert!(parse_callback("oauth_token=a&oauth_verifier=v&oauth_verifier=v").is_ok());
	}
}
