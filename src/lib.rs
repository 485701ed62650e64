//! OAuth 1.0a three-legged handshake for a single provider: signed request/access token
//! exchanges, a typed per-request context, and a ready-to-serve axum router.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
#[cfg(feature = "server")] pub mod cli;
pub mod error;
pub mod ext;
pub mod flows;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod provider;
#[cfg(feature = "server")] pub mod server;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		flows::Consumer,
		http::ReqwestHttpClient,
		provider::{ProviderDescriptor, ProviderEndpoints},
	};

	/// Consumer type alias used by reqwest-backed integration tests.
	pub type ReqwestTestConsumer = Consumer<ReqwestHttpClient>;

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Builds a descriptor whose three endpoints live under `base` (typically a mock server).
	pub fn test_descriptor(base: &str) -> ProviderDescriptor {
		let join = |path: &str| {
			Url::parse(&format!("{}{path}", base.trim_end_matches('/')))
				.expect("Mock provider endpoint should parse successfully.")
		};

		ProviderDescriptor::builder(
			crate::auth::ProviderId::new("mock").expect("Mock provider identifier should be valid."),
		)
		.endpoints(ProviderEndpoints {
			request_token: join("/oauth/request_token"),
			authorize: join("/oauth/authorize"),
			access_token: join("/oauth/access_token"),
		})
		.build()
		.expect("Mock provider descriptor should build successfully.")
	}

	/// Constructs a [`Consumer`] backed by the insecure reqwest transport used across
	/// integration tests.
	pub fn build_reqwest_test_consumer(
		descriptor: ProviderDescriptor,
		consumer_key: &str,
		consumer_secret: &str,
		callback_url: &str,
	) -> Arc<ReqwestTestConsumer> {
		let callback =
			Url::parse(callback_url).expect("Callback URL fixture should parse successfully.");

		Arc::new(Consumer::with_http_client(
			descriptor,
			consumer_key,
			consumer_secret,
			callback,
			test_reqwest_http_client(),
		))
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(any(test, feature = "server"))] use color_eyre as _;
#[cfg(test)] use {httpmock as _, serde_json as _, tower as _};
