//! Provider descriptor data structures shared by both handshake legs.

/// Builder API for assembling provider descriptors.
pub mod builder;

pub use builder::*;

// crates.io
use serde::Deserializer;
// self
use crate::{_prelude::*, auth::ProviderId};

/// Endpoint set declared by an OAuth1 provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
	/// Temporary credential request endpoint.
	pub request_token: Url,
	/// Resource owner authorization endpoint (browser redirect target).
	pub authorize: Url,
	/// Token credential (access token) endpoint.
	pub access_token: Url,
}

/// Immutable provider descriptor consumed by the handshake.
///
/// Deserialization goes through [`ProviderDescriptorBuilder`], so decoded descriptors obey the
/// same endpoint rules as built ones.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProviderDescriptor {
	/// Descriptor identifier; doubles as the route segment in `/oauth/<provider>`.
	pub id: ProviderId,
	/// Endpoint definitions exposed by the provider.
	pub endpoints: ProviderEndpoints,
}
impl ProviderDescriptor {
	/// Creates a new builder for the provided identifier.
	pub fn builder(id: ProviderId) -> ProviderDescriptorBuilder {
		ProviderDescriptorBuilder::new(id)
	}

	/// Authorize endpoint with `oauth_token` appended; existing query parameters are kept.
	pub fn authorization_url(&self, request_token: &str) -> Url {
		let mut url = self.endpoints.authorize.clone();

		url.query_pairs_mut().append_pair("oauth_token", request_token);

		url
	}
}

impl<'de> Deserialize<'de> for ProviderDescriptor {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		#[derive(Deserialize)]
		struct Unvalidated {
			id: ProviderId,
			endpoints: ProviderEndpoints,
		}

		let raw = Unvalidated::deserialize(deserializer)?;

		ProviderDescriptor::builder(raw.id)
			.endpoints(raw.endpoints)
			.build()
			.map_err(serde::de::Error::custom)
	}
}
