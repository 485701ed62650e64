// self
use crate::{
	_prelude::*,
	auth::ProviderId,
	provider::{ProviderDescriptor, ProviderEndpoints},
};

/// Errors raised while constructing or validating descriptors.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum ProviderDescriptorError {
	/// Request-token endpoint is required for the initiate leg.
	#[error("Missing request_token endpoint.")]
	MissingRequestTokenEndpoint,
	/// Authorize endpoint is required to build the redirect.
	#[error("Missing authorize endpoint.")]
	MissingAuthorizeEndpoint,
	/// Access-token endpoint is required for the callback leg.
	#[error("Missing access_token endpoint.")]
	MissingAccessTokenEndpoint,
	/// Endpoints must be absolute HTTP(S) URLs.
	#[error("The {endpoint} endpoint must be an absolute http(s) URL: {url}.")]
	UnsupportedEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
}

/// Builder for [`ProviderDescriptor`] values.
#[derive(Debug)]
pub struct ProviderDescriptorBuilder {
	/// Identifier for the descriptor being constructed.
	pub id: ProviderId,
	/// Temporary credential request endpoint.
	pub request_token_endpoint: Option<Url>,
	/// Resource owner authorization endpoint.
	pub authorize_endpoint: Option<Url>,
	/// Token credential endpoint.
	pub access_token_endpoint: Option<Url>,
}
impl ProviderDescriptorBuilder {
	/// Creates a new builder seeded with the provided identifier.
	pub fn new(id: ProviderId) -> Self {
		Self {
			id,
			request_token_endpoint: None,
			authorize_endpoint: None,
			access_token_endpoint: None,
		}
	}

	/// Sets the request-token endpoint.
	pub fn request_token_endpoint(mut self, url: Url) -> Self {
		self.request_token_endpoint = Some(url);

		self
	}

	/// Sets the authorize endpoint.
	pub fn authorize_endpoint(mut self, url: Url) -> Self {
		self.authorize_endpoint = Some(url);

		self
	}

	/// Sets the access-token endpoint.
	pub fn access_token_endpoint(mut self, url: Url) -> Self {
		self.access_token_endpoint = Some(url);

		self
	}

	/// Sets all three endpoints at once.
	pub fn endpoints(self, endpoints: ProviderEndpoints) -> Self {
		self.request_token_endpoint(endpoints.request_token)
			.authorize_endpoint(endpoints.authorize)
			.access_token_endpoint(endpoints.access_token)
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<ProviderDescriptor, ProviderDescriptorError> {
		let request_token = self
			.request_token_endpoint
			.ok_or(ProviderDescriptorError::MissingRequestTokenEndpoint)?;
		let authorize =
			self.authorize_endpoint.ok_or(ProviderDescriptorError::MissingAuthorizeEndpoint)?;
		let access_token = self
			.access_token_endpoint
			.ok_or(ProviderDescriptorError::MissingAccessTokenEndpoint)?;
		let descriptor = ProviderDescriptor {
			id: self.id,
			endpoints: ProviderEndpoints { request_token, authorize, access_token },
		};

		descriptor.validate()?;

		Ok(descriptor)
	}
}

impl ProviderDescriptor {
	/// Validates invariants for the descriptor.
	fn validate(&self) -> Result<(), ProviderDescriptorError> {
		validate_endpoint("request_token", &self.endpoints.request_token)?;
		validate_endpoint("authorize", &self.endpoints.authorize)?;
		validate_endpoint("access_token", &self.endpoints.access_token)?;

		Ok(())
	}
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), ProviderDescriptorError> {
	if matches!(url.scheme(), "http" | "https") && url.has_host() && url.fragment().is_none() {
		Ok(())
	} else {
		Err(ProviderDescriptorError::UnsupportedEndpoint { endpoint: name, url: url.to_string() })
	}
}
