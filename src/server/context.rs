//! Per-request context enrichment.

// std
use std::convert::Infallible;
// crates.io
use axum::{
	extract::FromRequestParts,
	http::{Method, Uri, request::Parts},
};
// self
use crate::{_prelude::*, flows::Consumer, http::ProviderHttpClient};

/// Request-scoped view over the shared consumer.
///
/// Built by the extractor from the router's typed state, so a handler can never observe a
/// consumer of the wrong type. Extraction cannot fail.
pub struct RequestContext<C>
where
	C: ProviderHttpClient,
{
	consumer: Arc<Consumer<C>>,
	method: Method,
	uri: Uri,
}
impl<C> RequestContext<C>
where
	C: ProviderHttpClient,
{
	/// Wraps `consumer` for a single request.
	pub fn new(consumer: Arc<Consumer<C>>, method: Method, uri: Uri) -> Self {
		Self { consumer, method, uri }
	}

	/// Shared, read-only consumer configuration.
	pub fn consumer(&self) -> &Consumer<C> {
		&self.consumer
	}

	/// Method of the incoming request.
	pub fn method(&self) -> &Method {
		&self.method
	}

	/// URI of the incoming request.
	pub fn uri(&self) -> &Uri {
		&self.uri
	}

	/// Raw query string of the incoming request (empty when absent).
	pub fn query(&self) -> &str {
		self.uri.query().unwrap_or_default()
	}
}
impl<C> Debug for RequestContext<C>
where
	C: ProviderHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RequestContext")
			.field("provider", &self.consumer.descriptor.id)
			.field("method", &self.method)
			.field("uri", &self.uri)
			.finish()
	}
}
impl<C> FromRequestParts<Arc<Consumer<C>>> for RequestContext<C>
where
	C: ProviderHttpClient,
{
	type Rejection = Infallible;

	async fn from_request_parts(
		parts: &mut Parts,
		state: &Arc<Consumer<C>>,
	) -> Result<Self, Self::Rejection> {
		Ok(Self::new(state.clone(), parts.method.clone(), parts.uri.clone()))
	}
}
