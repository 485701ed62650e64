//! The two handshake endpoints.

// crates.io
use axum::{
	Json,
	http::{StatusCode, header::LOCATION},
	response::{IntoResponse, Response},
};
use serde_json::Value;
// self
use crate::{_prelude::*, http::ProviderHttpClient, server::RequestContext};

/// `GET /oauth/<provider>`: obtains a request token and answers `302 Found` to the provider's
/// authorize page.
pub async fn initiate<C>(ctx: RequestContext<C>) -> Result<Response>
where
	C: ProviderHttpClient,
{
	let handshake = ctx.consumer().initiate().await?;

	Ok((StatusCode::FOUND, [(LOCATION, handshake.authorization_url.to_string())]).into_response())
}

/// `GET /oauth/<provider>/callback`: exchanges the callback's token and verifier for an access
/// token and answers `200` with a JSON `null` body.
pub async fn callback<C>(ctx: RequestContext<C>) -> Result<Json<Value>>
where
	C: ProviderHttpClient,
{
	ctx.consumer().complete(ctx.query()).await?;

	Ok(Json(Value::Null))
}
