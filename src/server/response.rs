//! HTTP rendering of handshake errors.

// crates.io
use axum::{
	Json,
	http::StatusCode,
	response::{IntoResponse, Response},
};
use serde_json::json;
// self
use crate::_prelude::*;

impl Error {
	/// Status code the router answers with for this error.
	pub fn status_code(&self) -> StatusCode {
		match self {
			Error::CallbackParse(_) => StatusCode::BAD_REQUEST,
			Error::Upstream(_) => StatusCode::BAD_GATEWAY,
			Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}
impl IntoResponse for Error {
	fn into_response(self) -> Response {
		let status = self.status_code();

		if status.is_server_error() {
			tracing::error!(status = status.as_u16(), error = %self, "handshake request failed");
		} else {
			tracing::info!(status = status.as_u16(), error = %self, "handshake request rejected");
		}

		(status, Json(json!({ "error": self.to_string() }))).into_response()
	}
}
