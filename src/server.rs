//! axum surface for the handshake: the typed per-request context, both handlers, and a router
//! that wires them to `/oauth/<provider>` and `/oauth/<provider>/callback`.

pub mod context;
pub mod handlers;

mod response;

pub use context::*;
pub use handlers::*;

// crates.io
use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
// self
use crate::{_prelude::*, flows::Consumer, http::ProviderHttpClient};

/// Builds the handshake router for `consumer`.
///
/// The consumer becomes the router state; [`RequestContext`] hands it to each handler. Panics
/// inside a handler are turned into 500 responses and every request is traced.
pub fn router<C>(consumer: Arc<Consumer<C>>) -> Router
where
	C: ProviderHttpClient,
{
	let initiate_path = format!("/oauth/{}", consumer.descriptor.id);
	let callback_path = format!("{initiate_path}/callback");

	Router::new()
		.route(&initiate_path, get(handlers::initiate::<C>))
		.route(&callback_path, get(handlers::callback::<C>))
		.layer(CatchPanicLayer::new())
		.layer(TraceLayer::new_for_http())
		.with_state(consumer)
}

/// Serves `router` on `listener` until Ctrl+C is received.
pub async fn serve(listener: TcpListener, router: Router) -> std::io::Result<()> {
	axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		tracing::warn!(error = %e, "failed to listen for Ctrl+C");
	}

	tracing::info!("shutting down");
}
