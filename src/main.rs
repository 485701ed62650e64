//! OAuth1 handshake server for Twitter.

// std
use std::sync::Arc;
// crates.io
use clap::Parser;
use tokio::net::TcpListener;
// self
use oauth1_handshake::{
	auth::TokenSecret,
	cli::{self, Cli},
	server,
};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let cli = Cli::parse();

	cli::setup_tracing(&cli.log_level, cli.log_format)?;

	let consumer = Arc::new(cli.build_consumer()?);

	tracing::info!(
		consumer_key = consumer.consumer_key(),
		consumer_secret = %TokenSecret::new(cli.consumer_secret.as_str()),
		provider = %consumer.descriptor.id,
		callback_url = %consumer.callback_url,
		"consumer configured"
	);

	let listener = TcpListener::bind(cli.listen).await?;

	tracing::info!(addr = %listener.local_addr()?, "listening");

	server::serve(listener, server::router(consumer)).await?;

	Ok(())
}
