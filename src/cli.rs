//! Command-line and environment configuration for the bundled server binary.

// std
use std::net::SocketAddr;
// crates.io
use clap::{Parser, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
// self
use crate::{
	_prelude::*,
	flows::{Consumer, ReqwestConsumer},
	provider::{ProviderDescriptor, twitter},
};

/// Runs the OAuth1 handshake server for Twitter.
#[derive(Clone, Debug, Parser)]
#[command(name = "oauth1-handshake", version, about)]
pub struct Cli {
	/// Consumer (API) key.
	#[arg(long, env = "TWITTER_API_KEY", default_value = "", hide_env_values = true)]
	pub consumer_key: String,
	/// Consumer (API) secret.
	#[arg(long, env = "TWITTER_API_KEY_SECRET", default_value = "", hide_env_values = true)]
	pub consumer_secret: String,
	/// Callback URL announced to the provider.
	#[arg(
		long,
		env = "OAUTH1_CALLBACK_URL",
		default_value = "http://localhost:8080/oauth/twitter/callback"
	)]
	pub callback_url: String,
	/// Address the server listens on.
	#[arg(long, env = "OAUTH1_LISTEN", default_value = "0.0.0.0:8080")]
	pub listen: SocketAddr,
	/// Use "Sign in with Twitter" (`/oauth/authenticate`) instead of `/oauth/authorize`.
	#[arg(long)]
	pub authenticate: bool,
	/// Default log filter; `RUST_LOG` takes precedence.
	#[arg(long, env = "OAUTH1_LOG_LEVEL", default_value = "info")]
	pub log_level: String,
	/// Log output format.
	#[arg(long, value_enum, default_value_t = LogFormat::Text)]
	pub log_format: LogFormat,
}
impl Cli {
	/// Twitter descriptor selected by `--authenticate`.
	pub fn descriptor(&self) -> Result<ProviderDescriptor> {
		if self.authenticate { twitter::authenticate() } else { twitter::authorize() }
	}

	/// Builds the reqwest-backed consumer described by the parsed arguments.
	pub fn build_consumer(&self) -> Result<ReqwestConsumer> {
		Consumer::new(
			self.descriptor()?,
			&self.consumer_key,
			&self.consumer_secret,
			&self.callback_url,
		)
	}
}

/// Log output formats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
	/// Human-readable lines.
	#[default]
	Text,
	/// One JSON object per event.
	Json,
}

/// Installs the global `tracing` subscriber.
pub fn setup_tracing(
	level: &str,
	format: LogFormat,
) -> Result<(), tracing_subscriber::util::TryInitError> {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
	let subscriber = tracing_subscriber::registry().with(filter);

	match format {
		LogFormat::Json => subscriber.with(fmt::layer().json()).try_init(),
		LogFormat::Text => subscriber.with(fmt::layer()).try_init(),
	}
}
