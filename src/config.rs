use std::net::SocketAddr;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Serves the `rsa_ciphertext` resource over HTTP.
#[derive(Debug, Clone, Parser)]
#[command(name = "rsa-ciphertext", version, about)]
pub struct Config {
    /// Address the HTTP host listens on
    #[arg(long, env = "RSA_PROVIDER_ADDR", default_value = "127.0.0.1:3000")]
    pub addr: SocketAddr,

    /// Run with verbose logging for debugging the provider
    #[arg(long, env = "RSA_PROVIDER_DEBUG")]
    pub debug: bool,
}

impl Config {
    /// Log filter: `RUST_LOG` wins, otherwise `info`, or `debug` in debug mode.
    pub fn log_filter(&self) -> EnvFilter {
        let default = if self.debug { "debug" } else { "info" };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    }
}
