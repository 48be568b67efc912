//! PDF portal command-line entry point.

mod args;
mod commands;
mod config;

use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let args = args::Args::parse();

    // Logs go to stderr so listings on stdout stay pipeable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "starting pdfportal");

    let mut config = config::Config::load(args.config.as_deref())?;
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    tracing::debug!(?config, "configuration loaded");

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(commands::run(args.command, &config))
}
