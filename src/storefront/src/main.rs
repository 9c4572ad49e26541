/* src/storefront/src/main.rs */

mod backend;
mod config;
mod pages;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use storefront_axum::IntoAxumRouter;
use storefront_core::StorefrontServer;
use tracing::info;

use crate::backend::HttpBackend;

/// Storefront command line arguments.
#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(about = "Server-rendered e-commerce storefront")]
struct Args {
  /// Path to storefront.toml
  #[arg(short, long, value_name = "PATH", default_value = "storefront.toml")]
  config: PathBuf,

  /// Listen address, overrides `server.addr`
  #[arg(long, value_name = "ADDR")]
  addr: Option<String>,

  /// Verbose logging
  #[arg(short, long)]
  verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  setup_tracing(args.verbose);

  let mut config = config::load_config(&args.config)?;
  config.apply_env(|key| std::env::var(key).ok())?;
  if let Some(addr) = args.addr {
    config.server.addr = addr;
  }
  config.validate().context("invalid configuration")?;

  info!(
    api_url = %config.backend.api_url,
    template = %config.theme.template_name,
    "starting storefront"
  );

  let backend = Arc::new(
    HttpBackend::new(&config.backend.api_url).context("failed to create backend client")?,
  );

  let server = pages::register(StorefrontServer::new())
    .site(config.site())
    .product_source(backend.clone())
    .session_resolver(backend)
    .fetch_timeout(config.backend.fetch_timeout())
    .session_timeout(config.backend.session_timeout());

  server.serve(&config.server.addr).await.map_err(|e| anyhow::anyhow!("server error: {e}"))?;
  Ok(())
}

fn setup_tracing(verbose: bool) {
  use tracing_subscriber::EnvFilter;

  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

  tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();
}
