//! Hubwatch REST Server
//!
//! HTTP REST API server for community monitoring, AI engagement, and
//! trend analysis.

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use hubwatch::server::startup::start_server;

#[derive(Parser)]
#[command(name = "hubwatch_server")]
#[command(about = "Hubwatch REST API Server")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
  /// Server bind address
  #[arg(long, default_value = "127.0.0.1:4600")]
  bind: SocketAddr,

  /// Enable verbose logging
  #[arg(short, long)]
  verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let filter = if args.verbose {
    EnvFilter::new("debug,hyper=info,reqwest=info")
  } else {
    EnvFilter::new("hubwatch=info,warn")
  };

  tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

  herald::info!(&format!("Starting Hubwatch REST Server v{}", env!("CARGO_PKG_VERSION")));
  herald::info!(&format!("Binding to address: {}", args.bind));

  start_server(args.bind).await?;

  Ok(())
}
