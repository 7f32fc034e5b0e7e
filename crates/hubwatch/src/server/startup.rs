//! REST server startup and configuration

use anyhow::Result;
use axum::serve;
use herald::log_store::LogStore;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::MonitorConfig;
use crate::server::middleware::{init_app_context, AppContext};
use crate::server::models;
use crate::server::routing::create_router;
use crate::server::services::engagement::EngagementMonitor;
use crate::server::services::generation;

/// Start the REST server
pub async fn start_server(addr: SocketAddr) -> Result<()> {
  let config = MonitorConfig::load()?;

  let logs_path = server_logs_path()?;
  let logger = Arc::new(LogStore::new(&logs_path)?);

  let generator = generation::from_config(&config.generation);
  let monitor = Arc::new(Mutex::new(EngagementMonitor::new(config.clone(), generator)));

  let app_context = Arc::new(AppContext { logger: logger.clone(), monitor, config });
  if init_app_context(app_context).is_err() {
    return Err(anyhow::anyhow!("App context was already initialized"));
  }

  logger.info(&format!("Starting hubwatch REST server on {addr}"), "hubwatch-server").await;

  let app = create_router().layer(
    ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive()),
  );

  let listener = TcpListener::bind(addr).await?;
  logger.info(&format!("Server listening on {addr}"), "hubwatch-server").await;

  match serve(listener, app).await {
    Ok(_) => {
      logger.info("Server shutdown gracefully", "hubwatch-server").await;
      Ok(())
    }
    Err(e) => {
      logger.error(&format!("Server error: {e}"), "hubwatch-server").await;
      Err(anyhow::anyhow!("Server error: {}", e))
    }
  }
}

/// Get the path for server logs
fn server_logs_path() -> Result<PathBuf> {
  Ok(models::data_root()?.join("rest_server.logs.jsonl"))
}
