//! Server management for automatic server startup and lifecycle
//!
//! Handles automatically starting the hubwatch server when a CLI command
//! needs it and waiting until it is ready.

use anyhow::{anyhow, Result};
use std::process::{Child, Command, Stdio};
use std::time::Duration;
use tokio::time::sleep;

use crate::cli::client::{get_client, HubwatchClient};

// Server startup configuration
const SERVER_STARTUP_TIMEOUT_SECS: u64 = 30;
const SERVER_CHECK_INTERVAL_MS: u64 = 500;

/// Manages the local hubwatch server lifecycle
pub struct ServerManager {
  client: HubwatchClient,
}

impl Default for ServerManager {
  fn default() -> Self {
    Self::new()
  }
}

impl ServerManager {
  /// Create a new server manager
  pub fn new() -> Self {
    Self { client: get_client() }
  }

  /// Ensure the server is running, starting it if necessary
  pub async fn ensure_server_running(&self) -> Result<()> {
    if self.client.health_check().await.is_ok() {
      return Ok(());
    }

    herald::info!("Starting local hubwatch server...");
    self.start_server()?;
    self.wait_for_server().await?;

    herald::info!("Hubwatch server is ready");
    Ok(())
  }

  /// Start the server in the background
  fn start_server(&self) -> Result<Child> {
    let server_binary = self.find_server_binary()?;

    let mut cmd = Command::new(server_binary);
    cmd
      .args(["--bind", "127.0.0.1:4600"])
      .stdout(Stdio::null())
      .stderr(Stdio::null())
      .stdin(Stdio::null())
      .envs(std::env::vars()); // Pass through all environment variables (including HUBWATCH_ROOT)

    let child = cmd.spawn().map_err(|e| anyhow!("Failed to start hubwatch server: {}", e))?;

    Ok(child)
  }

  /// Wait for the server to become ready
  async fn wait_for_server(&self) -> Result<()> {
    let max_attempts = (SERVER_STARTUP_TIMEOUT_SECS * 1000) / SERVER_CHECK_INTERVAL_MS;
    let mut attempts = 0;

    while attempts < max_attempts {
      if self.client.health_check().await.is_ok() {
        return Ok(());
      }

      sleep(Duration::from_millis(SERVER_CHECK_INTERVAL_MS)).await;
      attempts += 1;
    }

    Err(anyhow!("Server failed to start within {} seconds", SERVER_STARTUP_TIMEOUT_SECS))
  }

  /// Find the hubwatch_server binary
  fn find_server_binary(&self) -> Result<String> {
    // First check if hubwatch_server is available in PATH
    if let Ok(output) = Command::new("which").arg("hubwatch_server").output() {
      if output.status.success() {
        let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !path.is_empty() {
          return Ok(path);
        }
      }
    }

    // Check local build locations as fallback
    let local_paths_to_try = [
      "target/release/hubwatch_server", // Local release build (preferred)
      "target/debug/hubwatch_server",   // Local debug build (fallback)
    ];

    for path in &local_paths_to_try {
      if std::fs::metadata(path).is_ok() {
        return Ok(path.to_string());
      }
    }

    Err(anyhow!(
      "hubwatch_server binary not found. Please ensure it's installed or build it locally."
    ))
  }
}

/// Global function to ensure the server is running
pub async fn ensure_server_running() -> Result<()> {
  let manager = ServerManager::new();
  manager.ensure_server_running().await
}
