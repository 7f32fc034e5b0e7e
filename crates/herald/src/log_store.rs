//! Persistent log storage for daemons
//!
//! Structured JSONL log storage with:
//! - append-only disk persistence (one JSON entry per line)
//! - thread-safe async operations with internal locking
//! - optional console mirroring through the herald level functions
//! - request context attachment for HTTP correlation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

// Types and Data Structures
// =========================

/// Request context information attached to a log entry
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct LogContext {
  /// Request ID for correlation
  #[serde(skip_serializing_if = "Option::is_none")]
  pub request_id: Option<String>,

  /// HTTP method
  #[serde(skip_serializing_if = "Option::is_none")]
  pub method: Option<String>,

  /// Request path
  #[serde(skip_serializing_if = "Option::is_none")]
  pub path: Option<String>,

  /// Request duration in milliseconds
  #[serde(skip_serializing_if = "Option::is_none")]
  pub duration_ms: Option<f64>,

  /// HTTP status code
  #[serde(skip_serializing_if = "Option::is_none")]
  pub status_code: Option<u16>,
}

/// A structured log entry
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
  pub timestamp: DateTime<Utc>,
  pub level: String,
  pub message: String,
  pub component: String,

  /// Optional request context
  #[serde(skip_serializing_if = "Option::is_none")]
  pub context: Option<LogContext>,
}

struct LogStoreInner {
  log_file_path: PathBuf,
  silent: bool,
}

/// Thread-safe disk-backed log storage using JSONL format
#[derive(Clone)]
pub struct LogStore {
  inner: Arc<Mutex<LogStoreInner>>,
}

// Inner Implementation
// ====================

impl LogStoreInner {
  fn new<P: AsRef<Path>>(log_file_path: P, silent: bool) -> std::io::Result<Self> {
    let log_file_path = log_file_path.as_ref().to_path_buf();

    if let Some(parent) = log_file_path.parent() {
      std::fs::create_dir_all(parent)?;
    }

    // Create the file if absent, never truncate an existing one
    if !log_file_path.exists() {
      std::fs::File::create(&log_file_path)?;
    }

    Ok(Self { log_file_path, silent })
  }

  fn append(
    &mut self,
    level: &str,
    message: &str,
    component: &str,
    context: Option<LogContext>,
  ) -> std::io::Result<()> {
    let entry = LogEntry {
      timestamp: Utc::now(),
      level: level.to_string(),
      message: message.to_string(),
      component: component.to_string(),
      context,
    };

    let json_line = serde_json::to_string(&entry)
      .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    use std::fs::OpenOptions;
    use std::io::Write;

    let mut file = OpenOptions::new().create(true).append(true).open(&self.log_file_path)?;
    writeln!(file, "{json_line}")?;
    file.flush()?;

    Ok(())
  }

  fn query(&self, limit: Option<usize>, level_filter: Option<&str>) -> std::io::Result<Vec<LogEntry>> {
    use std::fs::File;
    use std::io::{BufRead, BufReader};

    if !self.log_file_path.exists() {
      return Ok(Vec::new());
    }

    let file = File::open(&self.log_file_path)?;
    let reader = BufReader::new(file);

    let mut logs = Vec::new();

    for line_result in reader.lines() {
      let line = line_result?;
      if line.trim().is_empty() {
        continue;
      }

      // Skip malformed lines rather than failing the whole query
      let Ok(entry) = serde_json::from_str::<LogEntry>(&line) else {
        continue;
      };

      let matches_level =
        level_filter.is_none_or(|filter| filter == "all" || entry.level == filter);

      if matches_level {
        logs.push(entry);
      }
    }

    // Newest first so the limit keeps the most recent entries
    logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    if let Some(limit) = limit {
      logs.truncate(limit);
    }

    // Oldest first for terminal-friendly display
    logs.reverse();

    Ok(logs)
  }
}

// Core API
// ========

impl LogStore {
  /// Create a new log store backed by the given JSONL file
  pub fn new<P: AsRef<Path>>(log_file_path: P) -> std::io::Result<Self> {
    Self::with_silent(log_file_path, false)
  }

  /// Create a new log store, optionally suppressing console mirroring
  pub fn with_silent<P: AsRef<Path>>(log_file_path: P, silent: bool) -> std::io::Result<Self> {
    let inner = LogStoreInner::new(log_file_path, silent)?;
    Ok(Self { inner: Arc::new(Mutex::new(inner)) })
  }

  /// Append a log entry (fire-and-forget, ignores disk errors)
  pub async fn record(&self, level: &str, message: &str, component: &str) {
    let mut guard = self.inner.lock().await;
    let _ = guard.append(level, message, component, None);
  }

  /// Append a log entry with request context (fire-and-forget)
  pub async fn record_with_context(
    &self,
    level: &str,
    message: &str,
    component: &str,
    context: LogContext,
  ) {
    let mut guard = self.inner.lock().await;
    let _ = guard.append(level, message, component, Some(context));
  }

  /// Retrieve logs with optional level filtering and a most-recent limit
  pub async fn query(
    &self,
    limit: Option<usize>,
    level_filter: Option<&str>,
  ) -> std::io::Result<Vec<LogEntry>> {
    let guard = self.inner.lock().await;
    guard.query(limit, level_filter)
  }

  /// Get the path to the backing log file
  pub async fn log_file_path(&self) -> PathBuf {
    let guard = self.inner.lock().await;
    guard.log_file_path.clone()
  }
}

// Console-Mirroring Wrappers
// ==========================

impl LogStore {
  /// Log an info message (to disk + console unless silent)
  pub async fn info(&self, message: &str, component: &str) {
    self.record("info", message, component).await;
    if !self.is_silent().await {
      crate::info!(message);
    }
  }

  /// Log a warning message (to disk + console unless silent)
  pub async fn warn(&self, message: &str, component: &str) {
    self.record("warn", message, component).await;
    if !self.is_silent().await {
      crate::warn!(message);
    }
  }

  /// Log an error message (to disk + console unless silent)
  pub async fn error(&self, message: &str, component: &str) {
    self.record("error", message, component).await;
    if !self.is_silent().await {
      crate::error!(message);
    }
  }

  /// Log a success message (to disk + console unless silent)
  pub async fn success(&self, message: &str, component: &str) {
    self.record("success", message, component).await;
    if !self.is_silent().await {
      crate::success!(message);
    }
  }

  /// Log a debug message (to disk + console unless silent)
  pub async fn debug(&self, message: &str, component: &str) {
    self.record("debug", message, component).await;
    if !self.is_silent().await {
      crate::debug!(message);
    }
  }

  async fn is_silent(&self) -> bool {
    self.inner.lock().await.silent
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[tokio::test]
  async fn test_record_and_query() {
    let temp = TempDir::new().unwrap();
    let store = LogStore::with_silent(temp.path().join("daemon.logs.jsonl"), true).unwrap();

    store.record("info", "first", "test").await;
    store.record("error", "second", "test").await;
    store.record("info", "third", "test").await;

    let all = store.query(None, None).await.unwrap();
    assert_eq!(all.len(), 3);

    let errors = store.query(None, Some("error")).await.unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "second");

    let limited = store.query(Some(2), Some("all")).await.unwrap();
    assert_eq!(limited.len(), 2);
  }

  #[tokio::test]
  async fn test_context_round_trip() {
    let temp = TempDir::new().unwrap();
    let store = LogStore::with_silent(temp.path().join("daemon.logs.jsonl"), true).unwrap();

    let context = LogContext {
      request_id: Some("req-1".to_string()),
      method: Some("GET".to_string()),
      path: Some("/status".to_string()),
      duration_ms: Some(1.25),
      status_code: Some(200),
    };
    store.record_with_context("info", "handled", "http", context).await;

    let logs = store.query(None, None).await.unwrap();
    assert_eq!(logs.len(), 1);
    let ctx = logs[0].context.as_ref().unwrap();
    assert_eq!(ctx.request_id.as_deref(), Some("req-1"));
    assert_eq!(ctx.status_code, Some(200));
  }

  #[tokio::test]
  async fn test_query_skips_malformed_lines() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("daemon.logs.jsonl");
    let store = LogStore::with_silent(&path, true).unwrap();

    store.record("info", "valid", "test").await;
    std::fs::write(&path, "not json\n").unwrap();
    store.record("info", "still valid", "test").await;

    let logs = store.query(None, None).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].message, "still valid");
  }
}
