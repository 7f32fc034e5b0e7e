//! Service-level error types
//!
//! Handlers map these onto HTTP status codes at the boundary:
//! Validation -> 400, NotFound -> 404, RateLimited -> 429, Upstream -> 500.

use thiserror::Error;

/// Errors surfaced by the monitoring service layer
#[derive(Debug, Error)]
pub enum MonitorError {
  /// Malformed or rejected request input
  #[error("invalid request: {0}")]
  Validation(String),

  /// A referenced entity does not exist
  #[error("{0}")]
  NotFound(String),

  /// The hourly engagement budget is exhausted
  #[error("engagement rate limit reached: {count} of {max} engagements used in the last hour")]
  RateLimited { count: usize, max: usize },

  /// Storage or generation-service failure
  #[error("upstream failure: {0}")]
  Upstream(String),
}

impl From<anyhow::Error> for MonitorError {
  fn from(err: anyhow::Error) -> Self {
    MonitorError::Upstream(err.to_string())
  }
}

pub type Result<T> = std::result::Result<T, MonitorError>;
