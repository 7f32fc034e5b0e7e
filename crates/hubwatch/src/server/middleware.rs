//! Request context and middleware for the hubwatch REST API
//!
//! Provides a unified request context containing the shared log store,
//! the shared engagement monitor, and request metadata, injected into
//! all endpoints via middleware.

use axum::{
  extract::Request,
  http::{Method, Uri},
  middleware::Next,
  response::Response,
};
use herald::log_store::{LogContext, LogStore};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::config::MonitorConfig;
use crate::server::services::engagement::EngagementMonitor;

/// Shared server-wide state
pub struct AppContext {
  /// Persistent log store backing the /logs endpoint
  pub logger: Arc<LogStore>,
  /// The engagement monitor, serialized behind one lock so concurrent
  /// force calls cannot race the rate limiter
  pub monitor: Arc<Mutex<EngagementMonitor>>,
  /// Configuration the server was started with
  pub config: MonitorConfig,
}

/// Request context injected into every handler
#[derive(Clone)]
pub struct RequestContext {
  /// Unique ID for this request
  pub request_id: Uuid,
  /// HTTP method
  pub method: Method,
  /// Request URI
  pub uri: Uri,
  /// Shared server state
  pub app: Arc<AppContext>,
}

impl RequestContext {
  pub fn new(method: Method, uri: Uri, app: Arc<AppContext>) -> Self {
    Self { request_id: Uuid::new_v4(), method, uri, app }
  }

  fn context(&self, status_code: Option<u16>, duration_ms: Option<f64>) -> LogContext {
    LogContext {
      request_id: Some(self.request_id.to_string()),
      method: Some(self.method.to_string()),
      path: Some(self.uri.path().to_string()),
      duration_ms,
      status_code,
    }
  }

  /// Log an info message with request context
  pub async fn log_info(&self, message: &str, component: &str) {
    self.app.logger.record_with_context("info", message, component, self.context(None, None)).await;
  }

  /// Log a success message with request context
  pub async fn log_success(&self, message: &str, component: &str) {
    self
      .app
      .logger
      .record_with_context("success", message, component, self.context(None, None))
      .await;
  }

  /// Log a warning message with request context
  pub async fn log_warn(&self, message: &str, component: &str) {
    self.app.logger.record_with_context("warn", message, component, self.context(None, None)).await;
  }

  /// Log an error message with request context
  pub async fn log_error(&self, message: &str, component: &str) {
    self.app.logger.record_with_context("error", message, component, self.context(None, None)).await;
  }

  /// Log request completion with status and duration
  pub async fn log_request_complete(&self, status_code: u16, duration_ms: f64) {
    self
      .app
      .logger
      .record_with_context(
        "info",
        "Request completed",
        "http-request",
        self.context(Some(status_code), Some(duration_ms)),
      )
      .await;
  }
}

/// Global application context, set once at server startup
static APP_CONTEXT: once_cell::sync::OnceCell<Arc<AppContext>> = once_cell::sync::OnceCell::new();

/// Initialize the global application context
pub fn init_app_context(app: Arc<AppContext>) -> Result<(), Arc<AppContext>> {
  APP_CONTEXT.set(app)
}

/// Get the global application context
pub fn app_context() -> &'static Arc<AppContext> {
  APP_CONTEXT.get().expect("App context should be initialized before serving requests")
}

/// Middleware to inject RequestContext into all requests
pub async fn request_context_middleware(request: Request, next: Next) -> Response {
  let app = app_context().clone();

  let method = request.method().clone();
  let uri = request.uri().clone();

  let context = RequestContext::new(method, uri, app);

  let start_time = std::time::Instant::now();

  let mut request = request;
  request.extensions_mut().insert(context.clone());

  let response = next.run(request).await;

  let duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;
  context.log_request_complete(response.status().as_u16(), duration_ms).await;

  response
}
