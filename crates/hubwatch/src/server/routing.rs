//! Axum router configuration for all endpoints

use axum::{
  middleware,
  routing::{get, post},
  Router,
};

use crate::server::handlers::{logs, monitoring, questions, status};
use crate::server::middleware::request_context_middleware;

/// Create the main application router
pub fn create_router() -> Router {
  let api = Router::new()
    // API information
    .route("/", get(status::api_info))
    // Monitoring endpoints
    .route("/monitoring/stats", get(monitoring::stats))
    .route("/monitoring/config", get(monitoring::config))
    .route("/monitoring/force-engagement", post(monitoring::force_engagement))
    .route("/monitoring/force-analysis", post(monitoring::force_analysis))
    .route("/monitoring/history", get(monitoring::history))
    // Question endpoints
    .route("/questions", get(questions::list_questions).post(questions::create_question))
    .route(
      "/questions/{id}/answers",
      get(questions::list_answers).post(questions::create_answer),
    )
    .route("/questions/ai-engagement", post(questions::ai_engagement));

  Router::new()
    // Status and version endpoints
    .route("/status", get(status::status))
    .route("/version", get(status::version))
    // Logs endpoint
    .route("/logs", get(logs::get_logs))
    .nest("/api", api)
    .layer(middleware::from_fn(request_context_middleware))
}
