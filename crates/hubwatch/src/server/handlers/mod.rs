//! Endpoint handlers for the hubwatch REST API

use axum::http::StatusCode;
use axum::response::Json as ResponseJson;
use uuid::Uuid;

use crate::error::MonitorError;
use crate::server::types::{ApiError, BaseResponse};

pub mod logs;
pub mod monitoring;
pub mod questions;
pub mod status;

/// Map a service error onto its HTTP status code and error envelope
pub(crate) fn error_response(
  err: &MonitorError,
  transaction_id: Uuid,
) -> (StatusCode, ResponseJson<BaseResponse<()>>) {
  let (status, key) = match err {
    MonitorError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_failed"),
    MonitorError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
    MonitorError::RateLimited { .. } => (StatusCode::TOO_MANY_REQUESTS, "rate_limit_exceeded"),
    MonitorError::Upstream(_) => (StatusCode::INTERNAL_SERVER_ERROR, "upstream_failure"),
  };

  let error = ApiError::new(key, &err.to_string());
  (status, ResponseJson(BaseResponse::<()>::error(vec![error], transaction_id)))
}
