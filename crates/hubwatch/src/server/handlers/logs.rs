//! Logs endpoint handler

use axum::{
  extract::{Extension, Query},
  http::StatusCode,
  response::Json,
};
use uuid::Uuid;

use crate::server::middleware::RequestContext;
use crate::server::types::{ApiError, BaseResponse, LogsQuery, LogsResponse};

/// GET /logs - Most recent server log entries
pub async fn get_logs(
  Extension(context): Extension<RequestContext>,
  Query(query): Query<LogsQuery>,
) -> Result<Json<BaseResponse<LogsResponse>>, (StatusCode, Json<BaseResponse<()>>)> {
  let transaction_id = Uuid::new_v4();

  let limit = query.limit.unwrap_or(100);
  match context.app.logger.query(Some(limit), query.level.as_deref()).await {
    Ok(logs) => {
      let response = LogsResponse { logs };
      Ok(Json(BaseResponse::success(response, transaction_id)))
    }
    Err(e) => {
      context.log_error(&format!("Failed to read logs: {e}"), "logs-api").await;
      let error = ApiError::new("logs_read_failed", &format!("Failed to read logs: {e}"));
      Err((
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(BaseResponse::<()>::error(vec![error], transaction_id)),
      ))
    }
  }
}
