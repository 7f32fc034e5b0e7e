//! Monitoring endpoint handlers

use axum::{
  extract::{Extension, Query},
  http::StatusCode,
  response::Json as ResponseJson,
};
use uuid::Uuid;

use crate::server::handlers::error_response;
use crate::server::middleware::RequestContext;
use crate::server::models::persona;
use crate::server::services::trends;
use crate::server::types::{
  ApiError, BaseResponse, ConfigResponse, ForceAnalysisResponse, ForceEngagementResponse,
  HistoryQuery, HistoryResponse, MonitoringConfigView, StatsResponse,
};

type HandlerResult<T> =
  Result<ResponseJson<BaseResponse<T>>, (StatusCode, ResponseJson<BaseResponse<()>>)>;

/// GET /api/monitoring/stats - Current aggregate counters
pub async fn stats(Extension(context): Extension<RequestContext>) -> HandlerResult<StatsResponse> {
  let transaction_id = Uuid::new_v4();

  let monitor = context.app.monitor.lock().await;
  match monitor.stats() {
    Ok(stats) => Ok(ResponseJson(BaseResponse::success(StatsResponse { stats }, transaction_id))),
    Err(e) => {
      context.log_error(&format!("Failed to load stats: {e}"), "monitoring-api").await;
      Err(error_response(&e, transaction_id))
    }
  }
}

/// GET /api/monitoring/config - Effective monitoring configuration
pub async fn config(
  Extension(context): Extension<RequestContext>,
) -> HandlerResult<ConfigResponse> {
  let transaction_id = Uuid::new_v4();

  let personas = match persona::list() {
    Ok(personas) => personas,
    Err(e) => {
      let error = ApiError::new("persona_registry_failed", &e.to_string());
      return Err((
        StatusCode::INTERNAL_SERVER_ERROR,
        ResponseJson(BaseResponse::<()>::error(vec![error], transaction_id)),
      ));
    }
  };

  let config = &context.app.config;
  let view = MonitoringConfigView {
    max_engagements_per_hour: config.engagement.max_engagements_per_hour,
    engagement_window_minutes: config.engagement.engagement_window_minutes,
    engagement_types: vec![
      "unanswered_question".to_string(),
      "trending_topic".to_string(),
      "collaboration_request".to_string(),
    ],
    active_personas: personas,
    trending_up_threshold: config.trending.trending_up_threshold,
    analysis_question_limit: config.trending.analysis_question_limit,
  };

  Ok(ResponseJson(BaseResponse::success(ConfigResponse { config: view }, transaction_id)))
}

/// POST /api/monitoring/force-engagement - Run one engagement cycle now
pub async fn force_engagement(
  Extension(context): Extension<RequestContext>,
) -> HandlerResult<ForceEngagementResponse> {
  let transaction_id = Uuid::new_v4();

  context.log_info("Forced engagement cycle requested", "monitoring-api").await;

  let mut monitor = context.app.monitor.lock().await;
  match monitor.run_cycle().await {
    Ok(Some(outcome)) => {
      context
        .log_success(
          &format!(
            "Engaged question {} with persona {}",
            outcome.question_id, outcome.persona_id
          ),
          "monitoring-api",
        )
        .await;
      let response = ForceEngagementResponse { success: true, engagement: Some(outcome) };
      Ok(ResponseJson(BaseResponse::success(response, transaction_id)))
    }
    Ok(None) => {
      context.log_info("No engagement opportunities found", "monitoring-api").await;
      let response = ForceEngagementResponse { success: true, engagement: None };
      Ok(ResponseJson(BaseResponse::success(response, transaction_id)))
    }
    Err(e) => {
      context.log_warn(&format!("Engagement cycle failed: {e}"), "monitoring-api").await;
      Err(error_response(&e, transaction_id))
    }
  }
}

/// POST /api/monitoring/force-analysis - Recompute trending topics now
pub async fn force_analysis(
  Extension(context): Extension<RequestContext>,
) -> HandlerResult<ForceAnalysisResponse> {
  let transaction_id = Uuid::new_v4();

  context.log_info("Forced trend analysis requested", "monitoring-api").await;

  // Lock the monitor so analysis and engagement never interleave writes
  let _monitor = context.app.monitor.lock().await;
  match trends::run_analysis(&context.app.config.trending) {
    Ok(topics) => {
      context
        .log_success(&format!("Trend analysis produced {} topics", topics.len()), "monitoring-api")
        .await;
      let response = ForceAnalysisResponse { success: true, topics_analyzed: topics.len() };
      Ok(ResponseJson(BaseResponse::success(response, transaction_id)))
    }
    Err(e) => {
      context.log_error(&format!("Trend analysis failed: {e}"), "monitoring-api").await;
      let error = ApiError::new("analysis_failed", &e.to_string());
      Err((
        StatusCode::INTERNAL_SERVER_ERROR,
        ResponseJson(BaseResponse::<()>::error(vec![error], transaction_id)),
      ))
    }
  }
}

/// GET /api/monitoring/history - Recent engagement attempts
pub async fn history(
  Extension(context): Extension<RequestContext>,
  Query(query): Query<HistoryQuery>,
) -> HandlerResult<HistoryResponse> {
  let transaction_id = Uuid::new_v4();

  let monitor = context.app.monitor.lock().await;
  match monitor.history(query.limit) {
    Ok(engagement_history) => Ok(ResponseJson(BaseResponse::success(
      HistoryResponse { engagement_history },
      transaction_id,
    ))),
    Err(e) => {
      context.log_error(&format!("Failed to load history: {e}"), "monitoring-api").await;
      Err(error_response(&e, transaction_id))
    }
  }
}
