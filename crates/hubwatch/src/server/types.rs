//! REST API types with schemars annotations for OpenAPI generation

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::server::models::engagement::EngagementRecord;
use crate::server::models::persona::Persona;
use crate::server::models::question::{Question, QuestionSort};
use crate::server::models::stats::MonitoringStats;
use crate::server::services::engagement::EngagementOutcome;

// Base Response Structure
// =======================

/// Base response object for all API endpoints
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct BaseResponse<T> {
  /// API versioning information
  pub versioning: VersionInfo,

  /// Transaction ID for logging correlation
  pub transaction_id: Uuid,

  /// Optional error information
  #[serde(skip_serializing_if = "Vec::is_empty", default)]
  pub errors: Vec<ApiError>,

  /// Response data (generic for different endpoint types)
  #[serde(flatten)]
  pub data: T,
}

/// API versioning information
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct VersionInfo {
  /// The latest version of the API
  pub latest: String,

  /// The version of the API requested by the client
  pub requested: String,

  /// The version of the API that was used in producing the response
  pub resolved: String,
}

/// API error information
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ApiError {
  /// Error key, unique to the error source
  pub key: String,

  /// Human readable error message
  pub message: String,
}

impl<T> BaseResponse<T> {
  /// Create a successful response
  pub fn success(data: T, transaction_id: Uuid) -> Self {
    let version = env!("CARGO_PKG_VERSION");
    Self {
      versioning: VersionInfo {
        latest: version.to_string(),
        requested: version.to_string(),
        resolved: version.to_string(),
      },
      transaction_id,
      errors: Vec::new(),
      data,
    }
  }

  /// Create an error response
  pub fn error(errors: Vec<ApiError>, transaction_id: Uuid) -> BaseResponse<()> {
    let version = env!("CARGO_PKG_VERSION");
    BaseResponse {
      versioning: VersionInfo {
        latest: version.to_string(),
        requested: version.to_string(),
        resolved: version.to_string(),
      },
      transaction_id,
      errors,
      data: (),
    }
  }
}

impl ApiError {
  /// Create a new API error
  pub fn new(key: &str, message: &str) -> Self {
    Self { key: key.to_string(), message: message.to_string() }
  }
}

// Status/Version Endpoints
// ========================

/// Response for /status endpoint
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct StatusResponse {
  /// Service health indicator
  pub status: String,

  /// Data root the server is using
  pub data_root: String,

  /// Current service version
  pub version: String,
}

/// Response for /version endpoint
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct VersionResponse {
  /// Current API version
  pub version: String,
}

/// Response for /api endpoint
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ApiInfoResponse {
  /// Latest API version
  pub latest: String,

  /// Version information
  pub versions: ApiVersions,
}

/// API version details
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ApiVersions {
  /// Latest version
  pub latest: String,

  /// Currently active versions
  pub active: Vec<String>,
}

// Logs Endpoint
// =============

/// Query parameters for /logs
#[derive(Debug, Deserialize, JsonSchema)]
pub struct LogsQuery {
  /// Maximum number of entries to return (most recent kept)
  pub limit: Option<usize>,

  /// Level filter (info, warn, error, debug, success, all)
  pub level: Option<String>,
}

/// Response for /logs endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct LogsResponse {
  /// JSON log entries
  pub logs: Vec<LogEntry>,
}

/// Individual log entry (re-exported from herald)
pub type LogEntry = herald::log_store::LogEntry;

// Monitoring Endpoints
// ====================

/// Response for /api/monitoring/stats
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct StatsResponse {
  /// Aggregate monitoring counters
  pub stats: MonitoringStats,
}

/// Effective monitoring configuration returned by /api/monitoring/config
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct MonitoringConfigView {
  /// Hourly engagement budget
  pub max_engagements_per_hour: usize,

  /// Rate-limit window length in minutes
  pub engagement_window_minutes: i64,

  /// Engagement kinds the monitor produces
  pub engagement_types: Vec<String>,

  /// Personas available for automated answers
  pub active_personas: Vec<Persona>,

  /// Minimum tag frequency for the trending-up flag
  pub trending_up_threshold: u32,

  /// Questions scanned per analysis pass
  pub analysis_question_limit: usize,
}

/// Response for /api/monitoring/config
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ConfigResponse {
  /// Effective monitoring configuration
  pub config: MonitoringConfigView,
}

/// Response for /api/monitoring/force-engagement
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ForceEngagementResponse {
  /// Whether the cycle ran to completion
  pub success: bool,

  /// The executed engagement, absent when no opportunity existed
  pub engagement: Option<EngagementOutcome>,
}

/// Response for /api/monitoring/force-analysis
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ForceAnalysisResponse {
  /// Whether the analysis pass completed
  pub success: bool,

  /// Number of topics in the refreshed trending set
  pub topics_analyzed: usize,
}

/// Query parameters for /api/monitoring/history
#[derive(Debug, Deserialize, JsonSchema)]
pub struct HistoryQuery {
  /// Maximum number of records to return
  pub limit: Option<usize>,
}

/// Response for /api/monitoring/history
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct HistoryResponse {
  /// Engagement attempts, newest first
  pub engagement_history: Vec<EngagementRecord>,
}

// Question Endpoints
// ==================

/// Query parameters for /api/questions
#[derive(Debug, Deserialize, JsonSchema)]
pub struct QuestionQuery {
  /// Sort order (newest, unanswered)
  #[serde(default)]
  pub sort_by: QuestionSort,

  /// Maximum number of questions to return
  pub limit: Option<usize>,
}

/// Response for GET /api/questions
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListQuestionsResponse {
  /// Matching questions
  pub questions: Vec<Question>,
}

/// Request for POST /api/questions
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateQuestionRequest {
  /// Question title
  pub title: String,

  /// Question body
  pub content: String,

  /// Topic tags
  #[serde(default)]
  pub tags: Vec<String>,

  /// Display name of the author
  #[serde(default = "default_author")]
  pub author: String,
}

/// Response for POST /api/questions
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateQuestionResponse {
  /// The stored question
  pub question: Question,
}

/// Request for POST /api/questions/{id}/answers
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateAnswerRequest {
  /// Answer body
  pub content: String,

  /// Display name of the author
  #[serde(default = "default_author")]
  pub author: String,
}

/// Response for POST /api/questions/{id}/answers
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateAnswerResponse {
  /// The stored answer
  pub answer: crate::server::models::answer::Answer,
}

/// Response for GET /api/questions/{id}/answers
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListAnswersResponse {
  /// Answers for the question, oldest first
  pub answers: Vec<crate::server::models::answer::Answer>,
}

/// Request for POST /api/questions/ai-engagement
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AiEngagementRequest {
  /// Question to answer
  pub question_id: Uuid,

  /// Optional persona id override
  pub persona: Option<String>,
}

fn default_author() -> String {
  "anonymous".to_string()
}
