//! HTTP client for the hubwatch REST API
//!
//! A thin wrapper that lets the CLI work with a local or remote
//! hubwatch server through the same code path.

use anyhow::{anyhow, Result};
use reqwest::Client;
use std::time::Duration;
use tokio::time::timeout;
use uuid::Uuid;

use crate::server::types::{
  AiEngagementRequest, BaseResponse, ConfigResponse, CreateAnswerRequest, CreateAnswerResponse,
  CreateQuestionRequest, CreateQuestionResponse, ForceAnalysisResponse, ForceEngagementResponse,
  HistoryResponse, ListQuestionsResponse, LogsResponse, StatsResponse,
};

/// Configuration for the hubwatch HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
  /// Base URL of the hubwatch server (e.g., "http://localhost:4600")
  pub base_url: String,
  /// Request timeout in seconds
  pub timeout_secs: u64,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self { base_url: "http://localhost:4600".to_string(), timeout_secs: 30 }
  }
}

/// HTTP client for the hubwatch REST API
pub struct HubwatchClient {
  client: Client,
  config: ClientConfig,
}

impl Default for HubwatchClient {
  fn default() -> Self {
    Self::new()
  }
}

impl HubwatchClient {
  /// Create a new client with default configuration
  pub fn new() -> Self {
    Self::with_config(ClientConfig::default())
  }

  /// Create a new client with custom configuration
  pub fn with_config(config: ClientConfig) -> Self {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .expect("Failed to create HTTP client");

    Self { client, config }
  }

  async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str, what: &str) -> Result<T> {
    let url = format!("{}{}", self.config.base_url, path);
    let response =
      timeout(Duration::from_secs(self.config.timeout_secs), self.client.get(&url).send())
        .await??;

    if !response.status().is_success() {
      let error_text = response.text().await?;
      return Err(anyhow!("Failed to {}: {}", what, error_text));
    }

    let result: BaseResponse<T> = response.json().await?;
    Ok(result.data)
  }

  async fn post_json<B: serde::Serialize, T: serde::de::DeserializeOwned>(
    &self,
    path: &str,
    body: &B,
    what: &str,
  ) -> Result<T> {
    let url = format!("{}{}", self.config.base_url, path);
    let response = timeout(
      Duration::from_secs(self.config.timeout_secs),
      self.client.post(&url).json(body).send(),
    )
    .await??;

    if !response.status().is_success() {
      let error_text = response.text().await?;
      return Err(anyhow!("Failed to {}: {}", what, error_text));
    }

    let result: BaseResponse<T> = response.json().await?;
    Ok(result.data)
  }

  /// Fetch monitoring stats
  pub async fn stats(&self) -> Result<StatsResponse> {
    self.get_json("/api/monitoring/stats", "fetch stats").await
  }

  /// Fetch the effective monitoring configuration
  pub async fn monitoring_config(&self) -> Result<ConfigResponse> {
    self.get_json("/api/monitoring/config", "fetch config").await
  }

  /// Trigger one engagement cycle
  pub async fn force_engagement(&self) -> Result<ForceEngagementResponse> {
    self.post_json("/api/monitoring/force-engagement", &(), "force engagement").await
  }

  /// Trigger a trend analysis pass
  pub async fn force_analysis(&self) -> Result<ForceAnalysisResponse> {
    self.post_json("/api/monitoring/force-analysis", &(), "force analysis").await
  }

  /// Fetch recent engagement history
  pub async fn history(&self, limit: Option<usize>) -> Result<HistoryResponse> {
    let path = match limit {
      Some(limit) => format!("/api/monitoring/history?limit={limit}"),
      None => "/api/monitoring/history".to_string(),
    };
    self.get_json(&path, "fetch history").await
  }

  /// List questions
  pub async fn list_questions(
    &self,
    sort_by: &str,
    limit: Option<usize>,
  ) -> Result<ListQuestionsResponse> {
    let mut path = format!("/api/questions?sort_by={sort_by}");
    if let Some(limit) = limit {
      path.push_str(&format!("&limit={limit}"));
    }
    self.get_json(&path, "list questions").await
  }

  /// Create a question
  pub async fn create_question(
    &self,
    request: &CreateQuestionRequest,
  ) -> Result<CreateQuestionResponse> {
    self.post_json("/api/questions", request, "create question").await
  }

  /// Create an answer for a question
  pub async fn create_answer(
    &self,
    question_id: &Uuid,
    request: &CreateAnswerRequest,
  ) -> Result<CreateAnswerResponse> {
    self
      .post_json(&format!("/api/questions/{question_id}/answers"), request, "create answer")
      .await
  }

  /// Engage one question on demand
  pub async fn ai_engagement(
    &self,
    question_id: &Uuid,
    persona: Option<String>,
  ) -> Result<ForceEngagementResponse> {
    let request = AiEngagementRequest { question_id: *question_id, persona };
    self.post_json("/api/questions/ai-engagement", &request, "run targeted engagement").await
  }

  /// Get server logs with optional limit and level filter
  pub async fn get_logs(&self, limit: usize, level: &str) -> Result<LogsResponse> {
    self.get_json(&format!("/logs?limit={limit}&level={level}"), "fetch logs").await
  }

  /// Check if the server is reachable
  pub async fn health_check(&self) -> Result<()> {
    let url = format!("{}/status", self.config.base_url);
    let response = timeout(
      Duration::from_secs(5), // Shorter timeout for health check
      self.client.get(&url).send(),
    )
    .await??;

    if response.status().is_success() {
      Ok(())
    } else {
      Err(anyhow!("Server health check failed: {}", response.status()))
    }
  }
}

/// Get the configured client (checks environment variables)
pub fn get_client() -> HubwatchClient {
  let base_url =
    std::env::var("HUBWATCH_SERVER_URL").unwrap_or_else(|_| "http://localhost:4600".to_string());

  let timeout_secs = std::env::var("HUBWATCH_TIMEOUT_SECS")
    .unwrap_or_else(|_| "30".to_string())
    .parse()
    .unwrap_or(30);

  let config = ClientConfig { base_url, timeout_secs };

  HubwatchClient::with_config(config)
}
