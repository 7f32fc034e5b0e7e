//! Text generation service abstraction
//!
//! This module provides a generic interface for answer generation,
//! allowing different backends (remote chat-completions API, offline
//! templates) to be swapped without changing the engagement executor.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::config::GenerationConfig;
use crate::server::models::persona::Persona;

/// Failures from the generation backend
#[derive(Debug, Error)]
pub enum GenerationError {
  #[error("generation request failed: {0}")]
  Request(String),

  #[error("generation backend returned status {0}")]
  Status(u16),

  #[error("generation backend returned an empty completion")]
  Empty,
}

/// Text generation interface for the engagement executor
#[async_trait]
pub trait GenerationService: Send + Sync {
  /// Produce an answer body for the given prompt in the persona's voice
  async fn generate(&self, prompt: &str, persona: &Persona) -> Result<String, GenerationError>;
}

/// Build a generation service from configuration: remote when an
/// endpoint is configured, templated offline answers otherwise
pub fn from_config(config: &GenerationConfig) -> Box<dyn GenerationService> {
  match &config.endpoint {
    Some(endpoint) => Box::new(HttpGenerationService::new(
      endpoint.clone(),
      config.model.clone(),
      config.timeout_secs,
    )),
    None => Box::new(TemplateGenerationService),
  }
}

// Remote Backend
// ==============

#[derive(Serialize)]
struct ChatMessage {
  role: String,
  content: String,
}

#[derive(Serialize)]
struct ChatRequest {
  model: String,
  messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
  content: String,
}

#[derive(Deserialize)]
struct ChatChoice {
  message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatResponse {
  choices: Vec<ChatChoice>,
}

/// Chat-completions backend over HTTP
pub struct HttpGenerationService {
  client: Client,
  endpoint: String,
  model: String,
  api_key: Option<String>,
}

impl HttpGenerationService {
  pub fn new(endpoint: String, model: String, timeout_secs: u64) -> Self {
    let client = Client::builder()
      .timeout(Duration::from_secs(timeout_secs))
      .build()
      .expect("Failed to create HTTP client");

    // Key is optional so local inference servers work without one
    let api_key = std::env::var("HUBWATCH_GENERATION_API_KEY").ok();

    Self { client, endpoint, model, api_key }
  }

  fn system_prompt(persona: &Persona) -> String {
    format!(
      "You are {}, a {} in the Proto Hub community. Your expertise: {}. Voice: {}. \
       Answer the member's question directly and helpfully.",
      persona.name,
      persona.role,
      persona.expertise.join(", "),
      persona.voice
    )
  }
}

#[async_trait]
impl GenerationService for HttpGenerationService {
  async fn generate(&self, prompt: &str, persona: &Persona) -> Result<String, GenerationError> {
    let request = ChatRequest {
      model: self.model.clone(),
      messages: vec![
        ChatMessage { role: "system".to_string(), content: Self::system_prompt(persona) },
        ChatMessage { role: "user".to_string(), content: prompt.to_string() },
      ],
    };

    let mut builder = self.client.post(&self.endpoint).json(&request);
    if let Some(key) = &self.api_key {
      builder = builder.bearer_auth(key);
    }

    let response = builder.send().await.map_err(|e| GenerationError::Request(e.to_string()))?;

    if !response.status().is_success() {
      return Err(GenerationError::Status(response.status().as_u16()));
    }

    let parsed: ChatResponse =
      response.json().await.map_err(|e| GenerationError::Request(e.to_string()))?;

    let text = parsed
      .choices
      .into_iter()
      .next()
      .map(|c| c.message.content)
      .unwrap_or_default();

    if text.trim().is_empty() {
      return Err(GenerationError::Empty);
    }

    Ok(text)
  }
}

// Offline Backend
// ===============

/// Deterministic templated answers, used when no endpoint is configured
/// and by tests
pub struct TemplateGenerationService;

#[async_trait]
impl GenerationService for TemplateGenerationService {
  async fn generate(&self, prompt: &str, persona: &Persona) -> Result<String, GenerationError> {
    let first_line = prompt.lines().next().unwrap_or(prompt);
    Ok(format!(
      "{} here ({}). On \"{}\": start small, validate with a quick prototype, \
       and share what you learn back with the community.",
      persona.name, persona.role, first_line
    ))
  }
}

/// Backend that always fails, used by tests for the failure path
pub struct FailingGenerationService;

#[async_trait]
impl GenerationService for FailingGenerationService {
  async fn generate(&self, _prompt: &str, _persona: &Persona) -> Result<String, GenerationError> {
    Err(GenerationError::Request("simulated quota exhaustion".to_string()))
  }
}
