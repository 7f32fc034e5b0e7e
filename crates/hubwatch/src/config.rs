//! Configuration management for hubwatch
//!
//! Handles loading, validating, and defaulting the engagement and
//! trend-analysis thresholds the monitor runs with.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
  /// Engagement rate limiting and execution
  #[serde(default)]
  pub engagement: EngagementConfig,
  /// Trend analysis thresholds
  #[serde(default)]
  pub trending: TrendingConfig,
  /// Text generation backend
  #[serde(default)]
  pub generation: GenerationConfig,
}

/// Thresholds governing automated engagement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementConfig {
  /// Maximum automated engagements in any trailing window
  #[serde(default = "default_max_engagements_per_hour")]
  pub max_engagements_per_hour: usize,
  /// Length of the rate-limit window in minutes
  #[serde(default = "default_engagement_window_minutes")]
  pub engagement_window_minutes: i64,
  /// How many recent engagement records the history endpoint returns by default
  #[serde(default = "default_history_limit")]
  pub history_limit: usize,
}

/// Thresholds governing trend analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingConfig {
  /// How many recent questions each analysis pass scans
  #[serde(default = "default_analysis_question_limit")]
  pub analysis_question_limit: usize,
  /// How many topics survive each analysis pass
  #[serde(default = "default_trending_topic_limit")]
  pub trending_topic_limit: usize,
  /// Minimum tag frequency before a topic is flagged as trending up.
  /// The legacy service used 1 here, which flagged every topic.
  #[serde(default = "default_trending_up_threshold")]
  pub trending_up_threshold: u32,
}

/// Text generation backend settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
  /// Chat-completions endpoint; templated offline answers when unset
  #[serde(default)]
  pub endpoint: Option<String>,
  /// Model identifier passed to the endpoint
  #[serde(default = "default_generation_model")]
  pub model: String,
  /// Request timeout in seconds
  #[serde(default = "default_generation_timeout_secs")]
  pub timeout_secs: u64,
}

// Default threshold functions
fn default_max_engagements_per_hour() -> usize {
  5
}
fn default_engagement_window_minutes() -> i64 {
  60
}
fn default_history_limit() -> usize {
  50
}
fn default_analysis_question_limit() -> usize {
  50
}
fn default_trending_topic_limit() -> usize {
  10
}
fn default_trending_up_threshold() -> u32 {
  3
}
fn default_generation_model() -> String {
  "gpt-4o-mini".to_string()
}
fn default_generation_timeout_secs() -> u64 {
  30
}

impl Default for EngagementConfig {
  fn default() -> Self {
    Self {
      max_engagements_per_hour: default_max_engagements_per_hour(),
      engagement_window_minutes: default_engagement_window_minutes(),
      history_limit: default_history_limit(),
    }
  }
}

impl Default for TrendingConfig {
  fn default() -> Self {
    Self {
      analysis_question_limit: default_analysis_question_limit(),
      trending_topic_limit: default_trending_topic_limit(),
      trending_up_threshold: default_trending_up_threshold(),
    }
  }
}

impl Default for GenerationConfig {
  fn default() -> Self {
    Self {
      endpoint: None,
      model: default_generation_model(),
      timeout_secs: default_generation_timeout_secs(),
    }
  }
}

impl Default for MonitorConfig {
  fn default() -> Self {
    Self {
      engagement: EngagementConfig::default(),
      trending: TrendingConfig::default(),
      generation: GenerationConfig::default(),
    }
  }
}

impl MonitorConfig {
  /// Load configuration from a file
  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let content = std::fs::read_to_string(path)?;
    let config: MonitorConfig = serde_json::from_str(&content)?;
    Ok(config)
  }

  /// Load configuration from the data root or well-known paths, else defaults
  pub fn load() -> Result<Self> {
    let mut config_paths: Vec<PathBuf> =
      vec![PathBuf::from(".hubwatch.json"), PathBuf::from("hubwatch.json")];
    if let Ok(root) = crate::server::models::data_root() {
      config_paths.push(root.join("config.json"));
    }

    for path in &config_paths {
      if path.exists() {
        return Self::load_from_file(path);
      }
    }

    // No config file found, use defaults
    Ok(MonitorConfig::default())
  }

  /// Save configuration to a file
  pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
    let content = serde_json::to_string_pretty(self)?;
    std::fs::write(path, content)?;
    Ok(())
  }
}
