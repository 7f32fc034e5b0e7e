//! Trending topic storage
//!
//! The stored set is replaced wholesale on every analysis pass; there is
//! no append-only history.

use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

/// Tag sentiment classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
  Positive,
  Neutral,
  Negative,
}

/// One trending community topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TrendingTopic {
  pub topic: String,
  pub frequency: u32,
  pub sentiment: Sentiment,
  pub trending_up: bool,
  pub related_question_ids: Vec<Uuid>,
}

fn trending_path() -> Result<PathBuf> {
  Ok(super::data_root()?.join("trending.json"))
}

/// Replace the stored trending set
pub fn save_all(topics: &[TrendingTopic]) -> Result<()> {
  let path = trending_path()?;

  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }

  let content = serde_json::to_string_pretty(topics)?;
  fs::write(&path, content)?;

  Ok(())
}

/// Load the current trending set
pub fn load_all() -> Result<Vec<TrendingTopic>> {
  let path = trending_path()?;

  if !path.exists() {
    return Ok(Vec::new());
  }

  let content = fs::read_to_string(&path)?;
  let topics: Vec<TrendingTopic> = serde_json::from_str(&content)?;
  Ok(topics)
}
