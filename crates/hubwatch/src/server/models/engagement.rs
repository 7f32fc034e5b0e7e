//! Engagement record log
//!
//! Every attempted engagement appends one record to `engagements.jsonl`.
//! The log is read back for two things only: counting records inside the
//! trailing rate-limit window, and serving the history endpoint.

use anyhow::Result;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

/// Kinds of automated community engagement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EngagementType {
  UnansweredQuestion,
  TrendingTopic,
  CollaborationRequest,
}

/// One attempted engagement, successful or not
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EngagementRecord {
  pub timestamp: DateTime<Utc>,
  pub engagement_type: EngagementType,
  pub target_id: Uuid,
  pub persona_id: String,
  pub success: bool,
}

impl EngagementRecord {
  pub fn new(engagement_type: EngagementType, target_id: Uuid, persona_id: &str, success: bool) -> Self {
    Self {
      timestamp: Utc::now(),
      engagement_type,
      target_id,
      persona_id: persona_id.to_string(),
      success,
    }
  }
}

fn log_path() -> Result<PathBuf> {
  Ok(super::data_root()?.join("engagements.jsonl"))
}

/// Append a record to the engagement log
pub fn append(record: &EngagementRecord) -> Result<()> {
  let path = log_path()?;

  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }

  let json_line = serde_json::to_string(record)?;

  use std::fs::OpenOptions;
  use std::io::Write;

  let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
  writeln!(file, "{json_line}")?;

  Ok(())
}

/// Load the full engagement log, oldest first
pub fn load_all() -> Result<Vec<EngagementRecord>> {
  let path = log_path()?;

  if !path.exists() {
    return Ok(Vec::new());
  }

  let content = fs::read_to_string(&path)?;
  let mut records = Vec::new();
  for line in content.lines() {
    if line.trim().is_empty() {
      continue;
    }
    // Skip malformed lines rather than poisoning the window count
    if let Ok(record) = serde_json::from_str::<EngagementRecord>(line) {
      records.push(record);
    }
  }

  Ok(records)
}

/// Count records with a timestamp at or after the cutoff
pub fn count_since(cutoff: DateTime<Utc>) -> Result<usize> {
  let records = load_all()?;
  Ok(records.iter().filter(|r| r.timestamp >= cutoff).count())
}

/// The most recent `limit` records, newest first
pub fn history(limit: usize) -> Result<Vec<EngagementRecord>> {
  let mut records = load_all()?;
  records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
  records.truncate(limit);
  Ok(records)
}
