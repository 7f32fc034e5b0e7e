//! Persisted monitoring statistics
//!
//! `stats.json` is the single source of truth: every mutation goes
//! load -> update -> save, and every read comes from disk. The legacy
//! service kept a second in-memory copy that drifted from the database;
//! that split does not exist here.

use anyhow::Result;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Aggregate counters for the monitoring service
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
pub struct MonitoringStats {
  pub total_engagements: u64,
  pub successful_engagements: u64,
  pub failed_engagements: u64,
  pub active_personas: usize,
  pub last_engagement: Option<DateTime<Utc>>,
  /// Success ratio as a percentage; 100 when nothing has run yet
  pub community_health_score: f64,
  pub trending_topics: Vec<String>,
}

impl MonitoringStats {
  /// Record a successful engagement attempt
  pub fn record_success(&mut self, at: DateTime<Utc>) {
    self.total_engagements += 1;
    self.successful_engagements += 1;
    self.last_engagement = Some(at);
    self.recompute_health();
  }

  /// Record a failed engagement attempt
  pub fn record_failure(&mut self, at: DateTime<Utc>) {
    self.total_engagements += 1;
    self.failed_engagements += 1;
    self.last_engagement = Some(at);
    self.recompute_health();
  }

  fn recompute_health(&mut self) {
    self.community_health_score = if self.total_engagements == 0 {
      100.0
    } else {
      100.0 * self.successful_engagements as f64 / self.total_engagements as f64
    };
  }
}

fn stats_path() -> Result<PathBuf> {
  Ok(super::data_root()?.join("stats.json"))
}

/// Load stats from disk, defaulting when none have been written yet
pub fn load() -> Result<MonitoringStats> {
  let path = stats_path()?;

  if !path.exists() {
    let mut stats = MonitoringStats::default();
    stats.community_health_score = 100.0;
    return Ok(stats);
  }

  let content = fs::read_to_string(&path)?;
  let stats: MonitoringStats = serde_json::from_str(&content)?;
  Ok(stats)
}

/// Save stats to disk
pub fn save(stats: &MonitoringStats) -> Result<()> {
  let path = stats_path()?;

  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }

  let content = serde_json::to_string_pretty(stats)?;
  fs::write(&path, content)?;

  Ok(())
}
