//! File-backed entity storage for the community data set
//!
//! Every entity lives under a single data root (`HUBWATCH_ROOT` or
//! `~/.hubwatch`): questions and answers as one JSON document per row,
//! the engagement log as an append-only JSONL file, stats and trending
//! topics as single JSON documents.

use anyhow::{anyhow, Result};
use dirs::home_dir;
use std::path::PathBuf;

pub mod answer;
pub mod engagement;
pub mod persona;
pub mod question;
pub mod stats;
pub mod trending;

/// Resolve the data root directory, honoring the HUBWATCH_ROOT override
pub fn data_root() -> Result<PathBuf> {
  if let Ok(root) = std::env::var("HUBWATCH_ROOT") {
    return Ok(PathBuf::from(root));
  }

  home_dir().map(|home| home.join(".hubwatch")).ok_or_else(|| anyhow!("Could not determine home directory"))
}
