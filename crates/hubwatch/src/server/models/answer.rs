//! Answer storage
//!
//! Answers live under `answers/<question_id>/`, one JSON document per
//! answer. Creating an answer also bumps the owning question's
//! `answer_count` so the opportunity selector sees it immediately.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

use super::question;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Answer {
  pub id: Uuid,
  pub question_id: Uuid,
  pub content: String,
  pub author: String,
  pub is_ai: bool,
  pub created_at: DateTime<Utc>,
}

impl Answer {
  pub fn new(question_id: Uuid, content: String, author: String, is_ai: bool) -> Self {
    Self { id: Uuid::new_v4(), question_id, content, author, is_ai, created_at: Utc::now() }
  }
}

fn answers_dir(question_id: &Uuid) -> Result<PathBuf> {
  Ok(super::data_root()?.join("answers").join(question_id.to_string()))
}

/// Persist an answer and bump the owning question's counter
pub fn create(answer: &Answer) -> Result<()> {
  // Reject answers to questions that don't exist
  question::load(&answer.question_id)?;

  let dir = answers_dir(&answer.question_id)?;
  fs::create_dir_all(&dir)?;

  let file_path = dir.join(format!("{}.json", answer.id));
  if file_path.exists() {
    return Err(anyhow!("Answer {} already exists", answer.id));
  }

  let content = serde_json::to_string_pretty(answer)?;
  fs::write(&file_path, content)?;

  question::record_answer(&answer.question_id)?;
  Ok(())
}

/// List all answers for a question, oldest first
pub fn list_for_question(question_id: &Uuid) -> Result<Vec<Answer>> {
  let dir = answers_dir(question_id)?;

  if !dir.exists() {
    return Ok(Vec::new());
  }

  let mut answers = Vec::new();
  for entry in fs::read_dir(&dir)? {
    let path = entry?.path();
    if path.extension().and_then(|e| e.to_str()) != Some("json") {
      continue;
    }

    let Ok(content) = fs::read_to_string(&path) else {
      continue;
    };
    let Ok(answer) = serde_json::from_str::<Answer>(&content) else {
      continue;
    };
    answers.push(answer);
  }

  answers.sort_by(|a, b| a.created_at.cmp(&b.created_at));
  Ok(answers)
}
