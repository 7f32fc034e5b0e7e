//! Question storage and queries

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

/// Sort orders the question listing endpoint supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionSort {
  /// Newest questions first
  #[default]
  Newest,
  /// Unanswered questions first, newest within each group
  Unanswered,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Question {
  pub id: Uuid,
  pub title: String,
  pub content: String,
  pub tags: Vec<String>,
  pub author: String,
  pub answer_count: u32,
  pub is_ai_generated: bool,
  pub created_at: DateTime<Utc>,
}

impl Question {
  pub fn new(title: String, content: String, tags: Vec<String>, author: String) -> Self {
    Self {
      id: Uuid::new_v4(),
      title,
      content,
      tags,
      author,
      answer_count: 0,
      is_ai_generated: false,
      created_at: Utc::now(),
    }
  }

  /// Get the file path for this question
  pub fn file_path(&self) -> Result<PathBuf> {
    question_path(&self.id)
  }
}

fn questions_dir() -> Result<PathBuf> {
  Ok(super::data_root()?.join("questions"))
}

fn question_path(id: &Uuid) -> Result<PathBuf> {
  Ok(questions_dir()?.join(format!("{id}.json")))
}

/// Save a new question to disk
pub fn save(question: &Question) -> Result<()> {
  let file_path = question.file_path()?;

  if let Some(parent) = file_path.parent() {
    fs::create_dir_all(parent)?;
  }

  if file_path.exists() {
    return Err(anyhow!("Question {} already exists", question.id));
  }

  let content = serde_json::to_string_pretty(question)?;
  fs::write(&file_path, content)?;

  Ok(())
}

/// Load a question from disk
pub fn load(id: &Uuid) -> Result<Question> {
  let file_path = question_path(id)?;

  if !file_path.exists() {
    return Err(anyhow!("Question {} not found", id));
  }

  let content = fs::read_to_string(&file_path)?;
  let question: Question = serde_json::from_str(&content)?;
  Ok(question)
}

/// Overwrite an existing question on disk
pub fn update(question: &Question) -> Result<()> {
  let file_path = question.file_path()?;

  if !file_path.exists() {
    return Err(anyhow!("Question {} not found", question.id));
  }

  let content = serde_json::to_string_pretty(question)?;
  fs::write(&file_path, content)?;

  Ok(())
}

/// Increment the answer counter after an answer row is written
pub fn record_answer(id: &Uuid) -> Result<Question> {
  let mut question = load(id)?;
  question.answer_count += 1;
  update(&question)?;
  Ok(question)
}

/// List all questions, newest first
pub fn list_all() -> Result<Vec<Question>> {
  let dir = questions_dir()?;

  if !dir.exists() {
    return Ok(Vec::new());
  }

  let mut questions = Vec::new();
  for entry in fs::read_dir(&dir)? {
    let path = entry?.path();
    if path.extension().and_then(|e| e.to_str()) != Some("json") {
      continue;
    }

    // Skip unreadable rows rather than failing the whole listing
    let Ok(content) = fs::read_to_string(&path) else {
      continue;
    };
    let Ok(question) = serde_json::from_str::<Question>(&content) else {
      continue;
    };
    questions.push(question);
  }

  questions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
  Ok(questions)
}

/// List questions with the requested sort order and limit
pub fn list(sort: QuestionSort, limit: Option<usize>) -> Result<Vec<Question>> {
  let mut questions = list_all()?;

  if sort == QuestionSort::Unanswered {
    // Stable sort keeps newest-first ordering within each group
    questions.sort_by_key(|q| q.answer_count);
  }

  if let Some(limit) = limit {
    questions.truncate(limit);
  }

  Ok(questions)
}
