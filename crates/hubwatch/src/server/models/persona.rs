//! Persona registry
//!
//! Personas are static and config-driven: `personas.json` under the data
//! root overrides the built-in defaults. Each persona carries the voice
//! metadata the generation service folds into its system prompt.

use anyhow::{anyhow, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;

/// An AI community persona
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Persona {
  pub id: String,
  pub name: String,
  pub role: String,
  pub expertise: Vec<String>,
  /// Tone instructions folded into the generation prompt
  pub voice: String,
}

/// Built-in persona set used when no registry file exists
pub fn defaults() -> Vec<Persona> {
  vec![
    Persona {
      id: "sage".to_string(),
      name: "Sage".to_string(),
      role: "product mentor".to_string(),
      expertise: vec!["product strategy".to_string(), "user research".to_string()],
      voice: "encouraging and practical, answers with concrete next steps".to_string(),
    },
    Persona {
      id: "forge".to_string(),
      name: "Forge".to_string(),
      role: "prototyping engineer".to_string(),
      expertise: vec!["rapid prototyping".to_string(), "mobile apps".to_string(), "web apps".to_string()],
      voice: "hands-on and direct, prefers tools and code over theory".to_string(),
    },
    Persona {
      id: "scout".to_string(),
      name: "Scout".to_string(),
      role: "trend researcher".to_string(),
      expertise: vec!["market trends".to_string(), "community building".to_string()],
      voice: "curious and data-minded, cites what the community is discussing".to_string(),
    },
  ]
}

/// List all personas, preferring the registry file over built-ins
pub fn list() -> Result<Vec<Persona>> {
  let path = super::data_root()?.join("personas.json");

  if !path.exists() {
    return Ok(defaults());
  }

  let content = fs::read_to_string(&path)?;
  let personas: Vec<Persona> = serde_json::from_str(&content)?;
  if personas.is_empty() {
    return Err(anyhow!("Persona registry {} is empty", path.display()));
  }

  Ok(personas)
}

/// Look up a persona by id
pub fn find(id: &str) -> Result<Persona> {
  list()?
    .into_iter()
    .find(|p| p.id == id)
    .ok_or_else(|| anyhow!("Persona {} not found", id))
}
