//! Engagement rate limiting, opportunity selection, and execution
//!
//! The monitor owns the generation backend and all engagement
//! bookkeeping. Mutating entry points take `&mut self`; the server keeps
//! the monitor behind a `tokio::sync::Mutex`, so the window count and
//! the record append happen under one lock and concurrent force calls
//! cannot race past the rate limit.

use chrono::{Duration, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::MonitorConfig;
use crate::error::{MonitorError, Result};
use crate::server::models::{answer, engagement, persona, question, stats};
use crate::server::models::answer::Answer;
use crate::server::models::engagement::{EngagementRecord, EngagementType};
use crate::server::models::persona::Persona;
use crate::server::models::question::{Question, QuestionSort};
use crate::server::models::stats::MonitoringStats;
use crate::server::services::generation::GenerationService;

/// Summary of one executed engagement
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EngagementOutcome {
  pub question_id: uuid::Uuid,
  pub answer_id: uuid::Uuid,
  pub persona_id: String,
  pub engagement_type: EngagementType,
}

/// The engagement monitor service
pub struct EngagementMonitor {
  config: MonitorConfig,
  generator: Box<dyn GenerationService>,
}

impl EngagementMonitor {
  pub fn new(config: MonitorConfig, generator: Box<dyn GenerationService>) -> Self {
    Self { config, generator }
  }

  pub fn config(&self) -> &MonitorConfig {
    &self.config
  }

  /// Number of engagement attempts inside the trailing window
  pub fn engagements_in_window(&self) -> Result<usize> {
    let cutoff = Utc::now() - Duration::minutes(self.config.engagement.engagement_window_minutes);
    Ok(engagement::count_since(cutoff)?)
  }

  /// Whether another automated engagement is allowed right now
  pub fn can_engage(&self) -> Result<bool> {
    let count = self.engagements_in_window()?;
    Ok(count < self.config.engagement.max_engagements_per_hour)
  }

  /// Unanswered human-authored questions, newest first
  pub fn find_opportunities(&self) -> Result<Vec<Question>> {
    let candidates = question::list(QuestionSort::Unanswered, None)?;
    Ok(
      candidates
        .into_iter()
        .filter(|q| q.answer_count == 0 && !q.is_ai_generated)
        .collect(),
    )
  }

  /// One full monitor cycle: rate check, pick the first opportunity,
  /// engage it. `Ok(None)` means there was nothing to answer.
  pub async fn run_cycle(&mut self) -> Result<Option<EngagementOutcome>> {
    self.check_rate_limit()?;

    let opportunities = self.find_opportunities()?;
    let Some(target) = opportunities.into_iter().next() else {
      return Ok(None);
    };

    let outcome = self.execute(&target, None).await?;
    Ok(Some(outcome))
  }

  /// Engage one specific question, optionally forcing a persona
  pub async fn engage(
    &mut self,
    question_id: &uuid::Uuid,
    persona_hint: Option<&str>,
  ) -> Result<EngagementOutcome> {
    self.check_rate_limit()?;

    let target = question::load(question_id)
      .map_err(|e| MonitorError::NotFound(e.to_string()))?;

    self.execute(&target, persona_hint).await
  }

  /// Current persisted stats with the derived persona count refreshed
  pub fn stats(&self) -> Result<MonitoringStats> {
    let mut current = stats::load()?;
    current.active_personas = persona::list()?.len();
    Ok(current)
  }

  /// Most recent engagement records, newest first
  pub fn history(&self, limit: Option<usize>) -> Result<Vec<EngagementRecord>> {
    let limit = limit.unwrap_or(self.config.engagement.history_limit);
    Ok(engagement::history(limit)?)
  }

  fn check_rate_limit(&self) -> Result<()> {
    let count = self.engagements_in_window()?;
    let max = self.config.engagement.max_engagements_per_hour;
    if count >= max {
      return Err(MonitorError::RateLimited { count, max });
    }
    Ok(())
  }

  fn select_persona(&self, hint: Option<&str>, current: &MonitoringStats) -> Result<Persona> {
    if let Some(id) = hint {
      return persona::find(id).map_err(|e| MonitorError::Validation(e.to_string()));
    }

    let personas = persona::list()?;
    // Round-robin keyed on the engagement counter spreads work across
    // personas and keeps selection deterministic
    let index = (current.total_engagements as usize) % personas.len();
    Ok(personas[index].clone())
  }

  /// Generate and persist one AI answer for the target question.
  /// Failures are counted and logged as failed engagements, then
  /// surfaced as upstream errors.
  async fn execute(
    &mut self,
    target: &Question,
    persona_hint: Option<&str>,
  ) -> Result<EngagementOutcome> {
    let mut current = stats::load()?;
    let selected = self.select_persona(persona_hint, &current)?;

    let prompt = format!("{}\n\n{}", target.title, target.content);
    let generated = self.generator.generate(&prompt, &selected).await;

    let now = Utc::now();
    current.active_personas = persona::list()?.len();

    match generated {
      Ok(text) => {
        let reply = Answer::new(
          target.id,
          text,
          format!("{} (AI)", selected.name),
          true,
        );
        if let Err(e) = answer::create(&reply) {
          self.record_failure(&mut current, target, &selected)?;
          return Err(MonitorError::Upstream(format!("failed to persist answer: {e}")));
        }

        current.record_success(now);
        stats::save(&current)?;
        engagement::append(&EngagementRecord::new(
          EngagementType::UnansweredQuestion,
          target.id,
          &selected.id,
          true,
        ))?;

        Ok(EngagementOutcome {
          question_id: target.id,
          answer_id: reply.id,
          persona_id: selected.id,
          engagement_type: EngagementType::UnansweredQuestion,
        })
      }
      Err(e) => {
        self.record_failure(&mut current, target, &selected)?;
        Err(MonitorError::Upstream(e.to_string()))
      }
    }
  }

  fn record_failure(
    &self,
    current: &mut MonitoringStats,
    target: &Question,
    selected: &Persona,
  ) -> Result<()> {
    current.record_failure(Utc::now());
    stats::save(current)?;
    engagement::append(&EngagementRecord::new(
      EngagementType::UnansweredQuestion,
      target.id,
      &selected.id,
      false,
    ))?;
    Ok(())
  }
}
