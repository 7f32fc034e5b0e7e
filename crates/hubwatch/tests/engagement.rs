//! Engagement monitor behavior tests
//!
//! These run against a temporary data root and the offline generation
//! backends, so no network or server process is involved.

use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use hubwatch::config::MonitorConfig;
use hubwatch::error::MonitorError;
use hubwatch::server::models::persona::Persona;
use hubwatch::server::models::question::Question;
use hubwatch::server::models::{answer, engagement, question, stats};
use hubwatch::server::services::engagement::EngagementMonitor;
use hubwatch::server::services::generation::{
  FailingGenerationService, GenerationError, GenerationService, TemplateGenerationService,
};
use serial_test::serial;
use tempfile::TempDir;
use uuid::Uuid;

fn setup_temp_root() -> TempDir {
  let temp_dir = TempDir::new().unwrap();
  env::set_var("HUBWATCH_ROOT", temp_dir.path());
  temp_dir
}

fn template_monitor(config: MonitorConfig) -> EngagementMonitor {
  EngagementMonitor::new(config, Box::new(TemplateGenerationService))
}

fn post_question(title: &str) -> Question {
  let q = Question::new(
    title.to_string(),
    format!("{title} - body"),
    vec!["prototyping".to_string()],
    "casey".to_string(),
  );
  question::save(&q).unwrap();
  q
}

/// Generation backend that counts how often it is invoked
struct CountingGenerationService {
  calls: Arc<AtomicUsize>,
}

#[async_trait]
impl GenerationService for CountingGenerationService {
  async fn generate(&self, prompt: &str, persona: &Persona) -> Result<String, GenerationError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    TemplateGenerationService.generate(prompt, persona).await
  }
}

#[tokio::test]
#[serial]
async fn test_run_cycle_with_no_questions_is_a_noop() {
  let _temp = setup_temp_root();

  let mut monitor = template_monitor(MonitorConfig::default());
  let outcome = monitor.run_cycle().await.unwrap();
  assert!(outcome.is_none());

  let current = stats::load().unwrap();
  assert_eq!(current.total_engagements, 0);
  assert!(engagement::load_all().unwrap().is_empty());
}

#[tokio::test]
#[serial]
async fn test_run_cycle_answers_one_question() {
  let _temp = setup_temp_root();

  let q = post_question("How do I test a prototype?");

  let mut monitor = template_monitor(MonitorConfig::default());
  let outcome = monitor.run_cycle().await.unwrap().unwrap();
  assert_eq!(outcome.question_id, q.id);

  let reloaded = question::load(&q.id).unwrap();
  assert_eq!(reloaded.answer_count, 1);

  let answers = answer::list_for_question(&q.id).unwrap();
  assert_eq!(answers.len(), 1);
  assert!(answers[0].is_ai);
  assert!(answers[0].author.contains("(AI)"));

  let current = stats::load().unwrap();
  assert_eq!(current.total_engagements, 1);
  assert_eq!(current.successful_engagements, 1);
  assert!(current.last_engagement.is_some());
  assert!((current.community_health_score - 100.0).abs() < 1e-9);
}

#[tokio::test]
#[serial]
async fn test_opportunities_exclude_answered_and_ai_questions() {
  let _temp = setup_temp_root();

  let open = post_question("open");

  let answered = post_question("answered");
  let reply =
    answer::Answer::new(answered.id, "done".to_string(), "casey".to_string(), false);
  answer::create(&reply).unwrap();

  let mut synthetic = Question::new(
    "ai seeded".to_string(),
    "body".to_string(),
    vec![],
    "Sage (AI)".to_string(),
  );
  synthetic.is_ai_generated = true;
  question::save(&synthetic).unwrap();

  let monitor = template_monitor(MonitorConfig::default());
  let opportunities = monitor.find_opportunities().unwrap();
  assert_eq!(opportunities.len(), 1);
  assert_eq!(opportunities[0].id, open.id);
}

#[tokio::test]
#[serial]
async fn test_answered_question_stops_being_an_opportunity() {
  let _temp = setup_temp_root();

  post_question("only one");

  let mut monitor = template_monitor(MonitorConfig::default());
  assert!(monitor.run_cycle().await.unwrap().is_some());
  assert!(monitor.find_opportunities().unwrap().is_empty());
  assert!(monitor.run_cycle().await.unwrap().is_none());
}

#[tokio::test]
#[serial]
async fn test_rate_limit_caps_engagements_in_window() {
  let _temp = setup_temp_root();

  for i in 0..6 {
    post_question(&format!("question {i}"));
  }

  let calls = Arc::new(AtomicUsize::new(0));
  let config = MonitorConfig::default();
  let max = config.engagement.max_engagements_per_hour;
  assert_eq!(max, 5);

  let mut monitor = EngagementMonitor::new(
    config,
    Box::new(CountingGenerationService { calls: Arc::clone(&calls) }),
  );

  for _ in 0..max {
    assert!(monitor.run_cycle().await.unwrap().is_some());
  }

  let result = monitor.run_cycle().await;
  match result {
    Err(MonitorError::RateLimited { count, max }) => {
      assert_eq!(count, 5);
      assert_eq!(max, 5);
    }
    other => panic!("expected RateLimited, got {other:?}"),
  }

  // The limited attempt never reached the generator and left no record
  assert_eq!(calls.load(Ordering::SeqCst), 5);
  assert_eq!(engagement::load_all().unwrap().len(), 5);
  assert_eq!(stats::load().unwrap().total_engagements, 5);
}

#[tokio::test]
#[serial]
async fn test_records_outside_window_do_not_count() {
  let _temp = setup_temp_root();

  use hubwatch::server::models::engagement::{EngagementRecord, EngagementType};

  // Fill the window with stale records from two hours ago
  for _ in 0..5 {
    let mut record =
      EngagementRecord::new(EngagementType::UnansweredQuestion, Uuid::new_v4(), "sage", true);
    record.timestamp = Utc::now() - Duration::hours(2);
    engagement::append(&record).unwrap();
  }

  post_question("fresh");

  let mut monitor = template_monitor(MonitorConfig::default());
  assert!(monitor.can_engage().unwrap());
  assert!(monitor.run_cycle().await.unwrap().is_some());
}

#[tokio::test]
#[serial]
async fn test_failed_generation_is_counted_and_logged() {
  let _temp = setup_temp_root();

  let q = post_question("doomed");

  let mut monitor =
    EngagementMonitor::new(MonitorConfig::default(), Box::new(FailingGenerationService));

  let result = monitor.run_cycle().await;
  assert!(matches!(result, Err(MonitorError::Upstream(_))));

  // No answer was written, so the question stays an opportunity
  assert_eq!(question::load(&q.id).unwrap().answer_count, 0);
  assert_eq!(monitor.find_opportunities().unwrap().len(), 1);

  let current = stats::load().unwrap();
  assert_eq!(current.total_engagements, 1);
  assert_eq!(current.failed_engagements, 1);
  assert_eq!(
    current.total_engagements,
    current.successful_engagements + current.failed_engagements
  );
  assert!((current.community_health_score - 0.0).abs() < 1e-9);

  let records = engagement::load_all().unwrap();
  assert_eq!(records.len(), 1);
  assert!(!records[0].success);
}

#[tokio::test]
#[serial]
async fn test_personas_rotate_round_robin() {
  let _temp = setup_temp_root();

  for i in 0..4 {
    post_question(&format!("question {i}"));
  }

  let mut monitor = template_monitor(MonitorConfig::default());
  let mut persona_ids = Vec::new();
  for _ in 0..4 {
    let outcome = monitor.run_cycle().await.unwrap().unwrap();
    persona_ids.push(outcome.persona_id);
  }

  // Three default personas, so the fourth engagement wraps around
  assert_eq!(persona_ids[0], persona_ids[3]);
  assert_ne!(persona_ids[0], persona_ids[1]);
  assert_ne!(persona_ids[1], persona_ids[2]);
}

#[tokio::test]
#[serial]
async fn test_targeted_engage_honors_persona_hint() {
  let _temp = setup_temp_root();

  let q = post_question("targeted");

  let mut monitor = template_monitor(MonitorConfig::default());
  let outcome = monitor.engage(&q.id, Some("forge")).await.unwrap();
  assert_eq!(outcome.persona_id, "forge");

  let answers = answer::list_for_question(&q.id).unwrap();
  assert!(answers[0].author.contains("Forge"));
}

#[tokio::test]
#[serial]
async fn test_targeted_engage_rejects_unknown_persona() {
  let _temp = setup_temp_root();

  let q = post_question("targeted");

  let mut monitor = template_monitor(MonitorConfig::default());
  let result = monitor.engage(&q.id, Some("nobody")).await;
  assert!(matches!(result, Err(MonitorError::Validation(_))));

  // Rejected hints leave no trace
  assert_eq!(stats::load().unwrap().total_engagements, 0);
  assert!(engagement::load_all().unwrap().is_empty());
}

#[tokio::test]
#[serial]
async fn test_targeted_engage_missing_question() {
  let _temp = setup_temp_root();

  let mut monitor = template_monitor(MonitorConfig::default());
  let result = monitor.engage(&Uuid::new_v4(), None).await;
  assert!(matches!(result, Err(MonitorError::NotFound(_))));
}

#[tokio::test]
#[serial]
async fn test_stats_survive_monitor_restart() {
  let _temp = setup_temp_root();

  post_question("before restart");

  let mut monitor = template_monitor(MonitorConfig::default());
  monitor.run_cycle().await.unwrap().unwrap();

  // A fresh monitor reads the same persisted counters
  let replacement = template_monitor(MonitorConfig::default());
  let current = replacement.stats().unwrap();
  assert_eq!(current.total_engagements, 1);
  assert_eq!(current.successful_engagements, 1);
  assert_eq!(current.active_personas, 3);
}

#[tokio::test]
#[serial]
async fn test_history_is_newest_first_and_limited() {
  let _temp = setup_temp_root();

  for i in 0..3 {
    post_question(&format!("question {i}"));
  }

  let mut monitor = template_monitor(MonitorConfig::default());
  for _ in 0..3 {
    monitor.run_cycle().await.unwrap().unwrap();
  }

  let recent = monitor.history(Some(2)).unwrap();
  assert_eq!(recent.len(), 2);
  assert!(recent[0].timestamp >= recent[1].timestamp);

  let all = monitor.history(None).unwrap();
  assert_eq!(all.len(), 3);
}
