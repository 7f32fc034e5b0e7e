#[cfg(test)]
mod model_tests {
  use anyhow::Result;
  use chrono::{Duration, Utc};
  use hubwatch::server::models::engagement::{EngagementRecord, EngagementType};
  use hubwatch::server::models::question::{Question, QuestionSort};
  use hubwatch::server::models::{answer, engagement, persona, question, stats, trending};
  use serial_test::serial;
  use std::env;
  use tempfile::TempDir;
  use uuid::Uuid;

  fn setup_temp_root() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    env::set_var("HUBWATCH_ROOT", temp_dir.path());
    temp_dir
  }

  fn sample_question(title: &str) -> Question {
    Question::new(
      title.to_string(),
      format!("{title} - body"),
      vec!["prototyping".to_string()],
      "casey".to_string(),
    )
  }

  #[test]
  #[serial]
  fn test_question_save_and_load() -> Result<()> {
    let _temp = setup_temp_root();

    let q = sample_question("How to prototype a mobile app?");
    question::save(&q)?;

    let loaded = question::load(&q.id)?;
    assert_eq!(loaded.title, "How to prototype a mobile app?");
    assert_eq!(loaded.answer_count, 0);
    assert!(!loaded.is_ai_generated);

    Ok(())
  }

  #[test]
  #[serial]
  fn test_question_duplicate_save_fails() -> Result<()> {
    let _temp = setup_temp_root();

    let q = sample_question("duplicate");
    question::save(&q)?;

    let result = question::save(&q);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("already exists"));

    Ok(())
  }

  #[test]
  #[serial]
  fn test_question_load_nonexistent() {
    let _temp = setup_temp_root();

    let result = question::load(&Uuid::new_v4());
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("not found"));
  }

  #[test]
  #[serial]
  fn test_question_list_newest_first() -> Result<()> {
    let _temp = setup_temp_root();

    let mut older = sample_question("older");
    older.created_at = Utc::now() - Duration::hours(2);
    question::save(&older)?;

    let newer = sample_question("newer");
    question::save(&newer)?;

    let listed = question::list(QuestionSort::Newest, None)?;
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].title, "newer");
    assert_eq!(listed[1].title, "older");

    Ok(())
  }

  #[test]
  #[serial]
  fn test_question_list_unanswered_first() -> Result<()> {
    let _temp = setup_temp_root();

    let answered = sample_question("answered");
    question::save(&answered)?;
    let reply = answer::Answer::new(answered.id, "done".to_string(), "casey".to_string(), false);
    answer::create(&reply)?;

    let open = sample_question("open");
    question::save(&open)?;

    let listed = question::list(QuestionSort::Unanswered, None)?;
    assert_eq!(listed[0].title, "open");
    assert_eq!(listed[1].title, "answered");

    // Limit applies after sorting
    let limited = question::list(QuestionSort::Unanswered, Some(1))?;
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].title, "open");

    Ok(())
  }

  #[test]
  #[serial]
  fn test_answer_create_bumps_answer_count() -> Result<()> {
    let _temp = setup_temp_root();

    let q = sample_question("needs an answer");
    question::save(&q)?;

    let reply = answer::Answer::new(q.id, "try this".to_string(), "sam".to_string(), false);
    answer::create(&reply)?;

    let reloaded = question::load(&q.id)?;
    assert_eq!(reloaded.answer_count, 1);

    let answers = answer::list_for_question(&q.id)?;
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0].content, "try this");
    assert!(!answers[0].is_ai);

    Ok(())
  }

  #[test]
  #[serial]
  fn test_answer_to_missing_question_fails() {
    let _temp = setup_temp_root();

    let reply =
      answer::Answer::new(Uuid::new_v4(), "orphan".to_string(), "sam".to_string(), false);
    assert!(answer::create(&reply).is_err());
  }

  #[test]
  #[serial]
  fn test_engagement_log_window_counting() -> Result<()> {
    let _temp = setup_temp_root();

    let target = Uuid::new_v4();
    for i in 0..3 {
      let mut record =
        EngagementRecord::new(EngagementType::UnansweredQuestion, target, "sage", true);
      // Push one record outside the window
      if i == 0 {
        record.timestamp = Utc::now() - Duration::minutes(90);
      }
      engagement::append(&record)?;
    }

    let cutoff = Utc::now() - Duration::minutes(60);
    assert_eq!(engagement::count_since(cutoff)?, 2);
    assert_eq!(engagement::load_all()?.len(), 3);

    let recent = engagement::history(1)?;
    assert_eq!(recent.len(), 1);

    Ok(())
  }

  #[test]
  #[serial]
  fn test_stats_counters_and_persistence() -> Result<()> {
    let _temp = setup_temp_root();

    let mut current = stats::load()?;
    assert_eq!(current.total_engagements, 0);
    assert_eq!(current.community_health_score, 100.0);

    let now = Utc::now();
    current.record_success(now);
    current.record_success(now);
    current.record_failure(now);
    stats::save(&current)?;

    let reloaded = stats::load()?;
    assert_eq!(reloaded.total_engagements, 3);
    assert_eq!(
      reloaded.total_engagements,
      reloaded.successful_engagements + reloaded.failed_engagements
    );
    assert!((reloaded.community_health_score - 200.0 / 3.0).abs() < 1e-9);
    assert!(reloaded.last_engagement.is_some());

    Ok(())
  }

  #[test]
  #[serial]
  fn test_trending_set_is_replaced() -> Result<()> {
    let _temp = setup_temp_root();

    use hubwatch::server::models::trending::{Sentiment, TrendingTopic};

    let first = vec![TrendingTopic {
      topic: "react".to_string(),
      frequency: 4,
      sentiment: Sentiment::Positive,
      trending_up: true,
      related_question_ids: vec![],
    }];
    trending::save_all(&first)?;

    let second = vec![TrendingTopic {
      topic: "rust".to_string(),
      frequency: 2,
      sentiment: Sentiment::Neutral,
      trending_up: false,
      related_question_ids: vec![],
    }];
    trending::save_all(&second)?;

    let loaded = trending::load_all()?;
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].topic, "rust");

    Ok(())
  }

  #[test]
  #[serial]
  fn test_persona_defaults_and_registry_override() -> Result<()> {
    let temp = setup_temp_root();

    let defaults = persona::list()?;
    assert!(!defaults.is_empty());
    assert!(persona::find("sage").is_ok());
    assert!(persona::find("nobody").is_err());

    let custom = r#"[{"id":"echo","name":"Echo","role":"tester","expertise":["qa"],"voice":"terse"}]"#;
    std::fs::write(temp.path().join("personas.json"), custom)?;

    let personas = persona::list()?;
    assert_eq!(personas.len(), 1);
    assert_eq!(personas[0].id, "echo");
    assert!(persona::find("sage").is_err());

    Ok(())
  }
}

#[cfg(test)]
mod config_tests {
  use anyhow::Result;
  use hubwatch::MonitorConfig;
  use tempfile::TempDir;

  #[test]
  fn test_defaults() {
    let config = MonitorConfig::default();
    assert_eq!(config.engagement.max_engagements_per_hour, 5);
    assert_eq!(config.engagement.engagement_window_minutes, 60);
    assert_eq!(config.trending.analysis_question_limit, 50);
    assert_eq!(config.trending.trending_topic_limit, 10);
    assert_eq!(config.trending.trending_up_threshold, 3);
    assert!(config.generation.endpoint.is_none());
  }

  #[test]
  fn test_partial_file_uses_serde_defaults() -> Result<()> {
    let temp = TempDir::new()?;
    let path = temp.path().join("config.json");
    std::fs::write(&path, r#"{"engagement": {"max_engagements_per_hour": 2}}"#)?;

    let config = MonitorConfig::load_from_file(&path)?;
    assert_eq!(config.engagement.max_engagements_per_hour, 2);
    assert_eq!(config.engagement.engagement_window_minutes, 60);
    assert_eq!(config.trending.trending_up_threshold, 3);

    Ok(())
  }

  #[test]
  fn test_save_round_trip() -> Result<()> {
    let temp = TempDir::new()?;
    let path = temp.path().join("config.json");

    let mut config = MonitorConfig::default();
    config.trending.trending_up_threshold = 7;
    config.save_to_file(&path)?;

    let reloaded = MonitorConfig::load_from_file(&path)?;
    assert_eq!(reloaded.trending.trending_up_threshold, 7);

    Ok(())
  }
}

#[cfg(test)]
mod trend_tests {
  use hubwatch::config::TrendingConfig;
  use hubwatch::server::models::question::Question;
  use hubwatch::server::models::trending::Sentiment;
  use hubwatch::server::services::trends::analyze_questions;

  fn question_with(title: &str, content: &str, tags: &[&str]) -> Question {
    Question::new(
      title.to_string(),
      content.to_string(),
      tags.iter().map(|t| t.to_string()).collect(),
      "casey".to_string(),
    )
  }

  #[test]
  fn test_frequency_counting_and_ordering() {
    let questions = vec![
      question_with("a", "body", &["react", "mobile"]),
      question_with("b", "body", &["react"]),
      question_with("c", "body", &["react", "mobile"]),
      question_with("d", "body", &["design"]),
    ];

    let topics = analyze_questions(&questions, &TrendingConfig::default());
    assert_eq!(topics[0].topic, "react");
    assert_eq!(topics[0].frequency, 3);
    assert_eq!(topics[1].topic, "mobile");
    assert_eq!(topics[1].frequency, 2);
    assert_eq!(topics[2].topic, "design");
  }

  #[test]
  fn test_mixed_sentiment_is_neutral() {
    let questions =
      vec![question_with("idea", "This is a great and terrible idea", &["react"])];

    let topics = analyze_questions(&questions, &TrendingConfig::default());
    assert_eq!(topics.len(), 1);
    assert_eq!(topics[0].sentiment, Sentiment::Neutral);
  }

  #[test]
  fn test_sentiment_classification() {
    let questions = vec![
      question_with("praise", "This workflow is great, love it", &["workflow"]),
      question_with("complaint", "This tool is terrible and broken", &["tooling"]),
    ];

    let topics = analyze_questions(&questions, &TrendingConfig::default());
    let workflow = topics.iter().find(|t| t.topic == "workflow").unwrap();
    let tooling = topics.iter().find(|t| t.topic == "tooling").unwrap();
    assert_eq!(workflow.sentiment, Sentiment::Positive);
    assert_eq!(tooling.sentiment, Sentiment::Negative);
  }

  #[test]
  fn test_trending_up_threshold() {
    let questions = vec![
      question_with("a", "body", &["react"]),
      question_with("b", "body", &["react"]),
      question_with("c", "body", &["react"]),
      question_with("d", "body", &["design"]),
    ];

    let config = TrendingConfig::default();
    assert_eq!(config.trending_up_threshold, 3);

    let topics = analyze_questions(&questions, &config);
    let react = topics.iter().find(|t| t.topic == "react").unwrap();
    let design = topics.iter().find(|t| t.topic == "design").unwrap();
    assert!(react.trending_up);
    assert!(!design.trending_up);
  }

  #[test]
  fn test_topic_limit() {
    let mut questions = Vec::new();
    for i in 0..15 {
      questions.push(question_with("q", "body", &[&format!("tag{i}")]));
    }

    let topics = analyze_questions(&questions, &TrendingConfig::default());
    assert_eq!(topics.len(), 10);
  }

  #[test]
  fn test_analysis_is_idempotent_on_fixed_snapshot() {
    let questions = vec![
      question_with("a", "great stuff", &["react", "mobile"]),
      question_with("b", "bad bug", &["react"]),
    ];

    let config = TrendingConfig::default();
    let first = analyze_questions(&questions, &config);
    let second = analyze_questions(&questions, &config);
    assert_eq!(first, second);
  }

  #[test]
  fn test_related_question_ids_collected() {
    let q1 = question_with("a", "body", &["react"]);
    let q2 = question_with("b", "body", &["react"]);
    let expected = vec![q1.id, q2.id];

    let topics = analyze_questions(&[q1, q2], &TrendingConfig::default());
    assert_eq!(topics[0].related_question_ids, expected);
  }
}
