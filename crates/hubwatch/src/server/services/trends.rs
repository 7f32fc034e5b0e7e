//! Trend analysis over recent question tags
//!
//! Each pass scans the most recent questions, counts tag frequency,
//! scores naive sentiment from fixed word lists, and replaces the stored
//! trending set with the top topics. The pass is a pure function of its
//! input snapshot, so re-running it without new questions is a no-op.

use anyhow::Result;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::config::TrendingConfig;
use crate::server::models::{question, stats, trending};
use crate::server::models::question::{Question, QuestionSort};
use crate::server::models::trending::{Sentiment, TrendingTopic};

/// Words that nudge a tag's sentiment score up
pub const POSITIVE_WORDS: &[&str] =
  &["great", "love", "excellent", "good", "amazing", "helpful", "awesome", "best"];

/// Words that nudge a tag's sentiment score down
pub const NEGATIVE_WORDS: &[&str] =
  &["bad", "terrible", "hate", "broken", "worst", "awful", "problem", "bug"];

struct TopicAccumulator {
  frequency: u32,
  sentiment_score: i64,
  related: Vec<Uuid>,
}

/// Score a question body: +1 per positive word, -1 per negative word
fn sentiment_score(text: &str) -> i64 {
  let lowered = text.to_lowercase();
  let mut score = 0i64;

  for word in lowered.split(|c: char| !c.is_alphanumeric()) {
    if word.is_empty() {
      continue;
    }
    if POSITIVE_WORDS.contains(&word) {
      score += 1;
    } else if NEGATIVE_WORDS.contains(&word) {
      score -= 1;
    }
  }

  score
}

fn classify(score: i64) -> Sentiment {
  match score {
    s if s > 0 => Sentiment::Positive,
    s if s < 0 => Sentiment::Negative,
    _ => Sentiment::Neutral,
  }
}

/// Compute the trending set for a snapshot of questions
pub fn analyze_questions(questions: &[Question], config: &TrendingConfig) -> Vec<TrendingTopic> {
  // BTreeMap keeps tie-breaking by topic name deterministic
  let mut by_tag: BTreeMap<String, TopicAccumulator> = BTreeMap::new();

  for question in questions {
    let score = sentiment_score(&format!("{} {}", question.title, question.content));

    for tag in &question.tags {
      let tag = tag.trim().to_lowercase();
      if tag.is_empty() {
        continue;
      }

      let entry = by_tag
        .entry(tag)
        .or_insert(TopicAccumulator { frequency: 0, sentiment_score: 0, related: Vec::new() });
      entry.frequency += 1;
      entry.sentiment_score += score;
      entry.related.push(question.id);
    }
  }

  let mut topics: Vec<TrendingTopic> = by_tag
    .into_iter()
    .map(|(topic, acc)| TrendingTopic {
      topic,
      frequency: acc.frequency,
      sentiment: classify(acc.sentiment_score),
      trending_up: acc.frequency >= config.trending_up_threshold,
      related_question_ids: acc.related,
    })
    .collect();

  topics.sort_by(|a, b| b.frequency.cmp(&a.frequency).then_with(|| a.topic.cmp(&b.topic)));
  topics.truncate(config.trending_topic_limit);

  topics
}

/// Run one analysis pass: scan recent questions, replace the stored set,
/// and mirror the topic names into the persisted stats
pub fn run_analysis(config: &TrendingConfig) -> Result<Vec<TrendingTopic>> {
  let recent = question::list(QuestionSort::Newest, Some(config.analysis_question_limit))?;
  let topics = analyze_questions(&recent, config);

  trending::save_all(&topics)?;

  let mut current = stats::load()?;
  current.trending_topics = topics.iter().map(|t| t.topic.clone()).collect();
  stats::save(&current)?;

  Ok(topics)
}
