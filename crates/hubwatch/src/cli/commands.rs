//! User-facing CLI command implementations
//!
//! The CLI is a pure thin client: every command talks to the REST API.

use anyhow::Result;
use colored::*;
use uuid::Uuid;

use crate::cli::client::get_client;
use crate::cli::server_manager::ensure_server_running;
use crate::server::types::{CreateAnswerRequest, CreateQuestionRequest};

/// Show current monitoring stats
pub async fn stats() -> Result<()> {
  ensure_server_running().await?;
  let client = get_client();
  let response = client.stats().await?;
  let stats = response.stats;

  println!("{}", "Monitoring stats".blue().bold());
  println!("  total engagements:      {}", stats.total_engagements.to_string().bold());
  println!("  successful:             {}", stats.successful_engagements.to_string().green());
  println!("  failed:                 {}", stats.failed_engagements.to_string().red());
  println!("  active personas:        {}", stats.active_personas);
  println!("  community health score: {:.1}", stats.community_health_score);
  match stats.last_engagement {
    Some(at) => println!("  last engagement:        {}", at.to_string().cyan()),
    None => println!("  last engagement:        {}", "never".dimmed()),
  }

  if !stats.trending_topics.is_empty() {
    println!("  trending topics:        {}", stats.trending_topics.join(", ").yellow());
  }

  Ok(())
}

/// Show the effective monitoring configuration
pub async fn config() -> Result<()> {
  ensure_server_running().await?;
  let client = get_client();
  let response = client.monitoring_config().await?;
  let config = response.config;

  println!("{}", "Monitoring configuration".blue().bold());
  println!("  max engagements/hour:   {}", config.max_engagements_per_hour);
  println!("  window:                 {} minutes", config.engagement_window_minutes);
  println!("  trending-up threshold:  {}", config.trending_up_threshold);
  println!("  analysis question cap:  {}", config.analysis_question_limit);
  println!("  engagement types:       {}", config.engagement_types.join(", "));

  println!("  personas:");
  for persona in config.active_personas {
    println!(
      "    {} {} - {} ({})",
      "*".yellow(),
      persona.name.bold(),
      persona.role,
      persona.expertise.join(", ").dimmed()
    );
  }

  Ok(())
}

/// Run one engagement cycle, or a targeted engagement when a question is given
pub async fn engage(question_id: Option<Uuid>, persona: Option<String>) -> Result<()> {
  ensure_server_running().await?;
  let client = get_client();

  let response = match question_id {
    Some(id) => client.ai_engagement(&id, persona).await?,
    None => client.force_engagement().await?,
  };

  match response.engagement {
    Some(outcome) => {
      println!(
        "{} Answered question {} as {}",
        "✓".green(),
        outcome.question_id.to_string().cyan(),
        outcome.persona_id.yellow()
      );
    }
    None => println!("No unanswered questions to engage."),
  }

  Ok(())
}

/// Run a trend analysis pass
pub async fn analyze() -> Result<()> {
  ensure_server_running().await?;
  let client = get_client();

  let response = client.force_analysis().await?;
  println!("{} Trend analysis complete: {} topics", "✓".green(), response.topics_analyzed);
  Ok(())
}

/// Show recent engagement history
pub async fn history(limit: Option<usize>) -> Result<()> {
  ensure_server_running().await?;
  let client = get_client();

  let response = client.history(limit).await?;
  if response.engagement_history.is_empty() {
    println!("No engagements recorded yet.");
    return Ok(());
  }

  for record in response.engagement_history {
    let marker = if record.success { "✓".green() } else { "✗".red() };
    println!(
      "{} {} {:?} -> {} as {}",
      marker,
      record.timestamp.to_string().cyan(),
      record.engagement_type,
      record.target_id,
      record.persona_id.yellow()
    );
  }

  Ok(())
}

/// List questions
pub async fn questions(sort_by: &str, limit: Option<usize>) -> Result<()> {
  ensure_server_running().await?;
  let client = get_client();

  let response = client.list_questions(sort_by, limit).await?;
  if response.questions.is_empty() {
    println!("No questions found.");
    return Ok(());
  }

  for question in response.questions {
    let badge = if question.answer_count == 0 {
      "unanswered".red().to_string()
    } else {
      format!("{} answers", question.answer_count).green().to_string()
    };
    let origin = if question.is_ai_generated { " [ai]".dimmed().to_string() } else { String::new() };
    println!("{} {} ({badge}){origin}", question.id.to_string().cyan(), question.title.bold());
    if !question.tags.is_empty() {
      println!("  tags: {}", question.tags.join(", ").yellow());
    }
  }

  Ok(())
}

/// Post a question
pub async fn ask(title: &str, content: &str, tags: Vec<String>, author: String) -> Result<()> {
  ensure_server_running().await?;
  let client = get_client();

  let request = CreateQuestionRequest {
    title: title.to_string(),
    content: content.to_string(),
    tags,
    author,
  };
  let response = client.create_question(&request).await?;

  println!("{} Posted question {}", "✓".green(), response.question.id.to_string().cyan());
  Ok(())
}

/// Post an answer
pub async fn answer(question_id: Uuid, content: &str, author: String) -> Result<()> {
  ensure_server_running().await?;
  let client = get_client();

  let request = CreateAnswerRequest { content: content.to_string(), author };
  let response = client.create_answer(&question_id, &request).await?;

  println!(
    "{} Posted answer {} on question {}",
    "✓".green(),
    response.answer.id.to_string().cyan(),
    question_id.to_string().cyan()
  );
  Ok(())
}

/// Query server logs for debugging and monitoring
pub async fn logs(limit: usize, level: &str) -> Result<()> {
  ensure_server_running().await?;

  let client = get_client();
  let logs_response = client.get_logs(limit, level).await?;

  if logs_response.logs.is_empty() {
    println!("No logs found.");
    return Ok(());
  }

  for log in logs_response.logs {
    let level_colored = match log.level.as_str() {
      "error" => log.level.red().bold(),
      "warn" => log.level.yellow().bold(),
      "info" => log.level.blue().bold(),
      "debug" => log.level.green(),
      "success" => log.level.bright_green().bold(),
      _ => log.level.normal(),
    };

    println!("{} [{}] {}", log.timestamp.to_string().cyan(), level_colored, log.message);

    if let Some(context) = &log.context {
      if let Some(request_id) = &context.request_id {
        println!("  {} request_id: {}", "└─".white().dimmed(), request_id.bright_blue());
      }
      if let (Some(method), Some(path)) = (&context.method, &context.path) {
        println!("  {} {} {}", "└─".white().dimmed(), method.magenta().bold(), path.cyan());
      }
      if let Some(status_code) = context.status_code {
        let status_color = match status_code {
          200..=299 => status_code.to_string().green(),
          400..=499 => status_code.to_string().red(),
          500..=599 => status_code.to_string().bright_red().bold(),
          _ => status_code.to_string().white(),
        };
        println!("  {} status: {}", "└─".white().dimmed(), status_color);
      }
    }
  }

  Ok(())
}
