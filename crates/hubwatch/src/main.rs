use anyhow::Result;
use clap::{Parser, Subcommand};
use hubwatch::cli::commands;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "hubwatch")]
#[command(
  about = "Hubwatch - Community Monitoring and AI Engagement\nWatches the Proto Hub community and answers unanswered questions through AI personas"
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Show current monitoring stats
  Stats,
  /// Show the effective monitoring configuration
  Config,
  /// Run one engagement cycle, or target a specific question
  Engage {
    /// Question id to answer (defaults to the first opportunity)
    #[arg(short, long)]
    question: Option<Uuid>,
    /// Persona id to answer as
    #[arg(short, long)]
    persona: Option<String>,
  },
  /// Recompute trending topics from recent questions
  Analyze,
  /// Show recent engagement attempts
  History {
    /// Maximum number of records to show
    #[arg(short, long)]
    limit: Option<usize>,
  },
  /// List community questions
  Questions {
    /// Sort order: newest or unanswered
    #[arg(long, default_value = "newest")]
    sort_by: String,
    /// Maximum number of questions to show
    #[arg(short, long)]
    limit: Option<usize>,
  },
  /// Post a question
  Ask {
    /// Question title
    title: String,
    /// Question body
    content: String,
    /// Topic tags
    #[arg(short, long)]
    tags: Vec<String>,
    /// Author display name
    #[arg(long, default_value = "anonymous")]
    author: String,
  },
  /// Post an answer to a question
  Answer {
    /// Question id
    question_id: Uuid,
    /// Answer body
    content: String,
    /// Author display name
    #[arg(long, default_value = "anonymous")]
    author: String,
  },
  /// Query server logs for debugging and monitoring
  Logs {
    /// Maximum number of log entries to return
    #[arg(short, long, default_value = "50")]
    limit: usize,
    /// Filter by log level (info, warn, error, all)
    #[arg(long, default_value = "all")]
    level: String,
  },
}

async fn handle(command: Command) -> Result<()> {
  match command {
    Command::Stats => commands::stats().await,
    Command::Config => commands::config().await,
    Command::Engage { question, persona } => commands::engage(question, persona).await,
    Command::Analyze => commands::analyze().await,
    Command::History { limit } => commands::history(limit).await,
    Command::Questions { sort_by, limit } => commands::questions(&sort_by, limit).await,
    Command::Ask { title, content, tags, author } => {
      commands::ask(&title, &content, tags, author).await
    }
    Command::Answer { question_id, content, author } => {
      commands::answer(question_id, &content, author).await
    }
    Command::Logs { limit, level } => commands::logs(limit, &level).await,
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  handle(cli.command).await?;
  Ok(())
}
