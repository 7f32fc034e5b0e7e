//! Herald - leveled console logging for hubwatch tools
//!
//! ## Features
//!
//! - Standard logging levels (info, warn, error, debug, success, verbose)
//! - Multi-line message support with consistent formatting
//! - Banner displays for service lifecycle announcements
//! - Persistent JSONL log storage for daemons (see [`log_store`])
//! - All console output goes to stderr
//!
//! Standard logging functions: `info()`, `warn()`, `error()`, `debug()`,
//! `success()`, `verbose()`. Each has a matching macro so call sites read
//! the same across the workspace.

use colored::*;

pub mod log_store;

/// Core output function, one line at a time
pub fn emit(message: &str) {
  for line in message.lines() {
    eprintln!("{line}");
  }
}

/// Format a colored, padded level prefix
fn level_prefix(color: Color, label: &str) -> String {
  format!("[{}]{:<width$}", label.color(color).bold(), "", width = 7 - label.len() - 2)
}

/// Info level logging - general information
pub fn info(message: &str) {
  let prefix = level_prefix(Color::Blue, "info");
  for line in message.lines() {
    emit(&format!("{prefix} {line}"));
  }
}

/// Warning level logging - something needs attention
pub fn warn(message: &str) {
  let prefix = level_prefix(Color::Yellow, "warn");
  for line in message.lines() {
    emit(&format!("{prefix} {line}"));
  }
}

/// Error level logging - something went wrong
pub fn error(message: &str) {
  let prefix = level_prefix(Color::Red, "error");
  for line in message.lines() {
    emit(&format!("{prefix} {line}"));
  }
}

/// Debug level logging - detailed diagnostic information
pub fn debug(message: &str) {
  let prefix = level_prefix(Color::Magenta, "debug");
  for line in message.lines() {
    emit(&format!("{prefix} {line}"));
  }
}

/// Success level logging - something completed successfully
pub fn success(message: &str) {
  let prefix = level_prefix(Color::Green, "sccs");
  for line in message.lines() {
    emit(&format!("{prefix} {line}"));
  }
}

pub fn verbose(message: &str) {
  let prefix = level_prefix(Color::Cyan, "verb");
  for line in message.lines() {
    emit(&format!("{prefix} {line}"));
  }
}

/// Display a message framed by banner lines
pub fn banner<F>(log_fn: F, message: &str, width: usize, border: char)
where
  F: Fn(&str),
{
  let line = border.to_string().repeat(width);
  log_fn(&line);
  log_fn(message);
  log_fn(&line);
}

/// Announce a service lifecycle event with a banner
pub fn announce(message: &str) {
  banner(|msg| emit(&msg.blue().bold().to_string()), message, 50, '-');
}

#[macro_export]
macro_rules! info {
  ($msg:expr) => {
    $crate::info($msg);
  };
}

#[macro_export]
macro_rules! warn {
  ($msg:expr) => {
    $crate::warn($msg);
  };
}

#[macro_export]
macro_rules! error {
  ($msg:expr) => {
    $crate::error($msg);
  };
}

#[macro_export]
macro_rules! debug {
  ($msg:expr) => {
    $crate::debug($msg);
  };
}

#[macro_export]
macro_rules! success {
  ($msg:expr) => {
    $crate::success($msg);
  };
}

#[macro_export]
macro_rules! verbose {
  ($msg:expr) => {
    $crate::verbose($msg);
  };
}

#[macro_export]
macro_rules! announce {
  ($msg:expr) => {
    $crate::announce($msg);
  };
}
