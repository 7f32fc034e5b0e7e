use assert_cmd::prelude::*;
use predicates::prelude::*;
use predicates::str::contains;
use std::process::Command;

/// Helper to create a Command for the `hubwatch` binary.
/// These tests only exercise argument parsing, which happens before any
/// server contact.
fn hubwatch_cmd() -> Command {
  Command::cargo_bin("hubwatch").expect("binary exists")
}

#[test]
fn test_help_lists_all_subcommands() {
  hubwatch_cmd()
    .arg("--help")
    .assert()
    .success()
    .stdout(
      contains("stats")
        .and(contains("config"))
        .and(contains("engage"))
        .and(contains("analyze"))
        .and(contains("history"))
        .and(contains("questions"))
        .and(contains("ask"))
        .and(contains("answer"))
        .and(contains("logs")),
    );
}

#[test]
fn test_version_flag() {
  hubwatch_cmd()
    .arg("--version")
    .assert()
    .success()
    .stdout(contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_subcommand_shows_usage() {
  hubwatch_cmd().assert().failure().stderr(contains("Usage"));
}

#[test]
fn test_engage_rejects_malformed_question_id() {
  hubwatch_cmd()
    .args(["engage", "--question", "not-a-uuid"])
    .assert()
    .failure()
    .stderr(contains("invalid value"));
}

#[test]
fn test_answer_requires_question_id_and_content() {
  hubwatch_cmd().arg("answer").assert().failure().stderr(contains("required"));
}

#[test]
fn test_ask_help_documents_defaults() {
  hubwatch_cmd()
    .args(["ask", "--help"])
    .assert()
    .success()
    .stdout(contains("anonymous"));
}

#[test]
fn test_server_help_shows_bind_default() {
  Command::cargo_bin("hubwatch_server")
    .expect("binary exists")
    .arg("--help")
    .assert()
    .success()
    .stdout(contains("127.0.0.1:4600"));
}
