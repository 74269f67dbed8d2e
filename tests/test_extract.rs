//! Integration tests for commit extraction against real git repositories

mod common;

use chrono::NaiveDate;
use commit_report::core::extract_commits;
use commit_report::error::ReportError;
use common::{commit_on_date, is_git_available, setup_git_repo};
use std::fs;
use tempfile::TempDir;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[tokio::test]
async fn test_extracts_commit_fields() {
    if !is_git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }

    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let repo = temp_dir.path().join("widgets");
    fs::create_dir(&repo).unwrap();
    setup_git_repo(&repo).expect("Failed to setup repo");
    commit_on_date(&repo, "a.txt", "Add the widget", "2024-01-01").unwrap();
    commit_on_date(&repo, "b.txt", "Fix the widget", "2024-01-03").unwrap();

    let commits = extract_commits(&repo, "test@example.com", date("2024-01-01"), date("2024-12-31"))
        .await
        .expect("extraction should succeed");

    assert_eq!(commits.len(), 2);
    for commit in &commits {
        assert_eq!(commit.repo_name, "widgets");
        assert_eq!(commit.author, "test@example.com");
        assert_eq!(commit.hash.len(), 7);
    }

    let mut dates: Vec<String> = commits.iter().map(|c| c.date.to_string()).collect();
    dates.sort();
    assert_eq!(dates, ["2024-01-01", "2024-01-03"]);

    let mut subjects: Vec<&str> = commits.iter().map(|c| c.subject.as_str()).collect();
    subjects.sort();
    assert_eq!(subjects, ["Add the widget", "Fix the widget"]);
}

#[tokio::test]
async fn test_date_window_filters_commits() {
    if !is_git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }

    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let repo = temp_dir.path().join("windowed");
    fs::create_dir(&repo).unwrap();
    setup_git_repo(&repo).expect("Failed to setup repo");
    commit_on_date(&repo, "early.txt", "Early change", "2024-01-15").unwrap();
    commit_on_date(&repo, "late.txt", "Late change", "2024-06-15").unwrap();

    let commits = extract_commits(&repo, "test@example.com", date("2024-01-01"), date("2024-03-01"))
        .await
        .expect("extraction should succeed");

    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].subject, "Early change");
}

#[tokio::test]
async fn test_author_mismatch_is_empty_not_an_error() {
    if !is_git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }

    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let repo = temp_dir.path().join("quiet");
    fs::create_dir(&repo).unwrap();
    setup_git_repo(&repo).expect("Failed to setup repo");
    commit_on_date(&repo, "a.txt", "Change", "2024-01-01").unwrap();

    let commits = extract_commits(&repo, "nobody@nowhere", date("2024-01-01"), date("2024-12-31"))
        .await
        .expect("zero matches is a successful extraction");

    assert!(commits.is_empty());
}

#[tokio::test]
async fn test_non_repository_is_external_tool_error() {
    if !is_git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }

    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let not_a_repo = temp_dir.path().join("plain");
    fs::create_dir(&not_a_repo).unwrap();

    let err = extract_commits(&not_a_repo, "anyone", date("2024-01-01"), date("2024-12-31"))
        .await
        .expect_err("a failing git invocation must not look like an empty result");

    match err {
        ReportError::ExternalTool { repo, .. } => assert_eq!(repo, "plain"),
        other => panic!("expected ExternalTool, got {other:?}"),
    }
}

#[tokio::test]
async fn test_subject_with_pipes_survives() {
    if !is_git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }

    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let repo = temp_dir.path().join("pipes");
    fs::create_dir(&repo).unwrap();
    setup_git_repo(&repo).expect("Failed to setup repo");
    commit_on_date(&repo, "m.txt", "feat: a|b|c matrix", "2024-02-02").unwrap();

    let commits = extract_commits(&repo, "test@example.com", date("2024-01-01"), date("2024-12-31"))
        .await
        .expect("extraction should succeed");

    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].subject, "feat: a|b|c matrix");
}
