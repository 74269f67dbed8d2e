//! Common test utilities and helpers
#![allow(dead_code)]

use anyhow::Result;
use std::path::Path;
use std::process::Command;

/// Checks if git is available in the system
pub fn is_git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Sets up a git repository with user config
pub fn setup_git_repo(path: &Path) -> Result<()> {
    let init_result = Command::new("git")
        .args(["init", "-q"])
        .current_dir(path)
        .output()?;

    if !init_result.status.success() {
        anyhow::bail!("Git not available - skipping test");
    }

    Command::new("git")
        .args(["config", "user.name", "Test User"])
        .current_dir(path)
        .output()?;

    Command::new("git")
        .args(["config", "user.email", "test@example.com"])
        .current_dir(path)
        .output()?;

    // Disable commit signing for tests
    Command::new("git")
        .args(["config", "commit.gpgsign", "false"])
        .current_dir(path)
        .output()?;

    Ok(())
}

/// Creates a commit pinned to a specific calendar date (both author and
/// committer date, so `git log --since/--until` filtering sees it).
pub fn commit_on_date(path: &Path, file_name: &str, message: &str, date: &str) -> Result<()> {
    std::fs::write(path.join(file_name), message)?;

    Command::new("git")
        .args(["add", "."])
        .current_dir(path)
        .output()?;

    let timestamp = format!("{date}T12:00:00");
    let commit_result = Command::new("git")
        .args(["commit", "-q", "-m", message])
        .env("GIT_AUTHOR_DATE", &timestamp)
        .env("GIT_COMMITTER_DATE", &timestamp)
        .current_dir(path)
        .output()?;

    if !commit_result.status.success() {
        anyhow::bail!(
            "Failed to create commit: {}",
            String::from_utf8_lossy(&commit_result.stderr)
        );
    }

    Ok(())
}

/// Creates a repository at `parent/name` with one commit per `(date, message)`.
pub fn repo_with_commits(parent: &Path, name: &str, commits: &[(&str, &str)]) -> Result<()> {
    let repo_path = parent.join(name);
    std::fs::create_dir_all(&repo_path)?;
    setup_git_repo(&repo_path)?;

    for (idx, (date, message)) in commits.iter().enumerate() {
        commit_on_date(&repo_path, &format!("file-{idx}.txt"), message, date)?;
    }

    Ok(())
}
