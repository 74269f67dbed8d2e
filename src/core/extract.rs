//! Commit extraction through the git CLI.
//!
//! The version-control tool is treated as an opaque oracle: one `git log`
//! subprocess per repository, output parsed against a fixed pipe-delimited
//! record format. Failures of the tool are distinguished from repositories
//! that simply have no matching commits.

use chrono::NaiveDate;
use log::debug;
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;

use super::config::{GIT_LOG_TIMEOUT_SECS, SHORT_HASH_LEN};
use super::discovery::repo_name;
use crate::error::{ReportError, Result};
use crate::model::Commit;

const GIT_LOG_FORMAT: &str = "--pretty=format:%H|%ae|%ad|%s";
const GIT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Lists commits of `repo_path` matching `author` within the inclusive
/// `[since, until]` window, across all refs.
///
/// A non-zero exit, spawn failure or timeout is an [`ReportError::ExternalTool`]
/// for this repository; a clean run with no matching commits returns an
/// empty list. Commit order follows git's native log order.
pub async fn extract_commits(
    repo_path: &Path,
    author: &str,
    since: NaiveDate,
    until: NaiveDate,
) -> Result<Vec<Commit>> {
    let name = repo_name(repo_path);
    let args = [
        "log".to_string(),
        "--all".to_string(),
        format!("--since={since}"),
        format!("--until={until}"),
        format!("--author={author}"),
        GIT_LOG_FORMAT.to_string(),
        "--date=short".to_string(),
    ];
    debug!("{name}: git {}", args.join(" "));

    let timeout = Duration::from_secs(GIT_LOG_TIMEOUT_SECS);
    let output = tokio::time::timeout(
        timeout,
        Command::new("git")
            .args(&args)
            .current_dir(repo_path)
            .output(),
    )
    .await
    .map_err(|_| ReportError::ExternalTool {
        repo: name.clone(),
        detail: format!("git log timed out after {GIT_LOG_TIMEOUT_SECS} seconds"),
    })?
    .map_err(|err| ReportError::ExternalTool {
        repo: name.clone(),
        detail: err.to_string(),
    })?;

    if !output.status.success() {
        return Err(ReportError::ExternalTool {
            repo: name,
            detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    parse_log_output(&String::from_utf8_lossy(&output.stdout), &name)
}

/// Splits `%H|%ae|%ad|%s` records into [`Commit`]s. The subject may itself
/// contain `|`, so the split is capped at four fields. A line with missing
/// fields or an unparseable date breaks the format contract and is a fatal
/// [`ReportError::Parse`], not a skip.
fn parse_log_output(stdout: &str, repo: &str) -> Result<Vec<Commit>> {
    let mut commits = Vec::new();
    for line in stdout.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = line.splitn(4, '|');
        let (Some(hash), Some(author), Some(date), Some(subject)) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(ReportError::Parse {
                repo: repo.to_string(),
                line: line.to_string(),
            });
        };
        let date =
            NaiveDate::parse_from_str(date, GIT_DATE_FORMAT).map_err(|_| ReportError::Parse {
                repo: repo.to_string(),
                line: line.to_string(),
            })?;

        commits.push(Commit {
            repo_name: repo.to_string(),
            hash: hash.chars().take(SHORT_HASH_LEN).collect(),
            author: author.to_string(),
            date,
            subject: subject.to_string(),
        });
    }
    Ok(commits)
}
