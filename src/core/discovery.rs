//! Repository discovery

use log::warn;
use regex::Regex;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::config::{ESTIMATED_REPO_COUNT, UNKNOWN_REPO_NAME};

/// Check if a .git file (for submodules/worktrees) contains gitdir reference
/// Only reads the first 5 lines for efficiency
fn is_git_file(path: &Path) -> bool {
    match fs::File::open(path) {
        Ok(file) => {
            let reader = BufReader::new(file);
            reader
                .lines()
                .take(5)
                .filter_map(Result::ok)
                .any(|line| line.trim_start().starts_with("gitdir:"))
        }
        Err(_) => false,
    }
}

/// A repository root is a directory directly containing the `.git` marker:
/// either the usual metadata directory, or the file form submodules and
/// worktrees leave behind.
fn is_repo_root(dir: &Path) -> bool {
    let marker = dir.join(".git");
    match fs::metadata(&marker) {
        Ok(meta) if meta.is_dir() => true,
        Ok(meta) if meta.is_file() => is_git_file(&marker),
        _ => false,
    }
}

/// Recursively searches for git repositories under `root`
///
/// A directory whose full path matches any pattern in `exclude` is pruned:
/// neither reported nor descended into. A discovered repository root is
/// reported and its subtree skipped too, so nested repositories stay
/// hidden. Unreadable subtrees are logged and skipped, the scan continues.
///
/// Sibling order follows the platform's directory order and carries no
/// contract; callers sort when presentation needs it.
pub fn locate_repos(root: &Path, exclude: &[Regex]) -> Vec<PathBuf> {
    let mut repos = Vec::with_capacity(ESTIMATED_REPO_COUNT);
    let mut walker = WalkDir::new(root).follow_links(true).into_iter();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("skipping unreadable subtree: {err}");
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();
        let text = path.to_string_lossy();
        if exclude.iter().any(|pattern| pattern.is_match(&text)) {
            walker.skip_current_dir();
            continue;
        }

        if is_repo_root(path) {
            repos.push(path.to_path_buf());
            walker.skip_current_dir();
        }
    }

    repos
}

/// Display name for a repository root: the basename of its path. Scanning
/// `.` resolves through the canonical path so the name stays meaningful.
pub fn repo_name(path: &Path) -> String {
    let dir = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    dir.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(UNKNOWN_REPO_NAME)
        .to_string()
}
