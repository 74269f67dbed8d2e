use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One commit as reported by `git log`, attributed to the repository it was
/// extracted from. Immutable once built; aggregation never mutates commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Basename of the repository root directory.
    pub repo_name: String,
    /// First 7 characters of the full commit id. Display-only shortening,
    /// accepted as unique for reporting purposes.
    pub hash: String,
    /// Author identity exactly as git reported it.
    pub author: String,
    /// Commit date at day granularity; serializes as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// First line of the commit message.
    pub subject: String,
}

pub type CommitsPerRepo = BTreeMap<String, usize>;

/// Period key to per-repository commit counts. `BTreeMap` keeps the outer
/// keys ascending by key string; a repository absent from a present period
/// counts as zero.
pub type CommitsPerRepoPerPeriod = BTreeMap<String, CommitsPerRepo>;
