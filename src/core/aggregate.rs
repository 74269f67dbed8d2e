//! Commit bucketing and dense time-series construction.

use chrono::{Duration, Months};
use std::collections::BTreeMap;

use crate::core::period::{period_key, Period};
use crate::model::{Commit, CommitsPerRepoPerPeriod};

/// Counts commits per period key. Count-preserving: the values sum to
/// `commits.len()` for every granularity. Keys come back ascending.
pub fn aggregate_by_period(commits: &[Commit], period: Period) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for commit in commits {
        *counts.entry(period_key(commit.date, period)).or_insert(0) += 1;
    }
    counts
}

/// Pre-populates one empty per-repo map for every period between
/// `first.date` and `last.date` inclusive, stepping by `interval` periods.
/// Month steps add calendar months, so month lengths vary correctly.
///
/// Periods with no commits must still appear in the rendered series, which
/// is why the skeleton exists at all: the fill pass in
/// [`commits_per_repo_per_period`] only ever increments, never inserts gaps.
///
/// Precondition: `first` and `last` are the chronological min and max of the
/// commit set, otherwise trailing periods are omitted.
pub fn build_dense_series(
    first: &Commit,
    last: &Commit,
    period: Period,
    interval: u32,
) -> CommitsPerRepoPerPeriod {
    let mut series = CommitsPerRepoPerPeriod::new();
    let mut current = first.date;
    while current <= last.date {
        series.entry(period_key(current, period)).or_default();
        current = match period {
            Period::Day => current + Duration::days(i64::from(interval)),
            Period::Week => current + Duration::weeks(i64::from(interval)),
            Period::Month => current + Months::new(interval),
        };
    }
    // Stepping from mid-period can overshoot `last` before emitting its key
    // (e.g. Jan 31 -> Feb 29 -> Mar 29 never lands on a date <= Mar 1).
    series.entry(period_key(last.date, period)).or_default();
    series
}

/// Two-pass aggregation for stacked plotting: dense skeleton first, then a
/// single pass over the commits incrementing `series[key][repo]`.
///
/// Precondition: `commits` sorted ascending by date.
pub fn commits_per_repo_per_period(commits: &[Commit], period: Period) -> CommitsPerRepoPerPeriod {
    let (Some(first), Some(last)) = (commits.first(), commits.last()) else {
        return CommitsPerRepoPerPeriod::new();
    };

    let mut series = build_dense_series(first, last, period, 1);
    for commit in commits {
        let per_repo = series.entry(period_key(commit.date, period)).or_default();
        *per_repo.entry(commit.repo_name.clone()).or_insert(0) += 1;
    }
    series
}
