//! CLI surface and the report pipeline.
//!
//! The pipeline is a strict sequence: discover repositories, extract
//! commits from each, merge, then hand the finalized commit collection to
//! the terminal summary, exporter and plotters. Extraction fans out behind
//! a semaphore; every task returns an independent result and a single fold
//! merges them afterwards, so no state is shared while git runs.

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::Parser;
use futures::stream::{FuturesUnordered, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::core::{
    aggregate_by_period, extract_commits, get_git_concurrency, locate_repos, Period,
};
use crate::error::ReportError;
use crate::export::{export_commits, ExportFormat};
use crate::model::Commit;
use crate::plot::{plot_stats, plot_summary, ChartKind};

const PROGRESS_TEMPLATE: &str = "{bar:40} {pos}/{len} {msg}";
const PROGRESS_CHARS: &str = "##-";

#[derive(Parser)]
#[command(name = "commit-report")]
#[command(about = "Search git repositories for commit stats by author and date range")]
#[command(version)]
pub struct Cli {
    /// Root directory to scan for repositories
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Author name or email substring to match
    #[arg(long)]
    pub author: String,

    /// Start of the date window (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub since: NaiveDate,

    /// End of the date window (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub until: NaiveDate,

    /// Prune directories whose path matches this regex (repeatable)
    #[arg(long = "exclude", value_name = "REGEX")]
    pub exclude: Vec<Regex>,

    /// Print a per-day breakdown
    #[arg(long)]
    pub daily: bool,

    /// Print a per-ISO-week breakdown
    #[arg(long)]
    pub weekly: bool,

    /// Print a per-month breakdown
    #[arg(long)]
    pub monthly: bool,

    /// Export the commit list
    #[arg(long, value_enum)]
    pub export: Option<ExportFormat>,

    /// Destination for --export (extension appended when missing)
    #[arg(long)]
    pub export_output: Option<PathBuf>,

    /// Render a chart of the aggregated commits
    #[arg(long, value_enum)]
    pub plot: Option<ChartKind>,

    /// Base destination for --plot images; stats charts get one image per
    /// requested granularity, suffixed -day/-week/-month
    #[arg(long)]
    pub plot_output: Option<PathBuf>,

    /// Number of concurrent git invocations
    #[arg(long, conflicts_with = "sequential")]
    pub jobs: Option<usize>,

    /// Extract repositories one at a time
    #[arg(long)]
    pub sequential: bool,

    /// Log level
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let repos = locate_repos(&self.path, &self.exclude);
        if repos.is_empty() {
            bail!("no git repositories found under {}", self.path.display());
        }

        println!("Scanning {} repositories...", repos.len());
        let mut commits = self.extract_all(&repos).await?;

        println!();
        println!("=== Summary ===");
        println!("Author: {}", self.author);
        println!("Period: {} to {}", self.since, self.until);
        println!("Total commits: {}", commits.len());

        for period in self.requested_periods() {
            println!();
            println!("Commits by {}:", period.to_string().to_lowercase());
            for (key, count) in aggregate_by_period(&commits, period) {
                println!("{key}: {count}");
            }
        }

        if let (Some(format), Some(dest)) = (self.export, &self.export_output) {
            if let Some(written) = export_commits(&commits, format, dest)? {
                println!("Exported {} commits to {}", commits.len(), written.display());
            }
        }

        if let (Some(kind), Some(base)) = (self.plot, &self.plot_output) {
            commits.sort_by_key(|commit| commit.date);
            match kind {
                ChartKind::Stats => {
                    let periods = match self.requested_periods() {
                        periods if periods.is_empty() => vec![Period::Month],
                        periods => periods,
                    };
                    for period in periods {
                        let dest = suffixed_output(base, period);
                        let written = plot_stats(&commits, period, &self.author, &dest)?;
                        println!("Plot saved to {}", written.display());
                    }
                }
                ChartKind::Summary => {
                    let written = plot_summary(&commits, &self.author, base)?;
                    println!("Plot saved to {}", written.display());
                }
            }
        }

        Ok(())
    }

    /// Runs one git extraction per repository, bounded by the concurrency
    /// limit, and folds the independent results into one commit list.
    ///
    /// A failed repository is warned about and excluded; a parse failure
    /// means git broke the output contract and aborts the run.
    async fn extract_all(&self, repos: &[PathBuf]) -> Result<Vec<Commit>> {
        let limit = get_git_concurrency(self.jobs, self.sequential);
        let semaphore = Arc::new(Semaphore::new(limit));

        let progress = ProgressBar::new(repos.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template(PROGRESS_TEMPLATE)?
                .progress_chars(PROGRESS_CHARS),
        );

        let mut tasks = FuturesUnordered::new();
        for repo in repos {
            let semaphore = Arc::clone(&semaphore);
            let author = self.author.clone();
            let (since, until) = (self.since, self.until);
            let repo = repo.clone();
            tasks.push(async move {
                let _permit = semaphore
                    .acquire()
                    .await
                    .expect("extraction semaphore closed unexpectedly");
                let result = extract_commits(&repo, &author, since, until).await;
                (repo, result)
            });
        }

        let mut merged: Vec<Commit> = Vec::new();
        while let Some((repo, result)) = tasks.next().await {
            progress.inc(1);
            match result {
                Ok(batch) => {
                    if !batch.is_empty() {
                        progress.println(format!("{} -> {} commits", repo.display(), batch.len()));
                    }
                    merged.extend(batch);
                }
                Err(err @ ReportError::ExternalTool { .. }) => {
                    warn!("{err}");
                    progress.println(format!("{}: skipped ({err})", repo.display()));
                }
                Err(err) => return Err(err.into()),
            }
        }
        progress.finish_and_clear();

        Ok(merged)
    }

    fn requested_periods(&self) -> Vec<Period> {
        let flags = [
            (self.daily, Period::Day),
            (self.weekly, Period::Week),
            (self.monthly, Period::Month),
        ];
        flags
            .into_iter()
            .filter_map(|(requested, period)| requested.then_some(period))
            .collect()
    }
}

/// `charts/out.png` + Week -> `charts/out-week.png`; extension-less bases
/// keep the suffix and let the plotter append `.png`.
fn suffixed_output(base: &Path, period: Period) -> PathBuf {
    let suffix = period.to_string().to_lowercase();
    match (base.file_stem().and_then(|s| s.to_str()), base.extension().and_then(|e| e.to_str())) {
        (Some(stem), Some(ext)) => base.with_file_name(format!("{stem}-{suffix}.{ext}")),
        _ => {
            let mut name = base.as_os_str().to_os_string();
            name.push(format!("-{suffix}"));
            PathBuf::from(name)
        }
    }
}
