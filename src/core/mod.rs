// Internal modules - not part of public API
pub(crate) mod config;

pub mod aggregate;
pub mod discovery;
pub mod extract;
pub mod period;

// Re-export key items at module level for convenience
pub use aggregate::{aggregate_by_period, build_dense_series, commits_per_repo_per_period};
pub use config::get_git_concurrency;
pub use discovery::{locate_repos, repo_name};
pub use extract::extract_commits;
pub use period::{period_key, Period};
