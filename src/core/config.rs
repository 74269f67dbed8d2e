//! Configuration constants and settings

// Concurrency configuration
//
// Extraction is I/O-bound: each repository costs one blocking `git log`
// subprocess, so moderate fan-out wins without overwhelming the disk.

// Cap on concurrent git invocations regardless of core count
pub const GIT_CONCURRENT_CAP: usize = 12;

/// Determines the concurrency limit for git log extraction
///
/// Priority order:
/// 1. --sequential flag → 1
/// 2. --jobs N flag → N
/// 3. Smart default → min(CPU_CORES + 2, 12)
pub fn get_git_concurrency(jobs: Option<usize>, sequential: bool) -> usize {
    if sequential {
        return 1;
    }

    if let Some(n) = jobs {
        return n.max(1); // Ensure at least 1
    }

    let cpu_count = num_cpus::get();
    (cpu_count + 2).min(GIT_CONCURRENT_CAP)
}

// Subprocess limits
pub const GIT_LOG_TIMEOUT_SECS: u64 = 180; // 3 minutes per repository

// Abbreviated commit id length used throughout reports
pub const SHORT_HASH_LEN: usize = 7;

// Repository discovery configuration
pub const ESTIMATED_REPO_COUNT: usize = 50; // Pre-allocation hint for collections
pub const UNKNOWN_REPO_NAME: &str = "unknown";
