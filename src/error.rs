use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Error, Debug)]
pub enum ReportError {
    /// The git invocation for one repository exited non-zero, could not be
    /// spawned, or timed out. Distinct from a successful run that simply
    /// matched no commits.
    #[error("git failed in {repo}: {detail}")]
    ExternalTool { repo: String, detail: String },
    /// A log line did not match the `hash|author|date|subject` contract.
    #[error("malformed git log line from {repo}: {line:?}")]
    Parse { repo: String, line: String },
    #[error("no commits to plot")]
    EmptyDataset,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Chart rendering error: {0}")]
    Chart(String),
}
