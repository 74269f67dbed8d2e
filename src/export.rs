//! Commit list exports.

use clap::ValueEnum;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::model::Commit;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Header row plus one delimited record per commit
    Csv,
    /// Pretty-printed array of full commit records
    Json,
}

impl ExportFormat {
    /// Get file extension for the format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Appends the format's extension when `dest` does not already carry it
/// (case-insensitive).
fn with_extension(dest: &Path, extension: &str) -> PathBuf {
    let already = dest
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
    if already {
        dest.to_path_buf()
    } else {
        let mut name = dest.as_os_str().to_os_string();
        name.push(".");
        name.push(extension);
        PathBuf::from(name)
    }
}

/// Writes `commits` to `dest` in the chosen format, returning the path
/// actually written.
///
/// Field order is `repo_name, hash, author, date, subject` in both formats.
/// An empty JSON export still writes `[]`; an empty CSV export writes no
/// file at all and returns `None`.
pub fn export_commits(
    commits: &[Commit],
    format: ExportFormat,
    dest: &Path,
) -> Result<Option<PathBuf>> {
    let dest = with_extension(dest, format.extension());
    match format {
        ExportFormat::Csv => {
            if commits.is_empty() {
                return Ok(None);
            }
            let mut writer = csv::Writer::from_path(&dest)?;
            for commit in commits {
                writer.serialize(commit)?;
            }
            writer.flush()?;
        }
        ExportFormat::Json => {
            let file = File::create(&dest)?;
            serde_json::to_writer_pretty(BufWriter::new(file), commits)?;
        }
    }
    Ok(Some(dest))
}
