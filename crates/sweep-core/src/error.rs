/// Error types for the scan pipeline.
///
/// Only configuration-time failures and an unreadable scan root ever reach
/// the caller. Per-file and per-subdirectory failures during a walk are
/// absorbed and show up only in [`crate::scanner::ScanStats`].
use std::path::PathBuf;
use thiserror::Error;

/// A human size expression such as `100M` could not be turned into bytes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SizeParseError {
    #[error("invalid size format '{input}': {reason}")]
    InvalidSizeFormat { input: String, reason: &'static str },
}

impl SizeParseError {
    pub(crate) fn new(input: &str, reason: &'static str) -> Self {
        Self::InvalidSizeFormat {
            input: input.to_string(),
            reason,
        }
    }
}

/// Failures raised while configuring or running a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan root {0} does not exist")]
    RootNotFound(PathBuf),

    #[error("scan root {0} is not a directory")]
    RootNotDirectory(PathBuf),

    #[error("cannot read scan root {path}: {source}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The Spotlight tier could not produce results. Never shown to the user:
    /// the strategy layer falls back to the directory walk.
    #[error("search index unavailable: {0}")]
    AlternateSourceUnavailable(String),

    #[error("scan cancelled")]
    Cancelled,
}

/// Failures writing a JSON or CSV report.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialisation failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV serialisation failed: {0}")]
    Csv(#[from] csv::Error),
}

/// Failures from a mark-for-review action.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// The `tag` command-line tool is not installed.
    #[error("the `tag` command is not installed (brew install tag)")]
    TagToolMissing,

    #[error("`{command}` failed: {detail}")]
    CommandFailed { command: String, detail: String },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl ReviewError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
