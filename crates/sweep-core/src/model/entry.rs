/// A single file that survived the filter cascade.
use crate::model::Category;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One matched file.
///
/// `size` and `modified` are snapshots taken from the file's metadata at scan
/// time; nothing here holds a live handle back to the filesystem. The
/// category is assigned once by the classifier and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Absolute path of the file.
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
    /// Last modification time, serialised as an RFC 3339 timestamp.
    pub modified: DateTime<Local>,
    pub category: Category,
}

impl FileEntry {
    pub fn new(path: PathBuf, size: u64, modified: DateTime<Local>, category: Category) -> Self {
        Self {
            path,
            size,
            modified,
            category,
        }
    }

    /// File name for display; falls back to the full path for odd roots.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
