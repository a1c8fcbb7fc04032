/// The closed set of purpose classes a matched file can belong to.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Purpose class assigned to every scanned file.
///
/// Serialised as the snake_case label (`disk_image`, not `DiskImage`) so the
/// JSON and CSV exports carry the same strings the CLI accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Archive,
    DiskImage,
    Video,
    Log,
    Cache,
    Other,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 6] = [
        Self::Archive,
        Self::DiskImage,
        Self::Video,
        Self::Log,
        Self::Cache,
        Self::Other,
    ];

    /// Machine label, identical to the serialised form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Archive => "archive",
            Self::DiskImage => "disk_image",
            Self::Video => "video",
            Self::Log => "log",
            Self::Cache => "cache",
            Self::Other => "other",
        }
    }

    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Archive => "Archive",
            Self::DiskImage => "Disk Image",
            Self::Video => "Video",
            Self::Log => "Log",
            Self::Cache => "Cache",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the category labels.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category '{0}' (expected one of: archive, disk_image, video, log, cache, other)")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
