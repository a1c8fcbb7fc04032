/// The filter cascade shared by every file source.
///
/// Each filter is an independent predicate over a [`Candidate`] (path plus
/// a metadata snapshot). [`FilterPipeline`] runs them cheapest-first and
/// stops at the first rejection, so classification only happens for files
/// that already passed the size and age checks.
use crate::analysis::classify;
use crate::config::ScanConfig;
use crate::model::{Category, FileEntry};
use crate::scanner::progress::ScanStats;
use chrono::{DateTime, Local};
use std::cell::OnceCell;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

const SECS_PER_DAY: u64 = 86_400;

/// Identifies a filter stage, for drop accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    MinSize,
    MinAge,
    Category,
}

/// A file under consideration: its path and a metadata snapshot.
///
/// The category is computed on first request and cached, so a candidate
/// that passes the category stage is classified exactly once.
#[derive(Debug)]
pub struct Candidate<'a> {
    pub path: &'a Path,
    pub size: u64,
    pub modified: SystemTime,
    category: OnceCell<Category>,
}

impl<'a> Candidate<'a> {
    pub fn new(path: &'a Path, size: u64, modified: SystemTime) -> Self {
        Self {
            path,
            size,
            modified,
            category: OnceCell::new(),
        }
    }

    pub fn category(&self) -> Category {
        *self.category.get_or_init(|| classify(self.path))
    }

    /// Whole days since the last modification, as of `now`.
    /// A modification time in the future counts as age 0.
    pub fn age_days(&self, now: SystemTime) -> u64 {
        now.duration_since(self.modified)
            .map(|d| d.as_secs() / SECS_PER_DAY)
            .unwrap_or(0)
    }
}

/// One predicate stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// `size >= bytes`.
    MinSize(u64),
    /// Age in whole days `>= days`, measured against `now`.
    MinAge { days: u64, now: SystemTime },
    /// Classified category equals the given one.
    Category(Category),
}

impl Filter {
    pub fn stage(&self) -> Stage {
        match self {
            Self::MinSize(_) => Stage::MinSize,
            Self::MinAge { .. } => Stage::MinAge,
            Self::Category(_) => Stage::Category,
        }
    }

    pub fn keep(&self, candidate: &Candidate<'_>) -> bool {
        match *self {
            Self::MinSize(bytes) => candidate.size >= bytes,
            Self::MinAge { days, now } => candidate.age_days(now) >= days,
            Self::Category(wanted) => candidate.category() == wanted,
        }
    }
}

/// Outcome of running the pipeline over one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Keep,
    Drop(Stage),
}

/// Ordered filter stages built from a [`ScanConfig`].
#[derive(Debug, Clone)]
pub struct FilterPipeline {
    filters: Vec<Filter>,
}

impl FilterPipeline {
    /// Build the cascade for `config`, measuring ages against `now`.
    ///
    /// Stages that would accept everything (no minimum size, no age bound,
    /// no category filter) are left out.
    pub fn from_config(config: &ScanConfig, now: SystemTime) -> Self {
        let mut filters = Vec::with_capacity(3);
        if config.min_size() > 0 {
            filters.push(Filter::MinSize(config.min_size()));
        }
        if let Some(days) = config.older_than_days() {
            filters.push(Filter::MinAge { days, now });
        }
        if let Some(category) = config.category() {
            filters.push(Filter::Category(category));
        }
        Self { filters }
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn evaluate(&self, candidate: &Candidate<'_>) -> Verdict {
        self.filters
            .iter()
            .find(|f| !f.keep(candidate))
            .map_or(Verdict::Keep, |f| Verdict::Drop(f.stage()))
    }

    /// Stat `path`, run the cascade, and build an entry if it survives.
    ///
    /// Directories (including symlinks to directories) are ignored. A file
    /// whose metadata cannot be read is skipped and counted, never reported.
    pub fn admit(&self, path: PathBuf, stats: &mut ScanStats) -> Option<FileEntry> {
        let meta = match std::fs::metadata(&path) {
            Ok(m) => m,
            Err(err) => {
                stats.files_seen += 1;
                stats.files_inaccessible += 1;
                debug!("Skipping {}: {err}", path.display());
                return None;
            }
        };
        if meta.is_dir() {
            return None;
        }
        stats.files_seen += 1;

        let modified = match meta.modified() {
            Ok(t) => t,
            Err(err) => {
                stats.files_inaccessible += 1;
                debug!("Skipping {}: no modification time ({err})", path.display());
                return None;
            }
        };

        let candidate = Candidate::new(&path, meta.len(), modified);
        match self.evaluate(&candidate) {
            Verdict::Drop(stage) => {
                stats.record_drop(stage);
                None
            }
            Verdict::Keep => {
                stats.matched += 1;
                let category = candidate.category();
                let size = candidate.size;
                Some(FileEntry::new(
                    path,
                    size,
                    DateTime::<Local>::from(modified),
                    category,
                ))
            }
        }
    }
}
