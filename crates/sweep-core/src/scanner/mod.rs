/// Scanner module: orchestrates where candidate files come from.
///
/// Two-tier strategy, both tiers sharing one filter pipeline:
/// - **Tier 1 (Index):** ask the Spotlight index for candidates (macOS only,
///   bounded by a timeout).
/// - **Tier 2 (Walk):** serial `jwalk` traversal with prune-before-descend.
///
/// Tier 1 is attempted only when enabled and the capability probe passes. If
/// it fails for any reason the walk runs instead, silently; the caller only
/// sees which tier produced the result.
pub mod exclusion;
pub mod filters;
pub mod index;
pub mod progress;
pub mod walk;

pub use exclusion::{ExclusionSet, PruneReason};
pub use filters::{Candidate, Filter, FilterPipeline, Stage, Verdict};
pub use index::{is_index_available, SpotlightIndex, DEFAULT_INDEX_TIMEOUT};
pub use progress::ScanStats;
pub use walk::{walk, walk_with_cancel, Walk};

use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::model::FileEntry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// Which source produced a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceTier {
    Index,
    Walk,
}

impl SourceTier {
    pub fn label(self) -> &'static str {
        match self {
            Self::Index => "search index",
            Self::Walk => "directory walk",
        }
    }
}

/// A producer of matched files for a config.
///
/// Implementations must apply the same pruning and filter semantics; they
/// differ only in how candidate paths are discovered.
pub trait FileSource {
    fn tier(&self) -> SourceTier;

    fn collect(&self, config: &ScanConfig) -> Result<(Vec<FileEntry>, ScanStats), ScanError>;
}

/// Full directory traversal.
#[derive(Debug, Clone, Default)]
pub struct WalkSource {
    cancel: Option<Arc<AtomicBool>>,
}

impl WalkSource {
    pub fn new(cancel: Option<Arc<AtomicBool>>) -> Self {
        Self { cancel }
    }
}

impl FileSource for WalkSource {
    fn tier(&self) -> SourceTier {
        SourceTier::Walk
    }

    fn collect(&self, config: &ScanConfig) -> Result<(Vec<FileEntry>, ScanStats), ScanError> {
        let cancel = self.cancel.clone().unwrap_or_default();
        let mut walk = walk_with_cancel(config, cancel)?;
        let entries: Vec<FileEntry> = walk.by_ref().collect();
        if walk.was_cancelled() {
            return Err(ScanError::Cancelled);
        }
        Ok((entries, walk.stats()))
    }
}

impl FileSource for SpotlightIndex {
    fn tier(&self) -> SourceTier {
        SourceTier::Index
    }

    fn collect(&self, config: &ScanConfig) -> Result<(Vec<FileEntry>, ScanStats), ScanError> {
        SpotlightIndex::collect(self, config)
    }
}

/// Knobs that affect how a scan runs but not what it returns.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Try the search index before walking.
    pub use_index: bool,
    pub index_timeout: Duration,
    /// Checked once per directory during a walk.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            use_index: cfg!(target_os = "macos"),
            index_timeout: DEFAULT_INDEX_TIMEOUT,
            cancel: None,
        }
    }
}

/// Result of a completed scan.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// Matched files in source order (walk order, or path order for the index).
    pub entries: Vec<FileEntry>,
    pub stats: ScanStats,
    pub tier: SourceTier,
    pub duration: Duration,
}

/// Scan `config.root()` using the best available source.
pub fn scan(config: &ScanConfig, options: &ScanOptions) -> Result<ScanOutcome, ScanError> {
    let index = (options.use_index && is_index_available())
        .then(|| SpotlightIndex::new(options.index_timeout));
    let walker = WalkSource::new(options.cancel.clone());
    scan_with(
        index.as_ref().map(|i| i as &dyn FileSource),
        &walker,
        config,
        options.cancel.as_deref(),
    )
}

/// Try `primary` (if any), falling back to `fallback` when the primary
/// reports [`ScanError::AlternateSourceUnavailable`]. Any other error from
/// the primary is returned as-is.
pub fn scan_with(
    primary: Option<&dyn FileSource>,
    fallback: &dyn FileSource,
    config: &ScanConfig,
    cancel: Option<&AtomicBool>,
) -> Result<ScanOutcome, ScanError> {
    let start = Instant::now();
    info!("Starting scan of {}", config.root().display());

    if let Some(source) = primary {
        info!("Using {} (Tier 1)", source.tier().label());
        match source.collect(config) {
            Ok((entries, stats)) => return Ok(finish(entries, stats, source.tier(), start)),
            Err(ScanError::AlternateSourceUnavailable(reason)) => {
                info!("{reason}; falling back to {}", fallback.tier().label());
            }
            Err(err) => return Err(err),
        }
        if cancel.is_some_and(|c| c.load(Ordering::Relaxed)) {
            return Err(ScanError::Cancelled);
        }
    }

    let (entries, stats) = fallback.collect(config)?;
    Ok(finish(entries, stats, fallback.tier(), start))
}

fn finish(entries: Vec<FileEntry>, stats: ScanStats, tier: SourceTier, start: Instant) -> ScanOutcome {
    let duration = start.elapsed();
    info!(
        "Scan complete via {}: {} matches in {:?}",
        tier.label(),
        entries.len(),
        duration
    );
    ScanOutcome {
        entries,
        stats,
        tier,
        duration,
    }
}
