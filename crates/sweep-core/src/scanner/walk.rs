/// Directory walker built on `jwalk`, the always-available (Tier 2) source.
///
/// The walk runs serially on the calling thread. Pruning is done inside
/// `jwalk`'s `process_read_dir` hook: excluded and hidden subdirectories are
/// removed from a directory's children before the walker ever queues them,
/// so their subtrees are never read. Every surviving non-directory entry
/// goes through the shared [`FilterPipeline`].
///
/// [`Walk`] is lazy. Nothing is read until it is iterated, and each call to
/// [`walk`] starts a fresh traversal.
use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::model::FileEntry;
use crate::scanner::exclusion::{ExclusionSet, PruneReason};
use crate::scanner::filters::FilterPipeline;
use crate::scanner::progress::ScanStats;
use jwalk::{DirEntry, Parallelism, WalkDir};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::debug;

type RawEntry = Result<DirEntry<((), ())>, jwalk::Error>;

/// Directory-level counters, updated from inside the `process_read_dir` hook.
#[derive(Debug, Default)]
struct DirCounters {
    visited: AtomicU64,
    excluded: AtomicU64,
    hidden: AtomicU64,
}

/// A lazy sequence of matched files.
pub struct Walk {
    entries: Box<dyn Iterator<Item = RawEntry>>,
    pipeline: FilterPipeline,
    stats: ScanStats,
    dirs: Arc<DirCounters>,
    cancel: Arc<AtomicBool>,
}

/// Start a walk over `config.root()`.
///
/// Fails only if the root itself cannot be read; everything below the root
/// that cannot be read is skipped.
pub fn walk(config: &ScanConfig) -> Result<Walk, ScanError> {
    walk_with_cancel(config, Arc::new(AtomicBool::new(false)))
}

/// Like [`walk`], with a cancellation flag checked once per directory.
///
/// Once the flag is raised no further directory is read; the walk then
/// drains what is already queued and ends.
pub fn walk_with_cancel(config: &ScanConfig, cancel: Arc<AtomicBool>) -> Result<Walk, ScanError> {
    let root = config.root().to_path_buf();
    if let Err(source) = std::fs::read_dir(&root) {
        return Err(ScanError::RootUnreadable { path: root, source });
    }

    let exclusions = ExclusionSet::from_config(config);
    let dirs = Arc::new(DirCounters::default());
    let hook_dirs = dirs.clone();
    let hook_cancel = cancel.clone();

    let walker = WalkDir::new(&root)
        .skip_hidden(false)
        .follow_links(false)
        .sort(true)
        .parallelism(Parallelism::Serial)
        .process_read_dir(move |depth, dir, _state, children| {
            // The first call hands over the root entry itself (no parent).
            if depth.is_none() {
                return;
            }
            if hook_cancel.load(Ordering::Relaxed) {
                debug!("Cancelled before reading {}", dir.display());
                children.clear();
                return;
            }
            hook_dirs.visited.fetch_add(1, Ordering::Relaxed);

            children.retain(|child| {
                let Ok(entry) = child else {
                    return true;
                };
                if !entry.file_type().is_dir() {
                    return true;
                }
                let path = entry.path();
                match exclusions.prune_reason(&path) {
                    None => true,
                    Some(reason) => {
                        let counter = match reason {
                            PruneReason::Excluded => &hook_dirs.excluded,
                            PruneReason::Hidden => &hook_dirs.hidden,
                        };
                        counter.fetch_add(1, Ordering::Relaxed);
                        debug!("Pruned {} ({reason:?})", path.display());
                        false
                    }
                }
            });
        });

    Ok(Walk {
        entries: Box::new(walker.into_iter()),
        pipeline: FilterPipeline::from_config(config, SystemTime::now()),
        stats: ScanStats::default(),
        dirs,
        cancel,
    })
}

impl Walk {
    /// Counters accumulated so far. Complete once the iterator is exhausted.
    pub fn stats(&self) -> ScanStats {
        ScanStats {
            dirs_visited: self.dirs.visited.load(Ordering::Relaxed),
            dirs_excluded: self.dirs.excluded.load(Ordering::Relaxed),
            dirs_hidden: self.dirs.hidden.load(Ordering::Relaxed),
            ..self.stats
        }
    }

    /// Whether the cancellation flag was raised during this walk.
    pub fn was_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }
}

impl Iterator for Walk {
    type Item = FileEntry;

    fn next(&mut self) -> Option<FileEntry> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    self.stats.files_inaccessible += 1;
                    debug!("Skipping unreadable entry: {err}");
                    continue;
                }
            };
            if entry.file_type().is_dir() {
                // A serial walk reports a failed read_dir on the directory's own entry.
                if let Some(err) = &entry.read_children_error {
                    self.stats.dirs_unreadable += 1;
                    debug!("Skipping unreadable directory {}: {err}", entry.path().display());
                }
                continue;
            }
            if let Some(found) = self.pipeline.admit(entry.path(), &mut self.stats) {
                return Some(found);
            }
        }
    }
}
