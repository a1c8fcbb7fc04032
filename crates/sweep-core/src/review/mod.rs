/// "Mark for review" actions.
///
/// A [`Marker`] flags one file for a human decision (a Finder tag, a
/// hardlink in a review folder). [`mark_for_review`] drives a marker over a
/// result set under an [`Apply`] capability: `Live` performs the action,
/// `DryRun` only counts. Nothing here ever deletes a scanned file.
pub mod hardlink;
pub mod tag;

pub use hardlink::{clear_sweep_links, remove_link_folder, HardlinkMirror};
pub use tag::{FinderTag, TagTool};

use crate::error::ReviewError;
use crate::model::FileEntry;
use tracing::{debug, info, warn};

/// Tags and link folders created by sweep start with this; the bulk
/// clean-up utilities only touch names carrying it.
pub const SWEEP_PREFIX: &str = "sweep";

/// One review action applied to one file at a time.
pub trait Marker {
    /// Short human description, e.g. `tag 'sweep'`.
    fn describe(&self) -> String;

    /// Called once before the first `mark` of a live run.
    fn prepare(&mut self) -> Result<(), ReviewError> {
        Ok(())
    }

    fn mark(&mut self, entry: &FileEntry) -> Result<(), ReviewError>;
}

/// Whether side effects are actually performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Apply {
    Live,
    DryRun,
}

impl Apply {
    pub fn from_dry_run(dry_run: bool) -> Self {
        if dry_run {
            Self::DryRun
        } else {
            Self::Live
        }
    }

    pub fn is_dry_run(self) -> bool {
        self == Self::DryRun
    }

    fn prepare(self, marker: &mut dyn Marker) -> Result<(), ReviewError> {
        match self {
            Self::Live => marker.prepare(),
            Self::DryRun => Ok(()),
        }
    }

    fn mark(self, marker: &mut dyn Marker, entry: &FileEntry) -> Result<(), ReviewError> {
        match self {
            Self::Live => marker.mark(entry),
            Self::DryRun => {
                debug!("[dry run] {} {}", marker.describe(), entry.path.display());
                Ok(())
            }
        }
    }
}

/// Tally of one review pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReviewOutcome {
    pub marked: u64,
    pub failed: u64,
}

/// Apply `marker` to every entry.
///
/// Per-file failures are logged and counted; the pass continues. Only a
/// failing `prepare` aborts. An empty result set does nothing at all.
pub fn mark_for_review(
    entries: &[FileEntry],
    marker: &mut dyn Marker,
    apply: Apply,
) -> Result<ReviewOutcome, ReviewError> {
    let mut outcome = ReviewOutcome::default();
    if entries.is_empty() {
        return Ok(outcome);
    }

    apply.prepare(marker)?;
    for entry in entries {
        match apply.mark(marker, entry) {
            Ok(()) => outcome.marked += 1,
            Err(e) => {
                warn!("Could not {} {}: {e}", marker.describe(), entry.path.display());
                outcome.failed += 1;
            }
        }
    }

    info!(
        "{}{}: {} marked, {} failed",
        if apply.is_dry_run() { "[dry run] " } else { "" },
        marker.describe(),
        outcome.marked,
        outcome.failed
    );
    Ok(outcome)
}
