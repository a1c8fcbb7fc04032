/// Diagnostic tally for a scan.
///
/// None of these counters change what a scan returns. They exist so a caller
/// can tell "nothing matched" apart from "everything was inaccessible" when
/// a scan comes back empty.
use crate::scanner::filters::Stage;

/// Counters accumulated while a scan runs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanStats {
    /// Directories whose entries were read (the root included).
    pub dirs_visited: u64,
    /// Directories pruned because their path is in the exclusion set.
    pub dirs_excluded: u64,
    /// Directories pruned because their name starts with `.`.
    pub dirs_hidden: u64,
    /// Subdirectories that could not be opened.
    pub dirs_unreadable: u64,
    /// Non-directory entries considered.
    pub files_seen: u64,
    /// Files whose metadata could not be read.
    pub files_inaccessible: u64,
    pub dropped_by_size: u64,
    pub dropped_by_age: u64,
    pub dropped_by_category: u64,
    /// Files that became `FileEntry` records.
    pub matched: u64,
}

impl ScanStats {
    pub(crate) fn record_drop(&mut self, stage: Stage) {
        match stage {
            Stage::MinSize => self.dropped_by_size += 1,
            Stage::MinAge => self.dropped_by_age += 1,
            Stage::Category => self.dropped_by_category += 1,
        }
    }

    /// Files dropped by any filter stage.
    pub fn dropped(&self) -> u64 {
        self.dropped_by_size + self.dropped_by_age + self.dropped_by_category
    }

    /// Directories pruned for any reason.
    pub fn dirs_pruned(&self) -> u64 {
        self.dirs_excluded + self.dirs_hidden
    }
}
