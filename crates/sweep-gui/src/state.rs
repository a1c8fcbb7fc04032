/// Review window state.
///
/// Everything the window reads and writes lives here, so the behaviour
/// behind every button (sorting, filtering, selection, trashing) can be
/// exercised without opening a window. The widgets are thin views over it.
use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use sweep_core::model::size::{format_count, format_size};
use sweep_core::FileEntry;
use tracing::{info, warn};

/// Table column the rows are ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Name,
    Size,
    Category,
    Modified,
    Path,
}

impl SortColumn {
    pub const ALL: [SortColumn; 5] = [
        Self::Name,
        Self::Size,
        Self::Category,
        Self::Modified,
        Self::Path,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Size => "Size",
            Self::Category => "Category",
            Self::Modified => "Date Modified",
            Self::Path => "Path",
        }
    }

    fn compare(self, a: &FileEntry, b: &FileEntry) -> Ordering {
        match self {
            Self::Name => a.name().to_lowercase().cmp(&b.name().to_lowercase()),
            Self::Size => a.size.cmp(&b.size),
            Self::Category => a.category.label().cmp(b.category.label()),
            Self::Modified => a.modified.cmp(&b.modified),
            Self::Path => a.path.cmp(&b.path),
        }
    }
}

/// How a row click changes the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectMode {
    /// Plain click: select only this row.
    Replace,
    /// Cmd/Ctrl-click: flip this row.
    Toggle,
    /// Shift-click: select the visible range from the last clicked row.
    Extend,
}

impl SelectMode {
    pub fn from_modifiers(command: bool, shift: bool) -> Self {
        if shift {
            Self::Extend
        } else if command {
            Self::Toggle
        } else {
            Self::Replace
        }
    }
}

/// One-line feedback shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Result of one "Move to Trash" action.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TrashReport {
    pub moved: usize,
    pub failed: Vec<(PathBuf, String)>,
}

/// All review window state.
pub struct ReviewState {
    rows: Vec<FileEntry>,
    sort_column: SortColumn,
    sort_ascending: bool,
    selected: HashSet<PathBuf>,
    /// Row the last plain or toggle click landed on; start of shift ranges.
    anchor: Option<PathBuf>,
    trashed: usize,

    // ── UI state ───────────────────────────────────────
    /// Case-insensitive substring matched against file names.
    pub filter: String,
    pub focus_filter: bool,
    pub confirm_trash: bool,
    pub message: Option<StatusMessage>,
    pub dark_mode: bool,
}

impl ReviewState {
    /// Rows start sorted by name, ascending.
    pub fn new(entries: Vec<FileEntry>) -> Self {
        let mut state = Self {
            rows: entries,
            sort_column: SortColumn::Name,
            sort_ascending: true,
            selected: HashSet::new(),
            anchor: None,
            trashed: 0,
            filter: String::new(),
            focus_filter: false,
            confirm_trash: false,
            message: None,
            dark_mode: true,
        };
        state.apply_sort();
        state
    }

    pub fn rows(&self) -> &[FileEntry] {
        &self.rows
    }

    pub fn sort_column(&self) -> SortColumn {
        self.sort_column
    }

    pub fn sort_ascending(&self) -> bool {
        self.sort_ascending
    }

    /// Click on a column header: same column flips direction, a new column
    /// starts ascending.
    pub fn sort_by(&mut self, column: SortColumn) {
        if self.sort_column == column {
            self.sort_ascending = !self.sort_ascending;
        } else {
            self.sort_column = column;
            self.sort_ascending = true;
        }
        self.apply_sort();
    }

    fn apply_sort(&mut self) {
        let column = self.sort_column;
        let ascending = self.sort_ascending;
        self.rows.sort_by(|a, b| {
            let ord = column.compare(a, b).then_with(|| a.path.cmp(&b.path));
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        });
    }

    fn matches_filter(&self, entry: &FileEntry) -> bool {
        let needle = self.filter.trim();
        needle.is_empty() || entry.name().to_lowercase().contains(&needle.to_lowercase())
    }

    /// Indices into [`rows`](Self::rows) that pass the name filter, in
    /// display order.
    pub fn visible(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, e)| self.matches_filter(e))
            .map(|(i, _)| i)
            .collect()
    }

    /// Drop selected rows the filter now hides, so actions only ever touch
    /// rows the user can see.
    pub fn on_filter_changed(&mut self) {
        let visible: HashSet<&Path> = self
            .rows
            .iter()
            .filter(|e| self.matches_filter(e))
            .map(|e| e.path.as_path())
            .collect();
        self.selected.retain(|p| visible.contains(p.as_path()));
        if self
            .anchor
            .as_deref()
            .is_some_and(|a| !visible.contains(a))
        {
            self.anchor = None;
        }
    }

    // ── Selection ──────────────────────────────────────

    pub fn is_selected(&self, path: &Path) -> bool {
        self.selected.contains(path)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Selected entries in display order.
    pub fn selected_entries(&self) -> Vec<&FileEntry> {
        self.rows
            .iter()
            .filter(|e| self.selected.contains(&e.path))
            .collect()
    }

    pub fn selected_size(&self) -> u64 {
        self.selected_entries().iter().map(|e| e.size).sum()
    }

    /// Apply a click on row `index` (an index into `rows`).
    pub fn click(&mut self, index: usize, mode: SelectMode) {
        let Some(path) = self.rows.get(index).map(|e| e.path.clone()) else {
            return;
        };
        match mode {
            SelectMode::Replace => {
                self.selected.clear();
                self.selected.insert(path.clone());
                self.anchor = Some(path);
            }
            SelectMode::Toggle => {
                if !self.selected.remove(&path) {
                    self.selected.insert(path.clone());
                }
                self.anchor = Some(path);
            }
            SelectMode::Extend => {
                let visible = self.visible();
                let anchor_pos = self.anchor.as_ref().and_then(|a| {
                    visible.iter().position(|&i| &self.rows[i].path == a)
                });
                let click_pos = visible.iter().position(|&i| i == index);
                match (anchor_pos, click_pos) {
                    (Some(a), Some(c)) => {
                        let (lo, hi) = if a <= c { (a, c) } else { (c, a) };
                        self.selected = visible[lo..=hi]
                            .iter()
                            .map(|&i| self.rows[i].path.clone())
                            .collect();
                    }
                    _ => self.click(index, SelectMode::Replace),
                }
            }
        }
    }

    pub fn select_all_visible(&mut self) {
        let paths: Vec<PathBuf> = self
            .visible()
            .into_iter()
            .map(|i| self.rows[i].path.clone())
            .collect();
        self.selected.extend(paths);
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
        self.anchor = None;
    }

    // ── Trash ──────────────────────────────────────────

    /// Ask for confirmation, or explain why there is nothing to trash.
    pub fn request_trash(&mut self) {
        if self.selected.is_empty() {
            self.message = Some(StatusMessage {
                text: "Select files to move to the Trash.".into(),
                is_error: false,
            });
        } else {
            self.confirm_trash = true;
        }
    }

    /// Question shown in the confirmation dialog.
    pub fn confirm_prompt(&self) -> String {
        match self.selected_entries().as_slice() {
            [only] => format!("Move \"{}\" to the Trash?", only.name()),
            many => format!(
                "Move {} files ({}) to the Trash?",
                format_count(many.len() as u64),
                format_size(self.selected_size())
            ),
        }
    }

    /// Move every selected file to the system Trash.
    pub fn trash_selected(&mut self) -> TrashReport {
        self.trash_selected_with(|path| trash::delete(path).map_err(|e| e.to_string()))
    }

    /// Like [`trash_selected`](Self::trash_selected) with a custom remover.
    ///
    /// Rows whose removal succeeded disappear from the table; failures stay
    /// listed and selected.
    pub fn trash_selected_with<F>(&mut self, mut remove: F) -> TrashReport
    where
        F: FnMut(&Path) -> Result<(), String>,
    {
        self.confirm_trash = false;
        let targets: Vec<PathBuf> = self
            .selected_entries()
            .into_iter()
            .map(|e| e.path.clone())
            .collect();

        let mut report = TrashReport::default();
        let mut moved: HashSet<PathBuf> = HashSet::new();
        for path in targets {
            match remove(&path) {
                Ok(()) => {
                    info!("Moved {} to the Trash", path.display());
                    moved.insert(path);
                }
                Err(e) => {
                    warn!("Could not move {} to the Trash: {e}", path.display());
                    report.failed.push((path, e));
                }
            }
        }

        report.moved = moved.len();
        self.trashed += moved.len();
        self.rows.retain(|e| !moved.contains(&e.path));
        self.selected.retain(|p| !moved.contains(p));
        if self.anchor.as_ref().is_some_and(|a| moved.contains(a)) {
            self.anchor = None;
        }

        self.message = Some(match report.failed.first() {
            None => StatusMessage {
                text: format!(
                    "{} files remaining ({} moved to the Trash)",
                    format_count(self.rows.len() as u64),
                    format_count(report.moved as u64)
                ),
                is_error: false,
            },
            Some((path, err)) => StatusMessage {
                text: format!(
                    "Moved {}, {} failed ({}: {err})",
                    report.moved,
                    report.failed.len(),
                    path.display()
                ),
                is_error: true,
            },
        });
        report
    }

    /// Files moved to the Trash during this session.
    pub fn trashed_count(&self) -> usize {
        self.trashed
    }

    // ── Status ─────────────────────────────────────────

    /// "N files found", or "V of N files shown" while a filter is active.
    pub fn count_text(&self) -> String {
        let total = self.rows.len() as u64;
        if self.filter.trim().is_empty() {
            format!("{} files found", format_count(total))
        } else {
            format!(
                "{} of {} files shown",
                format_count(self.visible().len() as u64),
                format_count(total)
            )
        }
    }

    /// Total size of the visible rows.
    pub fn visible_size(&self) -> u64 {
        self.visible().into_iter().map(|i| self.rows[i].size).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_wins_over_command() {
        assert_eq!(SelectMode::from_modifiers(false, false), SelectMode::Replace);
        assert_eq!(SelectMode::from_modifiers(true, false), SelectMode::Toggle);
        assert_eq!(SelectMode::from_modifiers(true, true), SelectMode::Extend);
    }

    #[test]
    fn empty_state_has_nothing_to_act_on() {
        let mut state = ReviewState::new(Vec::new());
        assert!(state.visible().is_empty());
        state.click(0, SelectMode::Replace);
        assert_eq!(state.selected_count(), 0);
        assert_eq!(state.count_text(), "0 files found");
    }
}
