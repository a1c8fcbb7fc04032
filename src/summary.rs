/// Human-readable rendering of a result set and its scan diagnostics.
use std::fmt::Write;
use std::time::Duration;
use sweep_core::analysis::{summarise, Totals};
use sweep_core::model::size::{format_count, format_size};
use sweep_core::scanner::{ScanStats, SourceTier};
use sweep_core::FileEntry;

/// "Found N files matching criteria (S total)", then per-category lines,
/// largest category first.
pub fn render_summary(entries: &[FileEntry]) -> String {
    let totals = Totals::of(entries);
    let mut out = format!(
        "Found {} files matching criteria ({} total)\n",
        format_count(totals.file_count),
        format_size(totals.total_size)
    );
    if entries.is_empty() {
        return out;
    }

    out.push_str("\nBy category:\n");
    for stats in summarise(entries) {
        let _ = writeln!(
            out,
            "  {}: {} files ({})",
            stats.category,
            format_count(stats.file_count),
            format_size(stats.total_size)
        );
    }
    out
}

/// Diagnostics tally printed with `--verbose`.
pub fn render_stats(stats: &ScanStats, tier: SourceTier, duration: Duration) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Scan diagnostics ({}, {:.2?}):", tier.label(), duration);
    let rows = [
        ("directories read", stats.dirs_visited),
        ("directories excluded", stats.dirs_excluded),
        ("hidden directories skipped", stats.dirs_hidden),
        ("unreadable directories", stats.dirs_unreadable),
        ("files seen", stats.files_seen),
        ("inaccessible files", stats.files_inaccessible),
        ("dropped by size", stats.dropped_by_size),
        ("dropped by age", stats.dropped_by_age),
        ("dropped by category", stats.dropped_by_category),
        ("matched", stats.matched),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "  {label:<28}{:>12}", format_count(value));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use std::path::PathBuf;
    use sweep_core::Category;

    fn entry(name: &str, size: u64, category: Category) -> FileEntry {
        FileEntry::new(PathBuf::from("/r").join(name), size, Local::now(), category)
    }

    #[test]
    fn empty_summary_is_one_line() {
        assert_eq!(render_summary(&[]), "Found 0 files matching criteria (0 B total)\n");
    }

    #[test]
    fn categories_are_ordered_by_total_size() {
        let entries = vec![
            entry("a.zip", 1024, Category::Archive),
            entry("b.mp4", 3 * 1024 * 1024, Category::Video),
            entry("c.zip", 1024, Category::Archive),
        ];
        let text = render_summary(&entries);
        let expected = "Found 3 files matching criteria (3.0 MB total)\n\
                        \n\
                        By category:\n  \
                        video: 1 files (3.0 MB)\n  \
                        archive: 2 files (2.0 KB)\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn stats_list_every_counter() {
        let stats = ScanStats {
            files_seen: 1234,
            matched: 7,
            ..ScanStats::default()
        };
        let text = render_stats(&stats, SourceTier::Walk, Duration::from_millis(5));
        assert!(text.starts_with("Scan diagnostics (directory walk"));
        assert!(text.contains("files seen"));
        assert!(text.contains("1,234"));
        assert_eq!(text.lines().count(), 11);
    }
}
