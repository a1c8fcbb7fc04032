/// Per-category totals over a result set, for the summary view.
use crate::model::{Category, FileEntry};
use std::collections::HashMap;

/// Size and count totals for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryStats {
    pub category: Category,
    pub total_size: u64,
    pub file_count: u64,
}

/// Totals across the whole result set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub file_count: u64,
    pub total_size: u64,
}

impl Totals {
    pub fn of(entries: &[FileEntry]) -> Self {
        Self {
            file_count: entries.len() as u64,
            total_size: entries.iter().map(|e| e.size).sum(),
        }
    }
}

/// Group entries by category, largest total first.
///
/// Categories with no entries are omitted. Equal totals fall back to the
/// category declaration order so the output is deterministic.
pub fn summarise(entries: &[FileEntry]) -> Vec<CategoryStats> {
    let mut map: HashMap<Category, CategoryStats> = HashMap::with_capacity(Category::ALL.len());

    for entry in entries {
        let stats = map.entry(entry.category).or_insert(CategoryStats {
            category: entry.category,
            total_size: 0,
            file_count: 0,
        });
        stats.total_size += entry.size;
        stats.file_count += 1;
    }

    let mut results: Vec<CategoryStats> = map.into_values().collect();
    results.sort_by(|a, b| {
        b.total_size
            .cmp(&a.total_size)
            .then_with(|| a.category.cmp(&b.category))
    });
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use std::path::PathBuf;

    fn entry(size: u64, category: Category) -> FileEntry {
        FileEntry::new(PathBuf::from("/x"), size, Local::now(), category)
    }

    #[test]
    fn empty_input_gives_no_groups() {
        assert!(summarise(&[]).is_empty());
        assert_eq!(Totals::of(&[]), Totals::default());
    }

    #[test]
    fn groups_and_orders_by_total_size() {
        let entries = vec![
            entry(10, Category::Log),
            entry(500, Category::Video),
            entry(300, Category::Archive),
            entry(300, Category::Archive),
        ];
        let stats = summarise(&entries);
        assert_eq!(stats.len(), 3);
        assert_eq!(stats[0].category, Category::Archive);
        assert_eq!(stats[0].file_count, 2);
        assert_eq!(stats[0].total_size, 600);
        assert_eq!(stats[1].category, Category::Video);
        assert_eq!(stats[2].category, Category::Log);

        let totals = Totals::of(&entries);
        assert_eq!(totals.file_count, 4);
        assert_eq!(totals.total_size, 1_110);
    }

    #[test]
    fn equal_totals_use_category_order() {
        let entries = vec![entry(5, Category::Other), entry(5, Category::Archive)];
        let stats = summarise(&entries);
        assert_eq!(stats[0].category, Category::Archive);
        assert_eq!(stats[1].category, Category::Other);
    }
}
