/// Largest-first ranking of a result set.
use crate::model::FileEntry;

/// Sort by size descending and keep the first `limit` entries.
///
/// With no limit the walk order is returned untouched. The sort is stable,
/// so entries of equal size keep their relative walk order.
pub fn rank(mut entries: Vec<FileEntry>, limit: Option<usize>) -> Vec<FileEntry> {
    let Some(limit) = limit else {
        return entries;
    };
    entries.sort_by(|a, b| b.size.cmp(&a.size));
    entries.truncate(limit);
    entries
}

/// Like [`rank`] but breaks size ties by path instead of input order.
///
/// Use this when the input order is not reproducible (e.g. entries merged
/// from several threads); the output then depends only on sizes and paths.
pub fn rank_by_size_then_path(mut entries: Vec<FileEntry>, limit: Option<usize>) -> Vec<FileEntry> {
    entries.sort_unstable_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
    if let Some(limit) = limit {
        entries.truncate(limit);
    }
    entries
}
