/// Directory pruning decisions.
///
/// A directory is pruned when its absolute path is in the configured
/// exclusion set, or unconditionally when its name starts with `.`. Pruning
/// happens before descent, so nothing inside a pruned subtree is ever
/// stat'd or classified.
use crate::config::ScanConfig;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Why a directory was pruned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PruneReason {
    Excluded,
    Hidden,
}

/// The set of absolute directory paths removed from traversal.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    paths: HashSet<PathBuf>,
}

impl ExclusionSet {
    pub fn new(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            paths: paths.into_iter().collect(),
        }
    }

    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(config.exclude().iter().cloned())
    }

    /// Decide whether `dir` should be pruned, and why.
    pub fn prune_reason(&self, dir: &Path) -> Option<PruneReason> {
        if self.paths.contains(dir) {
            return Some(PruneReason::Excluded);
        }
        let hidden = dir
            .file_name()
            .is_some_and(|name| name.as_encoded_bytes().starts_with(b"."));
        hidden.then_some(PruneReason::Hidden)
    }

    pub fn should_prune(&self, dir: &Path) -> bool {
        self.prune_reason(dir).is_some()
    }

    /// Whether a walk from `root` could ever have reached `file`.
    ///
    /// Used for paths that did not come from a walk (the search index):
    /// `file` must lie under `root`, and no directory strictly between the
    /// two may be prunable. The root itself is never pruned.
    pub fn admits(&self, root: &Path, file: &Path) -> bool {
        let Ok(relative) = file.strip_prefix(root) else {
            return false;
        };
        let Some(parent) = relative.parent() else {
            return false;
        };
        let mut dir = root.to_path_buf();
        for segment in parent.components() {
            dir.push(segment);
            if self.should_prune(&dir) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(paths: &[&str]) -> ExclusionSet {
        ExclusionSet::new(paths.iter().map(PathBuf::from))
    }

    #[test]
    fn exact_path_match_is_pruned() {
        let ex = set(&["/home/u/skip"]);
        assert_eq!(ex.prune_reason(Path::new("/home/u/skip")), Some(PruneReason::Excluded));
        assert_eq!(ex.prune_reason(Path::new("/home/u/skipper")), None);
        assert_eq!(ex.prune_reason(Path::new("/other/skip")), None);
    }

    #[test]
    fn hidden_directories_are_pruned() {
        let ex = ExclusionSet::default();
        assert_eq!(ex.prune_reason(Path::new("/a/.git")), Some(PruneReason::Hidden));
        assert_eq!(ex.prune_reason(Path::new("/a/.cache")), Some(PruneReason::Hidden));
        assert!(!ex.should_prune(Path::new("/a/visible")));
    }

    #[test]
    fn exclusion_takes_precedence_over_hidden() {
        let ex = set(&["/a/.secret"]);
        assert_eq!(ex.prune_reason(Path::new("/a/.secret")), Some(PruneReason::Excluded));
    }

    #[test]
    fn admits_checks_every_intermediate_directory() {
        let ex = set(&["/r/big"]);
        let root = Path::new("/r");
        assert!(ex.admits(root, Path::new("/r/file.zip")));
        assert!(ex.admits(root, Path::new("/r/a/b/.hidden-file.zip")));
        assert!(!ex.admits(root, Path::new("/r/big/file.zip")));
        assert!(!ex.admits(root, Path::new("/r/a/.git/objects/pack.zip")));
        assert!(!ex.admits(root, Path::new("/elsewhere/file.zip")));
    }

    #[test]
    fn admits_never_prunes_the_root_itself() {
        let ex = set(&["/r/.dotroot"]);
        assert!(ex.admits(Path::new("/r/.dotroot"), Path::new("/r/.dotroot/x.iso")));
    }
}
