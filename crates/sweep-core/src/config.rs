/// Scan configuration: every filter and exclusion parameter the walk needs.
///
/// A `ScanConfig` can only be obtained from [`ScanConfigBuilder::build`],
/// which validates the root and normalises paths. Once built it is never
/// mutated; the walker borrows it for the duration of a scan.
use crate::error::ScanError;
use crate::model::Category;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Immutable filter/exclusion parameters for one invocation.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    root: PathBuf,
    min_size: u64,
    older_than_days: Option<u64>,
    category: Option<Category>,
    exclude: HashSet<PathBuf>,
    limit: Option<usize>,
}

impl ScanConfig {
    /// Start building a config rooted at `root`.
    pub fn builder(root: impl Into<PathBuf>) -> ScanConfigBuilder {
        ScanConfigBuilder {
            root: root.into(),
            min_size: 0,
            older_than_days: None,
            category: None,
            exclude: Vec::new(),
            limit: None,
        }
    }

    /// Absolute directory to scan.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Inclusive lower bound in bytes (0 = no bound).
    pub fn min_size(&self) -> u64 {
        self.min_size
    }

    /// Inclusive lower bound on age in whole days.
    pub fn older_than_days(&self) -> Option<u64> {
        self.older_than_days
    }

    /// Single category to keep; `None` keeps all.
    pub fn category(&self) -> Option<Category> {
        self.category
    }

    /// Absolute directory paths pruned from traversal.
    pub fn exclude(&self) -> &HashSet<PathBuf> {
        &self.exclude
    }

    /// Cap on result count after ranking.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}

/// Builder for [`ScanConfig`].
#[derive(Debug, Clone)]
pub struct ScanConfigBuilder {
    root: PathBuf,
    min_size: u64,
    older_than_days: Option<u64>,
    category: Option<Category>,
    exclude: Vec<PathBuf>,
    limit: Option<usize>,
}

impl ScanConfigBuilder {
    pub fn min_size(mut self, bytes: u64) -> Self {
        self.min_size = bytes;
        self
    }

    pub fn older_than_days(mut self, days: Option<u64>) -> Self {
        self.older_than_days = days;
        self
    }

    pub fn category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    /// Add directories to prune. May be called more than once.
    pub fn exclude<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.exclude.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Validate and freeze the configuration.
    ///
    /// The root must exist and be a directory. Root and exclusion paths are
    /// made absolute lexically against the current directory, without
    /// resolving symlinks, so they compare equal to the paths the walker
    /// produces.
    pub fn build(self) -> Result<ScanConfig, ScanError> {
        let root = absolutize(&self.root);
        let meta = match std::fs::metadata(&root) {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ScanError::RootNotFound(root));
            }
            Err(source) => return Err(ScanError::RootUnreadable { path: root, source }),
        };
        if !meta.is_dir() {
            return Err(ScanError::RootNotDirectory(root));
        }

        let exclude = self
            .exclude
            .iter()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| absolutize(p))
            .collect();

        Ok(ScanConfig {
            root,
            min_size: self.min_size,
            older_than_days: self.older_than_days,
            category: self.category,
            exclude,
            limit: self.limit,
        })
    }
}

fn absolutize(path: &Path) -> PathBuf {
    let abs = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    // Re-collect to drop trailing separators and `.` segments.
    abs.components().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn build_rejects_missing_root() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");
        let err = ScanConfig::builder(&missing).build().unwrap_err();
        assert!(matches!(err, ScanError::RootNotFound(_)), "got {err:?}");
    }

    #[test]
    fn build_rejects_file_root() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("f.txt");
        std::fs::write(&file, b"x").unwrap();
        let err = ScanConfig::builder(&file).build().unwrap_err();
        assert!(matches!(err, ScanError::RootNotDirectory(_)), "got {err:?}");
    }

    #[test]
    fn defaults_apply_no_filters() {
        let tmp = TempDir::new().unwrap();
        let config = ScanConfig::builder(tmp.path()).build().unwrap();
        assert_eq!(config.min_size(), 0);
        assert_eq!(config.older_than_days(), None);
        assert_eq!(config.category(), None);
        assert!(config.exclude().is_empty());
        assert_eq!(config.limit(), None);
        assert!(config.root().is_absolute());
    }

    #[test]
    fn exclusions_are_normalised() {
        let tmp = TempDir::new().unwrap();
        let with_slash = format!("{}/", tmp.path().join("skip").display());
        let config = ScanConfig::builder(tmp.path())
            .exclude([PathBuf::from(with_slash), PathBuf::new()])
            .build()
            .unwrap();
        assert_eq!(config.exclude().len(), 1);
        assert!(config.exclude().contains(&tmp.path().join("skip")));
    }
}
