/// Path-based category classification.
///
/// Classification is a pure function of the path: no I/O, no failure mode.
/// The rules are data. Each [`CategoryRule`] pairs an extension set with a
/// guard over the path's segments, and the first rule whose extension and
/// guard both match decides the category. Cache directories are checked
/// before any rule and win regardless of extension.
use crate::model::Category;
use std::ffi::OsStr;
use std::path::{Component, Path};

/// Directory names whose contents are always classified as `cache`.
pub const CACHE_DIR_NAMES: &[&str] = &["node_modules", "__pycache__", ".cache", "venv", ".venv"];

/// A `.log`/`.out` file only counts as a log inside one of these.
pub const LOG_DIR_NAMES: &[&str] = &["logs", "var", "tmp"];

/// One row of the classification table.
struct CategoryRule {
    category: Category,
    /// Lowercase extensions without the leading dot.
    extensions: &'static [&'static str],
    /// Extra condition on the path. A rule whose extension matches but whose
    /// guard fails sends the file to `other`.
    guard: fn(&Path) -> bool,
}

const RULES: &[CategoryRule] = &[
    CategoryRule {
        category: Category::Archive,
        extensions: &["zip", "tar", "gz", "bz2", "7z", "rar", "tgz"],
        guard: always,
    },
    CategoryRule {
        category: Category::DiskImage,
        extensions: &["dmg", "iso", "img", "vdi", "vmdk"],
        guard: always,
    },
    CategoryRule {
        category: Category::Video,
        extensions: &["mp4", "mov", "avi", "mkv", "m4v", "flv"],
        guard: always,
    },
    CategoryRule {
        category: Category::Log,
        extensions: &["log", "out"],
        guard: in_log_dir,
    },
];

fn always(_: &Path) -> bool {
    true
}

fn in_log_dir(path: &Path) -> bool {
    has_segment(path, LOG_DIR_NAMES)
}

/// True if any normal component of `path` equals one of `names`.
fn has_segment(path: &Path, names: &[&str]) -> bool {
    path.components().any(|c| match c {
        Component::Normal(seg) => names.iter().any(|n| seg == OsStr::new(n)),
        _ => false,
    })
}

/// Assign a category to `path`.
pub fn classify(path: &Path) -> Category {
    if has_segment(path, CACHE_DIR_NAMES) {
        return Category::Cache;
    }

    let ext = match path.extension() {
        Some(e) if !e.is_empty() => e.to_string_lossy().to_ascii_lowercase(),
        _ => return Category::Other,
    };

    match RULES.iter().find(|rule| rule.extensions.contains(&ext.as_str())) {
        Some(rule) if (rule.guard)(path) => rule.category,
        _ => Category::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(p: &str) -> Category {
        classify(Path::new(p))
    }

    #[test]
    fn extensionless_file_is_other() {
        assert_eq!(c("/a/readme"), Category::Other);
        assert_eq!(c("/a/.bashrc"), Category::Other);
        assert_eq!(c("/a/trailing."), Category::Other);
    }

    #[test]
    fn known_extensions_map_to_categories() {
        assert_eq!(c("/a/archive.zip"), Category::Archive);
        assert_eq!(c("/a/backup.tar.gz"), Category::Archive);
        assert_eq!(c("/a/disk.vmdk"), Category::DiskImage);
        assert_eq!(c("/a/installer.dmg"), Category::DiskImage);
        assert_eq!(c("/a/movie.mp4"), Category::Video);
        assert_eq!(c("/a/clip.mkv"), Category::Video);
        assert_eq!(c("/a/notes.txt"), Category::Other);
    }

    #[test]
    fn extension_match_ignores_case() {
        assert_eq!(c("/a/MOVIE.MP4"), Category::Video);
        assert_eq!(c("/a/Backup.Zip"), Category::Archive);
    }

    #[test]
    fn log_extension_needs_log_directory() {
        assert_eq!(c("/var/app.log"), Category::Log);
        assert_eq!(c("/home/me/logs/run.out"), Category::Log);
        assert_eq!(c("/tmp/build.log"), Category::Log);
        assert_eq!(c("/src/app.log"), Category::Other);
        // Segment match is exact, not substring.
        assert_eq!(c("/variant/app.log"), Category::Other);
    }

    #[test]
    fn cache_directory_wins_over_extension() {
        assert_eq!(c("/a/venv/foo.mp4"), Category::Cache);
        assert_eq!(c("/p/node_modules/pkg/index.js"), Category::Cache);
        assert_eq!(c("/p/__pycache__/mod.cpython-311.pyc"), Category::Cache);
        assert_eq!(c("/home/u/.cache/thing.zip"), Category::Cache);
        assert_eq!(c("/proj/.venv/lib/site.log"), Category::Cache);
    }

    #[test]
    fn cache_directory_applies_to_extensionless_files() {
        assert_eq!(c("/p/node_modules/.bin/tsc"), Category::Cache);
        assert_eq!(c("/p/venv/bin/python"), Category::Cache);
    }

    #[test]
    fn every_cache_name_is_recognised() {
        for name in CACHE_DIR_NAMES {
            let p = format!("/x/{name}/y/archive.zip");
            assert_eq!(c(&p), Category::Cache, "{p}");
        }
    }

    #[test]
    fn relative_and_empty_paths_never_panic() {
        assert_eq!(c(""), Category::Other);
        assert_eq!(c("logs/x.log"), Category::Log);
        assert_eq!(c("."), Category::Other);
    }
}
