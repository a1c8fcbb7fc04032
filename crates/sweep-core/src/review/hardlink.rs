/// Hardlink mirror: a flat review folder of links to the matched files.
///
/// Links share the original inode, so the folder costs no extra space and
/// deleting from it alone frees nothing. Removing the folder never touches
/// the originals.
use crate::error::ReviewError;
use crate::model::FileEntry;
use crate::review::{Marker, SWEEP_PREFIX};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Links each marked file into `<base>/<folder>`.
#[derive(Debug, Clone)]
pub struct HardlinkMirror {
    dir: PathBuf,
}

impl HardlinkMirror {
    pub fn new(base: impl AsRef<Path>, folder: &str) -> Self {
        Self {
            dir: base.as_ref().join(folder),
        }
    }

    /// The folder links are created in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Marker for HardlinkMirror {
    fn describe(&self) -> String {
        format!("link into {}", self.dir.display())
    }

    fn prepare(&mut self) -> Result<(), ReviewError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| ReviewError::io(format!("cannot create {}", self.dir.display()), e))
    }

    fn mark(&mut self, entry: &FileEntry) -> Result<(), ReviewError> {
        let link = match link_slot(&self.dir, &entry.path) {
            LinkSlot::Linked(existing) => {
                debug!("Already linked {} -> {}", existing.display(), entry.path.display());
                return Ok(());
            }
            LinkSlot::Free(link) => link,
        };
        fs::hard_link(&entry.path, &link).map_err(|e| {
            ReviewError::io(
                format!("cannot link {} -> {}", link.display(), entry.path.display()),
                e,
            )
        })?;
        debug!("Linked {} -> {}", link.display(), entry.path.display());
        Ok(())
    }
}

enum LinkSlot {
    /// A link to the same file already sits at this path.
    Linked(PathBuf),
    Free(PathBuf),
}

/// Walk the candidate names for `source` inside `dir`: the original file
/// name, then `stem_1.ext`, `stem_2.ext`, and so on. Stops at the first
/// free name or at an existing link to `source`.
fn link_slot(dir: &Path, source: &Path) -> LinkSlot {
    let name = source.file_name().map(OsString::from).unwrap_or_else(|| "file".into());
    let stem = source.file_stem().map(OsString::from).unwrap_or_else(|| name.clone());
    let ext = source.extension();
    let suffixed = (1u64..).map(|n| {
        let mut file = stem.clone();
        file.push(format!("_{n}"));
        if let Some(ext) = ext {
            file.push(".");
            file.push(ext);
        }
        dir.join(file)
    });

    std::iter::once(dir.join(&name))
        .chain(suffixed)
        .find_map(|candidate| match fs::symlink_metadata(&candidate) {
            Err(_) => Some(LinkSlot::Free(candidate)),
            Ok(_) if same_file(&candidate, source) => Some(LinkSlot::Linked(candidate)),
            Ok(_) => None,
        })
        .unwrap_or_else(|| LinkSlot::Free(dir.join(&name)))
}

/// Whether `a` and `b` are the same inode on the same device.
#[cfg(unix)]
fn same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (fs::metadata(a), fs::metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn same_file(_a: &Path, _b: &Path) -> bool {
    false
}

/// Delete `<base>/<folder>`: its regular files, then the folder itself.
/// Returns how many files were removed; a missing folder is 0.
pub fn remove_link_folder(base: &Path, folder: &str) -> Result<u64, ReviewError> {
    let dir = base.join(folder);
    if !dir.exists() {
        return Ok(0);
    }

    let read = fs::read_dir(&dir)
        .map_err(|e| ReviewError::io(format!("cannot read {}", dir.display()), e))?;
    let mut removed = 0;
    for item in read {
        let item = item.map_err(|e| ReviewError::io(format!("cannot read {}", dir.display()), e))?;
        let path = item.path();
        let is_file = item.file_type().map(|t| t.is_file()).unwrap_or(false);
        if is_file {
            fs::remove_file(&path)
                .map_err(|e| ReviewError::io(format!("cannot remove {}", path.display()), e))?;
            removed += 1;
        }
    }
    fs::remove_dir(&dir).map_err(|e| ReviewError::io(format!("cannot remove {}", dir.display()), e))?;

    info!("Removed {} ({removed} links)", dir.display());
    Ok(removed)
}

/// Remove every directory directly under `base` whose name starts with
/// `sweep`. Returns the total number of links removed.
pub fn clear_sweep_links(base: &Path) -> Result<u64, ReviewError> {
    if !base.exists() {
        return Ok(0);
    }

    let read = fs::read_dir(base)
        .map_err(|e| ReviewError::io(format!("cannot read {}", base.display()), e))?;
    let mut folders: Vec<String> = Vec::new();
    for item in read {
        let item = item.map_err(|e| ReviewError::io(format!("cannot read {}", base.display()), e))?;
        let is_dir = item.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if let Some(name) = item.file_name().to_str() {
            if is_dir && name.starts_with(SWEEP_PREFIX) {
                folders.push(name.to_string());
            }
        }
    }
    folders.sort();

    let mut total = 0;
    for folder in &folders {
        total += remove_link_folder(base, folder)?;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;
    use crate::review::{mark_for_review, Apply, ReviewOutcome};
    use chrono::Local;

    fn file(dir: &Path, rel: &str, body: &str) -> FileEntry {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, body).unwrap();
        FileEntry::new(path, body.len() as u64, Local::now(), Category::Archive)
    }

    #[test]
    fn links_share_content_and_collisions_get_suffixes() {
        let src = tempfile::tempdir().unwrap();
        let home = tempfile::tempdir().unwrap();
        let entries = vec![
            file(src.path(), "a/backup.tar.gz", "one"),
            file(src.path(), "b/backup.tar.gz", "two"),
            file(src.path(), "c/backup.tar.gz", "three"),
            file(src.path(), "c/README", "four"),
        ];

        let mut mirror = HardlinkMirror::new(home.path(), "sweep");
        let outcome = mark_for_review(&entries, &mut mirror, Apply::Live).unwrap();
        assert_eq!(outcome, ReviewOutcome { marked: 4, failed: 0 });

        let dir = home.path().join("sweep");
        assert_eq!(fs::read_to_string(dir.join("backup.tar.gz")).unwrap(), "one");
        assert_eq!(fs::read_to_string(dir.join("backup.tar_1.gz")).unwrap(), "two");
        assert_eq!(fs::read_to_string(dir.join("backup.tar_2.gz")).unwrap(), "three");
        assert_eq!(fs::read_to_string(dir.join("README")).unwrap(), "four");
    }

    #[cfg(unix)]
    #[test]
    fn marking_twice_reuses_the_existing_link() {
        let src = tempfile::tempdir().unwrap();
        let home = tempfile::tempdir().unwrap();
        let entries = vec![
            file(src.path(), "a/backup.zip", "one"),
            file(src.path(), "b/backup.zip", "two"),
        ];

        let mut mirror = HardlinkMirror::new(home.path(), "sweep");
        for _ in 0..3 {
            let outcome = mark_for_review(&entries, &mut mirror, Apply::Live).unwrap();
            assert_eq!(outcome, ReviewOutcome { marked: 2, failed: 0 });
        }

        let mut names: Vec<_> = fs::read_dir(mirror.dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        assert_eq!(names, ["backup.zip", "backup_1.zip"]);
    }

    #[test]
    fn dry_run_creates_nothing() {
        let src = tempfile::tempdir().unwrap();
        let home = tempfile::tempdir().unwrap();
        let entries = vec![file(src.path(), "x.iso", "data")];

        let mut mirror = HardlinkMirror::new(home.path(), "sweep");
        let outcome = mark_for_review(&entries, &mut mirror, Apply::DryRun).unwrap();

        assert_eq!(outcome.marked, 1);
        assert!(!mirror.dir().exists(), "dry run must not create the folder");
    }

    #[test]
    fn vanished_source_is_counted_as_failure() {
        let src = tempfile::tempdir().unwrap();
        let home = tempfile::tempdir().unwrap();
        let entries = vec![file(src.path(), "gone.zip", "x"), file(src.path(), "kept.zip", "y")];
        fs::remove_file(&entries[0].path).unwrap();

        let mut mirror = HardlinkMirror::new(home.path(), "review");
        let outcome = mark_for_review(&entries, &mut mirror, Apply::Live).unwrap();
        assert_eq!(outcome, ReviewOutcome { marked: 1, failed: 1 });
    }

    #[test]
    fn remove_link_folder_keeps_originals() {
        let src = tempfile::tempdir().unwrap();
        let home = tempfile::tempdir().unwrap();
        let entries = vec![file(src.path(), "a.dmg", "a"), file(src.path(), "b.dmg", "b")];
        let mut mirror = HardlinkMirror::new(home.path(), "sweep");
        mark_for_review(&entries, &mut mirror, Apply::Live).unwrap();

        assert_eq!(remove_link_folder(home.path(), "sweep").unwrap(), 2);
        assert!(!home.path().join("sweep").exists());
        assert!(entries.iter().all(|e| e.path.exists()), "originals must survive");
        assert_eq!(remove_link_folder(home.path(), "sweep").unwrap(), 0);
    }

    #[test]
    fn clear_sweep_links_matches_prefix_only() {
        let home = tempfile::tempdir().unwrap();
        for (folder, files) in [("sweep", 2), ("sweep-videos", 1), ("keep", 3)] {
            let dir = home.path().join(folder);
            fs::create_dir_all(&dir).unwrap();
            for i in 0..files {
                fs::write(dir.join(format!("f{i}")), "x").unwrap();
            }
        }

        assert_eq!(clear_sweep_links(home.path()).unwrap(), 3);
        assert!(!home.path().join("sweep").exists());
        assert!(!home.path().join("sweep-videos").exists());
        assert!(home.path().join("keep").exists());
    }
}
