/// Spotlight index query, the accelerated (Tier 1) source.
///
/// On macOS the system search index can answer "which files under this
/// root are at least N bytes" without walking the tree. `mdfind` runs as a
/// child process with a bounded timeout; its stdout is drained on a helper
/// thread and handed back over a channel so a hung query can be abandoned
/// and killed.
///
/// The index only narrows the candidate list. Every path it returns still
/// goes through the hidden/exclusion ancestor checks and the same stat +
/// filter pipeline as the walker, so results are indistinguishable from a
/// walk apart from which files the index happened to catalogue.
use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::model::FileEntry;
use crate::scanner::exclusion::ExclusionSet;
use crate::scanner::filters::FilterPipeline;
use crate::scanner::progress::ScanStats;
use crossbeam_channel::RecvTimeoutError;
use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, SystemTime};
use tracing::{debug, info};

/// How long the index query may run before the walk takes over.
pub const DEFAULT_INDEX_TIMEOUT: Duration = Duration::from_secs(60);

const MDFIND: &str = "mdfind";

/// Check whether the Spotlight index can be queried on this host.
pub fn is_index_available() -> bool {
    if !cfg!(target_os = "macos") {
        debug!("Search index not available: not macOS");
        return false;
    }
    let on_path = std::env::var_os("PATH")
        .map(|paths| std::env::split_paths(&paths).any(|dir| dir.join(MDFIND).is_file()))
        .unwrap_or(false);
    if !on_path {
        debug!("Search index not available: {MDFIND} not on PATH");
    }
    on_path
}

/// A configured index query.
#[derive(Debug, Clone)]
pub struct SpotlightIndex {
    program: OsString,
    timeout: Duration,
}

impl SpotlightIndex {
    pub fn new(timeout: Duration) -> Self {
        Self::with_program(MDFIND, timeout)
    }

    /// Use a different executable with the same command-line contract.
    pub fn with_program(program: impl Into<OsString>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// Spotlight query string for `config`.
    ///
    /// Only the size bound is pushed down; age, pruning and category are
    /// applied afterwards by the pipeline.
    pub fn query_for(config: &ScanConfig) -> String {
        format!("kMDItemFSSize >= {}", config.min_size())
    }

    /// Run the query and return the raw, sorted, de-duplicated path list.
    pub fn query(&self, config: &ScanConfig) -> Result<Vec<PathBuf>, ScanError> {
        let unavailable = |reason: String| ScanError::AlternateSourceUnavailable(reason);

        let mut child = Command::new(&self.program)
            .arg("-onlyin")
            .arg(config.root())
            .arg(Self::query_for(config))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| unavailable(format!("cannot start {:?}: {e}", self.program)))?;

        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| unavailable("no stdout from index query".to_string()))?;

        let (tx, rx) = crossbeam_channel::bounded(1);
        std::thread::Builder::new()
            .name("sweep-index-reader".into())
            .spawn(move || {
                let mut buf = Vec::new();
                let result = stdout.read_to_end(&mut buf).map(|_| buf);
                // The receiver is gone if the query already timed out.
                let _ = tx.send(result);
            })
            .map_err(|e| unavailable(format!("cannot spawn reader thread: {e}")))?;

        let output = match rx.recv_timeout(self.timeout) {
            Ok(Ok(bytes)) => bytes,
            Ok(Err(e)) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(unavailable(format!("reading index output failed: {e}")));
            }
            Err(RecvTimeoutError::Timeout) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(unavailable(format!("timed out after {:?}", self.timeout)));
            }
            Err(RecvTimeoutError::Disconnected) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(unavailable("reader thread vanished".to_string()));
            }
        };

        let status = child
            .wait()
            .map_err(|e| unavailable(format!("waiting for index query failed: {e}")))?;
        if !status.success() {
            return Err(unavailable(format!("index query exited with {status}")));
        }

        let mut paths = parse_output(&output);
        paths.sort();
        paths.dedup();
        Ok(paths)
    }

    /// Query the index and run its results through the shared pipeline.
    pub fn collect(&self, config: &ScanConfig) -> Result<(Vec<FileEntry>, ScanStats), ScanError> {
        let paths = self.query(config)?;
        info!("Search index returned {} candidate paths", paths.len());

        let root = config.root();
        let resolved_root = std::fs::canonicalize(root).ok();
        let exclusions = ExclusionSet::from_config(config);
        let pipeline = FilterPipeline::from_config(config, SystemTime::now());
        let mut stats = ScanStats::default();
        let mut entries = Vec::new();
        let mut outside_root = 0usize;
        let returned = paths.len();

        for path in paths {
            let Some(path) = relocate_under(root, resolved_root.as_deref(), path) else {
                outside_root += 1;
                continue;
            };
            if !exclusions.admits(root, &path) {
                debug!("Index path inside a pruned directory: {}", path.display());
                continue;
            }
            if let Some(entry) = pipeline.admit(path, &mut stats) {
                entries.push(entry);
            }
        }

        if returned > 0 && outside_root == returned {
            return Err(ScanError::AlternateSourceUnavailable(format!(
                "none of the {returned} index results lie under {}",
                root.display()
            )));
        }
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        entries.dedup_by(|a, b| a.path == b.path);
        Ok((entries, stats))
    }
}

/// Express an index path relative to the lexical `root`.
///
/// The index reports paths with symlinks resolved (`/tmp/x` comes back as
/// `/private/tmp/x`), so a path under the resolved root is mapped back onto
/// `root`. Paths under neither yield `None`.
fn relocate_under(root: &Path, resolved_root: Option<&Path>, path: PathBuf) -> Option<PathBuf> {
    if path.starts_with(root) {
        return Some(path);
    }
    let relative = path.strip_prefix(resolved_root?).ok()?;
    Some(root.join(relative))
}

/// Split `mdfind` output (one absolute path per line) into paths.
fn parse_output(bytes: &[u8]) -> Vec<PathBuf> {
    bytes
        .split(|&b| b == b'\n')
        .filter(|line| !line.is_empty())
        .map(bytes_to_path)
        .collect()
}

#[cfg(unix)]
fn bytes_to_path(bytes: &[u8]) -> PathBuf {
    use std::os::unix::ffi::OsStrExt;
    PathBuf::from(std::ffi::OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
fn bytes_to_path(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).trim_end_matches('\r'))
}
