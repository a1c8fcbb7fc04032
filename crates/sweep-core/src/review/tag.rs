/// Finder tags via the third-party `tag` command-line tool.
use crate::error::ReviewError;
use crate::model::FileEntry;
use crate::review::{Marker, SWEEP_PREFIX};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tracing::{debug, info};

const TAG: &str = "tag";

/// Handle on the `tag` executable.
#[derive(Debug, Clone)]
pub struct TagTool {
    program: OsString,
}

impl Default for TagTool {
    fn default() -> Self {
        Self::new(TAG)
    }
}

impl TagTool {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// `tag --version` runs and exits successfully.
    pub fn is_installed(&self) -> bool {
        match Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
        {
            Ok(out) => out.status.success(),
            Err(e) => {
                debug!("{:?} --version failed: {e}", self.program);
                false
            }
        }
    }

    pub fn add(&self, name: &str, path: &Path) -> Result<(), ReviewError> {
        self.run([OsStr::new("--add"), OsStr::new(name), path.as_os_str()])
            .map(drop)
    }

    pub fn remove(&self, name: &str, path: &Path) -> Result<(), ReviewError> {
        self.run([OsStr::new("--remove"), OsStr::new(name), path.as_os_str()])
            .map(drop)
    }

    /// Every file currently carrying `name`.
    pub fn find(&self, name: &str) -> Result<Vec<PathBuf>, ReviewError> {
        let out = self.run([OsStr::new("--find"), OsStr::new(name)])?;
        Ok(non_empty_lines(&out.stdout).map(PathBuf::from).collect())
    }

    /// Every tag name in use on this machine.
    pub fn list(&self) -> Result<Vec<String>, ReviewError> {
        let out = self.run([OsStr::new("--list")])?;
        Ok(non_empty_lines(&out.stdout).collect())
    }

    /// Strip `name` from every file that has it. Returns the file count.
    pub fn remove_everywhere(&self, name: &str) -> Result<u64, ReviewError> {
        let paths = self.find(name)?;
        for path in &paths {
            self.remove(name, path)?;
        }
        info!("Removed tag '{name}' from {} files", paths.len());
        Ok(paths.len() as u64)
    }

    /// Remove every tag whose name starts with `sweep`. Returns the number
    /// of distinct tags cleared.
    pub fn clear_sweep_tags(&self) -> Result<u64, ReviewError> {
        let tags: Vec<String> = self
            .list()?
            .into_iter()
            .filter(|t| t.starts_with(SWEEP_PREFIX))
            .collect();
        for tag in &tags {
            self.remove_everywhere(tag)?;
        }
        Ok(tags.len() as u64)
    }

    fn run<'a>(&self, args: impl IntoIterator<Item = &'a OsStr>) -> Result<Output, ReviewError> {
        let args: Vec<&OsStr> = args.into_iter().collect();
        let command = format!(
            "{} {}",
            self.program.to_string_lossy(),
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );
        let out = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => ReviewError::TagToolMissing,
                _ => ReviewError::io(format!("cannot run `{command}`"), e),
            })?;
        if !out.status.success() {
            return Err(ReviewError::CommandFailed {
                command,
                detail: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            });
        }
        Ok(out)
    }
}

fn non_empty_lines(bytes: &[u8]) -> impl Iterator<Item = String> + '_ {
    bytes
        .split(|b| *b == b'\n')
        .map(|line| String::from_utf8_lossy(line).trim_end_matches('\r').to_string())
        .filter(|line| !line.is_empty())
}

/// Adds one Finder tag to each marked file.
#[derive(Debug, Clone)]
pub struct FinderTag {
    name: String,
    tool: TagTool,
}

impl FinderTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_tool(name, TagTool::default())
    }

    pub fn with_tool(name: impl Into<String>, tool: TagTool) -> Self {
        Self {
            name: name.into(),
            tool,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Marker for FinderTag {
    fn describe(&self) -> String {
        format!("tag '{}'", self.name)
    }

    fn prepare(&mut self) -> Result<(), ReviewError> {
        if self.tool.is_installed() {
            Ok(())
        } else {
            Err(ReviewError::TagToolMissing)
        }
    }

    fn mark(&mut self, entry: &FileEntry) -> Result<(), ReviewError> {
        self.tool.add(&self.name, &entry.path)
    }
}
