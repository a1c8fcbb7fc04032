/// Hand-offs to the desktop: open a file, reveal it in the file manager.
use std::io;
use std::path::Path;
use std::process::Command;
use std::thread::{self, JoinHandle};
use tracing::debug;

/// Open `path` with its default application.
pub fn open_path(path: &Path) -> io::Result<()> {
    let mut cmd = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else {
        Command::new("xdg-open")
    };
    spawn_detached(cmd.arg(path)).map(drop)
}

/// Show `path` selected in Finder / Explorer. Other desktops have no common
/// "select" verb, so the containing folder is opened instead.
pub fn reveal_path(path: &Path) -> io::Result<()> {
    if cfg!(target_os = "macos") {
        spawn_detached(Command::new("open").arg("-R").arg(path)).map(drop)
    } else if cfg!(target_os = "windows") {
        let mut arg = std::ffi::OsString::from("/select,");
        arg.push(path);
        spawn_detached(Command::new("explorer.exe").arg(arg)).map(drop)
    } else {
        let folder = path.parent().unwrap_or(path);
        spawn_detached(Command::new("xdg-open").arg(folder)).map(drop)
    }
}

/// Start `cmd` and reap it on a background thread so no zombie outlives it.
fn spawn_detached(cmd: &mut Command) -> io::Result<JoinHandle<()>> {
    let mut child = cmd.spawn()?;
    thread::Builder::new()
        .name("sweep-desktop-reaper".into())
        .spawn(move || match child.wait() {
            Ok(status) => debug!("Desktop hand-off exited with {status}"),
            Err(e) => debug!("Waiting for desktop hand-off failed: {e}"),
        })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn detached_child_is_reaped() {
        let reaper = spawn_detached(&mut Command::new("true")).unwrap();
        reaper.join().unwrap();
    }

    #[test]
    fn missing_program_is_an_error() {
        let err = spawn_detached(&mut Command::new("/nonexistent/sweep-opener")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
