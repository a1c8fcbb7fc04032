/// Orchestration: CLI arguments in, scan, mark, report.
use crate::cli::{Cli, MarkMode, OutputFormat};
use crate::summary::{render_stats, render_summary};
use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use sweep_core::analysis::rank;
use sweep_core::model::size::parse_size;
use sweep_core::report::{write_csv, write_csv_file, ScanReport};
use sweep_core::review::{
    clear_sweep_links, mark_for_review, remove_link_folder, Apply, FinderTag, HardlinkMirror,
    ReviewOutcome, TagTool,
};
use sweep_core::scanner::{scan, ScanOptions};
use sweep_core::{FileEntry, ReviewError, ScanConfig};
use tracing::debug;

/// Exit status when the `tag` tool is needed but not installed.
pub const EXIT_TAG_MISSING: u8 = 3;

pub fn run(cli: &Cli) -> Result<()> {
    let out = Output::new(cli);

    if run_utility(cli, &out)? {
        return Ok(());
    }

    if cli.mark == MarkMode::Tag && !cli.dry_run && !TagTool::default().is_installed() {
        return Err(ReviewError::TagToolMissing.into());
    }

    let config = build_config(cli)?;
    let options = ScanOptions {
        use_index: !cli.no_index && ScanOptions::default().use_index,
        index_timeout: Duration::from_secs(cli.index_timeout),
        cancel: None,
    };
    debug!("{config:?} {options:?}");

    let outcome = scan(&config, &options)?;
    if cli.verbose {
        out.notice(&render_stats(&outcome.stats, outcome.tier, outcome.duration));
    }
    let entries = rank(outcome.entries, config.limit());

    let apply = Apply::from_dry_run(cli.dry_run);
    let marked = mark(cli, &entries, apply, &out)?;

    if let Some(path) = &cli.json {
        ScanReport::new(&config, &entries, marked)
            .write_file(path)
            .with_context(|| format!("writing JSON report to {}", path.display()))?;
        out.notice(&format!("JSON output written to {}", path.display()));
    }
    if let Some(path) = &cli.csv {
        write_csv_file(&entries, path)
            .with_context(|| format!("writing CSV report to {}", path.display()))?;
        out.notice(&format!("CSV output written to {}", path.display()));
    }

    match cli.format {
        OutputFormat::Summary => out.notice(&render_summary(&entries)),
        OutputFormat::Json => ScanReport::new(&config, &entries, marked)
            .write_to(io::stdout().lock())
            .context("writing JSON to stdout")?,
        OutputFormat::Csv => write_csv(&entries, io::stdout().lock()).context("writing CSV to stdout")?,
    }

    if cli.mark == MarkMode::Gui {
        review_in_window(entries, cli.dry_run, &out)?;
    }
    Ok(())
}

/// Handle `--untag`, `--clear-all-tags`, `--unlink`, `--clear-all-links`.
/// Returns `true` if one ran.
fn run_utility(cli: &Cli, out: &Output) -> Result<bool> {
    if let Some(name) = &cli.untag {
        let tool = installed_tag_tool()?;
        let count = tool.remove_everywhere(name)?;
        out.notice(&format!("Removed tag '{name}' from {count} files"));
    } else if cli.clear_all_tags {
        let tool = installed_tag_tool()?;
        let count = tool.clear_sweep_tags()?;
        out.notice(&format!("Removed {count} sweep tags"));
    } else if let Some(name) = &cli.unlink {
        let base = link_base(cli)?;
        let count = remove_link_folder(&base, name)?;
        out.notice(&format!("Removed {count} links from {}", base.join(name).display()));
    } else if cli.clear_all_links {
        let base = link_base(cli)?;
        let count = clear_sweep_links(&base)?;
        out.notice(&format!("Removed {count} links from sweep folders in {}", base.display()));
    } else {
        return Ok(false);
    }
    Ok(true)
}

fn installed_tag_tool() -> Result<TagTool, ReviewError> {
    let tool = TagTool::default();
    if tool.is_installed() {
        Ok(tool)
    } else {
        Err(ReviewError::TagToolMissing)
    }
}

fn build_config(cli: &Cli) -> Result<ScanConfig> {
    let root = match &cli.path {
        Some(path) => expand_home(path)?,
        None => home_dir()?,
    };
    let min_size = match &cli.min_size {
        Some(text) => parse_size(text)?,
        None => 0,
    };
    let limit = cli.limit.map(|n| usize::try_from(n).unwrap_or(usize::MAX));

    let config = ScanConfig::builder(root)
        .min_size(min_size)
        .older_than_days(cli.older_than)
        .category(cli.category)
        .exclude(cli.exclude.iter().cloned())
        .exclude([review_folder(cli)?])
        .limit(limit)
        .build()?;
    Ok(config)
}

/// The hardlink review folder. Its contents are links to files elsewhere in
/// the tree, so it is always pruned from the scan.
fn review_folder(cli: &Cli) -> Result<PathBuf> {
    Ok(link_base(cli)?.join(&cli.link_folder))
}

/// Apply the selected mark action and report what it did.
fn mark(cli: &Cli, entries: &[FileEntry], apply: Apply, out: &Output) -> Result<u64> {
    let prefix = if apply.is_dry_run() { "[DRY RUN] Would " } else { "" };
    match cli.mark {
        MarkMode::None => Ok(0),
        // Listing in the window counts as marking; the window opens last.
        MarkMode::Gui => Ok(entries.len() as u64),
        MarkMode::Tag => {
            let mut marker = FinderTag::new(cli.tag.as_str());
            let outcome = mark_for_review(entries, &mut marker, apply)?;
            let verb = if apply.is_dry_run() { "tag" } else { "Tagged" };
            out.notice(&format!(
                "{prefix}{verb} {} files with '{}'{}",
                outcome.marked,
                marker.name(),
                failures(&outcome)
            ));
            if !apply.is_dry_run() && outcome.marked > 0 {
                out.notice("Open the Finder sidebar to review tagged files.");
            }
            Ok(outcome.marked)
        }
        MarkMode::Link => {
            let mut marker = HardlinkMirror::new(link_base(cli)?, &cli.link_folder);
            let outcome = mark_for_review(entries, &mut marker, apply)?;
            let verb = if apply.is_dry_run() { "link" } else { "Linked" };
            out.notice(&format!(
                "{prefix}{verb} {} files into {}{}",
                outcome.marked,
                marker.dir().display(),
                failures(&outcome)
            ));
            Ok(outcome.marked)
        }
    }
}

fn failures(outcome: &ReviewOutcome) -> String {
    if outcome.failed == 0 {
        String::new()
    } else {
        format!(" ({} failed)", outcome.failed)
    }
}

fn review_in_window(entries: Vec<FileEntry>, dry_run: bool, out: &Output) -> Result<()> {
    if dry_run {
        out.notice(&format!("[DRY RUN] Would open {} files for review", entries.len()));
        return Ok(());
    }
    if entries.is_empty() {
        out.notice("Nothing to review.");
        return Ok(());
    }
    sweep_gui::run_review(entries).context("review window failed")
}

fn link_base(cli: &Cli) -> Result<PathBuf> {
    match &cli.link_dir {
        Some(dir) => expand_home(dir),
        None => home_dir(),
    }
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().context("cannot determine the home directory")
}

/// Expand a leading `~` the way a shell would.
fn expand_home(path: &Path) -> Result<PathBuf> {
    match path.strip_prefix("~") {
        Ok(rest) => Ok(home_dir()?.join(rest)),
        Err(_) => Ok(path.to_path_buf()),
    }
}

/// Where human-facing messages go.
///
/// Notices go to stdout unless stdout carries a JSON or CSV document, in
/// which case they move to stderr. `--quiet` silences them entirely.
struct Output {
    quiet: bool,
    to_stderr: bool,
}

impl Output {
    fn new(cli: &Cli) -> Self {
        Self {
            quiet: cli.quiet,
            to_stderr: cli.format != OutputFormat::Summary,
        }
    }

    fn notice(&self, text: &str) {
        if self.quiet {
            return;
        }
        let text = text.trim_end_matches('\n');
        if self.to_stderr {
            let _ = writeln!(io::stderr().lock(), "{text}");
        } else {
            let _ = writeln!(io::stdout().lock(), "{text}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_expands_to_home() {
        let home = dirs::home_dir().unwrap();
        assert_eq!(expand_home(Path::new("~/Downloads")).unwrap(), home.join("Downloads"));
        assert_eq!(expand_home(Path::new("~")).unwrap(), home);
        assert_eq!(expand_home(Path::new("/tmp/x")).unwrap(), PathBuf::from("/tmp/x"));
    }

    #[test]
    fn bad_size_is_an_error_before_scanning() {
        let cli = <Cli as clap::Parser>::parse_from(["sweep", "--path", "/", "--min-size", "12X"]);
        let err = build_config(&cli).unwrap_err();
        assert!(err.to_string().contains("invalid size format"), "got {err}");
    }
}
