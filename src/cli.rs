/// Command-line surface for `sweep`.
use clap::{ArgGroup, Parser, ValueEnum};
use std::convert::Infallible;
use std::path::PathBuf;
use sweep_core::Category;

/// Find large, old, and disposable files and mark them for review.
///
/// Nothing is ever deleted by a scan. Matches are tagged in Finder,
/// hardlinked into a review folder, or listed in a review window where you
/// decide what goes to the Trash.
#[derive(Parser, Debug)]
#[command(name = "sweep", version, about, long_about = None)]
#[command(group(ArgGroup::new("utility").args(["untag", "clear_all_tags", "unlink", "clear_all_links"])))]
pub struct Cli {
    // ── Selection ──────────────────────────────────────
    /// Directory to scan [default: your home directory]
    #[arg(long, value_name = "DIR", help_heading = "Selection")]
    pub path: Option<PathBuf>,

    /// Minimum file size, e.g. 500, 100M, 1.5G
    #[arg(long, value_name = "SIZE", help_heading = "Selection")]
    pub min_size: Option<String>,

    /// Only files not modified in at least this many days
    #[arg(long, value_name = "DAYS", help_heading = "Selection")]
    pub older_than: Option<u64>,

    /// Only files in this category
    #[arg(long, value_parser = parse_category, help_heading = "Selection")]
    pub category: Option<Category>,

    /// Comma-separated directories to skip entirely
    #[arg(
        long,
        value_name = "DIRS",
        value_delimiter = ',',
        value_parser = parse_exclude,
        default_values = ["/System", "/Library", "/Applications"],
        help_heading = "Selection"
    )]
    pub exclude: Vec<PathBuf>,

    /// Keep only the N largest matches
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..), help_heading = "Selection")]
    pub limit: Option<u64>,

    // ── Marking ────────────────────────────────────────
    /// How to mark matches for review
    #[arg(long, value_enum, default_value_t = MarkMode::Link, help_heading = "Marking")]
    pub mark: MarkMode,

    /// Finder tag to apply with `--mark tag`
    #[arg(long, value_name = "NAME", default_value = "sweep", help_heading = "Marking")]
    pub tag: String,

    /// Where the review folder is created [default: your home directory]
    #[arg(long, value_name = "DIR", help_heading = "Marking")]
    pub link_dir: Option<PathBuf>,

    /// Name of the review folder for `--mark link`
    #[arg(long, value_name = "NAME", default_value = "sweep", help_heading = "Marking")]
    pub link_folder: String,

    /// Report what would be marked without touching anything
    #[arg(long, help_heading = "Marking")]
    pub dry_run: bool,

    // ── Output ─────────────────────────────────────────
    /// What to print on stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Summary, help_heading = "Output")]
    pub format: OutputFormat,

    /// Also write a JSON report to FILE
    #[arg(long, value_name = "FILE", help_heading = "Output")]
    pub json: Option<PathBuf>,

    /// Also write a CSV report to FILE
    #[arg(long, value_name = "FILE", help_heading = "Output")]
    pub csv: Option<PathBuf>,

    /// Print nothing but errors
    #[arg(short, long, conflicts_with = "verbose", help_heading = "Output")]
    pub quiet: bool,

    /// Debug logging and a scan diagnostics tally
    #[arg(short, long, help_heading = "Output")]
    pub verbose: bool,

    // ── Source ─────────────────────────────────────────
    /// Always walk the directory tree; never ask the search index
    #[arg(long, help_heading = "Source")]
    pub no_index: bool,

    /// Seconds to wait for the search index before walking instead
    #[arg(long, value_name = "SECS", default_value_t = 60, help_heading = "Source")]
    pub index_timeout: u64,

    // ── Utilities (run instead of a scan) ──────────────
    /// Remove tag NAME from every file carrying it
    #[arg(long, value_name = "NAME", help_heading = "Utilities")]
    pub untag: Option<String>,

    /// Remove every tag whose name starts with "sweep"
    #[arg(long, help_heading = "Utilities")]
    pub clear_all_tags: bool,

    /// Delete the review folder NAME under --link-dir
    #[arg(long, value_name = "NAME", help_heading = "Utilities")]
    pub unlink: Option<String>,

    /// Delete every review folder starting with "sweep" under --link-dir
    #[arg(long, help_heading = "Utilities")]
    pub clear_all_links: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkMode {
    /// Add a Finder tag (needs the `tag` tool)
    Tag,
    /// Hardlink matches into a review folder
    Link,
    /// Open the review window
    Gui,
    /// Report only
    None,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
    Csv,
}

fn parse_category(s: &str) -> Result<Category, String> {
    s.parse().map_err(|e| format!("{e}"))
}

fn parse_exclude(s: &str) -> Result<PathBuf, Infallible> {
    Ok(PathBuf::from(s.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["sweep"]);
        assert_eq!(cli.mark, MarkMode::Link);
        assert_eq!(cli.format, OutputFormat::Summary);
        assert_eq!(cli.tag, "sweep");
        assert_eq!(cli.link_folder, "sweep");
        assert_eq!(cli.index_timeout, 60);
        assert_eq!(
            cli.exclude,
            vec![
                PathBuf::from("/System"),
                PathBuf::from("/Library"),
                PathBuf::from("/Applications")
            ]
        );
    }

    #[test]
    fn exclude_list_is_split_and_trimmed() {
        let cli = Cli::parse_from(["sweep", "--exclude", "/a, /b/c"]);
        assert_eq!(cli.exclude, vec![PathBuf::from("/a"), PathBuf::from("/b/c")]);
    }

    #[test]
    fn category_and_limit_are_validated() {
        let cli = Cli::parse_from(["sweep", "--category", "disk_image", "--limit", "5"]);
        assert_eq!(cli.category, Some(Category::DiskImage));
        assert_eq!(cli.limit, Some(5));

        assert!(Cli::try_parse_from(["sweep", "--category", "music"]).is_err());
        assert!(Cli::try_parse_from(["sweep", "--limit", "0"]).is_err());
    }

    #[test]
    fn utilities_are_mutually_exclusive() {
        assert!(Cli::try_parse_from(["sweep", "--untag", "x", "--clear-all-links"]).is_err());
        assert!(Cli::try_parse_from(["sweep", "--quiet", "--verbose"]).is_err());
    }
}
