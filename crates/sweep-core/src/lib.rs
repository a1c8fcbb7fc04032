/// Sweep Core: scanning, classification, and review actions.
///
/// This crate contains all business logic with zero UI dependencies.
/// The `sweep` binary and the `sweep-gui` review window both sit on top of it.
///
/// # Modules
///
/// - [`model`]: `FileEntry`, the closed `Category` set, and size parsing/formatting.
/// - [`config`]: the validated, immutable `ScanConfig`.
/// - [`scanner`]: directory walk, Spotlight index tier, and the shared filter pipeline.
/// - [`analysis`]: the category classifier, result ranking, and per-category totals.
/// - [`report`]: JSON and CSV export of a result set.
/// - [`review`]: "mark for review" actions (Finder tags, hardlink mirror).
pub mod analysis;
pub mod config;
pub mod error;
pub mod model;
pub mod report;
pub mod review;
pub mod scanner;

pub use config::ScanConfig;
pub use error::{ExportError, ReviewError, ScanError, SizeParseError};
pub use model::{Category, FileEntry};
