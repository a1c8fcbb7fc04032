/// Data model for sweep results.
///
/// Re-exports the matched-file record, the closed category set, and the
/// size parsing/formatting helpers.
pub mod category;
pub mod entry;
pub mod size;

pub use category::{Category, UnknownCategory};
pub use entry::FileEntry;
