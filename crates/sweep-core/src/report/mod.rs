/// Machine-readable exports of a result set.
///
/// Both formats carry the same four fields per entry, in the same order:
/// `path`, `size`, `modified` (RFC 3339), `category`.
pub mod json;
pub mod tabular;

pub use json::{Criteria, ReportSummary, ScanReport};
pub use tabular::{write_csv, write_csv_file};
