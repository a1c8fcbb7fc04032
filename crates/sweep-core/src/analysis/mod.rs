/// Analysis modules: classification and post-scan passes over a result set.

pub mod categories;
pub mod rank;
pub mod summary;

pub use categories::{classify, CACHE_DIR_NAMES, LOG_DIR_NAMES};
pub use rank::{rank, rank_by_size_then_path};
pub use summary::{summarise, CategoryStats, Totals};
