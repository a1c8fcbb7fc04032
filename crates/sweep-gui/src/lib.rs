/// Sweep GUI: egui review window for a list of matched files.
///
/// Business logic lives in `sweep-core`; this crate only presents a result
/// set and lets the user act on it. The only destructive action is moving
/// files to the system Trash.
pub mod app;
pub mod platform;
pub mod state;
pub mod theme;
pub mod widgets;

pub use app::{run_review, ReviewApp};
pub use state::ReviewState;
