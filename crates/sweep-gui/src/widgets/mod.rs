/// UI widgets for the review window.

pub mod file_table;
pub mod status_bar;
pub mod toolbar;
