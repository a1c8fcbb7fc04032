/// CSV export, one row per entry.
use crate::error::ExportError;
use crate::model::FileEntry;
use chrono::SecondsFormat;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const HEADER: [&str; 4] = ["path", "size", "modified", "category"];

/// Write the header row and one row per entry, in the given order.
pub fn write_csv<W: Write>(entries: &[FileEntry], writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;
    for entry in entries {
        wtr.write_record([
            entry.path.to_string_lossy().as_ref(),
            entry.size.to_string().as_str(),
            entry
                .modified
                .to_rfc3339_opts(SecondsFormat::AutoSi, false)
                .as_str(),
            entry.category.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_csv_file(entries: &[FileEntry], path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_csv(entries, file)
}
