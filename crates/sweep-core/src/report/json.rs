/// JSON report: scan metadata plus every matched entry.
use crate::analysis::Totals;
use crate::config::ScanConfig;
use crate::error::ExportError;
use crate::model::{Category, FileEntry};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// The filter criteria a report was produced with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criteria {
    pub min_size: u64,
    pub older_than_days: Option<u64>,
    pub category: Option<Category>,
}

impl From<&ScanConfig> for Criteria {
    fn from(config: &ScanConfig) -> Self {
        Self {
            min_size: config.min_size(),
            older_than_days: config.older_than_days(),
            category: config.category(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_files: u64,
    pub total_size: u64,
    /// Entries the review action marked (0 when no action ran). Reports
    /// written before link and window marking existed call this `tagged`.
    #[serde(alias = "tagged")]
    pub marked: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub scan_date: DateTime<Local>,
    pub criteria: Criteria,
    pub summary: ReportSummary,
    pub files: Vec<FileEntry>,
}

impl ScanReport {
    pub fn new(config: &ScanConfig, entries: &[FileEntry], marked: u64) -> Self {
        let totals = Totals::of(entries);
        Self {
            scan_date: Local::now(),
            criteria: Criteria::from(config),
            summary: ReportSummary {
                total_files: totals.file_count,
                total_size: totals.total_size,
                marked,
            },
            files: entries.to_vec(),
        }
    }

    /// Pretty-print the report followed by a newline.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), ExportError> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    pub fn write_file(&self, path: &Path) -> Result<(), ExportError> {
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn entry(path: &str, size: u64, category: Category) -> FileEntry {
        FileEntry::new(PathBuf::from(path), size, Local::now(), category)
    }

    #[test]
    fn report_has_expected_shape() {
        let dir = tempfile::tempdir().unwrap();
        let config = ScanConfig::builder(dir.path())
            .min_size(1024)
            .older_than_days(Some(30))
            .category(Some(Category::Video))
            .build()
            .unwrap();
        let entries = vec![
            entry("/a/movie.mp4", 4096, Category::Video),
            entry("/a/clip.mov", 2048, Category::Video),
        ];

        let report = ScanReport::new(&config, &entries, 2);
        let mut buf = Vec::new();
        report.write_to(&mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert!(value["scan_date"].is_string());
        assert_eq!(value["criteria"]["min_size"], 1024);
        assert_eq!(value["criteria"]["older_than_days"], 30);
        assert_eq!(value["criteria"]["category"], "video");
        assert_eq!(value["summary"]["total_files"], 2);
        assert_eq!(value["summary"]["total_size"], 6144);
        assert_eq!(value["summary"]["marked"], 2);

        let first = &value["files"][0];
        assert_eq!(first["path"], "/a/movie.mp4");
        assert_eq!(first["size"], 4096);
        assert_eq!(first["category"], "video");
        let modified = first["modified"].as_str().unwrap();
        assert!(
            DateTime::parse_from_rfc3339(modified).is_ok(),
            "modified should be RFC 3339, got {modified}"
        );
    }

    #[test]
    fn absent_criteria_serialise_as_null() {
        let dir = tempfile::tempdir().unwrap();
        let config = ScanConfig::builder(dir.path()).build().unwrap();
        let report = ScanReport::new(&config, &[], 0);
        let value = serde_json::to_value(&report).unwrap();

        assert!(value["criteria"]["older_than_days"].is_null());
        assert!(value["criteria"]["category"].is_null());
        assert_eq!(value["files"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn report_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = ScanConfig::builder(dir.path()).build().unwrap();
        let entries = vec![entry("/tmp/a.log", 10, Category::Log)];
        let out = dir.path().join("report.json");

        ScanReport::new(&config, &entries, 0).write_file(&out).unwrap();
        let parsed: ScanReport =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();

        assert_eq!(parsed.files, entries);
        assert_eq!(parsed.summary.total_files, 1);
    }

    #[test]
    fn older_summary_key_tagged_still_reads_as_marked() {
        let summary: ReportSummary =
            serde_json::from_str(r#"{"total_files": 3, "total_size": 900, "tagged": 3}"#).unwrap();
        assert_eq!(summary.marked, 3);

        let written = serde_json::to_value(&summary).unwrap();
        assert_eq!(written["marked"], 3);
        assert!(written.get("tagged").is_none());
    }
}
