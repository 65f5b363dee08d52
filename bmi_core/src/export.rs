//! CSV export of the profile history.
//!
//! The export is written to a temp file beside the target, synced, then
//! renamed over it, so a reader never sees a half-written CSV.

use crate::history::{read_profiles, ProfileRecord};
use crate::{Error, Result};
use std::path::Path;
use tempfile::NamedTempFile;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    name: String,
    saved_at: String,
    age: u32,
    sex: &'static str,
    weight: f64,
    weight_unit: &'static str,
    height: String,
    height_unit: &'static str,
    bmi: f64,
    category: &'static str,
    bmr: f64,
    water_intake: f64,
    healthy_min: f64,
    healthy_max: f64,
    kg_to_gain: f64,
    kg_to_lose: f64,
}

impl From<&ProfileRecord> for CsvRow {
    fn from(record: &ProfileRecord) -> Self {
        CsvRow {
            name: record.name.clone(),
            saved_at: record.saved_at.to_rfc3339(),
            age: record.age,
            sex: record.sex.as_str(),
            weight: record.weight,
            weight_unit: record.weight_unit.as_str(),
            height: record.height.to_string(),
            height_unit: record.height_unit.as_str(),
            bmi: record.report.bmi,
            category: record.report.category.label(),
            bmr: record.report.bmr,
            water_intake: record.report.water_intake,
            healthy_min: record.report.healthy_range.0,
            healthy_max: record.report.healthy_range.1,
            kg_to_gain: record.report.kg_to_gain,
            kg_to_lose: record.report.kg_to_lose,
        }
    }
}

/// Export the whole history at `history_path` to `csv_path`.
///
/// Returns the number of rows written. An empty or missing history
/// leaves `csv_path` untouched and returns 0.
pub fn history_to_csv(history_path: &Path, csv_path: &Path) -> Result<usize> {
    let profiles = read_profiles(history_path)?;

    if profiles.is_empty() {
        tracing::info!("No profiles in history to export");
        return Ok(0);
    }

    let parent = match csv_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;
    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(true)
            .from_writer(temp.as_file());

        for record in &profiles {
            writer.serialize(CsvRow::from(record))?;
        }
        writer.flush()?;
    }
    temp.as_file().sync_all()?;

    temp.persist(csv_path).map_err(|e| Error::Io(e.error))?;

    tracing::info!("Exported {} profiles to {:?}", profiles.len(), csv_path);
    Ok(profiles.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{JsonlHistory, ProfileSink};
    use crate::metrics::Sex;
    use crate::report::build_report;
    use crate::units::{HeightInput, HeightUnit, WeightUnit};

    fn append_profile(history: &mut JsonlHistory, name: &str, pounds: f64) {
        let height = HeightInput::FeetInches(5, 9.0);
        let report = build_report(pounds, &height, 35, "male", "lb", "ft_in").unwrap();
        let record = ProfileRecord::new(
            name,
            35,
            Sex::Male,
            pounds,
            WeightUnit::Pound,
            height,
            HeightUnit::FeetInches,
            &report,
        );
        history.append(&record).unwrap();
    }

    #[test]
    fn test_export_writes_header_and_rows() {
        let temp_dir = tempfile::tempdir().unwrap();
        let history_path = temp_dir.path().join("profiles.jsonl");
        let csv_path = temp_dir.path().join("out/history.csv");

        let mut history = JsonlHistory::new(&history_path);
        append_profile(&mut history, "sam", 160.0);
        append_profile(&mut history, "kim", 210.0);

        let count = history_to_csv(&history_path, &csv_path).unwrap();
        assert_eq!(count, 2);

        let mut reader = csv::Reader::from_path(&csv_path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[0], "name");
        assert_eq!(&headers[9], "category");

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "sam");
        assert_eq!(&rows[0][6], "5'9\"");
        assert_eq!(&rows[0][9], "Normal weight");
        assert_eq!(&rows[1][9], "Obesity class I");
    }

    #[test]
    fn test_export_replaces_previous_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let history_path = temp_dir.path().join("profiles.jsonl");
        let csv_path = temp_dir.path().join("history.csv");

        std::fs::write(&csv_path, "stale\n").unwrap();

        let mut history = JsonlHistory::new(&history_path);
        append_profile(&mut history, "sam", 160.0);
        history_to_csv(&history_path, &csv_path).unwrap();

        let contents = std::fs::read_to_string(&csv_path).unwrap();
        assert!(!contents.contains("stale"));
        assert_eq!(contents.lines().count(), 2);

        let extras: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "history.csv" && e.file_name() != "profiles.jsonl")
            .collect();
        assert!(extras.is_empty(), "stray files: {:?}", extras);
    }

    #[test]
    fn test_empty_history_exports_nothing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("history.csv");

        let count = history_to_csv(&temp_dir.path().join("missing.jsonl"), &csv_path).unwrap();
        assert_eq!(count, 0);
        assert!(!csv_path.exists());
    }
}
