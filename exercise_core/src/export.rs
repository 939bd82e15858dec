//! CSV export of stored exercises.

use crate::{ExerciseRecord, Result};
use std::fs::File;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    id: String,
    name: &'a str,
    reps: u32,
    #[serde(serialize_with = "crate::types::serialize_weight")]
    weight: f64,
    unit: &'static str,
    date: &'a str,
}

impl<'a> From<&'a ExerciseRecord> for CsvRow<'a> {
    fn from(record: &'a ExerciseRecord) -> Self {
        CsvRow {
            id: record.id.to_string(),
            name: &record.name,
            reps: record.reps,
            weight: record.weight,
            unit: record.unit.as_str(),
            date: record.date.as_str(),
        }
    }
}

/// Write `records` to a fresh CSV file at `csv_path`, replacing any existing
/// file. Returns the number of rows written.
///
/// The header is always written, even for an empty export.
pub fn write_csv(records: &[ExerciseRecord], csv_path: &Path) -> Result<usize> {
    if let Some(parent) = csv_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(csv_path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    writer.write_record(["id", "name", "reps", "weight", "unit", "date"])?;
    for record in records {
        writer.serialize(CsvRow::from(record))?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!("Exported {} exercises to {:?}", records.len(), csv_path);
    Ok(records.len())
}
