#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::path::Path;

use sha2::Digest;
use tracing::debug;

use moodsync_model::{FieldValue, RawRow, RowId};

use crate::IngestError;

/// Options for reading one source export.
#[derive(Debug, Clone)]
pub struct CsvSourceOptions {
    /// Stable source identifier for RowId derivation (e.g. the export path).
    pub source_id: String,
}

impl CsvSourceOptions {
    pub fn new(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
        }
    }
}

fn derive_row_id(source_id: &str, record_number: u64) -> RowId {
    // Deterministic: sha256("<source_id>\0<record_number>") and take first 16 bytes.
    let mut hasher = sha2::Sha256::new();
    hasher.update(source_id.as_bytes());
    hasher.update([0u8]);
    hasher.update(record_number.to_string().as_bytes());
    let digest: [u8; 32] = hasher.finalize().into();
    RowId::from_first_16_bytes_of_sha256(digest)
}

/// Read a mood diary export into an ordered sequence of raw rows.
///
/// Cells are trimmed; blank cells become `FieldValue::Missing`. All other
/// cells stay text, since numeric coercion is the normalizer's job: a value
/// like `"7.5"` survives here exactly as exported.
pub fn read_mood_csv(csv_path: &Path, options: CsvSourceOptions) -> Result<Vec<RawRow>, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(csv_path)?;
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        let record_number = (idx as u64) + 1;

        let mut cells: BTreeMap<String, FieldValue> = BTreeMap::new();
        for (header, value) in headers.iter().zip(record.iter()) {
            let value = value.trim();
            let cell = if value.is_empty() {
                FieldValue::Missing
            } else {
                FieldValue::Text(value.to_string())
            };
            cells.insert(header.to_string(), cell);
        }

        rows.push(RawRow::new(
            derive_row_id(&options.source_id, record_number),
            cells,
        ));
    }

    debug!(
        source = %csv_path.display(),
        row_count = rows.len(),
        column_count = headers.len(),
        "read source export"
    );
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_id_is_deterministic() {
        let a = derive_row_id("exports/mood.csv", 1);
        let b = derive_row_id("exports/mood.csv", 1);
        let c = derive_row_id("exports/mood.csv", 2);
        let d = derive_row_id("exports/other.csv", 1);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn blank_cells_become_missing() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("mood.csv");
        std::fs::write(
            &csv_path,
            "Date,Mood,Sleep\n2024 Fri Jul 05 08:30 AM,Calm;Content,\n",
        )
        .unwrap();

        let rows = read_mood_csv(&csv_path, CsvSourceOptions::new("mood.csv")).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].get("Mood").as_str(),
            Some("Calm;Content"),
            "text cell survives verbatim"
        );
        assert!(rows[0].get("Sleep").is_missing());
    }

    #[test]
    fn rows_keep_source_order() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("mood.csv");
        std::fs::write(&csv_path, "Notes\nfirst\nsecond\nthird\n").unwrap();

        let rows = read_mood_csv(&csv_path, CsvSourceOptions::new("mood.csv")).unwrap();

        let notes: Vec<_> = rows
            .iter()
            .map(|row| row.get("Notes").as_str().unwrap().to_string())
            .collect();
        assert_eq!(notes, vec!["first", "second", "third"]);
    }
}
