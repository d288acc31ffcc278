// src/storage/mod.rs
use crate::record::{ExtractionResult, SectionValue};
use crate::utils::error::StorageError;
use std::fs;
use std::path::{Path, PathBuf};

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::Io)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Saves the extracted record as pretty-printed JSON
    pub fn save_record(
        &self,
        record: &ExtractionResult,
        stem: &str,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(format!("{}_record.json", stem));

        let json = serde_json::to_string_pretty(record)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(&file_path, json).map_err(StorageError::Io)?;

        tracing::info!("Saved record to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves a one-row CSV of the record, with the nested measurement table
    /// flattened into `measurements_<gender>_<trait>` columns
    pub fn save_record_csv(
        &self,
        record: &ExtractionResult,
        stem: &str,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(format!("{}_record.csv", stem));

        let (header, row) = flatten_record(record);
        let csv = format!("{}\n{}\n", header.join(","), row.join(","));
        fs::write(&file_path, csv).map_err(StorageError::Io)?;

        tracing::info!("Saved CSV to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves metadata about the extraction in JSON format
    pub fn save_metadata(
        &self,
        record: &ExtractionResult,
        stem: &str,
        label_count: usize,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(format!("{}_meta.json", stem));

        let metadata = serde_json::json!({
            "input": stem,
            "species_name": record.species_name,
            "label_count": label_count,
            "section_count": record.sections.len(),
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(&file_path, metadata_str).map_err(StorageError::Io)?;

        tracing::info!("Saved metadata to {}", file_path.display());
        Ok(file_path)
    }
}

/// Flattens a record into parallel header/value rows for CSV output.
/// Measurement sections contribute one column per (gender, trait) pair.
fn flatten_record(record: &ExtractionResult) -> (Vec<String>, Vec<String>) {
    let mut header = vec!["species_name".to_string()];
    let mut row = vec![csv_field(record.species_name.as_deref().unwrap_or("N/A"))];

    for (key, value) in &record.sections {
        match value {
            SectionValue::Text(text) => {
                header.push(key.clone());
                row.push(csv_field(text));
            }
            SectionValue::Measurements(table) => {
                for (gender, traits) in table {
                    for (name, range) in traits {
                        header.push(format!("{}_{}_{}", key, gender, name.replace(' ', "_")));
                        row.push(csv_field(range));
                    }
                }
            }
        }
    }

    (header, row)
}

/// Quotes a CSV field when it contains a delimiter, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
