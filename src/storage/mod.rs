// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::extractors::ExtractionSummary;
use crate::utils::error::StorageError;

pub const DEFAULT_FILE_NAME: &str = "embalsesAndalucia.json";

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Like [`StorageManager::new`], but removes any previous contents first.
    pub fn new_clean<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref();
        if base_path.exists() {
            tracing::info!("Clearing output directory {}", base_path.display());
            fs::remove_dir_all(base_path).map_err(StorageError::IoError)?;
        }
        Self::new(base_path)
    }

    /// Writes `items` as pretty-printed JSON to `file_name` in the base directory.
    pub fn save_json<T: Serialize>(&self, file_name: &str, items: &[T]) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(file_name);

        let json = serde_json::to_string_pretty(items)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, json).map_err(StorageError::IoError)?;

        tracing::info!("Saved {} entries to {}", items.len(), file_path.display());

        Ok(file_path)
    }

    /// Saves run metadata next to the data file, as `<stem>_meta.json`.
    pub fn save_run_metadata(
        &self,
        data_file_name: &str,
        source: &str,
        summary: &ExtractionSummary,
    ) -> Result<PathBuf, StorageError> {
        let stem = Path::new(data_file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("embalses");
        let file_path = self.base_dir.join(format!("{}_meta.json", stem));

        let sections: Vec<serde_json::Value> = summary
            .sections
            .iter()
            .map(|(name, count)| serde_json::json!({ "section": name, "records": count }))
            .collect();

        let metadata = serde_json::json!({
            "source": source,
            "data_file": data_file_name,
            "record_count": summary.records,
            "rows_seen": summary.rows_seen,
            "section_headers": summary.section_headers,
            "data_rows": summary.data_rows,
            "skipped_rows": summary.skipped_rows,
            "rejected_rows": summary.rejected_rows,
            "orphan_rows": summary.orphan_rows,
            "sections": sections,
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());

        Ok(file_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::ReservoirExtractor;

    const PAGE: &str = r#"<table><tbody>
        <tr><th colspan="2">MÁLAGA</th></tr>
        <tr><td>37</td><td>EMBALSE DE LA VIÑUELA</td><td>47,5</td><td>165</td><td>0</td>
            <td>79,07</td><td>*</td><td>79,2</td><td>0</td><td>60</td><td>ver</td></tr>
    </tbody></table>"#;

    #[test]
    fn test_save_records_json() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path().join("out")).unwrap();
        let records = ReservoirExtractor::default().extract(PAGE).records;

        let path = storage.save_json(DEFAULT_FILE_NAME, &records).unwrap();
        let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(written[0]["id"], 37);
        assert_eq!(written[0]["name"], "EMBALSE DE LA VIÑUELA");
        assert_eq!(written[0]["sectionName"], "MÁLAGA");
        assert_eq!(written[0]["volumeCurrentHm3"], 79.07);
        assert!(written[0]["accumulatedLastWeekMm"].is_null());
    }

    #[test]
    fn test_save_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();
        let summary = ReservoirExtractor::default().extract(PAGE).summary;

        let path = storage
            .save_run_metadata(DEFAULT_FILE_NAME, "https://example.test/embalses", &summary)
            .unwrap();
        assert_eq!(path.file_name().unwrap(), "embalsesAndalucia_meta.json");

        let meta: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(meta["record_count"], 1);
        assert_eq!(meta["sections"][0]["section"], "MÁLAGA");
        assert_eq!(meta["sections"][0]["records"], 1);
        assert_eq!(meta["rows_seen"], 2);
        assert_eq!(meta["section_headers"], 1);
        assert_eq!(meta["data_rows"], 1);
        assert_eq!(meta["skipped_rows"], 0);
        assert_eq!(meta["source"], "https://example.test/embalses");
    }

    #[test]
    fn test_new_clean_removes_old_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("output");
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("stale.json"), "[]").unwrap();

        StorageManager::new_clean(&out).unwrap();
        assert!(out.exists());
        assert!(!out.join("stale.json").exists());
    }

    #[test]
    fn test_empty_list_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();
        let empty: Vec<crate::extractors::record::ReservoirRecord> = Vec::new();
        let path = storage.save_json("empty.json", &empty).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "[]");
    }
}
