// src/utils/html_debug.rs
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::extractors::classify::{RowClassifier, RowKind};
use crate::extractors::table::TableRow;
use crate::utils::error::AppError;

/// Renders one line per row: index, classification, active section and a
/// short preview of the row's text.
pub fn classification_report(rows: &[TableRow], classifier: &RowClassifier) -> String {
    let mut report = String::new();
    let mut current: Option<String> = None;

    for (index, row) in rows.iter().enumerate() {
        let label = match classifier.classify(row) {
            RowKind::SectionHeader(name) => {
                current = Some(name);
                "HEADER"
            }
            RowKind::Data if current.is_some() => "DATA",
            RowKind::Data => "ORPHAN",
            RowKind::Skip => "SKIP",
        };

        let preview = row
            .header
            .iter()
            .chain(row.cells.iter().take(2))
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" | ");

        // Writing into a String cannot fail
        let _ = writeln!(
            report,
            "{:>4}  {:<6}  [{}]  cells={:<3} {}",
            index,
            label,
            current.as_deref().unwrap_or("-"),
            row.cells.len(),
            preview
        );
    }

    report
}

/// Saves the raw page and its row classification report under `debug_dir`.
pub fn save_debug_snapshot(
    debug_dir: &Path,
    page: &str,
    rows: &[TableRow],
    classifier: &RowClassifier,
) -> Result<PathBuf, AppError> {
    fs::create_dir_all(debug_dir)?;

    let raw_path = debug_dir.join("raw_page.html");
    fs::write(&raw_path, page)?;
    tracing::info!("Saved raw page to {}", raw_path.display());

    let report_path = debug_dir.join("row_classification.txt");
    fs::write(&report_path, classification_report(rows, classifier))?;
    tracing::info!("Saved row classification report to {}", report_path.display());

    Ok(report_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(id: &str) -> TableRow {
        let mut cells = vec![id.to_string(), "EMBALSE".to_string()];
        cells.extend((0..8).map(|i| i.to_string()));
        TableRow::cells(cells)
    }

    #[test]
    fn test_report_labels() {
        let rows = vec![
            data("1"),
            TableRow::header("TOTAL"),
            TableRow::header("CÓRDOBA"),
            data("269"),
        ];
        let report = classification_report(&rows, &RowClassifier::new());
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("ORPHAN") && lines[0].contains("[-]"));
        assert!(lines[1].contains("SKIP"));
        assert!(lines[2].contains("HEADER") && lines[2].contains("[CÓRDOBA]"));
        assert!(lines[3].contains("DATA") && lines[3].contains("269 | EMBALSE"));
    }

    #[test]
    fn test_snapshot_files() {
        let dir = tempfile::tempdir().unwrap();
        let debug_dir = dir.path().join("debug");
        let rows = vec![TableRow::header("JAÉN"), data("90")];

        let report_path = save_debug_snapshot(&debug_dir, "<html></html>", &rows, &RowClassifier::new()).unwrap();

        assert_eq!(fs::read_to_string(debug_dir.join("raw_page.html")).unwrap(), "<html></html>");
        assert!(fs::read_to_string(report_path).unwrap().contains("[JAÉN]"));
    }
}
