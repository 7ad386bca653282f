// src/extractors/mod.rs
pub mod classify;
pub mod grouper;
pub mod numeric;
pub mod record;
pub mod table;

use crate::utils::error::ExtractError;
use classify::RowClassifier;
use grouper::{group_rows, GroupingStats};
use record::{build_record, ReservoirRecord};
use table::{HtmlTableReader, TableRow, DEFAULT_CELL_SELECTOR, DEFAULT_HEADER_SELECTOR, DEFAULT_ROW_SELECTOR};

/// Settings for [`ReservoirExtractor`], normally filled from the CLI.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    pub row_selector: String,
    pub header_selector: String,
    pub cell_selector: String,
    /// Banner phrases excluded in addition to the built-in set.
    pub extra_banners: Vec<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            row_selector: DEFAULT_ROW_SELECTOR.to_string(),
            header_selector: DEFAULT_HEADER_SELECTOR.to_string(),
            cell_selector: DEFAULT_CELL_SELECTOR.to_string(),
            extra_banners: Vec::new(),
        }
    }
}

/// Records of one page plus what the pass saw while building them.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub records: Vec<ReservoirRecord>,
    pub summary: ExtractionSummary,
}

/// What one extraction pass saw, for logging and run metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    pub rows_seen: usize,
    pub section_headers: usize,
    pub data_rows: usize,
    pub skipped_rows: usize,
    pub orphan_rows: usize,
    pub rejected_rows: usize,
    pub records: usize,
    /// Record count per section occurrence, in first-seen order.
    pub sections: Vec<(String, usize)>,
}

impl ExtractionSummary {
    fn from_stats(stats: GroupingStats) -> Self {
        Self {
            rows_seen: stats.rows_seen,
            section_headers: stats.section_headers,
            data_rows: stats.data_rows,
            skipped_rows: stats.skipped_rows,
            orphan_rows: stats.orphan_rows,
            ..Self::default()
        }
    }
}

/// Turns the reservoir status page into a flat list of records.
///
/// Holds no per-run state, so one extractor can serve any number of
/// documents, concurrently or not.
#[derive(Debug, Clone, Default)]
pub struct ReservoirExtractor {
    reader: HtmlTableReader,
    classifier: RowClassifier,
}

impl ReservoirExtractor {
    pub fn with_config(config: &ExtractorConfig) -> Result<Self, ExtractError> {
        let reader = HtmlTableReader::with_selectors(
            &config.row_selector,
            &config.header_selector,
            &config.cell_selector,
        )?;
        let classifier = RowClassifier::new().with_excluded_banners(config.extra_banners.iter().cloned());
        Ok(Self { reader, classifier })
    }

    pub fn classifier(&self) -> &RowClassifier {
        &self.classifier
    }

    pub fn reader(&self) -> &HtmlTableReader {
        &self.reader
    }

    /// Extracts all records from `html_content`. A page without the
    /// expected table yields no records.
    pub fn extract(&self, html_content: &str) -> Extraction {
        let rows = self.reader.read_rows(html_content);
        self.extract_rows(rows)
    }

    /// Runs classification, grouping and record building over rows that
    /// have already been read out of a document.
    fn extract_rows<I>(&self, rows: I) -> Extraction
    where
        I: IntoIterator<Item = TableRow>,
    {
        let (sections, stats) = group_rows(rows, &self.classifier);
        let mut summary = ExtractionSummary::from_stats(stats);
        let mut records = Vec::with_capacity(stats.data_rows);

        for section in &sections {
            let before = records.len();
            for row in &section.rows {
                match build_record(row, &section.name) {
                    Some(record) => records.push(record),
                    None => summary.rejected_rows += 1,
                }
            }
            let built = records.len() - before;
            tracing::debug!("Section '{}': {} records", section.name, built);
            summary.sections.push((section.name.clone(), built));
        }

        summary.records = records.len();
        if records.is_empty() {
            tracing::warn!("No reservoir records found ({} rows scanned)", summary.rows_seen);
        } else {
            tracing::info!(
                "Extracted {} records from {} sections ({} rejected, {} before any section)",
                summary.records,
                summary.sections.len(),
                summary.rejected_rows,
                summary.orphan_rows
            );
        }

        Extraction { records, summary }
    }
}
