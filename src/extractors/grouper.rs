// src/extractors/grouper.rs
//! Positional grouping of data rows under the section header that
//! precedes them. The table has no nesting; a header row simply changes
//! which section every following data row belongs to.

use crate::extractors::classify::{RowClassifier, RowKind};
use crate::extractors::table::TableRow;

/// Data rows read while one header occurrence was active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRows {
    pub name: String,
    pub rows: Vec<TableRow>,
}

/// Row counts observed during one grouping pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupingStats {
    pub rows_seen: usize,
    pub section_headers: usize,
    pub data_rows: usize,
    pub skipped_rows: usize,
    /// Data rows dropped because no section header had been seen yet.
    pub orphan_rows: usize,
}

#[derive(Debug, Default)]
struct GroupState {
    current: Option<SectionRows>,
    sections: Vec<SectionRows>,
    stats: GroupingStats,
}

impl GroupState {
    fn step(mut self, kind: RowKind, row: TableRow) -> Self {
        self.stats.rows_seen += 1;
        match kind {
            RowKind::SectionHeader(name) => {
                tracing::debug!("Section '{}' starts at row {}", name, self.stats.rows_seen - 1);
                self.stats.section_headers += 1;
                self.flush();
                self.current = Some(SectionRows { name, rows: Vec::new() });
            }
            RowKind::Data => match self.current.as_mut() {
                Some(section) => {
                    self.stats.data_rows += 1;
                    section.rows.push(row);
                }
                None => {
                    tracing::warn!(
                        "Dropping data row {} found before any section header",
                        self.stats.rows_seen - 1
                    );
                    self.stats.orphan_rows += 1;
                }
            },
            RowKind::Skip => {
                tracing::trace!("Skipping row {}", self.stats.rows_seen - 1);
                self.stats.skipped_rows += 1;
            }
        }
        self
    }

    // Sections that never received a data row are not emitted
    fn flush(&mut self) {
        if let Some(section) = self.current.take() {
            if !section.rows.is_empty() {
                self.sections.push(section);
            }
        }
    }

    fn finish(mut self) -> (Vec<SectionRows>, GroupingStats) {
        self.flush();
        (self.sections, self.stats)
    }
}

/// Groups rows in one pass, returning sections in first-seen order along
/// with pass statistics. A repeated header name opens a new group rather
/// than merging into the earlier one.
pub fn group_rows<I>(rows: I, classifier: &RowClassifier) -> (Vec<SectionRows>, GroupingStats)
where
    I: IntoIterator<Item = TableRow>,
{
    rows.into_iter()
        .fold(GroupState::default(), |state, row| {
            let kind = classifier.classify(&row);
            state.step(kind, row)
        })
        .finish()
}
