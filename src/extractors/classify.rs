// src/extractors/classify.rs
use crate::extractors::table::TableRow;

/// Wide-header texts that are banners rather than province names: the
/// current-date banner, the totals banner and the basin-code banner.
pub const DEFAULT_EXCLUDED_BANNERS: &[&str] = &["Fecha Actual", "TOTAL", "D.H."];

// Literal placeholder left behind when the page double-encodes a blank header
const ENCODED_NBSP: &str = "&nbsp";

/// A genuine reservoir row carries at least this many ordinary cells.
pub const MIN_DATA_CELLS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    /// Starts a new section with the given name.
    SectionHeader(String),
    Data,
    Skip,
}

#[derive(Debug, Clone)]
pub struct RowClassifier {
    excluded_banners: Vec<String>,
    min_data_cells: usize,
}

impl Default for RowClassifier {
    fn default() -> Self {
        Self {
            excluded_banners: DEFAULT_EXCLUDED_BANNERS.iter().map(|s| s.to_string()).collect(),
            min_data_cells: MIN_DATA_CELLS,
        }
    }
}

impl RowClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds banner phrases on top of the default exclusion set.
    pub fn with_excluded_banners<I, S>(mut self, banners: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_banners.extend(
            banners
                .into_iter()
                .map(Into::into)
                .filter(|b: &String| !b.trim().is_empty()),
        );
        self
    }

    /// Classifies one row by shape alone. The header check runs first: a
    /// province header opens a section even when the row carries cells, and
    /// a banner header skips the row however many cells it has.
    pub fn classify(&self, row: &TableRow) -> RowKind {
        match self.wide_header(row) {
            WideHeader::Section(name) => RowKind::SectionHeader(name),
            WideHeader::Banner => RowKind::Skip,
            WideHeader::Absent if row.cells.len() >= self.min_data_cells => RowKind::Data,
            WideHeader::Absent => RowKind::Skip,
        }
    }

    fn wide_header(&self, row: &TableRow) -> WideHeader {
        let Some(text) = row.header.as_deref().map(str::trim) else {
            return WideHeader::Absent;
        };
        if text.is_empty() {
            return WideHeader::Absent;
        }
        if text == ENCODED_NBSP {
            return WideHeader::Banner;
        }
        if let Some(banner) = self.excluded_banners.iter().find(|b| text.contains(b.as_str())) {
            tracing::trace!("Wide header '{}' is a '{}' banner, not a section", text, banner);
            return WideHeader::Banner;
        }
        WideHeader::Section(text.to_string())
    }
}

enum WideHeader {
    Absent,
    Banner,
    Section(String),
}
