// src/extractors/table.rs

// --- Imports ---
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

// --- Default Selectors ---
pub const DEFAULT_ROW_SELECTOR: &str = "table tbody tr";
pub const DEFAULT_HEADER_SELECTOR: &str = r#"th[colspan="2"]"#;
pub const DEFAULT_CELL_SELECTOR: &str = "td";

static ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(DEFAULT_ROW_SELECTOR).expect("Failed to compile ROW_SELECTOR")
});

// Wide (two-column) header cell used by province banners and other banners alike
static HEADER_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(DEFAULT_HEADER_SELECTOR).expect("Failed to compile HEADER_SELECTOR")
});

static CELL_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(DEFAULT_CELL_SELECTOR).expect("Failed to compile CELL_SELECTOR")
});

// --- Data Structures ---

/// One table row reduced to what the extractor needs: the wide header
/// text (if the row carries one) and the ordinary cell texts in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    pub header: Option<String>,
    pub cells: Vec<String>,
}

// Row builders for unit tests; production rows come from `HtmlTableReader`.
#[cfg(test)]
impl TableRow {
    pub fn new(header: Option<String>, cells: Vec<String>) -> Self {
        Self { header, cells }
    }

    /// A row with only a wide header cell.
    pub fn header(text: impl Into<String>) -> Self {
        Self {
            header: Some(text.into()),
            cells: Vec::new(),
        }
    }

    /// A row with only ordinary cells.
    pub fn cells<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: None,
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }
}

/// Reads [`TableRow`]s out of an HTML document with `scraper`.
///
/// Everything HTML-specific lives here; classification, grouping and
/// record building only ever see `TableRow`.
#[derive(Debug, Clone)]
pub struct HtmlTableReader {
    row_selector: Selector,
    header_selector: Selector,
    cell_selector: Selector,
}

impl Default for HtmlTableReader {
    fn default() -> Self {
        Self {
            row_selector: ROW_SELECTOR.clone(),
            header_selector: HEADER_SELECTOR.clone(),
            cell_selector: CELL_SELECTOR.clone(),
        }
    }
}

impl HtmlTableReader {
    /// Builds a reader from caller-supplied selectors. An unparseable
    /// selector is a configuration mistake and is reported, not ignored.
    pub fn with_selectors(row: &str, header: &str, cell: &str) -> Result<Self, ExtractError> {
        Ok(Self {
            row_selector: parse_selector("row", row)?,
            header_selector: parse_selector("header", header)?,
            cell_selector: parse_selector("cell", cell)?,
        })
    }

    /// Parses `html_content` and returns its body rows in document order.
    pub fn read_rows(&self, html_content: &str) -> Vec<TableRow> {
        let document = Html::parse_document(html_content);
        self.rows_from_document(&document)
    }

    pub fn rows_from_document(&self, document: &Html) -> Vec<TableRow> {
        let rows: Vec<TableRow> = document
            .select(&self.row_selector)
            .map(|row| self.table_row(row))
            .collect();
        tracing::debug!("Found {} table body rows", rows.len());
        rows
    }

    fn table_row(&self, row: ElementRef) -> TableRow {
        let header: String = row
            .select(&self.header_selector)
            .map(|th| element_text(th))
            .collect();
        let header = header.trim().to_string();

        let cells = row
            .select(&self.cell_selector)
            .map(|td| element_text(td).trim().to_string())
            .collect();

        TableRow {
            header: (!header.is_empty()).then_some(header),
            cells,
        }
    }
}

fn parse_selector(role: &'static str, selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::InvalidSelector {
        role,
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>()
}
