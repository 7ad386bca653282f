// src/source/mod.rs
//! Where the raw page comes from, and the fetch-then-extract run.
pub mod client;

use std::path::PathBuf;
use std::time::Duration;

use crate::extractors::record::ReservoirRecord;
use crate::extractors::{Extraction, ExtractionSummary, ReservoirExtractor};
use crate::utils::error::FetchError;

/// Supplies the raw status page text.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    /// Human-readable origin of the page, recorded in run metadata.
    fn location(&self) -> String;

    async fn fetch_page(&self) -> Result<String, FetchError>;
}

/// Fetches the page over HTTP.
pub struct HttpPageSource {
    client: reqwest::Client,
    url: String,
}

impl HttpPageSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self {
            client: client::build_client(timeout)?,
            url: url.into(),
        })
    }
}

impl PageSource for HttpPageSource {
    fn location(&self) -> String {
        self.url.clone()
    }

    async fn fetch_page(&self) -> Result<String, FetchError> {
        client::download_page(&self.client, &self.url).await
    }
}

/// Reads a previously saved copy of the page from disk.
pub struct FilePageSource {
    path: PathBuf,
}

impl FilePageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PageSource for FilePageSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch_page(&self) -> Result<String, FetchError> {
        tracing::info!("Reading page from file: {}", self.path.display());
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| FetchError::LocalFile {
                path: self.path.display().to_string(),
                source,
            })
    }
}

/// Output of one fetch-and-extract run.
#[derive(Debug)]
pub struct ScrapeOutcome {
    pub page: String,
    pub records: Vec<ReservoirRecord>,
    pub summary: ExtractionSummary,
}

/// Fetches the page from `source` and extracts its records. Only the
/// fetch can fail; a page without reservoir rows is an empty outcome.
pub async fn scrape<S: PageSource>(
    source: &S,
    extractor: &ReservoirExtractor,
) -> Result<ScrapeOutcome, FetchError> {
    let page = source.fetch_page().await?;
    tracing::info!("Fetched page from {} ({} bytes)", source.location(), page.len());

    let Extraction { records, summary } = extractor.extract(&page);
    Ok(ScrapeOutcome { page, records, summary })
}
