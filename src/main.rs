// src/main.rs
mod extractors;
mod mapping;
mod source;
mod storage;
mod utils;

use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use extractors::{ExtractorConfig, ReservoirExtractor};
use source::{FilePageSource, HttpPageSource, PageSource, ScrapeOutcome};
use storage::StorageManager;
use utils::AppError;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Every extracted field of every reservoir
    Full,
    /// id, name, current volume and measurement date only
    Update,
}

/// Extracts reservoir levels from the Andalusian water authority status table
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address of the reservoir status page
    #[arg(short, long, env = "EMBALSES_URL", default_value = source::client::DEFAULT_SOURCE_URL)]
    url: String,

    /// Read a saved copy of the page instead of downloading it
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output directory for extracted data
    #[arg(short, long, default_value = "./output")]
    output_dir: String,

    /// Name of the JSON file written into the output directory
    #[arg(long, default_value = storage::DEFAULT_FILE_NAME)]
    file_name: String,

    /// Shape of the written records
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Full)]
    format: OutputFormat,

    /// Measurement date stamped on update records (YYYY-MM-DD, default today)
    #[arg(long)]
    measure_date: Option<String>,

    /// Remove the output directory's contents before writing
    #[arg(long)]
    clean: bool,

    /// Extra wide-header text that marks a banner row, not a province (repeatable)
    #[arg(long = "exclude-banner")]
    exclude_banners: Vec<String>,

    /// CSS selector for the table body rows
    #[arg(long, default_value = extractors::table::DEFAULT_ROW_SELECTOR)]
    row_selector: String,

    /// CSS selector for a row's wide header cell
    #[arg(long, default_value = extractors::table::DEFAULT_HEADER_SELECTOR)]
    header_selector: String,

    /// CSS selector for a row's ordinary cells
    #[arg(long, default_value = extractors::table::DEFAULT_CELL_SELECTOR)]
    cell_selector: String,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Debug mode - save the raw page and a row classification report
    #[arg(short, long)]
    debug: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn extractor_config(&self) -> ExtractorConfig {
        ExtractorConfig {
            row_selector: self.row_selector.clone(),
            header_selector: self.header_selector.clone(),
            cell_selector: self.cell_selector.clone(),
            extra_banners: self.exclude_banners.clone(),
        }
    }

    fn measurement_date(&self) -> Result<NaiveDate, AppError> {
        match &self.measure_date {
            Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|e| {
                AppError::Config(format!("Invalid --measure-date '{}': {}", text, e))
            }),
            None => Ok(chrono::Local::now().date_naive()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Parse CLI Arguments
    let args = Args::parse();

    // 2. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging(args.verbose);
    tracing::info!("Starting processing for args: {:?}", args);

    // 3. Validate configuration before touching the network
    let extractor = ReservoirExtractor::with_config(&args.extractor_config())?;
    let measured_on = args.measurement_date()?;

    // 4. Initialize storage
    let storage = if args.clean {
        StorageManager::new_clean(&args.output_dir)?
    } else {
        StorageManager::new(&args.output_dir)?
    };

    // 5. Fetch and extract
    let (outcome, location) = match &args.input {
        Some(path) => {
            let page_source = FilePageSource::new(path);
            (source::scrape(&page_source, &extractor).await?, page_source.location())
        }
        None => {
            let page_source = HttpPageSource::new(&args.url, Duration::from_secs(args.timeout_secs))?;
            (source::scrape(&page_source, &extractor).await?, page_source.location())
        }
    };

    if args.debug {
        save_debug(&args, &extractor, &outcome);
    }

    // 6. Persist
    let data_path = match args.format {
        OutputFormat::Full => storage.save_json(&args.file_name, &outcome.records)?,
        OutputFormat::Update => {
            let updates = mapping::to_updates(&outcome.records, measured_on);
            storage.save_json(&args.file_name, &updates)?
        }
    };
    tracing::info!("Data saved to {}", data_path.display());

    match storage.save_run_metadata(&args.file_name, &location, &outcome.summary) {
        Ok(path) => tracing::info!("Saved run metadata to: {}", path.display()),
        Err(e) => tracing::error!("Failed to save run metadata: {}", e),
    }

    tracing::info!(
        "Processing finished. Records: {}, rejected rows: {}",
        outcome.summary.records,
        outcome.summary.rejected_rows
    );

    Ok(())
}

fn save_debug(args: &Args, extractor: &ReservoirExtractor, outcome: &ScrapeOutcome) {
    let debug_dir = PathBuf::from(&args.output_dir).join("debug");
    let rows = extractor.reader().read_rows(&outcome.page);
    if let Err(e) =
        utils::html_debug::save_debug_snapshot(&debug_dir, &outcome.page, &rows, extractor.classifier())
    {
        tracing::warn!("Failed to save debug snapshot: {}", e);
    }
}
