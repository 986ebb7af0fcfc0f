use crate::domain::entities::advertisement::PriceRange;
use crate::domain::entities::capture_run::CaptureRun;
use crate::domain::error::DomainError;
use crate::domain::ports::advertisement_source::AdvertisementSource;
use crate::domain::ports::listing_repository::ListingRepository;
use crate::domain::values::search_filter::SearchFilter;
use crate::infrastructure::export::json_backup::{write_json_backup, RawBackup};
use crate::infrastructure::export::spreadsheet::{write_spreadsheet, SpreadsheetFormat};
use crate::infrastructure::export::timestamped_file_name;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, Clone)]
pub struct CollectOptions {
    pub output_dir: PathBuf,
    /// File name stem; defaults to `<exchange>_p2p`.
    pub prefix: Option<String>,
    pub format: SpreadsheetFormat,
    pub store: bool,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            prefix: None,
            format: SpreadsheetFormat::default(),
            store: true,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CollectReport {
    pub exchange: String,
    pub run_id: Option<String>,
    pub captured_at: DateTime<Utc>,
    pub listings: usize,
    pub skipped: usize,
    pub spreadsheet: PathBuf,
    pub backup: PathBuf,
    pub price_range: Option<PriceRange>,
}

/// Search, export and store one page of advertisements.
pub struct CollectUseCase {
    source: Arc<dyn AdvertisementSource>,
    repo: Arc<dyn ListingRepository>,
}

impl CollectUseCase {
    pub fn new(source: Arc<dyn AdvertisementSource>, repo: Arc<dyn ListingRepository>) -> Self {
        Self { source, repo }
    }

    pub async fn execute(
        &self,
        filter: &SearchFilter,
        options: &CollectOptions,
    ) -> Result<CollectReport, DomainError> {
        let page = self.source.search_page(filter).await?;
        let exchange = self.source.name();
        let captured_at = page
            .records
            .first()
            .map(|r| r.timestamp)
            .unwrap_or_else(Utc::now);

        std::fs::create_dir_all(&options.output_dir).map_err(|e| {
            DomainError::Export(format!("{}: {e}", options.output_dir.display()))
        })?;
        let prefix = options
            .prefix
            .clone()
            .unwrap_or_else(|| format!("{exchange}_p2p"));

        let spreadsheet = options.output_dir.join(timestamped_file_name(
            &prefix,
            options.format.extension(),
            captured_at,
        ));
        write_spreadsheet(&spreadsheet, options.format, &page.records)?;
        info!("Spreadsheet saved to {}", spreadsheet.display());

        let backup = options
            .output_dir
            .join(timestamped_file_name(&prefix, "json", captured_at));
        write_json_backup(&backup, &RawBackup::from_page(exchange, &page, captured_at))?;
        info!("Raw backup saved to {}", backup.display());

        let run_id = if options.store {
            let run = CaptureRun::new(
                exchange,
                &page.query,
                page.records.len(),
                page.skipped,
                captured_at,
            );
            self.repo.save_capture(&run, &page.records).inspect_err(|e| {
                error!(
                    spreadsheet = %spreadsheet.display(),
                    backup = %backup.display(),
                    "Capture exported but not stored: {e}"
                );
            })?;
            info!(run_id = %run.id, listings = run.listing_count, "Capture stored");
            Some(run.id)
        } else {
            None
        };

        Ok(CollectReport {
            exchange: exchange.to_string(),
            run_id,
            captured_at,
            listings: page.records.len(),
            skipped: page.skipped,
            spreadsheet,
            backup,
            price_range: PriceRange::of(&page.records),
        })
    }
}
