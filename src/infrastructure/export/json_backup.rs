use crate::domain::entities::advertisement::AdvertisementRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::advertisement_source::SearchPage;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct BackupMetadata<'a> {
    pub exchange: &'a str,
    pub asset: &'a str,
    pub fiat: &'a str,
    pub trade_type: String,
    pub timestamp: DateTime<Utc>,
    pub total_rows_found: usize,
    pub valid_listings_found: usize,
}

/// Raw capture dump kept next to the spreadsheet.
#[derive(Debug, Serialize)]
pub struct RawBackup<'a> {
    pub success: bool,
    pub data: &'a [AdvertisementRecord],
    pub metadata: BackupMetadata<'a>,
}

impl<'a> RawBackup<'a> {
    pub fn from_page(exchange: &'a str, page: &'a SearchPage, timestamp: DateTime<Utc>) -> Self {
        Self {
            success: true,
            data: &page.records,
            metadata: BackupMetadata {
                exchange,
                asset: &page.query.asset,
                fiat: &page.query.fiat,
                trade_type: page.query.trade_type.to_string(),
                timestamp,
                total_rows_found: page.total_entries,
                valid_listings_found: page.records.len(),
            },
        }
    }
}

pub fn write_json_backup(path: &Path, backup: &RawBackup<'_>) -> Result<(), DomainError> {
    let json = serde_json::to_string_pretty(backup)
        .map_err(|e| DomainError::Export(format!("Failed to encode backup: {e}")))?;
    std::fs::write(path, json).map_err(|e| DomainError::Export(format!("{}: {e}", path.display())))
}
