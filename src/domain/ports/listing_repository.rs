use crate::domain::entities::advertisement::AdvertisementRecord;
use crate::domain::entities::capture_run::CaptureRun;
use crate::domain::error::DomainError;
use crate::domain::values::trade_type::TradeType;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Default)]
pub struct ListingFilter {
    pub exchange: Option<String>,
    pub asset: Option<String>,
    pub fiat: Option<String>,
    pub trade_type: Option<TradeType>,
    pub limit: Option<usize>,
    pub descending: bool,
}

/// A listing row joined with the run it was captured in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredListing {
    pub id: i64,
    pub run_id: String,
    pub exchange: String,
    pub asset: String,
    pub fiat: String,
    pub trade_type: TradeType,
    pub price: Decimal,
    pub captured_at: DateTime<Utc>,
    pub advertiser_id: Option<String>,
    pub advertiser_name: Option<String>,
    pub available_quantity: Option<Decimal>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
    pub pay_methods: Vec<String>,
}

pub trait ListingRepository: Send + Sync {
    /// Stores the run and all of its listings atomically.
    fn save_capture(&self, run: &CaptureRun, records: &[AdvertisementRecord]) -> Result<(), DomainError>;
    fn list_listings(&self, filter: &ListingFilter) -> Result<Vec<StoredListing>, DomainError>;
    fn recent_runs(&self, limit: usize) -> Result<Vec<CaptureRun>, DomainError>;
}
