use crate::domain::values::search_filter::SearchQuery;
use crate::domain::values::trade_type::TradeType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for one collection pass against an exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureRun {
    pub id: String,
    pub exchange: String,
    pub asset: String,
    pub fiat: String,
    pub trade_type: TradeType,
    pub page: u32,
    pub rows: u32,
    pub listing_count: usize,
    /// Entries in the response that carried no usable price.
    pub skipped_count: usize,
    pub captured_at: DateTime<Utc>,
}

impl CaptureRun {
    pub fn new(
        exchange: impl Into<String>,
        query: &SearchQuery,
        listing_count: usize,
        skipped_count: usize,
        captured_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            exchange: exchange.into(),
            asset: query.asset.clone(),
            fiat: query.fiat.clone(),
            trade_type: query.trade_type,
            page: query.page,
            rows: query.rows,
            listing_count,
            skipped_count,
            captured_at,
        }
    }
}
