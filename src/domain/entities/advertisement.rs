use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One listing as observed by the collector.
///
/// `timestamp` is the capture instant, not the listing's creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvertisementRecord {
    pub timestamp: DateTime<Utc>,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advertiser_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advertiser_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_quantity: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pay_methods: Vec<String>,
}

impl AdvertisementRecord {
    pub fn new(timestamp: DateTime<Utc>, price: Decimal) -> Self {
        Self {
            timestamp,
            price,
            advertiser_id: None,
            advertiser_name: None,
            available_quantity: None,
            min_amount: None,
            max_amount: None,
            pay_methods: Vec::new(),
        }
    }
}

/// Lowest and highest price among a set of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceRange {
    pub lowest: Decimal,
    pub highest: Decimal,
}

impl PriceRange {
    pub fn of(records: &[AdvertisementRecord]) -> Option<Self> {
        let mut prices = records.iter().map(|r| r.price);
        let first = prices.next()?;
        let (lowest, highest) = prices.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Self { lowest, highest })
    }
}
