//! Request and response shapes of the Binance P2P advertisement search.
//!
//! Only `success` and `data` are required. Everything inside a `data` entry is
//! optional at the serde level; price presence is checked when mapping.

use crate::domain::entities::advertisement::AdvertisementRecord;
use crate::domain::values::search_filter::SearchQuery;
use crate::domain::values::trade_type::TradeType;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest<'a> {
    pub asset: &'a str,
    pub fiat: &'a str,
    pub merchant_check: bool,
    pub page: u32,
    pub pay_types: Vec<&'a str>,
    pub publisher_type: Option<&'a str>,
    pub rows: u32,
    pub trade_type: TradeType,
}

impl<'a> SearchRequest<'a> {
    pub fn from_query(query: &'a SearchQuery) -> Self {
        Self {
            asset: &query.asset,
            fiat: &query.fiat,
            merchant_check: true,
            page: query.page,
            pay_types: query.pay_method.as_deref().into_iter().collect(),
            publisher_type: None,
            rows: query.rows,
            trade_type: query.trade_type,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AdEntry {
    #[serde(default)]
    pub adv: Option<Adv>,
    #[serde(default)]
    pub advertiser: Option<Advertiser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Adv {
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub surplus_amount: Option<Value>,
    #[serde(default)]
    pub min_single_trans_amount: Option<Value>,
    #[serde(default)]
    pub max_single_trans_amount: Option<Value>,
    #[serde(default)]
    pub dynamic_max_single_trans_amount: Option<Value>,
    #[serde(default)]
    pub trade_methods: Option<Vec<TradeMethod>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeMethod {
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub trade_method_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advertiser {
    #[serde(default)]
    pub user_no: Option<String>,
    #[serde(default)]
    pub nick_name: Option<String>,
}

/// Accepts both `"850.5"` and `850.5`.
pub fn decimal_from(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.to_string().parse().ok(),
        _ => None,
    }
}

impl AdEntry {
    /// `None` when the entry carries no usable price.
    pub fn into_record(self, captured_at: DateTime<Utc>) -> Option<AdvertisementRecord> {
        let adv = self.adv?;
        let price = adv.price.as_ref().and_then(decimal_from)?;

        let mut record = AdvertisementRecord::new(captured_at, price);
        record.available_quantity = adv.surplus_amount.as_ref().and_then(decimal_from);
        record.min_amount = adv.min_single_trans_amount.as_ref().and_then(decimal_from);
        record.max_amount = adv
            .dynamic_max_single_trans_amount
            .as_ref()
            .and_then(decimal_from)
            .or_else(|| adv.max_single_trans_amount.as_ref().and_then(decimal_from));
        record.pay_methods = adv
            .trade_methods
            .unwrap_or_default()
            .into_iter()
            .filter_map(|m| m.identifier.or(m.trade_method_name))
            .collect();
        if let Some(advertiser) = self.advertiser {
            record.advertiser_id = advertiser.user_no;
            record.advertiser_name = advertiser.nick_name;
        }
        Some(record)
    }
}
