use crate::domain::error::SearchError;
use crate::domain::values::trade_type::TradeType;
use serde::Serialize;

/// Largest page size the search endpoint honours.
pub const MAX_ROWS: u32 = 20;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_ROWS: u32 = 10;

/// Caller-supplied search parameters, checked by [`SearchFilter::validate`]
/// before anything goes on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    pub asset: String,
    pub fiat: String,
    pub trade_type: String,
    pub pay_method: Option<String>,
    pub page: u32,
    pub rows: u32,
}

impl SearchFilter {
    pub fn new(asset: impl Into<String>, fiat: impl Into<String>, trade_type: impl Into<String>) -> Self {
        Self {
            asset: asset.into(),
            fiat: fiat.into(),
            trade_type: trade_type.into(),
            pay_method: None,
            page: DEFAULT_PAGE,
            rows: DEFAULT_ROWS,
        }
    }

    pub fn with_pay_method(mut self, pay_method: impl Into<String>) -> Self {
        self.pay_method = Some(pay_method.into());
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn with_rows(mut self, rows: u32) -> Self {
        self.rows = rows;
        self
    }

    pub fn validate(&self) -> Result<SearchQuery, SearchError> {
        let asset = self.asset.trim();
        if asset.is_empty() {
            return Err(SearchError::invalid_input("asset must not be empty"));
        }
        let fiat = self.fiat.trim();
        if fiat.is_empty() {
            return Err(SearchError::invalid_input("fiat must not be empty"));
        }
        let trade_type: TradeType = self
            .trade_type
            .parse()
            .map_err(|e| SearchError::invalid_input(e))?;
        if self.page == 0 {
            return Err(SearchError::invalid_input("page must be a positive integer"));
        }
        if self.rows == 0 || self.rows > MAX_ROWS {
            return Err(SearchError::invalid_input(format!(
                "rows must be between 1 and {MAX_ROWS}, got {}",
                self.rows
            )));
        }
        let pay_method = match self.pay_method.as_deref().map(str::trim) {
            Some("") => {
                return Err(SearchError::invalid_input("pay_method must not be blank"));
            }
            other => other.map(String::from),
        };

        Ok(SearchQuery {
            asset: asset.to_uppercase(),
            fiat: fiat.to_uppercase(),
            trade_type,
            pay_method,
            page: self.page,
            rows: self.rows,
        })
    }
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self::new("USDT", "XAF", "BUY")
    }
}

/// A filter that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    pub asset: String,
    pub fiat: String,
    pub trade_type: TradeType,
    pub pay_method: Option<String>,
    pub page: u32,
    pub rows: u32,
}
