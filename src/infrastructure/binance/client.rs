use super::wire::{AdEntry, SearchRequest};
use crate::domain::entities::advertisement::AdvertisementRecord;
use crate::domain::error::{FailureKind, SearchError};
use crate::domain::ports::advertisement_source::{AdvertisementSource, SearchPage};
use crate::domain::ports::http_transport::{HttpTransport, HttpResponse, TransportError};
use crate::domain::values::search_filter::SearchFilter;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Public advertisement search endpoint.
pub const SEARCH_URL: &str = "https://p2p.binance.com/bapi/c2c/v2/friendly/c2c/adv/search";

const BODY_EXCERPT_CHARS: usize = 200;

/// Binance P2P advertisement search. One POST per call, never retried.
pub struct BinanceP2pClient {
    transport: Arc<dyn HttpTransport>,
}

impl BinanceP2pClient {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl AdvertisementSource for BinanceP2pClient {
    fn name(&self) -> &str {
        "binance"
    }

    async fn search_page(&self, filter: &SearchFilter) -> Result<SearchPage, SearchError> {
        let query = filter.validate()?;
        let body = serde_json::to_value(SearchRequest::from_query(&query))
            .map_err(|e| SearchError::invalid_input(format!("cannot encode request: {e}")))?;

        info!(
            asset = %query.asset,
            fiat = %query.fiat,
            trade_type = %query.trade_type,
            page = query.page,
            rows = query.rows,
            "Searching Binance P2P advertisements"
        );

        let resp = self
            .transport
            .post_json(SEARCH_URL, &body)
            .await
            .map_err(|e| {
                warn!("Binance P2P request failed: {e}");
                match e {
                    TransportError::Timeout(msg) => SearchError::network(format!("timeout: {msg}")),
                    TransportError::Connect(msg) | TransportError::Other(msg) => SearchError::network(msg),
                }
            })?;

        let parsed = parse_search_response(&resp, Utc::now()).inspect_err(|e| {
            if e.kind == FailureKind::MalformedResponse {
                error!("Binance P2P response broke the expected contract: {}", e.message);
            } else {
                warn!("Binance P2P search failed: {e}");
            }
        })?;

        if parsed.skipped > 0 {
            warn!(
                skipped = parsed.skipped,
                total = parsed.total_entries,
                "Skipped advertisements without a usable price"
            );
        }
        info!(records = parsed.records.len(), "Binance P2P search complete");

        Ok(SearchPage {
            query,
            records: parsed.records,
            total_entries: parsed.total_entries,
            skipped: parsed.skipped,
        })
    }
}

#[derive(Debug)]
pub(crate) struct ParsedResponse {
    pub records: Vec<AdvertisementRecord>,
    pub total_entries: usize,
    pub skipped: usize,
}

/// Classifies a raw response and maps its entries, stamping every record
/// with `captured_at`.
pub(crate) fn parse_search_response(
    resp: &HttpResponse,
    captured_at: DateTime<Utc>,
) -> Result<ParsedResponse, SearchError> {
    if !resp.is_success() {
        return Err(SearchError::remote(format!(
            "HTTP {}: {}",
            resp.status,
            excerpt(&resp.body)
        )));
    }

    let json: Value = serde_json::from_str(&resp.body)
        .map_err(|e| SearchError::malformed(format!("body is not JSON ({e}): {}", excerpt(&resp.body))))?;

    let success = json
        .get("success")
        .and_then(Value::as_bool)
        .ok_or_else(|| SearchError::malformed("missing boolean \"success\" flag"))?;

    if !success {
        let message = json
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or("platform reported failure without a message");
        return Err(SearchError::rejected(message));
    }

    let data = json
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| SearchError::malformed("missing \"data\" list"))?;

    let total_entries = data.len();
    let records: Vec<AdvertisementRecord> = data
        .iter()
        .filter_map(|entry| {
            serde_json::from_value::<AdEntry>(entry.clone())
                .ok()?
                .into_record(captured_at)
        })
        .collect();
    let skipped = total_entries - records.len();

    Ok(ParsedResponse {
        records,
        total_entries,
        skipped,
    })
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= BODY_EXCERPT_CHARS {
        trimmed.to_string()
    } else {
        let cut: String = trimmed.chars().take(BODY_EXCERPT_CHARS).collect();
        format!("{cut}…")
    }
}
