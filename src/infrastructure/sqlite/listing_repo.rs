use crate::domain::entities::advertisement::AdvertisementRecord;
use crate::domain::entities::capture_run::CaptureRun;
use crate::domain::error::DomainError;
use crate::domain::ports::listing_repository::*;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::sync::Mutex;

const LISTING_COLS: &str = "l.id, l.run_id, r.exchange, r.asset, r.fiat, r.trade_type, l.price, l.captured_at, \
                            l.advertiser_id, l.advertiser_name, l.available_quantity, l.min_amount, l.max_amount, l.pay_methods";

const RUN_COLS: &str =
    "id, exchange, asset, fiat, trade_type, page_number, page_size, listing_count, skipped_count, captured_at";

pub struct SqliteListingRepo {
    conn: Mutex<Connection>,
}

impl SqliteListingRepo {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn row_to_listing(row: &rusqlite::Row) -> Result<StoredListing, rusqlite::Error> {
        let trade_type_str: String = row.get(5)?;
        let price_str: String = row.get(6)?;
        let captured_str: String = row.get(7)?;
        let quantity_str: Option<String> = row.get(10)?;
        let min_str: Option<String> = row.get(11)?;
        let max_str: Option<String> = row.get(12)?;
        let pay_methods_str: String = row.get(13)?;

        Ok(StoredListing {
            id: row.get(0)?,
            run_id: row.get(1)?,
            exchange: row.get(2)?,
            asset: row.get(3)?,
            fiat: row.get(4)?,
            trade_type: trade_type_str.parse().map_err(|e: String| conversion_error(5, e))?,
            price: parse_decimal(6, &price_str)?,
            captured_at: parse_time(7, &captured_str)?,
            advertiser_id: row.get(8)?,
            advertiser_name: row.get(9)?,
            available_quantity: quantity_str
                .map(|s| parse_decimal(10, &s))
                .transpose()?,
            min_amount: min_str.map(|s| parse_decimal(11, &s)).transpose()?,
            max_amount: max_str.map(|s| parse_decimal(12, &s)).transpose()?,
            pay_methods: serde_json::from_str(&pay_methods_str).map_err(|e| {
                conversion_error(13, format!("bad pay_methods '{pay_methods_str}': {e}"))
            })?,
        })
    }

    fn row_to_run(row: &rusqlite::Row) -> Result<CaptureRun, rusqlite::Error> {
        let trade_type_str: String = row.get(4)?;
        let listing_count: i64 = row.get(7)?;
        let skipped_count: i64 = row.get(8)?;
        let captured_str: String = row.get(9)?;

        Ok(CaptureRun {
            id: row.get(0)?,
            exchange: row.get(1)?,
            asset: row.get(2)?,
            fiat: row.get(3)?,
            trade_type: trade_type_str.parse().map_err(|e: String| conversion_error(4, e))?,
            page: row.get(5)?,
            rows: row.get(6)?,
            listing_count: listing_count.max(0) as usize,
            skipped_count: skipped_count.max(0) as usize,
            captured_at: parse_time(9, &captured_str)?,
        })
    }
}

fn conversion_error(idx: usize, msg: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, msg.into())
}

fn parse_decimal(idx: usize, s: &str) -> Result<Decimal, rusqlite::Error> {
    s.parse()
        .map_err(|e: rust_decimal::Error| conversion_error(idx, format!("bad decimal '{s}': {e}")))
}

fn parse_time(idx: usize, s: &str) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_error(idx, format!("bad timestamp '{s}': {e}")))
}

impl ListingRepository for SqliteListingRepo {
    fn save_capture(&self, run: &CaptureRun, records: &[AdvertisementRecord]) -> Result<(), DomainError> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::Database(format!("Failed to begin transaction: {e}")))?;

        tx.execute(
            "INSERT INTO capture_runs (id, exchange, asset, fiat, trade_type, page_number, page_size, listing_count, skipped_count, captured_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                run.id,
                run.exchange,
                run.asset,
                run.fiat,
                run.trade_type.to_string(),
                run.page,
                run.rows,
                run.listing_count as i64,
                run.skipped_count as i64,
                run.captured_at.to_rfc3339(),
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to add capture run: {e}")))?;

        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO listings (run_id, price, captured_at, advertiser_id, advertiser_name, available_quantity, min_amount, max_amount, pay_methods)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                )
                .map_err(|e| DomainError::Database(e.to_string()))?;
            for rec in records {
                let pay_methods = serde_json::to_string(&rec.pay_methods)
                    .map_err(|e| DomainError::Database(format!("Failed to encode pay methods: {e}")))?;
                stmt.execute(params![
                    run.id,
                    rec.price.to_string(),
                    rec.timestamp.to_rfc3339(),
                    rec.advertiser_id,
                    rec.advertiser_name,
                    rec.available_quantity.map(|d| d.to_string()),
                    rec.min_amount.map(|d| d.to_string()),
                    rec.max_amount.map(|d| d.to_string()),
                    pay_methods,
                ])
                .map_err(|e| DomainError::Database(format!("Failed to add listing: {e}")))?;
            }
        }

        tx.commit()
            .map_err(|e| DomainError::Database(format!("Failed to commit capture: {e}")))
    }

    fn list_listings(&self, filter: &ListingFilter) -> Result<Vec<StoredListing>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut sql = format!(
            "SELECT {LISTING_COLS} FROM listings l JOIN capture_runs r ON r.id = l.run_id WHERE 1=1"
        );
        let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        if let Some(exchange) = &filter.exchange {
            sql.push_str(&format!(" AND r.exchange = ?{}", param_values.len() + 1));
            param_values.push(Box::new(exchange.clone()));
        }
        if let Some(asset) = &filter.asset {
            sql.push_str(&format!(" AND r.asset = ?{}", param_values.len() + 1));
            param_values.push(Box::new(asset.to_uppercase()));
        }
        if let Some(fiat) = &filter.fiat {
            sql.push_str(&format!(" AND r.fiat = ?{}", param_values.len() + 1));
            param_values.push(Box::new(fiat.to_uppercase()));
        }
        if let Some(trade_type) = filter.trade_type {
            sql.push_str(&format!(" AND r.trade_type = ?{}", param_values.len() + 1));
            param_values.push(Box::new(trade_type.to_string()));
        }
        let direction = if filter.descending { "DESC" } else { "ASC" };
        sql.push_str(&format!(" ORDER BY CAST(l.price AS REAL) {direction}, l.id ASC"));
        if let Some(limit) = filter.limit {
            sql.push_str(&format!(" LIMIT ?{}", param_values.len() + 1));
            param_values.push(Box::new(limit as i64));
        }

        let params_refs: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let listings = stmt
            .query_map(params_refs.as_slice(), Self::row_to_listing)
            .map_err(|e| DomainError::Database(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::Database(format!("Failed to read listing: {e}")))?;
        Ok(listings)
    }

    fn recent_runs(&self, limit: usize) -> Result<Vec<CaptureRun>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {RUN_COLS} FROM capture_runs ORDER BY captured_at DESC LIMIT ?1"
            ))
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let runs = stmt
            .query_map(params![limit as i64], Self::row_to_run)
            .map_err(|e| DomainError::Database(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::Database(format!("Failed to read capture run: {e}")))?;
        Ok(runs)
    }
}
