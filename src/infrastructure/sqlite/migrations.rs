use crate::domain::error::DomainError;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), DomainError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS capture_runs (
            id TEXT PRIMARY KEY,
            exchange TEXT NOT NULL,
            asset TEXT NOT NULL,
            fiat TEXT NOT NULL,
            trade_type TEXT NOT NULL,
            page_number INTEGER NOT NULL,
            page_size INTEGER NOT NULL,
            listing_count INTEGER NOT NULL,
            skipped_count INTEGER NOT NULL DEFAULT 0,
            captured_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS listings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            run_id TEXT NOT NULL REFERENCES capture_runs(id),
            price TEXT NOT NULL,
            captured_at TEXT NOT NULL,
            advertiser_id TEXT,
            advertiser_name TEXT,
            available_quantity TEXT,
            min_amount TEXT,
            max_amount TEXT,
            pay_methods TEXT NOT NULL DEFAULT '[]'
        );

        CREATE INDEX IF NOT EXISTS idx_runs_captured ON capture_runs(captured_at);
        CREATE INDEX IF NOT EXISTS idx_runs_market ON capture_runs(asset, fiat, trade_type);
        CREATE INDEX IF NOT EXISTS idx_listings_run ON listings(run_id);
        ",
    )
    .map_err(|e| DomainError::Database(format!("Migration failed: {e}")))
}
