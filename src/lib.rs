pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::collect::{CollectOptions, CollectReport, CollectUseCase};
use crate::application::history::HistoryUseCase;
use crate::application::search::SearchUseCase;
use crate::config::AppConfig;
use crate::domain::entities::capture_run::CaptureRun;
use crate::domain::error::DomainError;
use crate::domain::ports::advertisement_source::{AdvertisementSource, SearchResult};
use crate::domain::ports::http_transport::HttpTransport;
use crate::domain::ports::listing_repository::{ListingFilter, ListingRepository, StoredListing};
use crate::domain::values::search_filter::SearchFilter;
use crate::infrastructure::binance::client::BinanceP2pClient;
use crate::infrastructure::http::reqwest_transport::ReqwestTransport;
use crate::infrastructure::sqlite::listing_repo::SqliteListingRepo;
use crate::infrastructure::sqlite::migrations::run_migrations;
use rusqlite::Connection;
use std::sync::Arc;

pub struct P2pWatch {
    search_uc: SearchUseCase,
    collect_uc: CollectUseCase,
    history_uc: HistoryUseCase,
}

impl P2pWatch {
    pub fn new(config: &AppConfig) -> Result<Self, DomainError> {
        let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new(config.timeout)?);
        Self::with_transport(&config.db_path, transport)
    }

    pub fn with_transport(
        db_path: &str,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, DomainError> {
        let conn = Connection::open(db_path).map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
        run_migrations(&conn)?;

        let source: Arc<dyn AdvertisementSource> = Arc::new(BinanceP2pClient::new(transport));
        let repo: Arc<dyn ListingRepository> = Arc::new(SqliteListingRepo::new(conn));

        Ok(Self {
            search_uc: SearchUseCase::new(source.clone()),
            collect_uc: CollectUseCase::new(source, repo.clone()),
            history_uc: HistoryUseCase::new(repo),
        })
    }

    pub async fn search_advertisements(&self, filter: &SearchFilter) -> SearchResult {
        self.search_uc.execute(filter).await
    }

    pub async fn collect(
        &self,
        filter: &SearchFilter,
        options: &CollectOptions,
    ) -> Result<CollectReport, DomainError> {
        self.collect_uc.execute(filter, options).await
    }

    pub fn listings(&self, filter: &ListingFilter) -> Result<Vec<StoredListing>, DomainError> {
        self.history_uc.listings(filter)
    }

    pub fn runs(&self, limit: usize) -> Result<Vec<CaptureRun>, DomainError> {
        self.history_uc.runs(limit)
    }
}
