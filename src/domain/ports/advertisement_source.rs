use crate::domain::entities::advertisement::AdvertisementRecord;
use crate::domain::error::SearchError;
use crate::domain::values::search_filter::{SearchFilter, SearchQuery};
use async_trait::async_trait;

/// Outcome of a single advertisement search.
pub type SearchResult = Result<Vec<AdvertisementRecord>, SearchError>;

/// One page of results together with what was dropped while parsing it.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    pub query: SearchQuery,
    pub records: Vec<AdvertisementRecord>,
    /// Entries present in the response, including skipped ones.
    pub total_entries: usize,
    pub skipped: usize,
}

/// An exchange that can be asked for P2P advertisements.
#[async_trait]
pub trait AdvertisementSource: Send + Sync {
    /// Short exchange identifier used in file names and storage.
    fn name(&self) -> &str;

    /// Runs one search and keeps the parse bookkeeping.
    async fn search_page(&self, filter: &SearchFilter) -> Result<SearchPage, SearchError>;

    async fn search_advertisements(&self, filter: &SearchFilter) -> SearchResult {
        self.search_page(filter).await.map(|page| page.records)
    }
}
