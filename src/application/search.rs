use crate::domain::ports::advertisement_source::{AdvertisementSource, SearchResult};
use crate::domain::values::search_filter::SearchFilter;
use std::sync::Arc;

pub struct SearchUseCase {
    source: Arc<dyn AdvertisementSource>,
}

impl SearchUseCase {
    pub fn new(source: Arc<dyn AdvertisementSource>) -> Self {
        Self { source }
    }

    pub async fn execute(&self, filter: &SearchFilter) -> SearchResult {
        self.source.search_advertisements(filter).await
    }
}
