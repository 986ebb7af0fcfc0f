use crate::domain::entities::capture_run::CaptureRun;
use crate::domain::error::DomainError;
use crate::domain::ports::listing_repository::{ListingFilter, ListingRepository, StoredListing};
use std::sync::Arc;

pub struct HistoryUseCase {
    repo: Arc<dyn ListingRepository>,
}

impl HistoryUseCase {
    pub fn new(repo: Arc<dyn ListingRepository>) -> Self {
        Self { repo }
    }

    pub fn listings(&self, filter: &ListingFilter) -> Result<Vec<StoredListing>, DomainError> {
        if filter.limit == Some(0) {
            return Err(DomainError::InvalidInput("limit must be positive".into()));
        }
        self.repo.list_listings(filter)
    }

    pub fn runs(&self, limit: usize) -> Result<Vec<CaptureRun>, DomainError> {
        if limit == 0 {
            return Err(DomainError::InvalidInput("limit must be positive".into()));
        }
        self.repo.recent_runs(limit)
    }
}
