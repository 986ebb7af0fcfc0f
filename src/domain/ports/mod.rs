pub mod advertisement_source;
pub mod http_transport;
pub mod listing_repository;
