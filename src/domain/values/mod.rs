pub mod search_filter;
pub mod trade_type;
