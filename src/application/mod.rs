pub mod collect;
pub mod history;
pub mod search;
