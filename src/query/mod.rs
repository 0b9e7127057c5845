pub mod filter;
pub mod matcher;
pub mod cache;
pub mod types;
