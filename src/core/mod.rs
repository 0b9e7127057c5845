pub mod types;
pub mod catalog;
pub mod shared;
pub mod config;
pub mod error;
pub mod stats;
