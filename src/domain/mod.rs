//! Core domain types and logic.

pub mod ohlcv;
pub mod raw_table;
pub mod normalizer;
pub mod indicator;
pub mod signal;
pub mod engine;
pub mod summary;
pub mod ticker;
pub mod period;
pub mod analysis;
pub mod config_validation;
pub mod error;
