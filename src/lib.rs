//! Batch medallion pipeline for banking transaction events.
//!
//! Bronze (raw producer messages) is cleaned into silver, which is then aggregated into a
//! per-type fact table and a per-type hourly gold table.

pub mod actors;
pub mod config;
pub mod engine;
pub mod models;
pub mod storage;
pub mod types;
