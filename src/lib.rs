//! Dzongkhag Electrical Outage Dashboard
//!
//! Fetches monthly outage statistics from the reporting service and falls
//! back to generated sample data whenever the service cannot be reached.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod errors;
pub mod orchestrator;
pub mod presentation;
pub mod sample;
pub mod transport;
pub mod types;
pub mod utils;
