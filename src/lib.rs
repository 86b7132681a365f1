//! Vantage - personal trading-assistant backend.
//!
//! Fetches market quotes and candles from external providers, derives
//! rule-based trading signals, and records trades and positions to a
//! local SQLite ledger behind a small HTTP API.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

use config::Config;
use services::{HistoryService, Ledger, PriceResolver};
use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub resolver: Arc<PriceResolver>,
    pub history: Arc<HistoryService>,
    pub ledger: Arc<Ledger>,
}
