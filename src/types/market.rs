use serde::{Deserialize, Serialize};
use std::fmt;

/// One OHLCV bar for a symbol at some interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Bar timestamp, epoch seconds.
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Upstream provider that produced a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteSource {
    Finnhub,
    Yahoo,
    Binance,
}

impl fmt::Display for QuoteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteSource::Finnhub => write!(f, "finnhub"),
            QuoteSource::Yahoo => write!(f, "yahoo"),
            QuoteSource::Binance => write!(f, "binance"),
        }
    }
}

/// A point-in-time price for one symbol.
#[derive(Debug, Clone, Serialize)]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    pub source: QuoteSource,
}
