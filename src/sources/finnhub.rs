//! Finnhub API client for real-time equity quotes.
//!
//! The primary provider on the equity path. Requires an API key; the
//! key is supplied per call so a request token can override the
//! configured one.

use crate::error::SourceError;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

const FINNHUB_URL: &str = "https://finnhub.io/api/v1";

/// Finnhub quote response.
#[derive(Debug, Clone, Deserialize)]
pub struct FinnhubQuote {
    /// Current price
    #[serde(rename = "c")]
    pub current: f64,
    /// High price of the day
    #[serde(rename = "h")]
    pub high: f64,
    /// Low price of the day
    #[serde(rename = "l")]
    pub low: f64,
    /// Open price of the day
    #[serde(rename = "o")]
    pub open: f64,
    /// Previous close price
    #[serde(rename = "pc")]
    pub previous_close: f64,
    /// Quote timestamp
    #[serde(rename = "t")]
    pub timestamp: i64,
}

/// Finnhub API client.
pub struct FinnhubClient {
    client: Client,
}

impl FinnhubClient {
    /// Create a new Finnhub client.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Fetch a real-time quote. Unknown symbols come back from the API
    /// as a zero price; a missing or non-positive price field counts
    /// as no data.
    pub async fn quote(&self, symbol: &str, token: &str) -> Result<f64, SourceError> {
        let url = format!("{}/quote?symbol={}&token={}", FINNHUB_URL, symbol, token);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(SourceError::Transient(format!(
                "Finnhub API error: {}",
                response.status()
            )));
        }

        let quote: FinnhubQuote = response.json().await?;
        debug!("Finnhub quote for {}: {}", symbol, quote.current);

        if quote.current > 0.0 {
            Ok(quote.current)
        } else {
            Err(SourceError::NoData)
        }
    }
}

impl Default for FinnhubClient {
    fn default() -> Self {
        Self::new()
    }
}
