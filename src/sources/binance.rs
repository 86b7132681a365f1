//! Binance public REST client for crypto last-traded prices.

use crate::error::SourceError;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

const BINANCE_API_URL: &str = "https://api.binance.com/api/v3";

/// Binance ticker/price response.
#[derive(Debug, Deserialize)]
struct BinancePrice {
    symbol: String,
    price: String,
}

/// Binance REST client. Public endpoints, no key required.
pub struct BinanceClient {
    client: Client,
}

impl BinanceClient {
    /// Create a new Binance client.
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent("Vantage/0.1")
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    /// Last traded price for an exchange pair in `BASE/QUOTE` notation.
    /// The slash is dropped for the REST call (BTC/USDT -> BTCUSDT).
    pub async fn last_price(&self, pair: &str) -> Result<f64, SourceError> {
        let market = pair.replace('/', "");
        let url = format!("{}/ticker/price?symbol={}", BINANCE_API_URL, market);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(SourceError::Transient(format!(
                "Binance API error: {}",
                response.status()
            )));
        }

        let ticker: BinancePrice = response.json().await?;
        let price: f64 = ticker.price.parse().unwrap_or(0.0);
        debug!("Binance price for {}: {}", ticker.symbol, price);

        if price > 0.0 {
            Ok(price)
        } else {
            Err(SourceError::NoData)
        }
    }
}

impl Default for BinanceClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binance_price_deserialization() {
        let json = r#"{"symbol": "BTCUSDT", "price": "43500.50"}"#;

        let ticker: BinancePrice = serde_json::from_str(json).unwrap();
        assert_eq!(ticker.symbol, "BTCUSDT");
        assert_eq!(ticker.price, "43500.50");
    }

    #[test]
    fn test_binance_price_parse() {
        let json = r#"{"symbol": "ETHUSDT", "price": "2500.00"}"#;

        let ticker: BinancePrice = serde_json::from_str(json).unwrap();
        let price: f64 = ticker.price.parse().unwrap();
        assert_eq!(price, 2500.0);
    }

    #[test]
    fn test_binance_price_unparseable_is_zero() {
        let json = r#"{"symbol": "BTCUSDT", "price": "not-a-number"}"#;

        let ticker: BinancePrice = serde_json::from_str(json).unwrap();
        let price: f64 = ticker.price.parse().unwrap_or(0.0);
        assert_eq!(price, 0.0);
    }
}
