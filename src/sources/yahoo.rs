//! Yahoo Finance client for delayed quotes and OHLCV history.
//!
//! The fallback on the equity path and the only candle provider. Uses
//! the unofficial chart API (no key required, data delayed ~15m).

use crate::error::SourceError;
use crate::types::Candle;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const YAHOO_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Yahoo Finance chart response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    timestamp: Option<Vec<i64>>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    #[allow(dead_code)]
    symbol: String,
    regular_market_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Deserialize)]
struct ChartQuote {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<u64>>>,
}

/// Normalize a symbol for the chart API.
/// Yahoo uses hyphens instead of dots for share classes (BRK.B -> BRK-B).
fn normalize_symbol(symbol: &str) -> String {
    symbol.to_uppercase().replace('.', "-")
}

/// Build candles from one chart result, dropping bars without a close.
fn extract_candles(result: ChartResult) -> Vec<Candle> {
    let Some(timestamps) = result.timestamp else {
        return Vec::new();
    };
    let Some(quote) = result.indicators.quote.into_iter().next() else {
        return Vec::new();
    };

    let opens = quote.open.unwrap_or_default();
    let highs = quote.high.unwrap_or_default();
    let lows = quote.low.unwrap_or_default();
    let closes = quote.close.unwrap_or_default();
    let volumes = quote.volume.unwrap_or_default();

    let mut candles = Vec::with_capacity(timestamps.len());
    for (i, &time) in timestamps.iter().enumerate() {
        let open = opens.get(i).and_then(|v| *v).unwrap_or(0.0);
        let high = highs.get(i).and_then(|v| *v).unwrap_or(0.0);
        let low = lows.get(i).and_then(|v| *v).unwrap_or(0.0);
        let close = closes.get(i).and_then(|v| *v).unwrap_or(0.0);
        let volume = volumes.get(i).and_then(|v| *v).unwrap_or(0) as f64;

        // Skip invalid data points
        if close <= 0.0 {
            continue;
        }

        candles.push(Candle {
            time,
            open,
            high,
            low,
            close,
            volume,
        });
    }

    candles
}

/// Yahoo Finance API client.
pub struct YahooFinanceClient {
    client: Client,
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client.
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    async fn chart(
        &self,
        symbol: &str,
        range: &str,
        interval: &str,
    ) -> Result<ChartResult, SourceError> {
        let url = format!(
            "{}/{}?range={}&interval={}&includePrePost=false",
            YAHOO_CHART_URL,
            normalize_symbol(symbol),
            range,
            interval
        );

        debug!("Fetching Yahoo Finance chart: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(SourceError::Transient(format!(
                "Yahoo API error: {}",
                response.status()
            )));
        }

        let data: ChartResponse = response.json().await?;

        if let Some(error) = data.chart.error {
            return Err(SourceError::Transient(format!(
                "Yahoo API error: {} - {}",
                error.code, error.description
            )));
        }

        data.chart
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or(SourceError::NoData)
    }

    /// Latest traded price: the fast meta field when present, else the
    /// close of the most recent daily bar.
    pub async fn latest_price(&self, symbol: &str) -> Result<f64, SourceError> {
        let result = self.chart(symbol, "1d", "1d").await?;

        if let Some(price) = result.meta.regular_market_price.filter(|p| *p > 0.0) {
            return Ok(price);
        }

        extract_candles(result)
            .last()
            .map(|c| c.close)
            .ok_or(SourceError::NoData)
    }

    /// OHLCV history for a range/interval pair (Yahoo notation, e.g.
    /// range "1mo", interval "1h").
    pub async fn history(
        &self,
        symbol: &str,
        range: &str,
        interval: &str,
    ) -> Result<Vec<Candle>, SourceError> {
        let result = self.chart(symbol, range, interval).await?;
        Ok(extract_candles(result))
    }
}

impl Default for YahooFinanceClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // normalize_symbol Tests
    // =========================================================================

    #[test]
    fn test_normalize_symbol_uppercase() {
        assert_eq!(normalize_symbol("aapl"), "AAPL");
        assert_eq!(normalize_symbol("msft"), "MSFT");
    }

    #[test]
    fn test_normalize_symbol_dots_to_hyphens() {
        assert_eq!(normalize_symbol("BRK.B"), "BRK-B");
        assert_eq!(normalize_symbol("brk.a"), "BRK-A");
    }

    // =========================================================================
    // Deserialization Tests
    // =========================================================================

    #[test]
    fn test_chart_error_deserialization() {
        let json = r#"{
            "code": "Not Found",
            "description": "Symbol not found"
        }"#;
        let error: ChartError = serde_json::from_str(json).unwrap();
        assert_eq!(error.code, "Not Found");
        assert_eq!(error.description, "Symbol not found");
    }

    #[test]
    fn test_chart_meta_deserialization() {
        let json = r#"{"symbol": "AAPL", "regularMarketPrice": 153.25}"#;
        let meta: ChartMeta = serde_json::from_str(json).unwrap();
        assert_eq!(meta.regular_market_price, Some(153.25));
    }

    #[test]
    fn test_chart_meta_without_price() {
        let json = r#"{"symbol": "MSFT"}"#;
        let meta: ChartMeta = serde_json::from_str(json).unwrap();
        assert!(meta.regular_market_price.is_none());
    }

    #[test]
    fn test_chart_quote_with_nulls() {
        let json = r#"{
            "open": [150.0, null, 152.0],
            "close": [153.0, null, 155.0]
        }"#;
        let quote: ChartQuote = serde_json::from_str(json).unwrap();
        let opens = quote.open.unwrap();
        assert_eq!(opens[0], Some(150.0));
        assert_eq!(opens[1], None);
        assert_eq!(opens[2], Some(152.0));
    }

    // =========================================================================
    // extract_candles Tests
    // =========================================================================

    fn chart_result(json: &str) -> ChartResult {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_extract_candles_full_series() {
        let result = chart_result(
            r#"{
                "meta": {"symbol": "AAPL"},
                "timestamp": [1700000000, 1700003600],
                "indicators": {"quote": [{
                    "open": [150.0, 151.0],
                    "high": [155.0, 156.0],
                    "low": [148.0, 149.0],
                    "close": [153.0, 154.0],
                    "volume": [50000000, 51000000]
                }]}
            }"#,
        );

        let candles = extract_candles(result);
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].time, 1700000000);
        assert_eq!(candles[1].close, 154.0);
        assert_eq!(candles[1].volume, 51_000_000.0);
    }

    #[test]
    fn test_extract_candles_skips_null_closes() {
        let result = chart_result(
            r#"{
                "meta": {"symbol": "AAPL"},
                "timestamp": [1700000000, 1700003600, 1700007200],
                "indicators": {"quote": [{
                    "open": [150.0, null, 152.0],
                    "high": [155.0, null, 157.0],
                    "low": [148.0, null, 150.0],
                    "close": [153.0, null, 155.0],
                    "volume": [50000000, null, 52000000]
                }]}
            }"#,
        );

        let candles = extract_candles(result);
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].close, 153.0);
        assert_eq!(candles[1].close, 155.0);
    }

    #[test]
    fn test_extract_candles_no_timestamps() {
        let result = chart_result(
            r#"{
                "meta": {"symbol": "AAPL"},
                "indicators": {"quote": [{}]}
            }"#,
        );

        assert!(extract_candles(result).is_empty());
    }
}
