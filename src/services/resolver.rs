//! Multi-source price resolution.
//!
//! Routes a symbol to the crypto or equity path, falls back from the
//! real-time provider to the delayed one, and reports which source
//! produced the price.

use crate::error::SourceError;
use crate::sources::{BinanceClient, FinnhubClient, YahooFinanceClient};
use crate::types::{Quote, QuoteSource};
use std::sync::Arc;
use tracing::{debug, warn};

/// Coarse symbol classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Crypto,
    Equity,
}

/// Classify a ticker symbol.
///
/// Crypto when it contains a dash, or contains "USD" without starting
/// with it. A heuristic: "USDJPY"-style forex pairs and equities that
/// happen to contain "USD" land on the wrong path.
pub fn classify(symbol: &str) -> SymbolKind {
    let upper = symbol.to_uppercase();
    if upper.contains('-') || (upper.contains("USD") && !upper.starts_with("USD")) {
        SymbolKind::Crypto
    } else {
        SymbolKind::Equity
    }
}

/// Map a symbol to the exchange's `BASE/USDT` pair notation.
pub fn to_exchange_pair(symbol: &str) -> String {
    let upper = symbol.to_uppercase();

    if let Some(base) = upper
        .strip_suffix("-USDT")
        .or_else(|| upper.strip_suffix("-USD"))
    {
        return format!("{}/USDT", base);
    }
    if let Some(base) = upper
        .strip_suffix("USDT")
        .or_else(|| upper.strip_suffix("USD"))
    {
        return format!("{}/USDT", base);
    }

    format!("{}/USDT", upper)
}

/// Resolves a current price across the configured providers.
pub struct PriceResolver {
    finnhub: FinnhubClient,
    yahoo: Arc<YahooFinanceClient>,
    binance: BinanceClient,
}

impl PriceResolver {
    /// Create a resolver over the given clients.
    pub fn new(
        finnhub: FinnhubClient,
        yahoo: Arc<YahooFinanceClient>,
        binance: BinanceClient,
    ) -> Self {
        Self {
            finnhub,
            yahoo,
            binance,
        }
    }

    /// Resolve a price for a symbol. `finnhub_key` is the effective
    /// key for this request, if any. Absent when no source produced a
    /// usable price; source failures are logged, never propagated.
    pub async fn resolve(&self, symbol: &str, finnhub_key: Option<&str>) -> Option<Quote> {
        match classify(symbol) {
            SymbolKind::Crypto => self.resolve_crypto(symbol).await,
            SymbolKind::Equity => self.resolve_equity(symbol, finnhub_key).await,
        }
    }

    async fn resolve_crypto(&self, symbol: &str) -> Option<Quote> {
        let pair = to_exchange_pair(symbol);

        match self.binance.last_price(&pair).await {
            Ok(price) => Some(Quote {
                symbol: symbol.to_string(),
                price,
                source: QuoteSource::Binance,
            }),
            Err(e) => {
                log_source_miss("binance", symbol, &e);
                None
            }
        }
    }

    async fn resolve_equity(&self, symbol: &str, finnhub_key: Option<&str>) -> Option<Quote> {
        // Real-time quote first, when a key is available.
        if let Some(key) = finnhub_key {
            match self.finnhub.quote(symbol, key).await {
                Ok(price) => {
                    return Some(Quote {
                        symbol: symbol.to_string(),
                        price,
                        source: QuoteSource::Finnhub,
                    })
                }
                Err(e) => log_source_miss("finnhub", symbol, &e),
            }
        }

        // Delayed fallback.
        match self.yahoo.latest_price(symbol).await {
            Ok(price) => Some(Quote {
                symbol: symbol.to_string(),
                price,
                source: QuoteSource::Yahoo,
            }),
            Err(e) => {
                log_source_miss("yahoo", symbol, &e);
                None
            }
        }
    }
}

fn log_source_miss(source: &str, symbol: &str, err: &SourceError) {
    match err {
        SourceError::NoData => debug!("{} had no data for {}", source, symbol),
        SourceError::Transient(msg) => warn!("{} failed for {}: {}", source, symbol, msg),
    }
}
