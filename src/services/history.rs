//! Candle history with bounded retry and disk caching.

use crate::error::SourceError;
use crate::services::FileCache;
use crate::sources::YahooFinanceClient;
use crate::types::Candle;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// How long a cached history response stays fresh.
const CACHE_TTL: Duration = Duration::from_secs(30 * 60);
/// Total fetch attempts for one history request.
const MAX_ATTEMPTS: u32 = 3;
/// Delay before retry N is `RETRY_BASE_DELAY * N` (2s, then 4s).
const RETRY_BASE_DELAY: Duration = Duration::from_secs(2);

/// Provider of OHLCV history.
#[async_trait]
pub trait CandleSource: Send + Sync {
    async fn fetch_candles(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> Result<Vec<Candle>, SourceError>;
}

#[async_trait]
impl CandleSource for YahooFinanceClient {
    async fn fetch_candles(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> Result<Vec<Candle>, SourceError> {
        self.history(symbol, period, interval).await
    }
}

/// Fetches candle history through a shared disk cache with bounded
/// retry. Failures degrade to an empty series, never an error.
pub struct HistoryService {
    source: Arc<dyn CandleSource>,
    cache: FileCache,
    retry_base_delay: Duration,
}

impl HistoryService {
    /// Create a history service over a candle source and cache.
    pub fn new(source: Arc<dyn CandleSource>, cache: FileCache) -> Self {
        Self {
            source,
            cache,
            retry_base_delay: RETRY_BASE_DELAY,
        }
    }

    /// Override the delay between retry attempts (tests).
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    /// OHLCV history for a symbol. Served from the disk cache when a
    /// fresh entry exists; otherwise fetched with up to three
    /// attempts. Empty when every attempt came back empty or failed.
    pub async fn candles(&self, symbol: &str, period: &str, interval: &str) -> Vec<Candle> {
        let key = format!("{}:{}:{}", symbol.to_uppercase(), period, interval);

        if let Some(cached) = self.cache.get::<Vec<Candle>>(&key, CACHE_TTL) {
            debug!("History cache hit for {}", key);
            return cached;
        }

        for attempt in 1..=MAX_ATTEMPTS {
            match self.source.fetch_candles(symbol, period, interval).await {
                Ok(candles) if !candles.is_empty() => {
                    self.cache.set(&key, &candles);
                    return candles;
                }
                Ok(_) => warn!(
                    "Empty history for {} (attempt {}/{})",
                    symbol, attempt, MAX_ATTEMPTS
                ),
                Err(e) => warn!(
                    "History fetch failed for {} (attempt {}/{}): {}",
                    symbol, attempt, MAX_ATTEMPTS, e
                ),
            }

            if attempt < MAX_ATTEMPTS {
                tokio::time::sleep(self.retry_base_delay * attempt).await;
            }
        }

        Vec::new()
    }
}
