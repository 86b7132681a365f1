use std::env;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Finnhub API key for real-time equity quotes. A per-request
    /// token overrides it.
    pub finnhub_api_key: Option<String>,
    /// Path to the SQLite trade ledger.
    pub database_path: String,
    /// Directory for the disk-backed candle cache.
    pub cache_dir: String,
    /// Static frontend file served at `/`.
    pub frontend_path: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            finnhub_api_key: env::var("FINNHUB_KEY").ok(),
            database_path: env::var("DATABASE_PATH").unwrap_or_else(|_| "trades.db".to_string()),
            cache_dir: env::var("CACHE_DIR").unwrap_or_else(|_| ".vantage_cache".to_string()),
            frontend_path: env::var("FRONTEND_FILE")
                .unwrap_or_else(|_| "dashboard.html".to_string()),
        }
    }

    /// The effective Finnhub key for one request: an explicit token
    /// wins over the configured key.
    pub fn finnhub_key<'a>(&'a self, token: Option<&'a str>) -> Option<&'a str> {
        token
            .filter(|t| !t.is_empty())
            .or(self.finnhub_api_key.as_deref())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
