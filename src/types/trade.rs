use serde::{Deserialize, Serialize};

fn default_strategy() -> String {
    "manual".to_string()
}

/// Request body for recording a filled trade.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTrade {
    pub symbol: String,
    /// BUY / SELL
    pub side: String,
    pub qty: f64,
    pub price: f64,
    #[serde(default = "default_strategy")]
    pub strategy: String,
    #[serde(default)]
    pub pnl: Option<f64>,
    #[serde(default)]
    pub fee: f64,
}

/// One persisted trade row.
#[derive(Debug, Clone, Serialize)]
pub struct TradeRecord {
    pub id: i64,
    pub symbol: String,
    pub side: String,
    pub qty: f64,
    pub price: f64,
    /// Fill time, epoch milliseconds.
    pub timestamp: i64,
    pub strategy: String,
    pub pnl: Option<f64>,
    pub fee: f64,
}

/// Position snapshot pushed by the frontend on sync.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionSync {
    pub symbol: String,
    pub qty: f64,
    pub avg_price: f64,
}

/// One persisted position row.
#[derive(Debug, Clone, Serialize)]
pub struct Position {
    pub symbol: String,
    pub qty: f64,
    pub avg_price: f64,
    /// Last sync time, epoch milliseconds.
    pub timestamp: i64,
}
