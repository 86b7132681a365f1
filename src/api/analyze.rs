use crate::error::{AppError, Result};
use crate::services::strategy;
use crate::types::{QuoteSource, Signal};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

/// History window backing an analysis request.
const ANALYZE_RANGE: &str = "3mo";
const ANALYZE_INTERVAL: &str = "1d";

fn default_strategy() -> String {
    "momentum".to_string()
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeQuery {
    #[serde(default = "default_strategy")]
    strategy: String,
    token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub symbol: String,
    pub price: f64,
    pub source: QuoteSource,
    pub signal: Signal,
    pub strategy: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
}

/// GET /analyze/:symbol - current price plus a strategy signal. 404
/// when no source produced a price; an empty history degrades to
/// HOLD rather than an error.
async fn analyze_symbol(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<AnalyzeQuery>,
) -> Result<Json<AnalyzeResponse>> {
    let key = state.config.finnhub_key(query.token.as_deref());
    let quote = state
        .resolver
        .resolve(&symbol, key)
        .await
        .ok_or_else(|| AppError::NotFound("Symbol not found".to_string()))?;

    let candles = state
        .history
        .candles(&symbol, ANALYZE_RANGE, ANALYZE_INTERVAL)
        .await;
    let verdict = strategy::derive_signal(&candles, &query.strategy);

    Ok(Json(AnalyzeResponse {
        symbol: quote.symbol,
        price: quote.price,
        source: quote.source,
        signal: verdict.signal,
        strategy: query.strategy,
        reason: verdict.reason,
        rsi: verdict.rsi,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/analyze/:symbol", get(analyze_symbol))
}
