use crate::services::analysis;
use crate::types::Candle;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};

fn default_period() -> String {
    "1mo".to_string()
}

fn default_interval() -> String {
    "1h".to_string()
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_period")]
    period: String,
    #[serde(default = "default_interval")]
    interval: String,
}

/// One history bar with its indicator values, shaped for the frontend
/// chart. Indicator keys are omitted inside their warm-up windows.
#[derive(Debug, Serialize)]
pub struct HistoryPoint {
    pub t: String,
    pub o: f64,
    pub h: f64,
    pub l: f64,
    pub c: f64,
    pub v: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sma20: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sma50: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macd: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hist: Option<f64>,
}

/// Join candles with their indicator series.
pub fn to_points(candles: &[Candle]) -> Vec<HistoryPoint> {
    let series = analysis::indicator_series(candles);

    candles
        .iter()
        .enumerate()
        .map(|(i, candle)| HistoryPoint {
            t: Utc
                .timestamp_opt(candle.time, 0)
                .single()
                .map(|dt| dt.to_rfc3339())
                .unwrap_or_else(|| candle.time.to_string()),
            o: candle.open,
            h: candle.high,
            l: candle.low,
            c: candle.close,
            v: candle.volume as i64,
            sma20: series.sma20[i],
            sma50: series.sma50[i],
            rsi: series.rsi[i],
            macd: series.macd[i],
            signal: series.macd_signal[i],
            hist: series.macd_hist[i],
        })
        .collect()
}

/// GET /history/:symbol - candle history with indicators. An empty
/// history serializes as `[]` to spare the frontend error handling.
async fn get_history(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Json<Vec<HistoryPoint>> {
    let candles = state
        .history
        .candles(&symbol, &query.period, &query.interval)
        .await;

    Json(to_points(&candles))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/history/:symbol", get(get_history))
}
