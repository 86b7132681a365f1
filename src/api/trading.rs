use crate::error::Result;
use crate::types::{NewTrade, PositionSync};
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RecordedResponse {
    pub status: &'static str,
    pub id: i64,
}

/// POST /record_trade - append a filled trade to the ledger.
async fn record_trade(
    State(state): State<AppState>,
    Json(trade): Json<NewTrade>,
) -> Result<Json<RecordedResponse>> {
    let id = state.ledger.record_trade(&trade)?;

    Ok(Json(RecordedResponse {
        status: "recorded",
        id,
    }))
}

#[derive(Debug, Serialize)]
pub struct SyncedResponse {
    pub status: &'static str,
    pub count: usize,
}

/// POST /sync_positions - replace the position snapshot wholesale.
async fn sync_positions(
    State(state): State<AppState>,
    Json(positions): Json<Vec<PositionSync>>,
) -> Result<Json<SyncedResponse>> {
    let count = state.ledger.replace_positions(&positions)?;

    Ok(Json(SyncedResponse {
        status: "synced",
        count,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/record_trade", post(record_trade))
        .route("/sync_positions", post(sync_positions))
}
