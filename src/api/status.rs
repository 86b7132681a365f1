use crate::error::{AppError, Result};
use crate::AppState;
use axum::{
    extract::{Query, State},
    response::Html,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

/// Status response: liveness, ledger counts and the active market-data
/// source.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub running: bool,
    pub positions: i64,
    pub trades: i64,
    pub data_source: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    token: Option<String>,
}

/// GET /status
async fn get_status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Json<StatusResponse> {
    let live = state.config.finnhub_key(query.token.as_deref()).is_some();
    let data_source = if live {
        "Live (Finnhub)"
    } else {
        "Delayed (Yahoo Finance)"
    };

    Json(StatusResponse {
        running: true,
        positions: state.ledger.position_count(),
        trades: state.ledger.trade_count(),
        data_source: data_source.to_string(),
    })
}

/// GET / - the static frontend, when deployed next to the server.
async fn frontend(State(state): State<AppState>) -> Result<Html<String>> {
    match tokio::fs::read_to_string(&state.config.frontend_path).await {
        Ok(contents) => Ok(Html(contents)),
        Err(_) => Err(AppError::NotFound("frontend file not found".to_string())),
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(frontend))
        .route("/status", get(get_status))
}
