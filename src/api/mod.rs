pub mod analyze;
pub mod history;
pub mod status;
pub mod trading;

use crate::AppState;
use axum::Router;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(status::router())
        .merge(analyze::router())
        .merge(history::router())
        .merge(trading::router())
}
