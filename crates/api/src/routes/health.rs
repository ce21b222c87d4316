use axum::routing::get;
use axum::Router;

use crate::handlers::{health, method_not_allowed};
use crate::state::AppState;

/// ```text
/// GET    /health              -> health
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/health",
        get(health::health).fallback(method_not_allowed),
    )
}
