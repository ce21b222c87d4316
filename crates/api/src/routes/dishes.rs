//! Route definitions for the dish catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::{dishes, method_not_allowed};
use crate::state::AppState;

/// Dish routes.
///
/// ```text
/// GET    /dishes              -> list
/// POST   /dishes              -> create
/// GET    /dishes/search       -> search
/// GET    /dishes/{id}         -> get_by_id
/// PUT    /dishes/{id}         -> update
/// DELETE /dishes/{id}         -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/dishes",
            get(dishes::list)
                .post(dishes::create)
                .fallback(method_not_allowed),
        )
        .route(
            "/dishes/search",
            get(dishes::search).fallback(method_not_allowed),
        )
        .route(
            "/dishes/{id}",
            get(dishes::get_by_id)
                .put(dishes::update)
                .delete(dishes::delete)
                .fallback(method_not_allowed),
        )
}
