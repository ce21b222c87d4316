use axum::routing::post;
use axum::Router;

use crate::handlers::{method_not_allowed, upload};
use crate::state::AppState;

/// Upload routes.
///
/// ```text
/// POST   /upload              -> upload_file
/// POST   /upload/signed-url   -> signed_upload_url
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/upload",
            post(upload::upload_file).fallback(method_not_allowed),
        )
        .route(
            "/upload/signed-url",
            post(upload::signed_upload_url).fallback(method_not_allowed),
        )
}
