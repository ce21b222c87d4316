pub mod dishes;
pub mod health;
pub mod upload;

use axum::extract::DefaultBodyLimit;
use axum::Router;

use crate::multipart::MAX_FORM_BYTES;
use crate::state::AppState;

/// Build the API route tree.
///
/// Route hierarchy:
///
/// ```text
/// /dishes                  list, create (multipart)
/// /dishes/search?name=     search by name
/// /dishes/{id}             get, update (multipart), delete
///
/// /upload                  raw file upload (multipart)
/// /upload/signed-url       signed PUT URL for direct photo upload
/// ```
///
/// Multipart routes accept bodies up to [`MAX_FORM_BYTES`].
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(dishes::router())
        .merge(upload::router())
        .layer(DefaultBodyLimit::max(MAX_FORM_BYTES))
}
