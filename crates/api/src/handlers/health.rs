//! Dependency health for load balancers and operators.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Key looked up in the bucket to confirm the backend answers. It does not
/// need to exist: a "not found" reply still proves reachability.
const HEALTH_OBJECT_KEY: &str = ".cookorder-health";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Reachability {
    Up,
    Down,
}

impl Reachability {
    fn from_result<T, E: std::fmt::Display>(dependency: &str, result: Result<T, E>) -> Self {
        match result {
            Ok(_) => Self::Up,
            Err(e) => {
                tracing::warn!(dependency, error = %e, "Health check failed");
                Self::Down
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    /// `ok` when every dependency is up, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub database: Reachability,
    pub storage: Reachability,
    /// Photo bucket the storage check ran against.
    pub bucket: String,
}

/// GET /health
///
/// Checks the database and the photo bucket concurrently. Responds 200 when
/// both answer and 503 otherwise; the body is the same report either way.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let (db, storage) = tokio::join!(
        cookorder_db::health_check(&state.pool),
        state.storage.exists(HEALTH_OBJECT_KEY),
    );

    let database = Reachability::from_result("database", db);
    let storage = Reachability::from_result("storage", storage);

    let healthy = database == Reachability::Up && storage == Reachability::Up;
    let (code, status) = if healthy {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        code,
        Json(HealthReport {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database,
            storage,
            bucket: state.storage.bucket().to_string(),
        }),
    )
}
