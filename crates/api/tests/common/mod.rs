#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use cookorder_api::config::{DatabaseConfig, ServerConfig, StorageConfig};
use cookorder_api::router::build_app_router;
use cookorder_api::state::AppState;
use cookorder_storage::MemoryObjectStore;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_BUCKET: &str = "menu-photos";

/// Boundary used by [`MultipartBody`].
const BOUNDARY: &str = "cookorder-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
///
/// The database section is unused: tests hand the router a pool directly.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        signed_url_ttl_secs: 900,
        database: DatabaseConfig {
            host: "localhost".to_string(),
            port: 5432,
            user: "test".to_string(),
            password: String::new(),
            database: "test".to_string(),
        },
        storage: StorageConfig {
            bucket: TEST_BUCKET.to_string(),
            endpoint: None,
            region: "auto".to_string(),
            access_key_id: None,
            secret_access_key: None,
        },
    }
}

/// Build the full application router over the given pool and an in-memory
/// bucket. The bucket is returned so tests can inspect uploads.
pub fn build_test_app(pool: PgPool) -> (Router, Arc<MemoryObjectStore>) {
    let config = test_config();
    let store = Arc::new(MemoryObjectStore::new(TEST_BUCKET));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        storage: store.clone(),
    };

    (build_app_router(state, &config), store)
}

/// Send a GET request to the app and return the response.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a DELETE request to the app and return the response.
pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a JSON body with the given method.
pub async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a multipart form with the given method.
pub async fn send_multipart(
    app: Router,
    method: Method,
    uri: &str,
    form: MultipartBody,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(form.finish()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect the response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Builder for `multipart/form-data` request bodies.
#[derive(Default)]
pub struct MultipartBody {
    buf: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, content_type: &str, data: &[u8]) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.buf.extend_from_slice(data);
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    fn finish(mut self) -> Vec<u8> {
        self.buf
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.buf
    }
}

/// Form for a valid dish with a small JPEG photo.
pub fn dish_form(name_ja: &str, name_en: &str, price: &str) -> MultipartBody {
    MultipartBody::new()
        .text("nameJa", name_ja)
        .text("nameEn", name_en)
        .text("price", price)
        .file("photo", "curry.jpg", "image/jpeg", b"\xFF\xD8\xFFfake-jpeg")
}

/// Create a dish through the API and return its id.
pub async fn create_dish(app: &Router, name_ja: &str, name_en: &str, price: &str) -> String {
    let response = send_multipart(
        app.clone(),
        Method::POST,
        "/dishes",
        dish_form(name_ja, name_en, price),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_str().unwrap().to_string()
}
