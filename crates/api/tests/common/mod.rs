#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use gadget_core::types::ProductId;
use gadget_db::models::product::{CreateProduct, Product, UpdateProduct};
use gadget_db::store::{MemoryProductStore, ProductStore};
use gadget_db::StoreError;
use http_body_util::BodyExt;
use tower::ServiceExt;

use gadget_api::config::{
    ConnectMode, CorsPolicy, ServerConfig, StoreBackend, DEFAULT_ALLOWED_ORIGINS,
};
use gadget_api::router::build_app_router;
use gadget_api::state::AppState;

/// Build a test `ServerConfig` with the in-memory store and the default
/// origin allow-list.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        store: StoreBackend::Memory,
        connect_mode: ConnectMode::Lazy,
        cors: CorsPolicy::AllowList(DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect()),
        request_timeout_secs: 30,
    }
}

/// Build the full application router around a fresh in-memory store.
pub fn build_test_app() -> Router {
    build_test_app_with(Arc::new(MemoryProductStore::new()), test_config())
}

/// Build the full application router around the given store and config.
///
/// Uses the same builder as `main.rs`, so tests exercise the production
/// middleware stack (origin guard, CORS, request ID, timeout, tracing).
pub fn build_test_app_with(store: Arc<dyn ProductStore>, config: ServerConfig) -> Router {
    build_app_router(AppState::new(store, config))
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_with_origin(app: Router, uri: &str, origin: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("Origin", origin)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, json).await
}

pub async fn put_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, json).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    json: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// A store whose every operation fails as if the database were unreachable.
pub struct UnreachableStore;

fn unreachable() -> StoreError {
    StoreError::Unavailable(Arc::new(sqlx::Error::PoolTimedOut))
}

#[async_trait]
impl ProductStore for UnreachableStore {
    async fn init(&self) -> Result<(), StoreError> {
        Err(unreachable())
    }

    async fn shutdown(&self) {}

    fn is_connected(&self) -> bool {
        false
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Err(unreachable())
    }

    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        Err(unreachable())
    }

    async fn find_by_id(&self, _id: ProductId) -> Result<Option<Product>, StoreError> {
        Err(unreachable())
    }

    async fn create(&self, _input: &CreateProduct) -> Result<Product, StoreError> {
        Err(unreachable())
    }

    async fn update(
        &self,
        _id: ProductId,
        _input: &UpdateProduct,
    ) -> Result<Option<Product>, StoreError> {
        Err(unreachable())
    }

    async fn delete(&self, _id: ProductId) -> Result<bool, StoreError> {
        Err(unreachable())
    }
}
