//! Shared fixtures: a migrated SQLite file in a temp dir and the app on top of it.

#![allow(dead_code)]

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use grocery_store_api::api::create_router;
use grocery_store_api::config::DatabaseConfig;
use grocery_store_api::db::{AsyncDbPool, establish_async_connection_pool, run_pending_migrations};
use grocery_store_api::repositories::CustomerRepository;
use grocery_store_api::services::CustomerService;
use grocery_store_api::state::AppState;
use tempfile::TempDir;
use tower::ServiceExt;

pub struct TestDb {
    // Keeps the database file alive for the test's duration
    _dir: TempDir,
    pub url: String,
    pub pool: AsyncDbPool,
}

impl TestDb {
    pub async fn new() -> Self {
        Self::with_max_connections(2).await
    }

    pub async fn with_max_connections(max_connections: u32) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let url = format!("sqlite://{}", dir.path().join("grocery.db").display());
        run_pending_migrations(&url).await.expect("run migrations");

        let config = DatabaseConfig {
            url: url.clone(),
            max_connections,
            min_connections: 1,
            ..DatabaseConfig::default()
        };
        let pool = establish_async_connection_pool(&config)
            .await
            .expect("build pool");

        Self { _dir: dir, url, pool }
    }

    pub fn repository(&self) -> CustomerRepository {
        CustomerRepository::new(self.pool.clone())
    }

    pub fn service(&self) -> CustomerService {
        CustomerService::new(self.repository())
    }

    pub fn router(&self) -> Router {
        create_router(AppState::new(self.pool.clone()), Duration::from_secs(5))
    }
}

pub async fn send(router: &Router, request: Request<Body>) -> Response<Body> {
    router.clone().oneshot(request).await.expect("request failed")
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn with_method(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn put_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("response body is JSON")
}
