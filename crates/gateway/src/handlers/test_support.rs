//! Helpers for driving the router in-process

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use bson::Document;
use portfolio_common::{
    db::{DocumentStore, SharedStore},
    errors::{AppError, Result},
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use crate::{create_router, AppState};

/// A store whose every operation fails, as if the server went away
pub struct UnreachableStore;

fn unreachable() -> AppError {
    let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "store unreachable");
    AppError::from(mongodb::error::Error::from(io))
}

#[async_trait]
impl DocumentStore for UnreachableStore {
    async fn insert_one(&self, _collection: &str, _document: Document) -> Result<String> {
        Err(unreachable())
    }

    async fn find_all(&self, _collection: &str) -> Result<Vec<Document>> {
        Err(unreachable())
    }

    async fn list_collection_names(&self) -> Result<Vec<String>> {
        Err(unreachable())
    }

    fn backend(&self) -> &'static str {
        "unreachable"
    }
}

/// Router backed by `store`
pub fn app_with<S: DocumentStore + 'static>(store: Arc<S>) -> Router {
    let db: SharedStore = store;
    create_router(AppState { db: Some(db) })
}

/// Router started without a database
pub fn disconnected_app() -> Router {
    create_router(AppState { db: None })
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap();
    send(app, request).await
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
