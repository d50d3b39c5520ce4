//! Liveness and database health handlers

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::warn;

use crate::AppState;

/// Most collection names reported by the health check
const MAX_LISTED_COLLECTIONS: usize = 10;

#[derive(Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct HealthReport {
    pub backend: &'static str,
    pub database: &'static str,
    pub collections: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Static liveness message
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Portfolio Backend Running",
    })
}

/// Backend and database status. Probe failures are reported in the
/// body; this handler never returns an error status.
pub async fn test_database(State(state): State<AppState>) -> Json<HealthReport> {
    let mut report = HealthReport {
        backend: "ok",
        database: "disconnected",
        collections: Vec::new(),
        error: None,
    };

    if let Some(store) = state.db.as_ref() {
        report.database = "connected";

        match store.list_collection_names().await {
            Ok(mut names) => {
                names.truncate(MAX_LISTED_COLLECTIONS);
                report.collections = names;
            }
            Err(e) => {
                warn!(error = %e, "Listing collections failed");
                report.error = Some(e.to_string());
            }
        }
    }

    Json(report)
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::{app_with, disconnected_app, get, UnreachableStore};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;
    use bson::doc;
    use portfolio_common::db::{DocumentStore, MemoryStore};
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_root() {
        let (status, body) = get(disconnected_app(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Portfolio Backend Running" }));
    }

    #[tokio::test]
    async fn test_disconnected() {
        let (status, body) = get(disconnected_app(), "/test").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "backend": "ok", "database": "disconnected", "collections": [] })
        );
    }

    #[tokio::test]
    async fn test_connected_lists_collections() {
        let store = Arc::new(MemoryStore::new());
        store.insert_one("skill", doc! { "name": "Rust", "level": 90 }).await.unwrap();
        store.insert_one("project", doc! { "title": "Folio" }).await.unwrap();

        let (status, body) = get(app_with(store), "/test").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["database"], "connected");
        assert_eq!(body["collections"], json!(["project", "skill"]));
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn test_collections_capped_at_ten() {
        let store = Arc::new(MemoryStore::new());
        for i in 0..12 {
            store.insert_one(&format!("c{i:02}"), doc! {}).await.unwrap();
        }

        let (_, body) = get(app_with(store), "/test").await;
        assert_eq!(body["collections"].as_array().unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_probe_failure_reported_inline() {
        let (status, body) = get(app_with(Arc::new(UnreachableStore)), "/test").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["backend"], "ok");
        assert_eq!(body["database"], "connected");
        assert_eq!(body["collections"], json!([]));
        assert!(body["error"].as_str().unwrap().contains("store unreachable"));
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let request = Request::builder()
            .uri("/")
            .header("origin", "https://portfolio.example")
            .body(Body::empty())
            .unwrap();
        let response = disconnected_app().oneshot(request).await.unwrap();
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }
}
