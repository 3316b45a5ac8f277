//! HTTP-level tests for the workspace content RPC surface, driven against
//! the in-memory storage backend via `tower::ServiceExt::oneshot`.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use std::sync::Arc;
use stowage_api::setup::routes::setup_routes;
use stowage_api::state::AppState;
use stowage_core::{Config, StorageBackend};
use stowage_storage::{InMemoryPresignedAccess, PresignedAccess};
use tower::ServiceExt;

fn test_app() -> (Arc<InMemoryPresignedAccess>, Router) {
    let storage = Arc::new(InMemoryPresignedAccess::new("test-ws"));
    let bucket = storage.bucket("u1");
    storage.put_object(&bucket, "workspaces/w1/full-backup.tar", 1024);
    storage.put_object(&bucket, "workspaces/w1/trail-0", 64);
    storage.put_object(&bucket, "workspaces/w1/snapshot-a.tar", 512);
    storage.put_object(&bucket, "workspaces/w2/full-backup.tar", 1024);

    let config = Config::for_testing(StorageBackend::Memory, "test-ws");
    let state = Arc::new(AppState::new(
        config.clone(),
        storage.clone() as Arc<dyn PresignedAccess>,
    ));
    let router = setup_routes(&config, state).expect("router setup");

    (storage, router)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn download_url_returns_url_payload() {
    let (_storage, app) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/workspaces/u1/w1/download-url")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["url"].as_str().is_some_and(|url| !url.is_empty()));
}

#[tokio::test]
async fn download_url_for_missing_workspace_is_404() {
    let (_storage, app) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/workspaces/u1/missing/download-url")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn delete_with_snapshots_clears_workspace() {
    let (storage, app) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/v1/workspaces/u1/w1?include_snapshots=true")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let bucket = storage.bucket("u1");
    assert_eq!(
        storage.object_keys(&bucket),
        vec!["workspaces/w2/full-backup.tar".to_string()]
    );
}

#[tokio::test]
async fn delete_without_snapshots_keeps_snapshot_objects() {
    let (storage, app) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/v1/workspaces/u1/w1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let bucket = storage.bucket("u1");
    assert_eq!(
        storage.object_keys(&bucket),
        vec![
            "workspaces/w1/snapshot-a.tar".to_string(),
            "workspaces/w2/full-backup.tar".to_string(),
        ]
    );
}

#[tokio::test]
async fn repeated_delete_is_404() {
    let (_storage, app) = test_app();

    let first = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/v1/workspaces/u1/w1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::NO_CONTENT);

    let second = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/v1/workspaces/u1/w1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_reports_backend() {
    let (_storage, app) = test_app();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["storage_backend"], "memory");
}
