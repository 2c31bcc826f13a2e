mod common;

use axum::body::Body;
use http::{Request, StatusCode};
use tower::ServiceExt;

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = common::test_app().await;
    let (status, body) = get(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"ok");
}

#[tokio::test]
async fn test_stats_start_empty() {
    let app = common::test_app().await;
    let (status, body) = get(app, "/stats").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["rooms"], 0);
    assert_eq!(json["occupants"], 0);
    assert_eq!(json["waiting"], 0);
}

#[tokio::test]
async fn test_index_page_served() {
    let app = common::test_app().await;
    let (status, body) = get(app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, common::INDEX_HTML.as_bytes());
}

#[tokio::test]
async fn test_static_file_served() {
    let app = common::test_app().await;
    let (status, body) = get(app, "/static/script.js").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, common::SCRIPT_JS.as_bytes());
}

#[tokio::test]
async fn test_missing_static_file() {
    let app = common::test_app().await;
    let (status, _) = get(app, "/static/nope.js").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_not_found() {
    let app = common::test_app().await;
    let (status, _) = get(app, "/nonexistent").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
