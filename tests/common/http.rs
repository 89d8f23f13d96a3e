//! In-process HTTP helpers: build a router over a temp-backed store and
//! drive it with `tower::ServiceExt::oneshot`.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::connect_info::ConnectInfo;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;

use lookout::AlertStore;

/// A router over a fresh temp-backed store. Keep the `TempDir` alive for
/// the duration of the test.
pub fn test_router(capacity: usize) -> (TempDir, Arc<AlertStore>, Router) {
    let (dir, store) = super::builders::temp_store(capacity);
    let store = Arc::new(store);
    let router = lookout::router(store.clone());
    (dir, store, router)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("build request")
}

pub fn post(uri: &str, body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::from(body.into()))
        .expect("build request")
}

/// A POST carrying the client socket address, the way the real server's
/// `into_make_service_with_connect_info` does.
pub fn post_from(uri: &str, body: impl Into<String>, peer: SocketAddr) -> Request<Body> {
    let mut request = post(uri, body);
    request.extensions_mut().insert(ConnectInfo(peer));
    request
}

pub async fn body_text(response: Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let text = body_text(response).await;
    serde_json::from_str(&text).expect("JSON body")
}
