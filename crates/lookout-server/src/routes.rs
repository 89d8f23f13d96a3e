//! HTTP routes — webhook ingestion, query/export endpoints, history
//! administration, and the bundled viewer.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::{ConnectInfo, Path, Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::SecondsFormat;
use serde::Serialize;
use serde_json::json;

use lookout_core::{Alert, AlertStore};

use crate::ingest::{self, Classified};

/// Build the application router around a shared store handle.
pub fn router(store: Arc<AlertStore>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/assets/{*path}", get(asset))
        .route("/api/alerts", get(alerts_json))
        .route("/alerts", get(alerts_text))
        .route("/webhook", post(ingest_webhook))
        .route("/api/history/reload", post(reload_history))
        .route("/api/history/rotate", post(rotate_history))
        .layer(middleware::from_fn(log_requests))
        .with_state(store)
}

// ---------------------------------------------------------------------------
// Ingestion
// ---------------------------------------------------------------------------

async fn ingest_webhook(State(store): State<Arc<AlertStore>>, request: Request) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0);

    let body: Bytes = match axum::body::to_bytes(request.into_body(), usize::MAX).await {
        Ok(body) => body,
        Err(_) => return (StatusCode::BAD_REQUEST, "failed to read body").into_response(),
    };

    let classified = ingest::classify(&body);
    let parse_error = match &classified {
        Classified::Unparsed { error } => Some(error.clone()),
        Classified::Collector(payload) => {
            tracing::info!(
                "[SEV={}][ALERT={}] host={} exe={} auid={} tty={} audit={} pid={}",
                lookout_core::collector::classify_severity(payload),
                payload.alert,
                payload.host,
                payload.exe,
                payload.auid,
                payload.tty,
                payload.audit,
                payload.pid,
            );
            if !payload.text.trim().is_empty() {
                tracing::info!("  {}", payload.text);
            }
            None
        }
        Classified::Generic { .. } => None,
    };

    let mut alert = ingest::build_alert(classified, &body);
    if alert.src_ip.is_empty() {
        if let Some(peer) = peer {
            alert.src_ip = peer.ip().to_string();
        }
    }

    let id = store.append(alert);

    let mut response = json!({ "ok": true, "status": "stored", "id": id });
    if let Some(error) = parse_error {
        response["parse_error"] = error.into();
    }
    Json(response).into_response()
}

// ---------------------------------------------------------------------------
// Query / export
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct AlertsResponse {
    alerts: Vec<Alert>,
}

async fn alerts_json(State(store): State<Arc<AlertStore>>) -> Json<AlertsResponse> {
    Json(AlertsResponse {
        alerts: store.snapshot(),
    })
}

/// Line-oriented plain-text rendering, newest first.
async fn alerts_text(State(store): State<Arc<AlertStore>>) -> Response {
    let mut out = String::new();
    for alert in store.snapshot().iter().rev() {
        render_text_line(&mut out, alert);
    }
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], out).into_response()
}

fn render_text_line(out: &mut String, alert: &Alert) {
    let mut message = alert.text.trim();
    if message.is_empty() {
        message = alert.raw_text.trim();
    }
    if message.is_empty() && alert.raw.is_some() {
        message = "(raw json available)";
    }

    let severity = alert.severity.map(|s| s.to_string());

    out.push_str(&alert.received_at.to_rfc3339_opts(SecondsFormat::Secs, true));
    out.push_str(" [SEV=");
    out.push_str(or_dash(severity.as_deref().unwrap_or("")));
    out.push_str("][ALERT=");
    out.push_str(or_dash(&alert.alert_type));
    out.push_str("] host=");
    out.push_str(or_dash(&alert.host));
    for (key, value) in [
        ("exe", &alert.exe),
        ("auid", &alert.auid),
        ("euid", &alert.euid),
        ("tty", &alert.tty),
        ("audit", &alert.audit),
        ("pid", &alert.pid),
    ] {
        if !value.is_empty() {
            out.push(' ');
            out.push_str(key);
            out.push('=');
            out.push_str(value);
        }
    }
    if !message.is_empty() {
        out.push(' ');
        out.push_str(message);
    }
    out.push('\n');
}

fn or_dash(s: &str) -> &str {
    if s.trim().is_empty() {
        "-"
    } else {
        s
    }
}

// ---------------------------------------------------------------------------
// History administration
// ---------------------------------------------------------------------------

async fn reload_history(State(store): State<Arc<AlertStore>>) -> Response {
    match store.reload() {
        Ok(count) => Json(json!({ "status": "reloaded", "count": count })).into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("failed to reload: {err}"),
        )
            .into_response(),
    }
}

async fn rotate_history(State(store): State<Arc<AlertStore>>) -> Response {
    match store.rotate() {
        Ok(file_name) => {
            tracing::info!("history rotated to {file_name}");
            Json(json!({ "status": "rotated", "filename": file_name })).into_response()
        }
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("failed to rotate: {err}"),
        )
            .into_response(),
    }
}

// ---------------------------------------------------------------------------
// Viewer
// ---------------------------------------------------------------------------

const INDEX_HTML: &str = include_str!("../assets/index.html");
const APP_JS: &str = include_str!("../assets/app.js");
const STYLE_CSS: &str = include_str!("../assets/style.css");

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn asset(Path(path): Path<String>) -> Response {
    match path.as_str() {
        "app.js" => (
            [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
            APP_JS,
        )
            .into_response(),
        "style.css" => ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLE_CSS).into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

// ---------------------------------------------------------------------------
// Request logging
// ---------------------------------------------------------------------------

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let start = Instant::now();
    let response = next.run(request).await;
    tracing::debug!("{} {} ({:?})", method, path, start.elapsed());
    response
}
