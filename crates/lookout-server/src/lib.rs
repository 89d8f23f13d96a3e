//! lookout-server — the HTTP boundary.
//!
//! Exposes the ingestion pipeline and the axum router; [`serve`] binds and
//! runs the server around a shared [`AlertStore`](lookout_core::AlertStore)
//! handle.

use std::net::SocketAddr;
use std::sync::Arc;

use lookout_core::AlertStore;

pub mod ingest;
pub mod routes;

pub use routes::router;

/// Bind `addr` (a `host:port` string) and serve until the task is stopped.
pub async fn serve(addr: &str, store: Arc<AlertStore>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    tracing::info!("alert webhook receiver listening on {local}");
    tracing::info!("POST alerts to http://<ip>:{}/webhook", local.port());

    let app = router(store).into_make_service_with_connect_info::<SocketAddr>();
    axum::serve(listener, app).await?;
    Ok(())
}
