//! Server lifecycle
//!
//! The listener is bound before storage is opened, and storage is closed
//! once serving stops, whatever the outcome.

use std::{future::Future, net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use tokio::net::TcpListener;

use tldrfeed::FeedRepository;

use crate::{router, AppState};

/// Bind `addr`, open storage with `connect`, serve until `shutdown` resolves
pub async fn run<C, Fut, S>(
    addr: SocketAddr,
    indent_json: bool,
    connect: C,
    shutdown: S,
) -> Result<()>
where
    C: FnOnce() -> Fut,
    Fut: Future<Output = Result<Arc<dyn FeedRepository>>>,
    S: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    let local_addr = listener.local_addr().context("Failed to read bound address")?;

    let repo = connect().await?;
    let app = router(AppState::new(Arc::clone(&repo), indent_json));

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ tldrfeed API listening on {}", local_addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await;

    repo.close().await;

    served.context("Server error")
}
