//! Local JSON API over the dashboard store.

pub mod handlers;
pub mod models;
pub mod routes;

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::companion::Companion;
use crate::store::DashboardStore;

pub use routes::create_router;

/// Shared by every request handler. Each store action runs under the lock,
/// on the blocking pool.
#[derive(Clone)]
pub struct AppContext {
    pub store: Arc<Mutex<DashboardStore>>,
    pub companion: Arc<dyn Companion>,
}

impl AppContext {
    pub fn new(store: DashboardStore, companion: Arc<dyn Companion>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            companion,
        }
    }
}

/// Serve the API on localhost until the process is stopped.
pub async fn serve(ctx: AppContext, port: u16) -> Result<()> {
    let app = create_router(ctx);

    let addr = format!("127.0.0.1:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("API server listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
