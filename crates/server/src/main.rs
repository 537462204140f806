use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use server::{build_router, config::load_settings, AppState};
use server_api::{ApiContext, TaskStore};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = load_settings()?;
    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .init();

    let api = ApiContext {
        tasks: TaskStore::new(),
        max_page_size: settings.max_page_size,
    };
    let app = build_router(Arc::new(AppState { api }));

    let addr: SocketAddr = settings
        .server_bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.server_bind))?;
    info!(%addr, max_page_size = settings.max_page_size, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
