//! Static health-check page served next to the bot.

use std::net::SocketAddr;

use axum::{response::Html, routing::get, Router};
use tokio::net::TcpListener;
use tracing::info;

const PAGE: &str = "<!doctype html><title>fixbot</title><p>fixbot is running</p>";

pub fn app() -> Router {
    Router::new().route("/", get(|| async { Html(PAGE) }))
}

/// Bind `0.0.0.0:<port>` and serve until the process exits.
pub async fn serve(port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    serve_on(listener).await
}

pub async fn serve_on(listener: TcpListener) -> anyhow::Result<()> {
    info!(addr = %listener.local_addr()?, "health endpoint listening");
    axum::serve(listener, app()).await?;
    Ok(())
}
