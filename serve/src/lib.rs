//! HTTP server for docintel (axum).
//!
//! Listens on http://127.0.0.1:8000 by default and serves `GET /`, `POST /upload` and
//! `POST /ask` over a shared [`docintel::DocIntelligence`].
//!
//! **Public API**: [`run_serve`], [`run_serve_on_listener`], [`router`], [`ServeConfig`].

mod app;
mod handlers;
mod response;

use tokio::net::TcpListener;
use tracing::info;

use docintel::DocIntelligence;

pub use app::{router, serve_config_from_env, ServeConfig};
pub use response::ApiError;

/// Listen address when neither `--addr` nor `DOCINTEL_ADDR` is given.
pub const DEFAULT_ADDR: &str = "127.0.0.1:8000";

/// Runs the server on an existing listener until `shutdown` resolves. Used by tests
/// (bind to 127.0.0.1:0 then pass the listener).
pub async fn run_serve_on_listener<F>(
    listener: TcpListener,
    service: DocIntelligence,
    config: ServeConfig,
    shutdown: F,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!("docintel listening on http://{}", addr);
    axum::serve(listener, router(service, config))
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("server stopped");
    Ok(())
}

/// Runs the server on `addr` (default `DOCINTEL_ADDR`, then [`DEFAULT_ADDR`]) until Ctrl-C.
pub async fn run_serve(
    addr: Option<&str>,
    service: DocIntelligence,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = addr
        .map(str::to_string)
        .or_else(|| std::env::var("DOCINTEL_ADDR").ok())
        .unwrap_or_else(|| DEFAULT_ADDR.to_string());
    let listener = TcpListener::bind(&addr).await?;
    run_serve_on_listener(listener, service, serve_config_from_env(), async {
        let _ = tokio::signal::ctrl_c().await;
        info!("ctrl-c received, shutting down");
    })
    .await
}
