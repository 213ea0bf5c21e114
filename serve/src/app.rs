//! Axum app: state, config and router.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use docintel::DocIntelligence;

use super::handlers::{ask, index, upload};

/// Server limits.
#[derive(Debug, Clone)]
pub struct ServeConfig {
    /// Largest accepted request body, in bytes (applies to uploads).
    pub max_upload_bytes: usize,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: 20 * 1024 * 1024,
        }
    }
}

/// Builds ServeConfig from environment variables, falling back to [`Default`] for unset or
/// invalid values.
///
/// - `DOCINTEL_MAX_UPLOAD_BYTES` (default 20 MiB)
pub fn serve_config_from_env() -> ServeConfig {
    let default = ServeConfig::default();
    ServeConfig {
        max_upload_bytes: std::env::var("DOCINTEL_MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|n| *n > 0)
            .unwrap_or(default.max_upload_bytes),
    }
}

/// Shared state: the service is cheap to clone, one per request.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) service: DocIntelligence,
}

/// Builds the router: `GET /`, `POST /upload`, `POST /ask`.
pub fn router(service: DocIntelligence, config: ServeConfig) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/upload", post(upload))
        .route("/ask", post(ask))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .with_state(AppState { service })
}
