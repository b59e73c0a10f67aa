use std::path::PathBuf;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::{AppState, analyze, contracts, health};

/// Transport-level knobs for [`router`].
#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Largest accepted request body, in bytes.
    pub max_upload_bytes: usize,
    /// Directory served for non-API paths, if any.
    pub static_dir: Option<PathBuf>,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            max_upload_bytes: 20 * 1024 * 1024,
            static_dir: None,
        }
    }
}

/// Build the application router.
pub fn router(state: AppState, options: RouterOptions) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new()
        .route("/api/health", get(health))
        .route("/api/analyze", post(analyze::analyze))
        .route("/api/contracts", get(contracts::list))
        .layer(DefaultBodyLimit::max(options.max_upload_bytes))
        .with_state(state);

    if let Some(dir) = options.static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(TraceLayer::new_for_http()).layer(cors)
}
