//! Contract analysis API.
//!
//! - `POST /api/analyze`: multipart PDF upload (`file` field) or JSON `{contractText}`
//! - `GET /api/contracts`: stored master agreements, ascending by id
//! - `GET /api/health`: liveness

mod analyze;
mod contracts;
mod error;
mod router;

pub use error::ApiError;
pub use router::{RouterOptions, router};

use std::sync::Arc;

use axum::Json;
use clausecheck_pipeline::Pipeline;
use serde_json::{Value, json};

/// Shared handler state. Cloned per request; holds only `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
}

impl AppState {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

/// `GET /api/health`
async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}
