//! API errors and their JSON bodies.
//!
//! Every failure is a 500. Analyze failures carry `{error, details}`, where
//! `details` is the full cause chain; listing failures carry `{error}` only.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use clausecheck_pipeline::PipelineError;
use clausecheck_store::StoreError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AnalyzeErrorBody {
    pub error: String,
    pub details: String,
}

#[derive(Debug, Serialize)]
pub struct ListErrorBody {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Analysis(#[from] PipelineError),

    #[error("Invalid request body")]
    InvalidBody(String),

    #[error("Failed to fetch contracts: {0}")]
    Listing(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        match &self {
            ApiError::Listing(e) => {
                tracing::error!(error = %e, "listing contracts failed");
                let body = ListErrorBody {
                    error: e.to_string(),
                };
                (status, Json(body)).into_response()
            }
            ApiError::Analysis(e) => {
                let details = error_chain(&self);
                tracing::error!(
                    kind = e.kind(),
                    stage = %e.stage(),
                    details = %details,
                    "analysis failed"
                );
                let body = AnalyzeErrorBody {
                    error: self.to_string(),
                    details,
                };
                (status, Json(body)).into_response()
            }
            ApiError::InvalidBody(reason) => {
                tracing::error!(reason = %reason, "analysis request rejected");
                let body = AnalyzeErrorBody {
                    error: self.to_string(),
                    details: reason.clone(),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}

/// Render an error and its sources as `outer: inner: ...`, skipping sources
/// whose text the previous level already includes.
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(e) = source {
        let msg = e.to_string();
        if !parts.last().is_some_and(|prev| prev.contains(&msg)) {
            parts.push(msg);
        }
        source = e.source();
    }
    parts.join(": ")
}
