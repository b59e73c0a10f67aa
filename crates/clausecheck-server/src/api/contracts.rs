//! `GET /api/contracts`: list stored master agreements.

use axum::Json;
use axum::extract::State;
use clausecheck_core::AgreementRecord;

use super::{ApiError, AppState};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<AgreementRecord>>, ApiError> {
    let records = state.pipeline.store().list().await?;
    tracing::debug!(count = records.len(), "listed contracts");
    Ok(Json(records))
}
