//! `POST /api/analyze`: run the analysis pipeline on a submitted contract.

use axum::Json;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use clausecheck_core::Submission;
use clausecheck_extract::ExtractionError;
use clausecheck_pipeline::{Outcome, PipelineError};
use serde::Deserialize;
use tracing::info;

use super::{ApiError, AppState};

/// Multipart field carrying the PDF.
const FILE_FIELD: &str = "file";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub contract_text: Option<String>,
}

pub async fn analyze(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, ApiError> {
    let submission = read_submission(request).await?;
    let outcome = state.pipeline.run(submission).await?;
    Ok(match outcome {
        Outcome::Completed(value) => Json(value).into_response(),
        Outcome::ShortCircuited { result, .. } => Json(result).into_response(),
    })
}

/// Decode the request body as a multipart PDF upload or a JSON text body,
/// chosen by `Content-Type`.
async fn read_submission(request: Request) -> Result<Submission, ApiError> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    if is_multipart {
        info!("processing file upload");
        let mut multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| ApiError::InvalidBody(e.body_text()))?;
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::InvalidBody(e.body_text()))?
        {
            if field.name() != Some(FILE_FIELD) {
                continue;
            }
            let declared_name = field.file_name().unwrap_or("upload.pdf").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::InvalidBody(e.body_text()))?;
            info!(file = %declared_name, size = bytes.len(), "file received");
            return Ok(Submission::Pdf {
                bytes: bytes.to_vec(),
                declared_name,
            });
        }
        Err(PipelineError::Extraction(ExtractionError::MissingSubmission).into())
    } else {
        info!("processing JSON text input");
        let Json(body) = Json::<AnalyzeRequest>::from_request(request, &())
            .await
            .map_err(|e| ApiError::InvalidBody(e.body_text()))?;
        Ok(Submission::Text {
            body: body.contract_text.unwrap_or_default(),
        })
    }
}
