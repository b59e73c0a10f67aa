use clausecheck_ai::AiError;
use clausecheck_extract::{AcquireError, ExtractionError};
use clausecheck_store::StoreError;
use thiserror::Error;

use crate::Stage;

/// A failed pipeline run. Short-circuits are not errors; see [`crate::Outcome`].
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("No contract text found in request")]
    EmptyInput,

    #[error("{stage} failed: model returned an unusable response")]
    MalformedModelResponse {
        stage: Stage,
        #[source]
        source: AiError,
    },

    #[error("{stage} failed: model request failed")]
    Model {
        stage: Stage,
        #[source]
        source: AiError,
    },

    #[error("Database query failed")]
    Store(#[source] StoreError),
}

impl PipelineError {
    pub(crate) fn from_model(stage: Stage, source: AiError) -> Self {
        if source.is_malformed_response() {
            Self::MalformedModelResponse { stage, source }
        } else {
            Self::Model { stage, source }
        }
    }

    /// The stage the run was in when it failed.
    pub fn stage(&self) -> Stage {
        match self {
            Self::Extraction(_) | Self::EmptyInput => Stage::Extracting,
            Self::MalformedModelResponse { stage, .. } | Self::Model { stage, .. } => *stage,
            Self::Store(_) => Stage::LookingUpBaseline,
        }
    }

    /// Stable machine-readable name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Extraction(_) => "extraction_error",
            Self::EmptyInput => "empty_input",
            Self::MalformedModelResponse { .. } => "malformed_model_response",
            Self::Model { .. } => "model_error",
            Self::Store(_) => "store_error",
        }
    }
}

impl From<AcquireError> for PipelineError {
    fn from(err: AcquireError) -> Self {
        match err {
            AcquireError::Extraction(e) => Self::Extraction(e),
            AcquireError::EmptyInput => Self::EmptyInput,
        }
    }
}
