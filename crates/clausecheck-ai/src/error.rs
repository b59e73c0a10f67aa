use thiserror::Error;

#[derive(Error, Debug)]
pub enum AiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model provider returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("AI returned empty response for {0}")]
    EmptyResponse(&'static str),

    #[error("malformed model response: {0}")]
    MalformedResponse(String),
}

impl AiError {
    /// True when the model answered but the answer was unusable, as opposed
    /// to a transport or provider failure.
    pub fn is_malformed_response(&self) -> bool {
        matches!(self, Self::EmptyResponse(_) | Self::MalformedResponse(_))
    }
}
