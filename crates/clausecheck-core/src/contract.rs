//! Contract inputs and stored agreement records.

use serde::{Deserialize, Serialize};

/// A raw contract submission, alive for the duration of one request.
#[derive(Debug, Clone)]
pub enum Submission {
    /// Already-decoded text pasted by the user.
    Text { body: String },
    /// An uploaded PDF document.
    Pdf { bytes: Vec<u8>, declared_name: String },
}

impl Submission {
    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Pdf { .. } => "pdf",
        }
    }
}

/// Contract text after acquisition. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedContract {
    pub text: String,
}

/// A master agreement as held by the agreement store.
///
/// `id` is assigned by the store and increases monotonically, so the highest
/// id among several matches is the most recent agreement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgreementRecord {
    pub id: i64,
    pub counterparty: String,
    pub content: String,
}

/// An agreement to be inserted; the store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAgreement {
    pub counterparty: String,
    pub content: String,
}
