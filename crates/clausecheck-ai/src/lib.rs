//! AI layer: chat-completion client plus the two model-backed pipeline steps.

mod client;
mod compare;
mod error;
mod identify;
pub mod prompts;

pub use client::{ChatClient, DEFAULT_BASE_URL, DEFAULT_MODEL, GenerateRequest, TextGenerator};
pub use compare::{SchemaPolicy, compare_clauses};
pub use error::AiError;
pub use identify::{Identification, identify_counterparty};

use clausecheck_core::truncate_chars;

/// First characters of a raw model response, for error messages.
fn snippet(raw: &str) -> &str {
    truncate_chars(raw, 200)
}
