//! Counterparty identification.

use clausecheck_core::{IDENTIFY_CHAR_LIMIT, truncate_chars};
use serde_json::Value;
use tracing::info;

use crate::prompts::IDENTIFY_SYSTEM_PROMPT;
use crate::{AiError, GenerateRequest, TextGenerator, snippet};

/// Outcome of counterparty identification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identification {
    /// Trimmed counterparty name.
    Found(String),
    /// The model answered but named nobody.
    NotFound,
}

/// Ask the model for the counterparty named in `contract_text`.
///
/// Only the first [`IDENTIFY_CHAR_LIMIT`] characters are sent. A null or blank
/// `counterparty_name` is [`Identification::NotFound`]; an empty response,
/// invalid JSON, or a missing field is an error.
pub async fn identify_counterparty(
    generator: &dyn TextGenerator,
    contract_text: &str,
) -> Result<Identification, AiError> {
    let request = GenerateRequest {
        system_prompt: IDENTIFY_SYSTEM_PROMPT.to_string(),
        user_prompt: truncate_chars(contract_text, IDENTIFY_CHAR_LIMIT).to_string(),
        json_mode: true,
    };
    let raw = generator.generate(&request).await?;
    let identification = parse_identification(&raw)?;
    info!(model = generator.model_name(), ?identification, "counterparty identification complete");
    Ok(identification)
}

fn parse_identification(raw: &str) -> Result<Identification, AiError> {
    if raw.trim().is_empty() {
        return Err(AiError::EmptyResponse("counterparty identification"));
    }
    let value: Value = serde_json::from_str(raw).map_err(|e| {
        AiError::MalformedResponse(format!(
            "counterparty identification is not JSON: {e}\nraw: {}",
            snippet(raw)
        ))
    })?;
    match value.get("counterparty_name") {
        None => Err(AiError::MalformedResponse(format!(
            "missing counterparty_name field\nraw: {}",
            snippet(raw)
        ))),
        Some(Value::Null) => Ok(Identification::NotFound),
        Some(Value::String(name)) => {
            let name = name.trim();
            if name.is_empty() {
                Ok(Identification::NotFound)
            } else {
                Ok(Identification::Found(name.to_string()))
            }
        }
        Some(other) => Err(AiError::MalformedResponse(format!(
            "counterparty_name is not a string: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    struct Scripted {
        reply: String,
        seen: Mutex<Vec<GenerateRequest>>,
    }

    impl Scripted {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for Scripted {
        async fn generate(&self, request: &GenerateRequest) -> Result<String, AiError> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(self.reply.clone())
        }

        fn model_name(&self) -> &str {
            "scripted"
        }
    }

    #[tokio::test]
    async fn found_name_is_trimmed() {
        let generator = Scripted::new(r#"{"counterparty_name": "  Acme Corp \n"}"#);
        let result = identify_counterparty(&generator, "Counterparty: Acme Corp").await.unwrap();
        assert_eq!(result, Identification::Found("Acme Corp".into()));
    }

    #[tokio::test]
    async fn request_uses_json_mode_and_fixed_instruction() {
        let generator = Scripted::new(r#"{"counterparty_name": "Acme Corp"}"#);
        identify_counterparty(&generator, "text").await.unwrap();
        let seen = generator.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].json_mode);
        assert_eq!(seen[0].system_prompt, IDENTIFY_SYSTEM_PROMPT);
        assert_eq!(seen[0].user_prompt, "text");
    }

    #[tokio::test]
    async fn input_truncated_to_limit() {
        let generator = Scripted::new(r#"{"counterparty_name": "Acme Corp"}"#);
        let long = "é".repeat(IDENTIFY_CHAR_LIMIT + 500);
        identify_counterparty(&generator, &long).await.unwrap();
        let seen = generator.seen.lock().unwrap();
        assert_eq!(seen[0].user_prompt.chars().count(), IDENTIFY_CHAR_LIMIT);
    }

    #[test]
    fn blank_name_is_not_found() {
        assert_eq!(
            parse_identification(r#"{"counterparty_name": "   "}"#).unwrap(),
            Identification::NotFound
        );
    }

    #[test]
    fn null_name_is_not_found() {
        assert_eq!(
            parse_identification(r#"{"counterparty_name": null}"#).unwrap(),
            Identification::NotFound
        );
    }

    #[test]
    fn missing_field_is_malformed() {
        let err = parse_identification(r#"{"name": "Acme"}"#).unwrap_err();
        assert!(matches!(err, AiError::MalformedResponse(_)));
    }

    #[test]
    fn non_json_is_malformed() {
        let err = parse_identification("The counterparty is Acme Corp.").unwrap_err();
        assert!(matches!(err, AiError::MalformedResponse(_)));
    }

    #[test]
    fn numeric_name_is_malformed() {
        let err = parse_identification(r#"{"counterparty_name": 42}"#).unwrap_err();
        assert!(err.is_malformed_response());
    }

    #[test]
    fn empty_reply_is_empty_response() {
        let err = parse_identification("").unwrap_err();
        assert!(matches!(err, AiError::EmptyResponse(_)));
    }
}
