//! Clause-by-clause comparison of a new draft against a master agreement.

use clausecheck_core::{AnalysisResult, CLAUSE_CATEGORIES, COMPARE_CHAR_LIMIT, truncate_chars};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::prompts::{COMPARE_SYSTEM_PROMPT, build_comparison_prompt};
use crate::{AiError, GenerateRequest, TextGenerator, snippet};

/// How much of the model's comparison JSON is checked before it is returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SchemaPolicy {
    /// Any non-empty JSON value is passed through unchanged.
    #[default]
    Permissive,
    /// The JSON must be an [`AnalysisResult`] covering exactly the five
    /// clause categories with recognised statuses.
    Strict,
}

/// Compare `draft` against `baseline` and return the model's analysis JSON.
///
/// The baseline is sent in full; the draft is cut to [`COMPARE_CHAR_LIMIT`]
/// characters. Under [`SchemaPolicy::Permissive`] the returned value is
/// exactly what the model produced.
pub async fn compare_clauses(
    generator: &dyn TextGenerator,
    baseline: &str,
    draft: &str,
    policy: SchemaPolicy,
) -> Result<Value, AiError> {
    let request = GenerateRequest {
        system_prompt: COMPARE_SYSTEM_PROMPT.to_string(),
        user_prompt: build_comparison_prompt(baseline, truncate_chars(draft, COMPARE_CHAR_LIMIT)),
        json_mode: true,
    };
    let raw = generator.generate(&request).await?;
    let analysis = parse_analysis(&raw, policy)?;
    info!(model = generator.model_name(), ?policy, "clause comparison complete");
    Ok(analysis)
}

fn parse_analysis(raw: &str, policy: SchemaPolicy) -> Result<Value, AiError> {
    if raw.trim().is_empty() {
        return Err(AiError::EmptyResponse("comparison"));
    }
    let value: Value = serde_json::from_str(raw).map_err(|e| {
        AiError::MalformedResponse(format!(
            "comparison is not JSON: {e}\nraw: {}",
            snippet(raw)
        ))
    })?;
    let empty = match &value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    };
    if empty {
        return Err(AiError::MalformedResponse("comparison JSON is empty".into()));
    }
    if policy == SchemaPolicy::Strict {
        validate_strict(&value)?;
    }
    Ok(value)
}

fn validate_strict(value: &Value) -> Result<(), AiError> {
    let result: AnalysisResult = serde_json::from_value(value.clone()).map_err(|e| {
        AiError::MalformedResponse(format!("comparison does not match analysis schema: {e}"))
    })?;
    if result.clause_analysis.len() != CLAUSE_CATEGORIES.len() {
        warn!(clauses = result.clause_analysis.len(), "unexpected clause count");
        return Err(AiError::MalformedResponse(format!(
            "expected {} clauses, model returned {}",
            CLAUSE_CATEGORIES.len(),
            result.clause_analysis.len()
        )));
    }
    let missing = result.missing_categories();
    if !missing.is_empty() {
        return Err(AiError::MalformedResponse(format!(
            "comparison missing clauses: {}",
            missing.join(", ")
        )));
    }
    for finding in &result.clause_analysis {
        debug!(
            clause = %finding.clause_name,
            status = finding.status.as_str(),
            "clause classified"
        );
    }
    Ok(())
}
