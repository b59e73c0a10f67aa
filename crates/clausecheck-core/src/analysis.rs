//! Clause comparison results returned to the caller.

use serde::{Deserialize, Serialize};

/// The clause categories every comparison is asked to evaluate, in rubric order.
pub const CLAUSE_CATEGORIES: [&str; 5] = [
    "Liability",
    "Termination",
    "Payment Terms",
    "Governing Law",
    "Indemnity",
];

/// Verdict for one clause of the new draft against the master agreement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClauseStatus {
    /// Terms match the master agreement.
    Aligned,
    /// Terms differ but are acceptable.
    #[serde(alias = "Variation Detected")]
    Variation,
    /// Terms contradict the master agreement or increase risk.
    Conflict,
}

impl ClauseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aligned => "Aligned",
            Self::Variation => "Variation",
            Self::Conflict => "Conflict",
        }
    }
}

/// One clause-level finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClauseFinding {
    pub clause_name: String,
    pub status: ClauseStatus,
    #[serde(default)]
    pub old_term: Option<String>,
    pub new_term: String,
    pub risk_analysis: String,
}

/// Executive summary plus per-clause findings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    pub clause_analysis: Vec<ClauseFinding>,
}

impl AnalysisResult {
    /// Result returned when no counterparty could be identified in the draft.
    pub fn counterparty_not_identified() -> Self {
        Self {
            summary: "Could not identify counterparty.".to_string(),
            clause_analysis: Vec::new(),
        }
    }

    /// Result returned when no master agreement exists for `counterparty`.
    pub fn no_baseline(counterparty: &str) -> Self {
        Self {
            summary: format!(
                "No existing Master Agreement found for {counterparty}. Safe to proceed as new agreement."
            ),
            clause_analysis: Vec::new(),
        }
    }

    /// Categories from [`CLAUSE_CATEGORIES`] that no finding covers.
    ///
    /// A finding covers a category when its `clause_name` contains the
    /// category name, ignoring case ("Liability Cap" covers "Liability").
    pub fn missing_categories(&self) -> Vec<&'static str> {
        CLAUSE_CATEGORIES
            .iter()
            .copied()
            .filter(|category| {
                let needle = category.to_lowercase();
                !self
                    .clause_analysis
                    .iter()
                    .any(|f| f.clause_name.to_lowercase().contains(&needle))
            })
            .collect()
    }
}
