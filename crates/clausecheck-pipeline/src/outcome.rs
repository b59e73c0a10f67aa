use std::fmt;

use clausecheck_core::AnalysisResult;
use serde_json::Value;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Extracting,
    IdentifyingCounterparty,
    LookingUpBaseline,
    Comparing,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Extracting => "extracting",
            Self::IdentifyingCounterparty => "identifying counterparty",
            Self::LookingUpBaseline => "looking up baseline",
            Self::Comparing => "comparing",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why the pipeline stopped before comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortCircuit {
    CounterpartyNotFound,
    NoBaseline { counterparty: String },
}

/// Successful end state of a pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The comparator's JSON, as returned by the model.
    Completed(Value),
    /// A canned result for a designed early exit.
    ShortCircuited {
        reason: ShortCircuit,
        result: AnalysisResult,
    },
}
