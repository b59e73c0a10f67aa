//! Contract analysis pipeline: acquisition, counterparty identification,
//! baseline lookup, and clause comparison, run strictly in sequence.

mod error;
mod outcome;

pub use error::PipelineError;
pub use outcome::{Outcome, ShortCircuit, Stage};

use std::sync::Arc;

use clausecheck_ai::{
    Identification, SchemaPolicy, TextGenerator, compare_clauses, identify_counterparty,
};
use clausecheck_core::{AnalysisResult, Submission};
use clausecheck_extract::{PdfExtractor, PdfTextExtractor};
use clausecheck_store::AgreementStore;
use tracing::info;

/// Orchestrates one analysis per call. Holds only shared client handles, so a
/// single instance serves concurrent requests without coordination.
pub struct Pipeline {
    generator: Arc<dyn TextGenerator>,
    store: Arc<dyn AgreementStore>,
    extractor: Arc<dyn PdfExtractor>,
    policy: SchemaPolicy,
}

impl Pipeline {
    /// Build a pipeline using pdf-extract for PDFs and the permissive schema policy.
    pub fn new(generator: Arc<dyn TextGenerator>, store: Arc<dyn AgreementStore>) -> Self {
        Self {
            generator,
            store,
            extractor: Arc::new(PdfTextExtractor),
            policy: SchemaPolicy::default(),
        }
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn PdfExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_schema_policy(mut self, policy: SchemaPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn store(&self) -> &Arc<dyn AgreementStore> {
        &self.store
    }

    /// Run the full analysis for one submission.
    ///
    /// Returns [`Outcome::ShortCircuited`] when no counterparty is identified
    /// or no master agreement exists; later stages are skipped. Every other
    /// failure is returned as a [`PipelineError`] tagged with its stage.
    pub async fn run(&self, submission: Submission) -> Result<Outcome, PipelineError> {
        info!(stage = %Stage::Extracting, kind = submission.kind(), "analysis started");
        let contract = clausecheck_extract::acquire(submission, Arc::clone(&self.extractor)).await?;

        info!(
            stage = %Stage::IdentifyingCounterparty,
            chars = contract.text.chars().count(),
            "contract text acquired"
        );
        let identification = identify_counterparty(self.generator.as_ref(), &contract.text)
            .await
            .map_err(|e| PipelineError::from_model(Stage::IdentifyingCounterparty, e))?;
        let counterparty = match identification {
            Identification::Found(name) => name,
            Identification::NotFound => {
                info!("no counterparty identified, short-circuiting");
                return Ok(Outcome::ShortCircuited {
                    reason: ShortCircuit::CounterpartyNotFound,
                    result: AnalysisResult::counterparty_not_identified(),
                });
            }
        };

        info!(stage = %Stage::LookingUpBaseline, counterparty = %counterparty, "counterparty identified");
        let baseline = match self
            .store
            .latest_for_counterparty(&counterparty)
            .await
            .map_err(PipelineError::Store)?
        {
            Some(record) => record,
            None => {
                info!(counterparty = %counterparty, "no master agreement found, short-circuiting");
                return Ok(Outcome::ShortCircuited {
                    result: AnalysisResult::no_baseline(&counterparty),
                    reason: ShortCircuit::NoBaseline { counterparty },
                });
            }
        };

        info!(stage = %Stage::Comparing, agreement_id = baseline.id, "master agreement found");
        let analysis = compare_clauses(
            self.generator.as_ref(),
            &baseline.content,
            &contract.text,
            self.policy,
        )
        .await
        .map_err(|e| PipelineError::from_model(Stage::Comparing, e))?;

        info!(counterparty = %counterparty, "analysis complete");
        Ok(Outcome::Completed(analysis))
    }
}
