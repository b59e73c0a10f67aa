//! Storage layer for master agreements: in-memory, DuckDB (embedded), and
//! PostgREST (hosted) backends behind one [`AgreementStore`] trait.

mod error;
mod memory;
pub use error::StoreError;
pub use memory::MemoryStore;

#[cfg(feature = "duckdb")]
mod duck;
#[cfg(feature = "duckdb")]
pub use duck::DuckStore;

#[cfg(feature = "rest")]
mod rest;
#[cfg(feature = "rest")]
pub use rest::RestStore;

use async_trait::async_trait;
use clausecheck_core::{AgreementRecord, NewAgreement};
use tracing::info;

/// Read access to stored master agreements, plus insertion for seeding.
#[async_trait]
pub trait AgreementStore: Send + Sync {
    /// The most recent agreement (highest id) whose counterparty contains
    /// `counterparty`, ignoring case. `Ok(None)` when nothing matches.
    async fn latest_for_counterparty(
        &self,
        counterparty: &str,
    ) -> Result<Option<AgreementRecord>, StoreError>;

    /// All agreements, ascending by id.
    async fn list(&self) -> Result<Vec<AgreementRecord>, StoreError>;

    /// Insert an agreement and return its store-assigned id.
    async fn insert(&self, agreement: NewAgreement) -> Result<i64, StoreError>;

    /// Backend name for logging.
    fn backend_name(&self) -> &'static str;
}

/// Insert every seed agreement in order. Returns the number inserted.
pub async fn load_seed(
    store: &dyn AgreementStore,
    agreements: Vec<NewAgreement>,
) -> Result<usize, StoreError> {
    let count = agreements.len();
    for agreement in agreements {
        store.insert(agreement).await?;
    }
    info!(count, backend = store.backend_name(), "seeded agreement store");
    Ok(count)
}
