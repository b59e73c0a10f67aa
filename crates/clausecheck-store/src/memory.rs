//! In-process agreement store.

use std::sync::RwLock;

use async_trait::async_trait;
use clausecheck_core::{AgreementRecord, NewAgreement};

use crate::{AgreementStore, StoreError};

/// Agreement store held in memory; ids start at 1 and increase by one per insert.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Vec<AgreementRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `agreements`, assigning ids in order.
    pub fn with_agreements(agreements: impl IntoIterator<Item = NewAgreement>) -> Self {
        let records = agreements
            .into_iter()
            .zip(1..)
            .map(|(a, id)| AgreementRecord {
                id,
                counterparty: a.counterparty,
                content: a.content,
            })
            .collect();
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl AgreementStore for MemoryStore {
    async fn latest_for_counterparty(
        &self,
        counterparty: &str,
    ) -> Result<Option<AgreementRecord>, StoreError> {
        let needle = counterparty.to_lowercase();
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records
            .iter()
            .filter(|r| r.counterparty.to_lowercase().contains(&needle))
            .max_by_key(|r| r.id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<AgreementRecord>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        let mut all = records.clone();
        all.sort_by_key(|r| r.id);
        Ok(all)
    }

    async fn insert(&self, agreement: NewAgreement) -> Result<i64, StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        let id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        records.push(AgreementRecord {
            id,
            counterparty: agreement.counterparty,
            content: agreement.content,
        });
        Ok(id)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agreement(counterparty: &str, content: &str) -> NewAgreement {
        NewAgreement {
            counterparty: counterparty.into(),
            content: content.into(),
        }
    }

    #[tokio::test]
    async fn highest_id_wins_among_matches() {
        let store = MemoryStore::with_agreements([
            agreement("Acme Corp", "MSA 2021"),
            agreement("Globex", "Globex MSA"),
            agreement("Acme Corporation Ltd", "MSA 2024"),
        ]);
        let found = store.latest_for_counterparty("Acme").await.unwrap().unwrap();
        assert_eq!(found.id, 3);
        assert_eq!(found.content, "MSA 2024");
    }

    #[tokio::test]
    async fn match_is_case_insensitive_substring() {
        let store = MemoryStore::with_agreements([agreement("Acme Corp", "MSA")]);
        assert!(store.latest_for_counterparty("acme corp").await.unwrap().is_some());
        assert!(store.latest_for_counterparty("CME CO").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn no_match_is_none() {
        let store = MemoryStore::with_agreements([agreement("Acme Corp", "MSA")]);
        assert!(store.latest_for_counterparty("Initech").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn insert_assigns_monotonic_ids() {
        let store = MemoryStore::new();
        assert_eq!(store.insert(agreement("A", "a")).await.unwrap(), 1);
        assert_eq!(store.insert(agreement("B", "b")).await.unwrap(), 2);
        let ids: Vec<i64> = store.list().await.unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn load_seed_inserts_all() {
        let store = MemoryStore::new();
        let n = crate::load_seed(&store, vec![agreement("A", "a"), agreement("B", "b")])
            .await
            .unwrap();
        assert_eq!(n, 2);
        assert_eq!(store.list().await.unwrap().len(), 2);
    }
}
