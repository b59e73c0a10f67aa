//! DuckDB agreement store for local and single-node deployments.

use std::path::Path;
use std::sync::{Arc, Mutex};

use arrow::array::{Array, Int64Array, LargeStringArray, StringArray};
use arrow::record_batch::RecordBatch;
use async_trait::async_trait;
use clausecheck_core::{AgreementRecord, NewAgreement};
use duckdb::Connection;
use tracing::info;

use crate::{AgreementStore, StoreError};

const SCHEMA_SQL: &str = "
    CREATE SEQUENCE IF NOT EXISTS contracts_id_seq START 1;
    CREATE TABLE IF NOT EXISTS contracts (
        id           BIGINT PRIMARY KEY DEFAULT nextval('contracts_id_seq'),
        counterparty VARCHAR NOT NULL,
        content      VARCHAR NOT NULL
    );
";

/// DuckDB store holding the `contracts` table.
///
/// Supports both in-memory (ephemeral) and persistent (file-backed) modes.
/// Use [`open`](Self::open) for in-memory and [`open_persistent`](Self::open_persistent)
/// for file-backed storage that survives across process restarts.
///
/// Every query runs on the blocking pool; the connection is shared behind a
/// mutex so calls are serialized.
pub struct DuckStore {
    conn: Arc<Mutex<Connection>>,
}

impl DuckStore {
    /// Open an in-memory DuckDB database with the `contracts` table created.
    pub fn open() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    /// Open or create a persistent DuckDB database at the given path.
    pub fn open_persistent(path: &Path) -> Result<Self, StoreError> {
        Self::init(Connection::open(path)?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA_SQL)?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        info!(count = store.count()?, "opened duckdb agreement store");
        Ok(store)
    }

    /// Number of rows in the `contracts` table.
    pub fn count(&self) -> Result<usize, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        let n: i64 = conn.query_row("SELECT count(*)::BIGINT FROM contracts", [], |row| {
            row.get(0)
        })?;
        Ok(n as usize)
    }

    /// Run `f` against the connection on the blocking pool.
    async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(|_| StoreError::LockPoisoned)?;
            f(&conn)
        })
        .await
        .map_err(|e| StoreError::Other(format!("duckdb task failed: {e}")))?
    }
}

fn query_records(
    conn: &Connection,
    sql: &str,
    param: Option<&str>,
) -> Result<Vec<AgreementRecord>, StoreError> {
    let mut stmt = conn.prepare(sql)?;
    let batches: Vec<RecordBatch> = match param {
        Some(p) => stmt.query_arrow([p])?.collect(),
        None => stmt.query_arrow([])?.collect(),
    };
    records_from_batches(&batches)
}

#[async_trait]
impl AgreementStore for DuckStore {
    async fn latest_for_counterparty(
        &self,
        counterparty: &str,
    ) -> Result<Option<AgreementRecord>, StoreError> {
        let counterparty = counterparty.to_string();
        let records = self
            .with_conn(move |conn| {
                query_records(
                    conn,
                    "SELECT id, counterparty, content FROM contracts
                     WHERE contains(lower(counterparty), lower(?))
                     ORDER BY id DESC
                     LIMIT 1",
                    Some(&counterparty),
                )
            })
            .await?;
        Ok(records.into_iter().next())
    }

    async fn list(&self) -> Result<Vec<AgreementRecord>, StoreError> {
        self.with_conn(|conn| {
            query_records(
                conn,
                "SELECT id, counterparty, content FROM contracts ORDER BY id ASC",
                None,
            )
        })
        .await
    }

    async fn insert(&self, agreement: NewAgreement) -> Result<i64, StoreError> {
        self.with_conn(move |conn| {
            let id: i64 = conn.query_row(
                "INSERT INTO contracts (counterparty, content) VALUES (?, ?) RETURNING id",
                [agreement.counterparty.as_str(), agreement.content.as_str()],
                |row| row.get(0),
            )?;
            Ok(id)
        })
        .await
    }

    fn backend_name(&self) -> &'static str {
        "duckdb"
    }
}

/// Convert `(id, counterparty, content)` batches into records.
///
/// Handles both `Utf8` (StringArray) and `LargeUtf8` (LargeStringArray) text columns.
fn records_from_batches(batches: &[RecordBatch]) -> Result<Vec<AgreementRecord>, StoreError> {
    let mut records = Vec::new();
    for batch in batches {
        let ids = batch
            .column(0)
            .as_any()
            .downcast_ref::<Int64Array>()
            .ok_or_else(|| StoreError::Other("id column not i64".into()))?;
        let counterparties = text_column(batch, 1)?;
        let contents = text_column(batch, 2)?;
        for i in 0..batch.num_rows() {
            records.push(AgreementRecord {
                id: ids.value(i),
                counterparty: counterparties[i].to_string(),
                content: contents[i].to_string(),
            });
        }
    }
    Ok(records)
}

fn text_column(batch: &RecordBatch, idx: usize) -> Result<Vec<&str>, StoreError> {
    let col = batch.column(idx);
    if let Some(arr) = col.as_any().downcast_ref::<StringArray>() {
        Ok((0..arr.len()).map(|i| arr.value(i)).collect())
    } else if let Some(arr) = col.as_any().downcast_ref::<LargeStringArray>() {
        Ok((0..arr.len()).map(|i| arr.value(i)).collect())
    } else {
        Err(StoreError::Other(format!(
            "unexpected text column type: {:?}",
            col.data_type()
        )))
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

    async fn seeded() -> DuckStore {
        let store = DuckStore::open().unwrap();
        store.insert(agreement("Acme Corp", "MSA 2021")).await.unwrap();
        store.insert(agreement("Globex", "Globex MSA")).await.unwrap();
        store.insert(agreement("ACME CORP", "MSA 2024")).await.unwrap();
        store
    }

    #[tokio::test]
    async fn latest_match_by_highest_id() {
        let store = seeded().await;
        let found = store
            .latest_for_counterparty("acme corp")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, 3);
        assert_eq!(found.content, "MSA 2024");
    }

    #[tokio::test]
    async fn wildcard_characters_match_literally() {
        let store = seeded().await;
        assert!(store.latest_for_counterparty("%").await.unwrap().is_none());
        assert!(store.latest_for_counterparty("Acme_Corp").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn no_match_is_none() {
        let store = seeded().await;
        assert!(store.latest_for_counterparty("Initech").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_is_ascending() {
        let store = seeded().await;
        let ids: Vec<i64> = store.list().await.unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(store.count().unwrap(), 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_inserts_get_distinct_ids() {
        let store = Arc::new(DuckStore::open().unwrap());
        let mut handles = Vec::new();
        for i in 0..8 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .insert(agreement(&format!("Party {i}"), "MSA"))
                    .await
                    .unwrap()
            }));
        }
        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort();
        assert_eq!(ids, (1..=8).collect::<Vec<i64>>());
        assert_eq!(store.list().await.unwrap().len(), 8);
    }

    #[tokio::test]
    async fn persistent_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agreements.duckdb");
        {
            let store = DuckStore::open_persistent(&path).unwrap();
            store.insert(agreement("Acme Corp", "MSA")).await.unwrap();
        }
        let reopened = DuckStore::open_persistent(&path).unwrap();
        assert_eq!(reopened.count().unwrap(), 1);
    }
}
