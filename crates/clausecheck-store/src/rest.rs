//! PostgREST client for a hosted `contracts` table (Supabase-compatible).

use async_trait::async_trait;
use clausecheck_core::{AgreementRecord, NewAgreement};
use tracing::info;

use crate::{AgreementStore, StoreError};

const DEFAULT_TABLE: &str = "contracts";

/// Agreement store backed by a PostgREST endpoint.
pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    table: String,
}

impl RestStore {
    /// Create a store for the project at `base_url`.
    ///
    /// `base_url` should be like `https://xyz.supabase.co` (no trailing slash);
    /// the table is served from `{base_url}/rest/v1/contracts`.
    pub fn new(base_url: String, api_key: String) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, api_key)
    }

    pub fn with_client(client: reqwest::Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            table: DEFAULT_TABLE.to_string(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn authorized(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn fetch(&self, query: &[(&str, String)]) -> Result<Vec<AgreementRecord>, StoreError> {
        let url = self.table_url();
        let resp = self
            .authorized(self.client.get(&url))
            .query(query)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Server {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp.json().await?)
    }
}

/// Build a PostgREST `ilike` filter that matches `name` as a substring.
///
/// SQL `LIKE` metacharacters in the name are escaped with a backslash and the
/// pattern is wrapped in PostgREST's `*` wildcards. PostgREST rewrites every
/// `*` in the value to `%` and has no escape for it, so a `*` in the name
/// becomes the single-character wildcard `_`.
fn ilike_filter(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len() + 8);
    for c in name.chars() {
        match c {
            '\\' | '%' | '_' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '*' => escaped.push('_'),
            _ => escaped.push(c),
        }
    }
    format!("ilike.*{escaped}*")
}

#[async_trait]
impl AgreementStore for RestStore {
    async fn latest_for_counterparty(
        &self,
        counterparty: &str,
    ) -> Result<Option<AgreementRecord>, StoreError> {
        info!(table = %self.table, counterparty, "querying latest agreement");
        let rows = self
            .fetch(&[
                ("select", "id,counterparty,content".to_string()),
                ("counterparty", ilike_filter(counterparty)),
                ("order", "id.desc".to_string()),
                ("limit", "1".to_string()),
            ])
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn list(&self) -> Result<Vec<AgreementRecord>, StoreError> {
        self.fetch(&[
            ("select", "id,counterparty,content".to_string()),
            ("order", "id.asc".to_string()),
        ])
        .await
    }

    async fn insert(&self, agreement: NewAgreement) -> Result<i64, StoreError> {
        let resp = self
            .authorized(self.client.post(self.table_url()))
            .header("Prefer", "return=representation")
            .json(&agreement)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Server {
                status: status.as_u16(),
                body,
            });
        }
        let rows: Vec<AgreementRecord> = resp.json().await?;
        rows.first()
            .map(|r| r.id)
            .ok_or_else(|| StoreError::Other("insert returned no rows".into()))
    }

    fn backend_name(&self) -> &'static str {
        "rest"
    }
}
