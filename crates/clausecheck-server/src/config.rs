//! Command-line and environment configuration.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use clausecheck_ai::{ChatClient, DEFAULT_BASE_URL, DEFAULT_MODEL, SchemaPolicy, TextGenerator};
use clausecheck_core::NewAgreement;
use clausecheck_store::{AgreementStore, MemoryStore, load_seed};
use tracing::{info, warn};

use crate::RouterOptions;

#[derive(Parser, Debug)]
#[command(name = "clausecheck", version, about = "Contract clause analysis service")]
pub struct Config {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Chat-completions API root
    #[arg(long, env = "OPENROUTER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub llm_base_url: String,

    /// API key for the chat-completions endpoint
    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    pub llm_api_key: Option<String>,

    /// Model identifier
    #[arg(long, env = "CLAUSECHECK_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Per-request timeout for model calls, in seconds
    #[arg(long)]
    pub llm_timeout_secs: Option<u64>,

    /// Agreement store backend
    #[arg(long, env = "CLAUSECHECK_STORE", value_enum, default_value_t = StoreBackend::Rest)]
    pub store: StoreBackend,

    /// PostgREST project URL (rest backend)
    #[arg(long, env = "SUPABASE_URL")]
    pub supabase_url: Option<String>,

    /// PostgREST API key (rest backend)
    #[arg(long, env = "SUPABASE_ANON_KEY", hide_env_values = true)]
    pub supabase_key: Option<String>,

    /// DuckDB database file (duckdb backend); in-memory when unset
    #[arg(long, env = "CLAUSECHECK_DUCKDB")]
    pub duckdb_path: Option<PathBuf>,

    /// JSON array of `{counterparty, content}` inserted at startup
    #[arg(long, env = "CLAUSECHECK_SEED")]
    pub seed: Option<PathBuf>,

    /// Validation applied to the model's clause comparison
    #[arg(long, value_enum, default_value_t = PolicyArg::Permissive)]
    pub schema_policy: PolicyArg,

    /// Largest accepted upload, in MiB
    #[arg(long, default_value_t = 20)]
    pub max_upload_mb: usize,

    /// Directory of static files served for non-API paths
    #[arg(long)]
    pub static_dir: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    /// Hosted PostgREST table
    Rest,
    /// Embedded DuckDB
    Duckdb,
    /// Process memory, lost on exit
    Memory,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyArg {
    Permissive,
    Strict,
}

impl Config {
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }

    pub fn schema_policy(&self) -> SchemaPolicy {
        match self.schema_policy {
            PolicyArg::Permissive => SchemaPolicy::Permissive,
            PolicyArg::Strict => SchemaPolicy::Strict,
        }
    }

    pub fn router_options(&self) -> RouterOptions {
        RouterOptions {
            max_upload_bytes: self.max_upload_mb * 1024 * 1024,
            static_dir: self.static_dir.clone(),
        }
    }

    /// Build the chat-completions client.
    pub fn build_generator(&self) -> anyhow::Result<Arc<dyn TextGenerator>> {
        let api_key = match &self.llm_api_key {
            Some(key) if !key.is_empty() => key.clone(),
            _ => {
                warn!("OPENROUTER_API_KEY is not set; model calls will be rejected upstream");
                String::new()
            }
        };

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = self.llm_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("failed to build HTTP client")?;

        info!(base_url = %self.llm_base_url, model = %self.model, "model client configured");
        Ok(Arc::new(ChatClient::with_client(
            client,
            self.llm_base_url.clone(),
            api_key,
            self.model.clone(),
        )))
    }

    /// Open the configured agreement store and apply the seed file, if any.
    pub async fn build_store(&self) -> anyhow::Result<Arc<dyn AgreementStore>> {
        let store: Arc<dyn AgreementStore> = match self.store {
            StoreBackend::Memory => Arc::new(MemoryStore::new()),
            StoreBackend::Rest => self.rest_store()?,
            StoreBackend::Duckdb => self.duck_store()?,
        };
        info!(backend = store.backend_name(), "agreement store ready");

        if let Some(path) = &self.seed {
            let agreements = read_seed(path).await?;
            load_seed(store.as_ref(), agreements)
                .await
                .with_context(|| format!("failed to seed store from {}", path.display()))?;
        }
        Ok(store)
    }

    #[cfg(feature = "rest")]
    fn rest_store(&self) -> anyhow::Result<Arc<dyn AgreementStore>> {
        let (Some(url), Some(key)) = (&self.supabase_url, &self.supabase_key) else {
            bail!("rest store requires SUPABASE_URL and SUPABASE_ANON_KEY");
        };
        Ok(Arc::new(clausecheck_store::RestStore::new(
            url.clone(),
            key.clone(),
        )))
    }

    #[cfg(not(feature = "rest"))]
    fn rest_store(&self) -> anyhow::Result<Arc<dyn AgreementStore>> {
        bail!("rest store not available: rebuild with --features rest")
    }

    #[cfg(feature = "duckdb")]
    fn duck_store(&self) -> anyhow::Result<Arc<dyn AgreementStore>> {
        use clausecheck_store::DuckStore;
        let store = match &self.duckdb_path {
            Some(path) => DuckStore::open_persistent(path)
                .with_context(|| format!("failed to open {}", path.display()))?,
            None => DuckStore::open().context("failed to open in-memory duckdb")?,
        };
        Ok(Arc::new(store))
    }

    #[cfg(not(feature = "duckdb"))]
    fn duck_store(&self) -> anyhow::Result<Arc<dyn AgreementStore>> {
        bail!("duckdb store not available: rebuild with --features duckdb")
    }
}

async fn read_seed(path: &Path) -> anyhow::Result<Vec<NewAgreement>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read seed file {}", path.display()))?;
    parse_seed(&raw).with_context(|| format!("invalid seed file {}", path.display()))
}

fn parse_seed(raw: &str) -> anyhow::Result<Vec<NewAgreement>> {
    Ok(serde_json::from_str(raw)?)
}
