use anyhow::Context;
use clap::Parser;
use clausecheck_pipeline::Pipeline;
use clausecheck_server::{AppState, Config, router};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("clausecheck=info,tower_http=info")),
        )
        .init();
    tracing::info!("clausecheck v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::parse();
    let generator = config.build_generator()?;
    let store = config.build_store().await?;
    let pipeline = Pipeline::new(generator, store).with_schema_policy(config.schema_policy());
    let app = router(AppState::new(pipeline), config.router_options());

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
