mod api_error;
mod handlers;
mod logging;
mod routes;
mod upload_form;

use anyhow::{Context, Result};
use metrics_extractor::{Config, QueryService};
use routes::{create_router, AppState};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration is read once; everything downstream gets it passed in.
    let config = Config::from_env().context("invalid configuration")?;
    logging::init(&config.log_file)?;

    let query_service = match QueryService::new(&config) {
        Ok(service) => Arc::new(service),
        Err(e) => {
            log::error!("Failed to initialize extraction service: {}", e);
            std::process::exit(1);
        }
    };

    log::info!(
        "Backends: ollama at {} (model {}), openai at {} (model {}, key {}), timeout {}s, format {:?}",
        config.ollama_base_url,
        config.ollama_model,
        config.openai_base_url,
        config.openai_model,
        if config.openai_api_key.is_some() { "set" } else { "missing" },
        config.upstream_timeout.as_secs(),
        config.response_format
    );

    let app = create_router(AppState { query_service }, config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("cannot bind {}", config.bind_addr))?;
    log::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
