use anyhow::Context;
use clap::Parser;
use meet_insights::adapters::services::llm::OpenAIService;
use meet_insights::adapters::storage::SqliteStorage;
use meet_insights::config::ServerConfig;
use meet_insights::{build_router, AppState};
use std::sync::Arc;

/// Initialize the application
///
/// Opens the database, runs migrations and builds the LLM client.
fn initialize_app(config: &ServerConfig) -> anyhow::Result<AppState> {
    if let Some(parent) = config.database.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let storage = SqliteStorage::new(&config.database)
        .with_context(|| format!("opening database {}", config.database.display()))?;
    storage.run_migrations().context("running migrations")?;

    let api_key = match config.api_key() {
        Some(key) => key.to_string(),
        None => {
            log::warn!("OPENAI_API_KEY is not set; analysis requests will fail");
            String::new()
        }
    };
    let llm = OpenAIService::with_options(
        api_key,
        &config.openai_base_url,
        config.request_timeout(),
    )?;

    Ok(AppState {
        storage: Arc::new(storage),
        llm: Arc::new(llm),
        llm_config: config.llm_config(),
        utc_offset: config.utc_offset,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::parse();
    log::info!(
        "Starting meet-insights v{} (model {}, database {})",
        env!("CARGO_PKG_VERSION"),
        config.model,
        config.database.display()
    );

    let state = initialize_app(&config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    log::info!("Listening on http://{}", config.bind);

    axum::serve(listener, app).await?;

    Ok(())
}
