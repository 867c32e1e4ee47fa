use std::sync::Arc;

use movie_dna_api::{
    api::{create_router, AppState},
    config::Config,
    services::{
        providers::{GroqProvider, TmdbProvider},
        PipelineSettings,
    },
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movie_dna_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!(
        tmdb_key_configured = !config.tmdb_api_key.is_empty(),
        groq_key_configured = !config.groq_api_key.is_empty(),
        analysis_model = %config.analysis_model,
        insight_model = %config.insight_model,
        timeout_secs = config.request_timeout_secs,
        "Configuration loaded"
    );

    // One client for both providers; the timeout applies to every outbound call
    let http_client = reqwest::Client::builder()
        .timeout(config.request_timeout())
        .build()?;

    let metadata = TmdbProvider::new(
        http_client.clone(),
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
    );
    let completion = GroqProvider::new(
        http_client,
        config.groq_api_key.clone(),
        config.groq_api_url.clone(),
    );

    let state = AppState::new(
        Arc::new(metadata),
        Arc::new(completion),
        PipelineSettings::from(&config),
    );
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Movie DNA API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
