use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use preset_speech::api::routes::{create_router, AppState};
use preset_speech::config::Config;
use preset_speech::error::AppError;
use preset_speech::llm::GeminiGenerator;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Configuration from environment
    let config = Config::from_env()?;
    let addr = config.addr()?;

    tracing::info!("Preset Speech Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Starting server on http://{}", addr);
    tracing::info!("Static directory: {}", config.static_dir.display());
    tracing::info!("Model: {}", config.gemini.model);

    if config.gemini.api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; generation requests will fail");
    }

    // Create generator and app state
    let generator = GeminiGenerator::new(&config.gemini)?;
    let state = Arc::new(AppState {
        generator: Arc::new(generator),
    });

    // Create router
    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
