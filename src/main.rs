mod config;

use std::sync::Arc;

use config::AppConfig;
use http_api::{AppState, Relay};
use openai_api::{CompletionConfig, OpenAIHandler};
use text_completion::PromptTemplate;
use tracing::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env is fine, the real environment still applies.
    let dotenv_result = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    info!(
        "Starting... CARGO_PKG_NAME={}, CARGO_PKG_VERSION={}, version={}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        option_env!("version").unwrap_or("(not defined at compile)")
    );
    if let Ok(path) = dotenv_result {
        debug!("Loaded environment from {}", path.display());
    }

    let config = AppConfig::from_env().map_err(|e| {
        error!("{}", e);
        e
    })?;
    debug!("{:?}", config);

    let openai_handler = Arc::new(OpenAIHandler::new(
        config.openai_api_key,
        CompletionConfig::default(),
    ));
    let relay = Relay::new(openai_handler, PromptTemplate::default());
    let state = AppState::new(relay, config.server.environment.as_deref());

    http_api::init(config.server, state).await.map_err(|e| {
        error!("Server error: {}", e);
        e
    })?;

    Ok(())
}
