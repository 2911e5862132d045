pub mod application;
pub mod cli;
pub mod config;
pub mod constants;
pub mod domain;
pub mod infrastructure;

pub use application::{normalizer, screener};
pub use cli::{Cli, RunMode};
pub use config::{AppConfig, ConfigError};
pub use infrastructure::{lookup, model, server};

use application::screener::{AnalyzeRequest, Screener};
use base64::Engine;
use infrastructure::lookup::BookLookup;
use infrastructure::model::{GeminiClient, ImagePayload, resolver};
use std::error::Error;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

pub async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    init_tracing();
    info!("Starting covercheck");
    debug!(mode = ?cli.mode, config = ?cli.config, age = ?cli.age, "CLI arguments parsed");

    let config_path = cli.config.as_deref().map(Path::new);
    let file_config = AppConfig::load(config_path)?;
    if let Some(path) = config_path {
        info!(path = %path.display(), "Loaded configuration from file");
    } else {
        info!("Loaded configuration from default path");
    }

    let transport = Arc::new(GeminiClient::from_config(&file_config.provider));
    // A missing credential is fatal before any probe is issued
    if file_config.provider.api_key.is_some() {
        transport.ensure_api_key()?;
    }
    info!(
        candidates = file_config.provider.models.len(),
        "Resolving a usable model"
    );
    let resolved = resolver::resolve(transport, &file_config.provider.models).await?;
    info!(
        provider = resolved.provider(),
        model = resolved.model(),
        "Model resolved"
    );

    let lookup = BookLookup::new(file_config.books_endpoint.clone());
    let screener = Arc::new(Screener::new(resolved, lookup, file_config.clone()));

    info!(mode = ?cli.mode, "Running in selected mode");
    match cli.mode {
        RunMode::Cli => {
            let image = load_image(&cli).await?;
            info!("Dispatching single analysis via CLI mode");
            let outcome = screener
                .analyze(AnalyzeRequest {
                    image,
                    target_age: cli.age,
                    session_id: cli.session.clone(),
                })
                .await?;
            let output = serde_json::json!({
                "session_id": outcome.session_id,
                "report": outcome.report,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        RunMode::Rest => {
            info!(addr = %cli.rest_addr, "Starting REST server");
            server::serve(screener.clone(), cli.rest_addr).await?;
        }
    }
    info!("Execution finished");
    Ok(())
}

fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_level(true)
            .init();
    });
}

async fn load_image(cli: &Cli) -> Result<ImagePayload, Box<dyn Error>> {
    let Some(path) = &cli.image else {
        return Err("cover image path required in CLI mode".into());
    };
    info!(path = %path.display(), "Loading cover image");
    let bytes = fs::read(path).await?;
    let mime_type = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("image/jpeg")
        .to_string();
    let data = base64::engine::general_purpose::STANDARD.encode(bytes);
    Ok(ImagePayload { mime_type, data })
}
