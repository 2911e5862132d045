use super::error::ConfigError;
use super::provider::{ProviderConfig, RawProviderConfig};
use crate::constants::{
    CONFIG_PATH, DEFAULT_BOOKS_ENDPOINT, ENV_PATH, MAX_TARGET_AGE, MIN_TARGET_AGE,
};
use dotenvy::from_filename;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Once;
use tracing::debug;

static ENV_LOADER: Once = Once::new();

const DEFAULT_TARGET_AGE: u8 = 10;

/// Raw configuration structure for deserialization from TOML
#[derive(Debug, Deserialize, Default)]
pub(super) struct RawConfig {
    pub target_age: Option<u8>,
    pub prompt_template: Option<String>,
    pub chat_preamble: Option<String>,
    pub books_endpoint: Option<String>,
    pub provider: Option<RawProviderConfig>,
}

/// Ensures environment variables are loaded from config/.env
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        let _ = from_filename(ENV_PATH);
    });
}

/// Load and validate configuration from a file path
pub fn load_config(path: Option<&Path>) -> Result<super::AppConfig, ConfigError> {
    ensure_env_loaded();
    let config_path = path.unwrap_or_else(|| Path::new(CONFIG_PATH));
    read_config(config_path)
}

fn read_config(path: &Path) -> Result<super::AppConfig, ConfigError> {
    debug!(path = %path.display(), "Reading client configuration file");

    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let parsed: RawConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    validate_and_build(parsed)
}

fn validate_and_build(parsed: RawConfig) -> Result<super::AppConfig, ConfigError> {
    let prompt_template = parsed
        .prompt_template
        .ok_or(ConfigError::MissingPromptTemplate)?;
    let raw_provider = parsed.provider.ok_or(ConfigError::MissingProvider)?;
    let provider = ProviderConfig::from(raw_provider);

    if provider.models.is_empty() {
        return Err(ConfigError::NoCandidateModels {
            provider: provider.id.clone(),
        });
    }

    let target_age = parsed.target_age.unwrap_or(DEFAULT_TARGET_AGE);
    if !(MIN_TARGET_AGE..=MAX_TARGET_AGE).contains(&target_age) {
        return Err(ConfigError::TargetAgeOutOfRange {
            age: target_age,
            min: MIN_TARGET_AGE,
            max: MAX_TARGET_AGE,
        });
    }

    Ok(super::AppConfig {
        target_age,
        prompt_template,
        chat_preamble: parsed.chat_preamble,
        books_endpoint: parsed
            .books_endpoint
            .unwrap_or_else(|| DEFAULT_BOOKS_ENDPOINT.to_string()),
        provider,
    })
}
