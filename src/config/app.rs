use super::error::ConfigError;
use super::provider::ProviderConfig;
use std::path::Path;

/// Application configuration loaded from client.toml
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Default target reader age applied when a request omits one
    pub target_age: u8,
    /// Analysis prompt template; `{{target_age}}` is replaced per request
    pub prompt_template: String,
    /// Optional follow-up chat prompt prefix
    pub chat_preamble: Option<String>,
    /// Book-metadata lookup endpoint
    pub books_endpoint: String,
    pub provider: ProviderConfig,
}

impl AppConfig {
    /// Load configuration from a file path (or default path if None)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        super::loader::load_config(path)
    }

    pub fn prompt_template(&self) -> &str {
        &self.prompt_template
    }
}
