//! Provider configuration
//!
//! Connection settings for the hosted multimodal model service, including the
//! ordered list of candidate models tried during resolution.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::constants::DEFAULT_GEMINI_ENDPOINT;

/// A candidate model from the provider.
///
/// Candidates can be specified with just a name, or with an optional display
/// name for UI presentation. List order is the resolution order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct ModelInfo {
    /// Model identifier used in API calls (e.g., "gemini-2.0-flash")
    pub name: String,
    /// Human-readable display name for UI (e.g., "Gemini 2.0 Flash")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl ModelInfo {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
        }
    }
}

/// Configuration for the model provider.
///
/// # Example
///
/// ```toml
/// [provider]
/// id = "gemini"
/// endpoint = "https://generativelanguage.googleapis.com"
/// api_key = "GEMINI_API_KEY"
/// models = ["gemini-2.0-flash", "gemini-1.5-flash"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct ProviderConfig {
    /// Identifier used in logs and error messages (e.g., "gemini")
    pub id: String,
    /// API endpoint URL
    pub endpoint: String,
    /// Name of the environment variable holding the API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Custom API path override (e.g., "v1beta/models")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_path: Option<String>,
    /// Ordered candidate models, tried first to last during resolution
    pub models: Vec<ModelInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct RawProviderConfig {
    #[serde(default = "default_provider_id")]
    pub(super) id: String,
    pub(super) endpoint: Option<String>,
    pub(super) api_key: Option<String>,
    #[serde(default)]
    pub(super) api_path: Option<String>,
    #[serde(default)]
    pub(super) models: Vec<RawModelInfo>,
}

fn default_provider_id() -> String {
    "gemini".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(super) enum RawModelInfo {
    Name(String),
    Detailed {
        name: String,
        #[serde(default)]
        display_name: Option<String>,
    },
}

impl From<RawModelInfo> for ModelInfo {
    fn from(value: RawModelInfo) -> Self {
        match value {
            RawModelInfo::Name(name) => Self {
                name,
                display_name: None,
            },
            RawModelInfo::Detailed { name, display_name } => Self { name, display_name },
        }
    }
}

impl From<RawProviderConfig> for ProviderConfig {
    fn from(raw: RawProviderConfig) -> Self {
        Self {
            id: raw.id,
            endpoint: raw
                .endpoint
                .unwrap_or_else(|| DEFAULT_GEMINI_ENDPOINT.to_string()),
            api_key: raw.api_key,
            api_path: raw.api_path,
            models: raw.models.into_iter().map(ModelInfo::from).collect(),
        }
    }
}

impl ProviderConfig {
    /// Candidate model names in resolution order
    pub fn candidate_names(&self) -> Vec<&str> {
        self.models.iter().map(|info| info.name.as_str()).collect()
    }
}
