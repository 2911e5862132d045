use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found at {path:?}")]
    NotFound { path: PathBuf },

    #[error("failed to read config from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("missing required field 'prompt_template' in configuration")]
    MissingPromptTemplate,

    #[error("missing [provider] section in configuration")]
    MissingProvider,

    #[error("provider '{provider}' has no candidate models - at least one entry is required")]
    NoCandidateModels { provider: String },

    #[error("target_age {age} is outside the supported range {min}-{max}")]
    TargetAgeOutOfRange { age: u8, min: u8, max: u8 },
}
