//! Application constants
//!
//! Single source of truth for paths and other constants.

/// Default configuration file path
pub const CONFIG_PATH: &str = "config/client.toml";

/// Default environment file path
pub const ENV_PATH: &str = "config/.env";

/// Default Gemini endpoint (fallback when not specified in config)
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Default Gemini API path (fallback when not specified in config)
pub const DEFAULT_GEMINI_API_PATH: &str = "v1beta/models";

/// Default Google Books volumes endpoint for cover lookups
pub const DEFAULT_BOOKS_ENDPOINT: &str = "https://www.googleapis.com/books/v1/volumes";

/// Trivial payload sent once per candidate model during resolution
pub const PROBE_PROMPT: &str = "Reply with the single word: ok";

/// Target age bounds accepted by the screener
pub const MIN_TARGET_AGE: u8 = 5;
pub const MAX_TARGET_AGE: u8 = 18;

/// Rating scale upper bound (inclusive)
pub const MAX_RATING: u8 = 5;
