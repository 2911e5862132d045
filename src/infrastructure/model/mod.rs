//! Model infrastructure module
//!
//! Talks to the hosted multimodal model service.
//!
//! # Structure
//! - `types` - Request, Reply, Error types
//! - `traits` - ModelTransport trait
//! - `client` - Gemini HTTP client
//! - `resolver` - Ordered candidate scan producing a `ResolvedModel`

pub mod client;
pub mod resolver;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use client::GeminiClient;
pub use resolver::ResolvedModel;
pub use traits::ModelTransport;
pub use types::{ImagePayload, ModelError, ModelReply, ModelRequest};
