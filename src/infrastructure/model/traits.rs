//! Model traits

use super::types::{ModelError, ModelReply, ModelRequest};
use async_trait::async_trait;

/// Transport to a hosted model service.
///
/// The model identifier is passed per call so the resolver can probe several
/// candidates over one transport before a model is pinned.
#[async_trait]
pub trait ModelTransport: Send + Sync {
    /// Get the transport ID (provider id from config)
    fn id(&self) -> &str;

    /// Issue one content-generation call against the named model
    async fn generate(&self, model: &str, request: &ModelRequest)
    -> Result<ModelReply, ModelError>;
}
