//! Model resolution
//!
//! Scans the configured candidate models in order and pins the first one that
//! services a minimal probe request. Fallback lives here and nowhere else;
//! call sites never retry across models on their own.

use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use super::traits::ModelTransport;
use super::types::{ModelError, ModelReply, ModelRequest};
use crate::config::ModelInfo;
use crate::constants::PROBE_PROMPT;

/// A transport pinned to one successfully-probed model identifier.
///
/// Immutable once created; owned for the lifetime of the session and never
/// re-validated on subsequent use.
#[derive(Clone)]
pub struct ResolvedModel {
    transport: Arc<dyn ModelTransport>,
    model: String,
}

impl ResolvedModel {
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider(&self) -> &str {
        self.transport.id()
    }

    pub async fn generate(&self, request: &ModelRequest) -> Result<ModelReply, ModelError> {
        self.transport.generate(&self.model, request).await
    }
}

// Manual impl: the transport is a trait object
impl fmt::Debug for ResolvedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedModel")
            .field("provider", &self.transport.id())
            .field("model", &self.model)
            .finish()
    }
}

/// Try candidates strictly in list order; first successful probe wins.
///
/// Each candidate gets exactly one probe, a real `generateContent` call, so
/// every attempt consumes quota including the failed ones. Any error on a
/// candidate abandons it and moves the scan on; only when the whole list is
/// exhausted does resolution fail, which is terminal for the session.
pub async fn resolve(
    transport: Arc<dyn ModelTransport>,
    candidates: &[ModelInfo],
) -> Result<ResolvedModel, ModelError> {
    let probe = ModelRequest::text(PROBE_PROMPT);

    for candidate in candidates {
        match transport.generate(&candidate.name, &probe).await {
            Ok(_) => {
                info!(model = candidate.name.as_str(), "Candidate model probe succeeded");
                return Ok(ResolvedModel {
                    transport,
                    model: candidate.name.clone(),
                });
            }
            Err(err) => {
                warn!(
                    model = candidate.name.as_str(),
                    %err,
                    "Candidate model probe failed; trying next"
                );
            }
        }
    }

    Err(ModelError::NoUsableModel {
        attempted: candidates.len(),
    })
}
