//! Gemini client implementation

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::env;
use tracing::{debug, info, warn};

use crate::config::ProviderConfig;
use crate::constants::DEFAULT_GEMINI_API_PATH;
use crate::infrastructure::model::traits::ModelTransport;
use crate::infrastructure::model::types::{ModelError, ModelReply, ModelRequest};

/// Gemini client for Google AI
#[derive(Clone)]
pub struct GeminiClient {
    id: String,
    endpoint: String,
    api_path: String,
    api_key: Option<String>,
    http: Client,
}

impl GeminiClient {
    pub fn from_config(config: &ProviderConfig) -> Self {
        let api_key = resolve_api_key(&config.id, config.api_key.as_deref());
        Self {
            id: config.id.clone(),
            endpoint: config.endpoint.clone(),
            api_path: config
                .api_path
                .clone()
                .unwrap_or_else(|| DEFAULT_GEMINI_API_PATH.to_string()),
            api_key,
            http: Client::new(),
        }
    }

    fn build_model_url(&self, model: &str) -> String {
        let base = self.endpoint.trim_end_matches('/');
        format!("{base}/{}/{model}:generateContent", self.api_path)
    }

    /// Fail when no usable API key was resolved.
    ///
    /// Called once at startup, before the probe scan, so a missing
    /// credential surfaces as a credential error instead of a resolution
    /// failure after N wasted probes.
    pub fn ensure_api_key(&self) -> Result<(), ModelError> {
        self.require_api_key().map(|_| ())
    }

    fn require_api_key(&self) -> Result<&str, ModelError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ModelError::missing_api_key(&self.id))
    }

    /// Post JSON with query param auth, as the Gemini API expects
    async fn post_with_query_key(
        &self,
        url: &str,
        body: &Value,
    ) -> Result<GeminiResponse, ModelError> {
        let api_key = self.require_api_key()?;
        let url_with_key = format!("{url}?key={api_key}");

        self.http
            .post(&url_with_key)
            .json(body)
            .send()
            .await
            .map_err(|e| ModelError::network(&self.id, e))?
            .error_for_status()
            .map_err(|e| ModelError::network(&self.id, e))?
            .json()
            .await
            .map_err(|e| ModelError::network(&self.id, e))
    }
}

#[async_trait]
impl ModelTransport for GeminiClient {
    fn id(&self) -> &str {
        &self.id
    }

    async fn generate(
        &self,
        model: &str,
        request: &ModelRequest,
    ) -> Result<ModelReply, ModelError> {
        let url = self.build_model_url(model);

        let mut parts = vec![json!({"text": request.prompt})];
        if let Some(image) = &request.image {
            parts.push(json!({
                "inline_data": {
                    "mime_type": image.mime_type,
                    "data": image.data,
                }
            }));
        }

        let mut payload = json!({
            "contents": [{"role": "user", "parts": parts}],
        });
        if request.json_reply {
            payload["generationConfig"] = json!({
                "responseMimeType": "application/json"
            });
        }

        info!(
            provider = self.id.as_str(),
            model,
            with_image = request.image.is_some(),
            "Sending request to Gemini"
        );

        let response = self.post_with_query_key(&url, &payload).await?;
        debug!("Received response from Gemini");

        interpret_response(&self.id, response)
    }
}

/// Resolve API key from environment variable
pub fn resolve_api_key(provider: &str, spec: Option<&str>) -> Option<String> {
    let Some(raw) = spec.map(str::trim) else {
        return None;
    };
    if raw.is_empty() {
        return None;
    }
    match env::var(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(
                provider,
                env_var = raw,
                %err,
                "API key environment variable is not set"
            );
            None
        }
    }
}

/// Map the wire response to a reply or an error.
///
/// A safety block is signaled two ways by the service: `promptFeedback.blockReason`
/// with no candidates, or a candidate whose `finishReason` names a safety
/// category. Both map to a blocked reply here so the rest of the system sees
/// one signal.
fn interpret_response(provider: &str, response: GeminiResponse) -> Result<ModelReply, ModelError> {
    if let Some(reason) = response
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason)
    {
        return Ok(ModelReply::blocked(reason));
    }

    let candidates = response.candidates.unwrap_or_default();
    if let Some(reason) = candidates
        .iter()
        .filter_map(|c| c.finish_reason.as_deref())
        .find(|reason| is_safety_finish(reason))
    {
        return Ok(ModelReply::blocked(reason.to_string()));
    }

    let content = candidates
        .into_iter()
        .flat_map(|c| c.content)
        .flat_map(|c| c.parts)
        .find_map(|p| p.text)
        .ok_or_else(|| ModelError::invalid_response(provider, "missing text"))?;

    Ok(ModelReply::text(content))
}

fn is_safety_finish(reason: &str) -> bool {
    matches!(reason, "SAFETY" | "IMAGE_SAFETY" | "PROHIBITED_CONTENT")
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Deserialize)]
struct GeminiPromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(raw: &str) -> GeminiResponse {
        serde_json::from_str(raw).expect("decode response")
    }

    #[test]
    fn extracts_first_text_part() {
        let response = decode(
            r#"{"candidates":[{"content":{"parts":[{"text":"hello"}]}}]}"#,
        );
        let reply = interpret_response("gemini", response).expect("reply");
        assert_eq!(reply.text, "hello");
        assert!(!reply.is_blocked());
    }

    #[test]
    fn prompt_feedback_block_maps_to_blocked_reply() {
        let response = decode(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#);
        let reply = interpret_response("gemini", response).expect("reply");
        assert!(reply.is_blocked());
        assert_eq!(reply.text, "");
    }

    #[test]
    fn safety_finish_reason_maps_to_blocked_reply() {
        let response = decode(
            r#"{"candidates":[{"finishReason":"SAFETY"}]}"#,
        );
        let reply = interpret_response("gemini", response).expect("reply");
        assert!(reply.is_blocked());
    }

    #[test]
    fn missing_text_is_invalid_response() {
        let response = decode(r#"{"candidates":[]}"#);
        let result = interpret_response("gemini", response);
        assert!(matches!(result, Err(ModelError::InvalidResponse { .. })));
    }

    #[test]
    fn unresolved_credential_is_a_distinct_startup_error() {
        let config = ProviderConfig {
            id: "gemini".to_string(),
            endpoint: "https://example.com".to_string(),
            api_key: Some("COVERCHECK_TEST_UNSET_KEY_VAR".to_string()),
            api_path: None,
            models: vec![],
        };
        let client = GeminiClient::from_config(&config);
        assert!(matches!(
            client.ensure_api_key(),
            Err(ModelError::MissingApiKey { .. })
        ));
    }
}
