//! LLM Client: the single point of entry for all Gemini API calls in Sahaay.
//!
//! ARCHITECTURAL RULE: No other module may call the Gemini API directly.
//! Resolvers depend on the `GenerationBackend` trait; `GeminiClient` is the
//! production implementation.
//!
//! One `generate` call is exactly one HTTP request. Retries and timeouts are
//! the caller's business.

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use crate::models::query::Coordinate;

pub mod prompts;
#[cfg(test)]
pub mod testing;
mod wire;

use wire::{
    ApiErrorEnvelope, Content, GenerateContentRequest, GenerateContentResponse, GoogleMaps,
    RetrievalConfig, TextPart, Tool, ToolConfig,
};

/// Model for guidance documents.
pub const GUIDANCE_MODEL: &str = "gemini-3-flash-preview";
/// Model for maps-grounded local help. Grounding with maps is not offered on every model.
pub const LOCAL_HELP_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Whether the backend may consult location data, and where from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Grounding {
    Disabled,
    Maps(Coordinate),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: &'static str,
    pub prompt: String,
    pub grounding: Grounding,
}

impl GenerationRequest {
    pub fn grounding_enabled(&self) -> bool {
        matches!(self.grounding, Grounding::Maps(_))
    }
}

#[cfg(test)]
impl GenerationRequest {
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self.grounding {
            Grounding::Maps(c) => Some(c),
            Grounding::Disabled => None,
        }
    }
}

/// A raw grounding entry as the backend reported it. Either field may be missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroundingEntry {
    pub title: Option<String>,
    pub uri: Option<String>,
}

#[cfg(test)]
impl GroundingEntry {
    pub fn new(title: &str, uri: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            uri: Some(uri.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationResult {
    /// `None` means the call succeeded but produced no answer. Never `Some("")`.
    pub text: Option<String>,
    pub grounding: Vec<GroundingEntry>,
}

/// The backend gateway. Carried in `AppState` as `Arc<dyn GenerationBackend>`
/// so tests can substitute a recording mock.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, GatewayError>;
}

/// Gemini `generateContent` client.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: String) -> Result<Self, GatewayError> {
        Ok(Self {
            client: Client::builder().build()?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{model}:generateContent", self.base_url)
    }
}

fn build_body(request: &GenerationRequest) -> GenerateContentRequest<'_> {
    let (tools, tool_config) = match request.grounding {
        Grounding::Disabled => (None, None),
        Grounding::Maps(coordinate) => (
            Some(vec![Tool {
                google_maps: GoogleMaps {},
            }]),
            Some(ToolConfig {
                retrieval_config: RetrievalConfig {
                    lat_lng: coordinate.into(),
                },
            }),
        ),
    };

    GenerateContentRequest {
        contents: vec![Content {
            role: "user",
            parts: vec![TextPart {
                text: &request.prompt,
            }],
        }],
        tools,
        tool_config,
    }
}

#[async_trait]
impl GenerationBackend for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, GatewayError> {
        let body = build_body(request);

        debug!(
            "Gemini call: model={}, grounding={}, prompt_chars={}",
            request.model,
            request.grounding_enabled(),
            request.prompt.chars().count()
        );

        let response = self
            .client
            .post(self.endpoint(request.model))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let raw = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorEnvelope>(&raw)
                .map(|e| e.error.message)
                .unwrap_or(raw);
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&raw)?;
        let text = parsed.text();
        let grounding: Vec<GroundingEntry> = parsed
            .maps_sources()
            .into_iter()
            .map(|m| GroundingEntry {
                title: m.title,
                uri: m.uri,
            })
            .collect();

        debug!(
            "Gemini call succeeded: has_text={}, grounding_entries={}",
            text.is_some(),
            grounding.len()
        );

        Ok(GenerationResult { text, grounding })
    }
}
