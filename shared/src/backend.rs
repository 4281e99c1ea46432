//! Generative backend seam and the Gemini REST client behind it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::grounding::GroundingMetadata;
use crate::lenient;
use crate::prompt::{GroundingTool, PromptPayload};
use crate::{Config, Error, Result};

/// Reply envelope from the backend. Only the first candidate is used.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBackendReply {
    #[serde(default, deserialize_with = "lenient::list")]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default, deserialize_with = "lenient::object")]
    pub content: Option<Content>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Content {
    #[serde(default, deserialize_with = "lenient::list")]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Part {
    #[serde(default, deserialize_with = "lenient::string")]
    pub text: Option<String>,
}

/// Anything that can answer a prompt.
///
/// Implementations perform exactly one call and never retry.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate(&self, payload: &PromptPayload) -> Result<RawBackendReply>;
}

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    tools: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_config: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_payload(payload: &'a PromptPayload) -> Self {
        let tools = payload
            .tools
            .iter()
            .map(|tool| match tool {
                GroundingTool::Maps => serde_json::json!({ "googleMaps": {} }),
                GroundingTool::WebSearch => serde_json::json!({ "googleSearch": {} }),
            })
            .collect();

        let tool_config = payload.location_bias.map(|loc| {
            serde_json::json!({
                "retrievalConfig": {
                    "latLng": {
                        "latitude": loc.latitude,
                        "longitude": loc.longitude,
                    }
                }
            })
        });

        Self {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart {
                    text: &payload.text,
                }],
            }],
            tools,
            tool_config,
        }
    }
}

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    http_client: reqwest::Client,
    api_key: String,
    model: String,
    api_base: String,
}

impl GeminiClient {
    /// Create a client from loaded configuration.
    pub fn new(config: &Config) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(Error::Config("API key is empty".to_string()));
        }

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            api_base: config.api_base.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn generate(&self, payload: &PromptPayload) -> Result<RawBackendReply> {
        let body = GenerateContentRequest::from_payload(payload);
        debug!("Calling {} with {} tools", self.model, body.tools.len());

        let response = self
            .http_client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Backend request failed: {} - {}", status, body);
            return Err(Error::Transport {
                status: Some(status.as_u16()),
                message: format!("Backend returned {}: {}", status, body),
            });
        }

        let reply: RawBackendReply = response.json().await?;
        Ok(reply)
    }
}
