//! Language model client for risk summaries

use crate::config::LlmConfig;
use crate::enrich::geo::GeoInfo;
use crate::enrich::prompts::{PromptParams, PromptTemplates, SYSTEM_PROMPT};
use crate::error::{IpIntelError, Result};
use serde::{Deserialize, Serialize};

/// API version header required by the messages endpoint.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// One narrative risk assessment per IP address.
pub trait RiskSummarizer {
    fn summarize(
        &self,
        ip: &str,
        geo: &GeoInfo,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default, rename = "type")]
    block_type: String,
    #[serde(default)]
    text: String,
}

impl MessagesResponse {
    /// Pull the assessment text out of the response. An answer with no text
    /// is treated as a failed summary.
    fn into_narrative(self) -> Result<String> {
        let text = self
            .content
            .into_iter()
            .find(|block| block.block_type == "text")
            .map(|block| block.text)
            .unwrap_or_default();

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(IpIntelError::Summary(
                "Language model returned no assessment text".to_string(),
            ));
        }
        Ok(trimmed.to_string())
    }
}

/// Reject non-success transport statuses before touching the body.
fn ensure_success(status: reqwest::StatusCode, ip: &str) -> Result<()> {
    if !status.is_success() {
        return Err(IpIntelError::Summary(format!(
            "Language model returned HTTP {} for {}",
            status, ip
        )));
    }
    Ok(())
}

/// Client for the Anthropic messages API.
pub struct ClaudeClient {
    http: reqwest::Client,
    config: LlmConfig,
    api_key: String,
    templates: PromptTemplates,
}

impl ClaudeClient {
    pub fn new(config: LlmConfig, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            api_key: api_key.into(),
            templates: PromptTemplates::default(),
        }
    }
}

impl RiskSummarizer for ClaudeClient {
    async fn summarize(&self, ip: &str, geo: &GeoInfo) -> Result<String> {
        let prompt = self
            .templates
            .render_risk_assessment(&PromptParams::new(ip, geo));

        let request = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            system: SYSTEM_PROMPT,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .http
            .post(&self.config.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                IpIntelError::Summary(format!("Language model request for {} failed: {}", ip, e))
            })?;

        ensure_success(response.status(), ip)?;

        let payload: MessagesResponse = response.json().await.map_err(|e| {
            IpIntelError::Summary(format!(
                "Undecodable language model response for {}: {}",
                ip, e
            ))
        })?;
        payload.into_narrative()
    }
}
