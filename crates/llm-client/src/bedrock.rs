//! Amazon Bedrock Converse API client.
//!
//! Authenticates with a Bedrock API key sent as a bearer token, so no
//! request signing is involved.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, info};

use crate::{check_instructions, GenerationError, PromptExecutor};

/// Default model when none is configured
pub const DEFAULT_MODEL_ID: &str = "anthropic.claude-3-haiku-20240307-v1:0";

/// Default AWS region when none is configured
pub const DEFAULT_REGION: &str = "us-east-1";

/// Connection and inference settings for `BedrockClient`.
#[derive(Debug, Clone)]
pub struct BedrockConfig {
    /// Bedrock API key; `None` means every call fails with `MissingCredentials`
    pub api_key: Option<String>,
    pub region: String,
    pub model_id: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
    /// Overrides the regional runtime endpoint (proxies, tests)
    pub base_url: Option<String>,
}

impl Default for BedrockConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            region: DEFAULT_REGION.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            max_tokens: 2000,
            temperature: 0.7,
            timeout: Duration::from_secs(120),
            base_url: None,
        }
    }
}

impl BedrockConfig {
    /// True when an API key is present and non-blank.
    pub fn has_credentials(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    /// Runtime endpoint, e.g. `https://bedrock-runtime.us-east-1.amazonaws.com`
    pub fn endpoint(&self) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://bedrock-runtime.{}.amazonaws.com", self.region),
        }
    }
}

/// Client for the Bedrock Converse API.
///
/// Cheap to clone; the underlying `reqwest::Client` shares its
/// connection pool.
#[derive(Clone)]
pub struct BedrockClient {
    http: Client,
    config: BedrockConfig,
}

impl BedrockClient {
    /// Build a client from configuration.
    ///
    /// A missing API key is not an error here; it is reported on the
    /// first `execute` call so health endpoints keep working.
    pub fn new(config: BedrockConfig) -> Result<Self, GenerationError> {
        info!(
            "Configuring Bedrock client: region={}, model={}",
            config.region, config.model_id
        );
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &BedrockConfig {
        &self.config
    }

    /// `{endpoint}/model/{model_id}/converse`, with the model id encoded as a
    /// single path segment (inference profile ARNs contain `/`).
    fn converse_url(&self) -> Result<Url, GenerationError> {
        let endpoint = self.config.endpoint();
        let mut url = Url::parse(&endpoint)
            .map_err(|e| GenerationError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;
        url.path_segments_mut()
            .map_err(|_| GenerationError::InvalidEndpoint(endpoint.clone()))?
            .pop_if_empty()
            .extend(["model", self.config.model_id.as_str(), "converse"]);
        Ok(url)
    }

    fn build_request_body(&self, system_instruction: &str, user_instruction: &str) -> serde_json::Value {
        json!({
            "system": [{ "text": system_instruction }],
            "messages": [{
                "role": "user",
                "content": [{ "text": user_instruction }],
            }],
            "inferenceConfig": {
                "maxTokens": self.config.max_tokens,
                "temperature": self.config.temperature,
            },
        })
    }
}

#[async_trait]
impl PromptExecutor for BedrockClient {
    async fn execute(
        &self,
        system_instruction: &str,
        user_instruction: &str,
    ) -> Result<String, GenerationError> {
        check_instructions(system_instruction, user_instruction)?;
        let api_key = match self.config.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => key,
            _ => return Err(GenerationError::MissingCredentials),
        };

        let url = self.converse_url()?;
        debug!("Sending converse request to {}", url);

        let response = self
            .http
            .post(url)
            .bearer_auth(api_key)
            .json(&self.build_request_body(system_instruction, user_instruction))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or(body);
            error!("Bedrock returned {}: {}", status, message);
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ConverseResponse = serde_json::from_str(&body)?;
        if let Some(usage) = &parsed.usage {
            debug!(
                "Token usage: input={}, output={}",
                usage.input_tokens, usage.output_tokens
            );
        }
        parsed.into_text()
    }
}

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(alias = "Message")]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConverseResponse {
    output: Option<ConverseOutput>,
    usage: Option<ConverseUsage>,
}

#[derive(Debug, Deserialize)]
struct ConverseOutput {
    message: Option<ConverseMessage>,
}

#[derive(Debug, Deserialize)]
struct ConverseMessage {
    #[serde(default)]
    content: Vec<ConverseContent>,
}

#[derive(Debug, Deserialize)]
struct ConverseContent {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConverseUsage {
    #[serde(default)]
    input_tokens: u32,
    #[serde(default)]
    output_tokens: u32,
}

impl ConverseResponse {
    /// Join all text blocks of the assistant message.
    fn into_text(self) -> Result<String, GenerationError> {
        let blocks: Vec<String> = self
            .output
            .and_then(|o| o.message)
            .map(|m| m.content.into_iter().filter_map(|c| c.text).collect())
            .unwrap_or_default();

        if blocks.is_empty() {
            return Err(GenerationError::InvalidResponse(
                "Response contained no text content".into(),
            ));
        }
        Ok(blocks.join("\n"))
    }
}
