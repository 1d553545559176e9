use crate::{
    errors::{PipelineError, ProviderCallError},
    providers::ai::{AiProvider, VisionProvider},
    types::{ProviderReply, TokenUsage},
};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::time::Duration;
use tracing::debug;

const ANTHROPIC_VERSION: &str = "2023-06-01";

// --- Messages API request and response structures ---

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Vec<ContentBlock<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock<'a> {
    Image { source: ImageSource<'a> },
    Text { text: &'a str },
}

#[derive(Serialize)]
struct ImageSource<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    media_type: &'a str,
    data: &'a str,
}

#[derive(Deserialize, Debug)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ResponseBlock>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize, Debug)]
struct ResponseBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize, Debug)]
struct Usage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
}

impl MessagesResponse {
    /// Joins every text block of the answer.
    fn into_reply(self) -> Result<ProviderReply, ProviderCallError> {
        let text = self
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("\n");
        if text.trim().is_empty() {
            return Err(ProviderCallError::EmptyResponse);
        }
        Ok(ProviderReply {
            text,
            usage: self.usage.map(|u| TokenUsage {
                input_tokens: u.input_tokens,
                output_tokens: u.output_tokens,
            }),
        })
    }
}

// --- Anthropic Provider implementation ---

/// A provider for the Anthropic Messages API.
///
/// Used for OCR (image + prompt) and for the direct analysis route.
#[derive(Clone)]
pub struct AnthropicProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl Debug for AnthropicProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicProvider")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

impl AnthropicProvider {
    /// Creates a new `AnthropicProvider`.
    pub fn new(
        api_url: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, PipelineError> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(PipelineError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url,
            api_key,
            model,
            max_tokens: 4096,
            temperature: 0.0,
        })
    }

    /// Overrides the sampling temperature (defaults to 0.0).
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    async fn send(&self, request: &MessagesRequest<'_>) -> Result<ProviderReply, ProviderCallError> {
        debug!(model = %self.model, url = %self.api_url, "--> Sending request to Messages API");
        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(request)
            .send()
            .await
            .map_err(ProviderCallError::AiRequest)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderCallError::AiApi { status, body });
        }

        let messages_response: MessagesResponse = response
            .json()
            .await
            .map_err(ProviderCallError::AiDeserialization)?;

        messages_response.into_reply()
    }
}

#[async_trait]
impl VisionProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn describe_image(
        &self,
        prompt: &str,
        image_base64: &str,
        media_type: &str,
    ) -> Result<ProviderReply, ProviderCallError> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            system: None,
            messages: vec![Message {
                role: "user",
                content: vec![
                    ContentBlock::Image {
                        source: ImageSource {
                            kind: "base64",
                            media_type,
                            data: image_base64,
                        },
                    },
                    ContentBlock::Text { text: prompt },
                ],
            }],
        };
        self.send(&request).await
    }
}

#[async_trait]
impl AiProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<ProviderReply, ProviderCallError> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            system: Some(system_prompt).filter(|s| !s.is_empty()),
            messages: vec![Message {
                role: "user",
                content: vec![ContentBlock::Text { text: user_prompt }],
            }],
        };
        self.send(&request).await
    }
}
