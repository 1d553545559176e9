use crate::{
    errors::{PipelineError, ProviderCallError},
    providers::ai::AiProvider,
    types::{ProviderReply, TokenUsage},
};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::time::Duration;
use tracing::debug;

// --- OpenAI-compatible request and response structures ---

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: Vec<ChatMessage<'a>>,
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize, Debug)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

// --- Gateway Provider implementation ---

/// A provider for an OpenAI-compatible aggregation gateway (OpenRouter).
#[derive(Clone)]
pub struct OpenRouterProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl Debug for OpenRouterProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenRouterProvider")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

impl OpenRouterProvider {
    /// Creates a new `OpenRouterProvider`.
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
            temperature: 0.7,
        })
    }
}

#[async_trait]
impl AiProvider for OpenRouterProvider {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<ProviderReply, ProviderCallError> {
        let mut messages = Vec::with_capacity(2);
        if !system_prompt.is_empty() {
            messages.push(ChatMessage {
                role: "system",
                content: system_prompt,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: user_prompt,
        });

        let request_body = ChatRequest {
            messages,
            model: &self.model,
            temperature: self.temperature,
            max_tokens: 2048,
            stream: false,
        };

        debug!(model = %self.model, url = %self.api_url, "--> Sending request to gateway");
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .header("X-Title", "Inkwell")
            .json(&request_body)
            .send()
            .await
            .map_err(ProviderCallError::AiRequest)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderCallError::AiApi { status, body });
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(ProviderCallError::AiDeserialization)?;

        let text = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|t| !t.trim().is_empty())
            .ok_or(ProviderCallError::EmptyResponse)?;

        Ok(ProviderReply {
            text,
            usage: chat_response.usage.map(|u| TokenUsage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            }),
        })
    }
}
