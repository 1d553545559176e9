#![allow(dead_code)]
//! # Common Test Utilities
//!
//! Scripted in-process providers so pipeline logic can be tested without a
//! network, plus tracing setup shared by the integration tests.

use async_trait::async_trait;
use inkwell::errors::ProviderCallError;
use inkwell::providers::ai::{AiProvider, VisionProvider};
use inkwell::types::ProviderReply;
use std::sync::{Arc, Once, RwLock};
use std::time::Duration;

static INIT: Once = Once::new();

/// Initializes the tracing subscriber once per test binary.
pub fn setup_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();
    });
}

/// What a scripted provider does when called.
#[derive(Clone, Debug)]
pub enum Scripted {
    Reply(String),
    Status(u16),
    Empty,
    Hang(Duration),
}

impl Scripted {
    async fn run(&self) -> Result<ProviderReply, ProviderCallError> {
        match self {
            Scripted::Reply(text) => Ok(ProviderReply {
                text: text.clone(),
                usage: None,
            }),
            Scripted::Status(status) => Err(ProviderCallError::AiApi {
                status: *status,
                body: "scripted failure".to_string(),
            }),
            Scripted::Empty => Err(ProviderCallError::EmptyResponse),
            Scripted::Hang(duration) => {
                tokio::time::sleep(*duration).await;
                Ok(ProviderReply {
                    text: "too late".to_string(),
                    usage: None,
                })
            }
        }
    }
}

// --- Mock OCR provider ---

#[derive(Clone, Debug)]
pub struct MockVisionProvider {
    pub script: Scripted,
    /// `(media_type, image_base64)` of every call.
    pub call_history: Arc<RwLock<Vec<(String, String)>>>,
}

impl MockVisionProvider {
    pub fn new(script: Scripted) -> Self {
        Self {
            script,
            call_history: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> usize {
        self.call_history.read().unwrap().len()
    }
}

#[async_trait]
impl VisionProvider for MockVisionProvider {
    fn name(&self) -> &str {
        "mock-ocr"
    }

    async fn describe_image(
        &self,
        _prompt: &str,
        image_base64: &str,
        media_type: &str,
    ) -> Result<ProviderReply, ProviderCallError> {
        self.call_history
            .write()
            .unwrap()
            .push((media_type.to_string(), image_base64.to_string()));
        self.script.run().await
    }
}

// --- Mock analysis provider ---

#[derive(Clone, Debug)]
pub struct MockAiProvider {
    pub script: Scripted,
    /// `(system_prompt, user_prompt)` of every call.
    pub call_history: Arc<RwLock<Vec<(String, String)>>>,
}

impl MockAiProvider {
    pub fn new(script: Scripted) -> Self {
        Self {
            script,
            call_history: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> usize {
        self.call_history.read().unwrap().len()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    fn name(&self) -> &str {
        "mock-analysis"
    }

    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<ProviderReply, ProviderCallError> {
        self.call_history
            .write()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));
        self.script.run().await
    }
}

/// A journal answer in the layout the transcription prompt asks for.
pub fn journal_markdown(date: &str, body: &str) -> String {
    format!(
        "---\ndate: {date}\nmood: hopeful\nconfidence: high\n---\n\n## Transcription\n\n{body}\n\n## Notes\n\nNone.\n"
    )
}
