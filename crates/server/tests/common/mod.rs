//! # Common Test Utilities
//!
//! Test harness shared by the `inkwell-server` integration tests.
//!
//! - `TestApp`: spawns the real router on a random port, with every provider
//!   URL pointed at an `httpmock::MockServer`.
//! - Helpers that build provider answers in both analysis envelopes.

// Not every test file uses every helper.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use httpmock::{Method::POST, Mock, MockServer};
use inkwell::PipelineConfig;
use inkwell_server::{
    config::AppConfig,
    router,
    state::{build_app_state, AppState},
};
use reqwest::Client;
use serde_json::{json, Value};
use std::{net::SocketAddr, time::Duration};
use tokio::{net::TcpListener, task::JoinHandle};

pub const MESSAGES_PATH: &str = "/v1/messages";
pub const GATEWAY_PATH: &str = "/api/v1/chat/completions";

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub app_state: AppState,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

/// Which credentials the spawned server gets.
#[derive(Clone, Copy, Debug, Default)]
pub struct Credentials {
    pub ocr: bool,
    pub gateway: bool,
    pub direct: bool,
}

impl Credentials {
    pub fn ocr_only() -> Self {
        Self {
            ocr: true,
            ..Default::default()
        }
    }

    pub fn all() -> Self {
        Self {
            ocr: true,
            gateway: true,
            direct: true,
        }
    }
}

impl TestApp {
    /// Spawns the server with the given credentials and default limits.
    pub async fn spawn(credentials: Credentials) -> Result<Self> {
        Self::spawn_with(credentials, |_| {}).await
    }

    /// Spawns the server after letting the caller adjust the configuration.
    pub async fn spawn_with(
        credentials: Credentials,
        customize: impl FnOnce(&mut PipelineConfig),
    ) -> Result<Self> {
        let mock_server = MockServer::start_async().await;

        let mut pipeline = PipelineConfig {
            ocr_api_key: credentials.ocr.then(|| "test-ocr-key".to_string()),
            ocr_api_url: mock_server.url(MESSAGES_PATH),
            analysis_api_key: credentials.direct.then(|| "test-analysis-key".to_string()),
            analysis_api_url: mock_server.url(MESSAGES_PATH),
            gateway_api_key: credentials.gateway.then(|| "test-gateway-key".to_string()),
            gateway_api_url: mock_server.url(GATEWAY_PATH),
            provider_timeout: Duration::from_secs(5),
            ..Default::default()
        };
        customize(&mut pipeline);

        let config = AppConfig { port: 0, pipeline };
        let app_state = build_app_state(&config).await?;
        Self::spawn_with_state(app_state, mock_server).await
    }

    pub async fn spawn_with_state(app_state: AppState, mock_server: MockServer) -> Result<Self> {
        dotenvy::dotenv().ok();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let app_state_for_harness = app_state.clone();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        tokio::time::sleep(Duration::from_millis(100)).await;

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            app_state: app_state_for_harness,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// POSTs a JSON body and returns the status code with the parsed answer.
    pub async fn post_json(&self, path: &str, body: &Value) -> Result<(u16, Value)> {
        let response = self
            .client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.json::<Value>().await?;
        Ok((status, body))
    }

    /// Mocks the OCR provider with a successful messages-API answer.
    pub async fn mock_ocr_reply(&self, markdown: &str) -> Mock<'_> {
        let body = messages_body(markdown);
        self.mock_server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(MESSAGES_PATH)
                    .header("x-api-key", "test-ocr-key");
                then.status(200).json_body(body);
            })
            .await
    }

    /// Mocks the OCR provider with an error status.
    pub async fn mock_ocr_status(&self, status: u16) -> Mock<'_> {
        self.mock_server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(MESSAGES_PATH)
                    .header("x-api-key", "test-ocr-key");
                then.status(status)
                    .json_body(json!({ "type": "error", "error": { "message": "upstream secret" } }));
            })
            .await
    }

    /// Mocks the gateway route with a chat-completions answer.
    pub async fn mock_gateway_reply(&self, insights: &str) -> Mock<'_> {
        let body = json!({
            "choices": [{ "message": { "role": "assistant", "content": insights } }]
        });
        self.mock_server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(GATEWAY_PATH)
                    .header("authorization", "Bearer test-gateway-key");
                then.status(200).json_body(body);
            })
            .await
    }

    /// Mocks the gateway route with an error status.
    pub async fn mock_gateway_status(&self, status: u16) -> Mock<'_> {
        self.mock_server
            .mock_async(|when, then| {
                when.method(POST).path(GATEWAY_PATH);
                then.status(status).body("gateway exploded");
            })
            .await
    }

    /// Mocks the direct analysis route with a messages-API answer.
    pub async fn mock_direct_reply(&self, insights: &str) -> Mock<'_> {
        let body = messages_body(insights);
        self.mock_server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(MESSAGES_PATH)
                    .header("x-api-key", "test-analysis-key");
                then.status(200).json_body(body);
            })
            .await
    }

    /// Matches any request at all, to prove nothing left the server.
    pub async fn mock_any_request(&self) -> Mock<'_> {
        self.mock_server
            .mock_async(|when, then| {
                when.any_request();
                then.status(500);
            })
            .await
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// A messages-API answer carrying one text block.
pub fn messages_body(text: &str) -> Value {
    json!({
        "content": [{ "type": "text", "text": text }],
        "usage": { "input_tokens": 1200, "output_tokens": 80 }
    })
}

/// An OCR answer in the layout the transcription prompt asks for.
pub fn journal_markdown(date: &str, body: &str) -> String {
    format!(
        "---\ndate: {date}\nmood: reflective\nconfidence: high\n---\n\n## Transcription\n\n{body}\n\n## Notes\n\nNone.\n"
    )
}

/// A tiny "JPEG": only the size and the alphabet matter to the relay.
pub fn small_image_base64() -> String {
    STANDARD.encode([0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00])
}
