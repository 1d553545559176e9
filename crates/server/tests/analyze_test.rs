//! # Analyze Endpoint Tests
//!
//! `POST /analyze` on both transport routes. The gateway wins whenever its
//! credential is present; the direct route is the fallback.

mod common;

use anyhow::Result;
use common::{Credentials, TestApp, MESSAGES_PATH};
use httpmock::Method::POST;
use serde_json::json;

#[tokio::test]
async fn test_analyze_prefers_gateway_route() -> Result<()> {
    // Arrange
    let app = TestApp::spawn(Credentials::all()).await?;
    let gateway = app.mock_gateway_reply("## Mood\nHopeful").await;
    let direct = app.mock_direct_reply("unused").await;

    // Act
    let (status, body) = app
        .post_json(
            "/analyze",
            &json!({ "transcription": "Finally finished the garden." }),
        )
        .await?;

    // Assert
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["analysis"], "## Mood\nHopeful");
    assert_eq!(body["provider"], "openrouter");
    gateway.assert_async().await;
    direct.assert_hits_async(0).await;

    Ok(())
}

#[tokio::test]
async fn test_analyze_falls_back_to_direct_route() -> Result<()> {
    let app = TestApp::spawn(Credentials {
        direct: true,
        ..Default::default()
    })
    .await?;
    let direct = app
        .mock_server
        .mock_async(|when, then| {
            when.method(POST)
                .path(MESSAGES_PATH)
                .header("x-api-key", "test-analysis-key")
                .body_contains("Finally finished the garden.");
            then.status(200)
                .json_body(common::messages_body("## Mood\nProud"));
        })
        .await;

    let (status, body) = app
        .post_json(
            "/analyze",
            &json!({ "transcription": "Finally finished the garden." }),
        )
        .await?;

    direct.assert_async().await;
    assert_eq!(status, 200);
    assert_eq!(body["analysis"], "## Mood\nProud");
    assert_eq!(body["provider"], "anthropic");

    Ok(())
}

#[tokio::test]
async fn test_analyze_requires_transcription_text() -> Result<()> {
    let app = TestApp::spawn(Credentials::all()).await?;
    let nothing = app.mock_any_request().await;

    for payload in [json!({}), json!({ "transcription": "   " }), json!({ "transcription": 7 })] {
        let (status, body) = app.post_json("/analyze", &payload).await?;
        assert_eq!(status, 400, "payload {payload}");
        assert_eq!(body["error"], "Missing 'transcription' text");
        assert_eq!(body["kind"], "MissingField");
    }
    nothing.assert_hits_async(0).await;

    Ok(())
}

#[tokio::test]
async fn test_analyze_provider_failure_is_an_error_here() -> Result<()> {
    let app = TestApp::spawn(Credentials {
        gateway: true,
        ..Default::default()
    })
    .await?;
    let gateway = app.mock_gateway_status(502).await;

    let (status, body) = app
        .post_json("/analyze", &json!({ "transcription": "A quiet day." }))
        .await?;

    gateway.assert_async().await;
    assert_eq!(status, 500);
    assert_eq!(body["error"], "Analysis failed");
    assert_eq!(body["kind"], "AnalysisFailed");
    assert_eq!(body["details"], "analysis provider failed (HTTP 502)");
    assert!(!body.to_string().contains("gateway exploded"));

    Ok(())
}

#[tokio::test]
async fn test_analyze_without_any_credential_is_config_error() -> Result<()> {
    let app = TestApp::spawn(Credentials::ocr_only()).await?;
    let nothing = app.mock_any_request().await;

    let (status, body) = app
        .post_json("/analyze", &json!({ "transcription": "A quiet day." }))
        .await?;

    assert_eq!(status, 500);
    assert_eq!(body["kind"], "ConfigError");
    assert_eq!(body["details"], "Analysis credential is not configured");
    nothing.assert_hits_async(0).await;

    Ok(())
}
