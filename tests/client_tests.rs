//! Completion client tests against a mock HTTP server

use httpmock::prelude::*;
use parshan::config::{AnthropicConfig, LoggingConfig, PipelineConfig, Settings};
use parshan::services::client::ClaudeClient;
use parshan::utils::error::AppError;
use serde_json::json;

fn test_settings(base_url: String) -> Settings {
    Settings {
        anthropic: AnthropicConfig {
            api_key: "sk-ant-test-key".to_string(),
            base_url,
            model: "claude-3-5-sonnet-20240620".to_string(),
            max_tokens: 4096,
            timeout: 5,
        },
        pipeline: PipelineConfig {
            sources_dir: "sources".into(),
            results_dir: "results".into(),
            prompt_file: "prompt.txt".into(),
            examples_file: "examples.txt".into(),
            output_file: "compiled_interpretations.docx".into(),
        },
        logging: LoggingConfig {
            level: "info".to_string(),
            usage_log_file: "api_usage.log".into(),
        },
    }
}

fn record_text() -> String {
    json!({
        "letter": "א",
        "original_text": "שלום",
        "difficult_words": [],
        "detailed_interpretation": [{"quote": "שלום", "explanation": "greeting"}]
    })
    .to_string()
}

fn message_body(text: String) -> serde_json::Value {
    json!({
        "id": "msg_01",
        "type": "message",
        "role": "assistant",
        "content": [{"type": "text", "text": text}],
        "model": "claude-3-5-sonnet-20240620",
        "stop_reason": "end_turn",
        "stop_sequence": null,
        "usage": {"input_tokens": 321, "output_tokens": 123}
    })
}

#[tokio::test]
async fn test_interpret_parses_record_and_attaches_usage() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
        when.method(POST)
            .path("/v1/messages")
            .header("x-api-key", "sk-ant-test-key")
            .header("anthropic-version", "2023-06-01")
            .json_body_partial(
                json!({
                    "model": "claude-3-5-sonnet-20240620",
                    "max_tokens": 4096,
                    "messages": [{"role": "user", "content": "פסקה לפירוש"}]
                })
                .to_string(),
            );
        then.status(200).json_body(message_body(record_text()));
    })
        .await;

    let settings = test_settings(server.base_url());
    let client = ClaudeClient::new(&settings).unwrap();

    let record = client.interpret("system prompt", "פסקה לפירוש").await.unwrap();

    mock.assert_async().await;
    assert_eq!(record.letter, "א");
    assert_eq!(record.original_text, "שלום");
    assert_eq!(record.detailed_interpretation.len(), 1);

    let usage = record.usage.expect("usage should be attached");
    assert_eq!(usage.input_tokens, 321);
    assert_eq!(usage.output_tokens, 123);
}

#[tokio::test]
async fn test_interpret_reports_api_error_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
        when.method(POST).path("/v1/messages");
        then.status(429).json_body(json!({
            "type": "error",
            "error": {"type": "rate_limit_error", "message": "Too many requests"}
        }));
    })
        .await;

    let settings = test_settings(server.base_url());
    let client = ClaudeClient::new(&settings).unwrap();

    let err = client.interpret("system", "paragraph").await.unwrap_err();
    match err {
        AppError::Api { status, message } => {
            assert_eq!(status, 429);
            assert!(message.contains("rate_limit_error"));
            assert!(message.contains("Too many requests"));
        }
        other => panic!("Expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_interpret_reports_unstructured_error_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
        when.method(POST).path("/v1/messages");
        then.status(502).body("bad gateway");
    })
        .await;

    let settings = test_settings(server.base_url());
    let client = ClaudeClient::new(&settings).unwrap();

    let err = client.interpret("system", "paragraph").await.unwrap_err();
    match err {
        AppError::Api { status, message } => {
            assert_eq!(status, 502);
            assert_eq!(message, "bad gateway");
        }
        other => panic!("Expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_interpret_rejects_non_record_payload() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
        when.method(POST).path("/v1/messages");
        then.status(200)
            .json_body(message_body("not a JSON record".to_string()));
    })
        .await;

    let settings = test_settings(server.base_url());
    let client = ClaudeClient::new(&settings).unwrap();

    let err = client.interpret("system", "paragraph").await.unwrap_err();
    assert!(matches!(err, AppError::Serialization(_)));
}

#[tokio::test]
async fn test_interpret_rejects_empty_content() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
        when.method(POST).path("/v1/messages");
        then.status(200).json_body(json!({
            "id": "msg_01",
            "type": "message",
            "role": "assistant",
            "content": [],
            "model": "claude-3-5-sonnet-20240620",
            "stop_reason": "end_turn",
            "stop_sequence": null,
            "usage": {"input_tokens": 1, "output_tokens": 0}
        }));
    })
        .await;

    let settings = test_settings(server.base_url());
    let client = ClaudeClient::new(&settings).unwrap();

    let err = client.interpret("system", "paragraph").await.unwrap_err();
    assert!(matches!(err, AppError::EmptyResponse));
}
