//! HTTP client service
//!
//! Encapsulates HTTP communication with the Claude messages API

use crate::config::{AnthropicConfig, Settings};
use crate::models::claude::*;
use crate::models::interpretation::{InterpretationRecord, RecordUsage};
use crate::utils::error::{AppError, AppResult};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, info};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Claude API client
#[derive(Debug, Clone)]
pub struct ClaudeClient {
    client: Client,
    config: AnthropicConfig,
}

impl ClaudeClient {
    /// Create a new client instance
    pub fn new(settings: &Settings) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.anthropic.timeout))
            .user_agent("parshan/0.1.0")
            .build()?;

        Ok(Self {
            client,
            config: settings.anthropic.clone(),
        })
    }

    /// Send one paragraph for interpretation
    ///
    /// Issues a single messages request and parses the response text as an
    /// interpretation record (JSON mode), attaching the call's token usage.
    /// Exactly one attempt is made; every failure class surfaces as an
    /// `AppError` for the driver to record.
    pub async fn interpret(
        &self,
        system_prompt: &str,
        paragraph: &str,
    ) -> AppResult<InterpretationRecord> {
        debug!(
            "Preparing API call with system prompt length: {} and user message length: {}",
            system_prompt.len(),
            paragraph.len()
        );

        let request = ClaudeRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            messages: vec![ClaudeMessage::user(paragraph)],
            system: Some(system_prompt.to_string()),
        };

        let url = format!("{}/v1/messages", self.config.base_url);

        debug!("Sending request to Claude API");
        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        let response = Self::handle_response(response).await?;

        let usage = response.usage;
        info!(
            "API call - Model: {}, Input tokens: {}, Output tokens: {}",
            response.model, usage.input_tokens, usage.output_tokens
        );

        let text = response.first_text().ok_or(AppError::EmptyResponse)?;
        let mut record: InterpretationRecord = serde_json::from_str(text)?;
        record.usage = Some(RecordUsage {
            input_tokens: usage.input_tokens,
            output_tokens: usage.output_tokens,
        });

        Ok(record)
    }

    /// Handle HTTP response
    async fn handle_response(response: Response) -> AppResult<ClaudeResponse> {
        let status = response.status();

        if status.is_success() {
            let claude_response: ClaudeResponse = response.json().await?;
            debug!("Claude request completed successfully");
            Ok(claude_response)
        } else {
            let error_text = response.text().await.unwrap_or_default();

            // Prefer the structured Claude error body when it parses
            let message = match serde_json::from_str::<ClaudeErrorResponse>(&error_text) {
                Ok(body) => format!("{}: {}", body.error.error_type, body.error.message),
                Err(_) => error_text,
            };

            Err(AppError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}
