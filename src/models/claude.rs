//! Claude API data models
//!
//! Defines the subset of the messages API this pipeline sends and receives

use serde::{Deserialize, Serialize};

/// Claude API request structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaudeRequest {
    /// Model name
    pub model: String,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Message list
    pub messages: Vec<ClaudeMessage>,
    /// System prompt (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
}

/// Claude message structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaudeMessage {
    /// Role (user/assistant)
    pub role: String,
    /// Plain-text message content
    pub content: String,
}

impl ClaudeMessage {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Claude content block
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClaudeContentBlock {
    /// Text block
    #[serde(rename = "text")]
    Text { text: String },
}

/// Claude API response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaudeResponse {
    /// Response ID
    pub id: String,
    /// Response type
    #[serde(rename = "type")]
    pub response_type: String,
    /// Role
    pub role: String,
    /// Response content
    pub content: Vec<ClaudeContentBlock>,
    /// Model used
    pub model: String,
    /// Stop reason
    pub stop_reason: Option<String>,
    /// Stop sequence
    pub stop_sequence: Option<String>,
    /// Usage statistics
    pub usage: ClaudeUsage,
}

impl ClaudeResponse {
    /// The first text content block, if any
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().map(|block| {
            let ClaudeContentBlock::Text { text } = block;
            text.as_str()
        })
    }
}

/// Claude usage statistics
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClaudeUsage {
    /// Input token count
    pub input_tokens: u32,
    /// Output token count
    pub output_tokens: u32,
}

/// Claude API error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ClaudeErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,
    pub error: ClaudeErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClaudeErrorDetail {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
}
