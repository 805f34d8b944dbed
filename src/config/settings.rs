//! Application configuration settings
//!
//! Defines all configuration structures and loading logic

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Anthropic API configuration
    pub anthropic: AnthropicConfig,
    /// Pipeline file locations
    pub pipeline: PipelineConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Anthropic API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnthropicConfig {
    /// API key
    pub api_key: String,
    /// API base URL
    pub base_url: String,
    /// Model identifier sent with every request
    pub model: String,
    /// Maximum output-token bound per completion
    pub max_tokens: u32,
    /// Request timeout in seconds
    pub timeout: u64,
}

/// Pipeline file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory of plain-text source paragraphs
    pub sources_dir: PathBuf,
    /// Directory receiving one JSON record per processed source file
    pub results_dir: PathBuf,
    /// Static instruction text
    pub prompt_file: PathBuf,
    /// Worked example paragraphs
    pub examples_file: PathBuf,
    /// Compiled DOCX output path
    pub output_file: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log filter (RUST_LOG syntax)
    pub level: String,
    /// Persistent log file recording call-usage lines
    pub usage_log_file: PathBuf,
}

impl Settings {
    /// Create a new configuration instance
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let settings = Self {
            anthropic: AnthropicConfig {
                api_key: env::var("ANTHROPIC_API_KEY")
                    .context("ANTHROPIC_API_KEY environment variable not set")?,
                base_url: get_env_or_default("ANTHROPIC_BASE_URL", "https://api.anthropic.com"),
                model: get_env_or_default("CLAUDE_MODEL", "claude-3-5-sonnet-20240620"),
                max_tokens: get_env_or_default("MAX_OUTPUT_TOKENS", "4096")
                    .parse()
                    .context("Invalid maximum output tokens")?,
                timeout: get_env_or_default("REQUEST_TIMEOUT", "120")
                    .parse()
                    .context("Invalid timeout value")?,
            },
            pipeline: PipelineConfig {
                sources_dir: get_env_or_default("SOURCES_DIR", "sources").into(),
                results_dir: get_env_or_default("RESULTS_DIR", "results").into(),
                prompt_file: get_env_or_default("PROMPT_FILE", "prompt.txt").into(),
                examples_file: get_env_or_default("EXAMPLES_FILE", "examples.txt").into(),
                output_file: get_env_or_default("OUTPUT_FILE", "compiled_interpretations.docx")
                    .into(),
            },
            logging: LoggingConfig {
                level: get_env_or_default("RUST_LOG", "info"),
                usage_log_file: get_env_or_default("USAGE_LOG_FILE", "api_usage.log").into(),
            },
        };

        // Validate configuration
        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration validity
    fn validate(&self) -> Result<()> {
        if self.anthropic.api_key.is_empty() {
            anyhow::bail!("Anthropic API key cannot be empty");
        }

        if self.anthropic.api_key.contains(char::is_whitespace) {
            anyhow::bail!("Anthropic API key cannot contain whitespace characters");
        }

        if !self.anthropic.base_url.starts_with("http") {
            anyhow::bail!("Invalid Anthropic base URL format, should start with 'http'");
        }

        if self.anthropic.model.is_empty() {
            anyhow::bail!("Model identifier cannot be empty");
        }

        if self.anthropic.max_tokens == 0 {
            anyhow::bail!("Maximum output tokens cannot be 0");
        }

        if self.anthropic.timeout == 0 {
            anyhow::bail!("Timeout value cannot be 0");
        }

        Ok(())
    }
}

/// Get environment variable or default value
fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_settings() -> Settings {
        Settings {
            anthropic: AnthropicConfig {
                api_key: "sk-ant-test".to_string(),
                base_url: "https://api.anthropic.com".to_string(),
                model: "claude-3-5-sonnet-20240620".to_string(),
                max_tokens: 4096,
                timeout: 120,
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

    #[test]
    fn test_valid_settings_pass_validation() {
        assert!(base_settings().validate().is_ok());
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let mut settings = base_settings();
        settings.anthropic.api_key = String::new();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_whitespace_api_key_rejected() {
        let mut settings = base_settings();
        settings.anthropic.api_key = "sk ant".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_bad_base_url_rejected() {
        let mut settings = base_settings();
        settings.anthropic.base_url = "ftp://example.com".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_zero_max_tokens_rejected() {
        let mut settings = base_settings();
        settings.anthropic.max_tokens = 0;
        assert!(settings.validate().is_err());
    }
}
