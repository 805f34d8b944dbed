//! Batch driver service
//!
//! Enumerates the source paragraphs, invokes the completion client once per
//! file, persists each record, and tolerates per-file failure by recording
//! it and continuing.

use crate::config::Settings;
use crate::models::usage::UsageTracker;
use crate::services::client::ClaudeClient;
use crate::services::prompt;
use crate::utils::error::{AppError, AppResult};
use crate::utils::fs;
use chrono::{DateTime, Local};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Outcome of one batch run, threaded explicitly instead of global state
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Result files created this run
    pub written: Vec<PathBuf>,
    /// Token usage accumulated over all successful calls
    pub usage: UsageTracker,
    /// Human-readable error strings, in occurrence order
    pub errors: Vec<String>,
}

/// Run the full-processing stage
///
/// Source files are visited in lexicographic order so runs are
/// deterministic. Each file gets exactly one completion attempt; a failed
/// file yields no artifact and an error string in the report.
pub async fn run(settings: &Settings, client: &ClaudeClient) -> AppResult<BatchReport> {
    let system_prompt = prompt::load_and_assemble(settings)?;

    let results_dir = &settings.pipeline.results_dir;
    std::fs::create_dir_all(results_dir)
        .map_err(|e| AppError::file(results_dir.display(), e))?;

    let sources = fs::list_files_with_extension(&settings.pipeline.sources_dir, "txt")?;
    if sources.is_empty() {
        warn!(
            "No source files found in {}",
            settings.pipeline.sources_dir.display()
        );
    }

    let mut report = BatchReport::default();

    for source in &sources {
        let name = display_name(source);
        info!("Processing file: {}", name);

        let paragraph = match fs::read_text(source) {
            Ok(paragraph) => paragraph,
            Err(e) => {
                let message = format!("Error reading source {}: {}", name, e);
                error!("{}", message);
                report.errors.push(message);
                continue;
            }
        };

        match client.interpret(&system_prompt, &paragraph).await {
            Ok(record) => {
                if let Some(usage) = record.usage {
                    report.usage.record(&settings.anthropic.model, usage);
                }

                let output = result_path(settings, source, Local::now());
                fs::write_json(&output, &record)?;
                info!("Result saved to {}", output.display());
                report.written.push(output);
            }
            Err(e) => {
                let message = format!("Error in API call for {}: {}", name, e);
                error!("{}", message);
                report.errors.push(message);
                warn!("Failed to process {}", name);
            }
        }
    }

    info!(
        "Batch complete: {} results written, {} errors",
        report.written.len(),
        report.errors.len()
    );

    Ok(report)
}

/// Build the uniquely named output path for one source file
///
/// The name combines the source stem, the model identifier, and a
/// second-resolution timestamp so prior runs are never overwritten.
fn result_path(settings: &Settings, source: &Path, now: DateTime<Local>) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or("paragraph");
    let timestamp = now.format("%Y%m%d_%H%M%S");

    settings.pipeline.results_dir.join(format!(
        "{}_{}_{}.json",
        stem, settings.anthropic.model, timestamp
    ))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(OsStr::to_str)
        .unwrap_or("<unnamed>")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AnthropicConfig, LoggingConfig, PipelineConfig};
    use chrono::TimeZone;

    fn test_settings() -> Settings {
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
    fn test_result_path_combines_stem_model_timestamp() {
        let settings = test_settings();
        let now = Local.with_ymd_and_hms(2024, 7, 1, 9, 30, 5).unwrap();

        let path = result_path(&settings, Path::new("sources/aleph.txt"), now);
        assert_eq!(
            path,
            PathBuf::from("results/aleph_claude-3-5-sonnet-20240620_20240701_093005.json")
        );
    }

    #[test]
    fn test_result_path_handles_nameless_source() {
        let settings = test_settings();
        let now = Local.with_ymd_and_hms(2024, 7, 1, 9, 30, 5).unwrap();

        let path = result_path(&settings, Path::new(".."), now);
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("paragraph_"));
    }
}
