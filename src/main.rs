//! Hebrew paragraph interpretation pipeline
//!
//! Sends each source paragraph to the Claude messages API and compiles the
//! persisted JSON results into a single right-to-left DOCX document

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

mod config;
mod docx;
mod models;
mod services;
mod utils;

use config::Settings;
use services::batch::{self, BatchReport};
use services::client::ClaudeClient;
use services::compiler;

#[derive(Parser, Debug)]
#[command(
    name = "parshan",
    version,
    about = "Interpret Hebrew text paragraphs with Claude and compile a DOCX"
)]
struct Cli {
    /// Skip processing and only compile existing JSON result files
    #[arg(long)]
    compile_only: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::new().context("Failed to load settings")?;
    utils::logging::init(&settings.logging).context("Failed to initialize logging")?;

    info!("Pipeline execution started");

    let mut report = if cli.compile_only {
        info!("Processing mode: Skip processing, compile only");
        BatchReport::default()
    } else {
        info!("Processing mode: Full processing");
        let client = ClaudeClient::new(&settings).context("Failed to create Claude client")?;
        batch::run(&settings, &client)
            .await
            .context("Batch processing failed")?
    };

    // Compile all JSON result files into a single DOCX
    let outcome = compiler::compile(
        &settings.pipeline.results_dir,
        &settings.pipeline.output_file,
    )
    .context("Document compilation failed")?;
    info!("Compiled {} sections", outcome.sections);
    report.errors.extend(outcome.errors);

    report.usage.log_summary();

    if !report.errors.is_empty() {
        warn!("Errors encountered during processing:");
        for error in &report.errors {
            warn!("{}", error);
        }
    }

    info!("Pipeline execution completed");
    Ok(())
}
