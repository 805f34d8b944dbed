//! Hebrew paragraph interpretation pipeline
//!
//! Sends each plain-text source paragraph to the Claude messages API,
//! persists the structured JSON responses, and compiles all persisted
//! records into a single right-to-left DOCX document.

pub mod config;
pub mod docx;
pub mod models;
pub mod services;
pub mod utils;

// Re-export common types
pub use config::Settings;
pub use models::interpretation::InterpretationRecord;
pub use models::usage::UsageTracker;
pub use services::{BatchReport, ClaudeClient, CompileOutcome};
pub use utils::error::{AppError, AppResult};
