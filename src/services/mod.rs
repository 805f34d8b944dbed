//! Service layer module
//!
//! Contains the completion client, prompt assembly, the batch driver, and
//! the document compiler

pub mod batch;
pub mod client;
pub mod compiler;
pub mod prompt;

pub use batch::BatchReport;
pub use client::ClaudeClient;
pub use compiler::CompileOutcome;
