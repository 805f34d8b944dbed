//! Utilities module
//!
//! Contains error handling, filesystem helpers, and logging setup

pub mod error;
pub mod fs;
pub mod logging;
