//! Data models module
//!
//! Defines the Claude API wire shapes, the interpretation record schema,
//! and the usage counters

pub mod claude;
pub mod interpretation;
pub mod usage;

pub use interpretation::{DifficultWord, InterpretationRecord, InterpretationSegment, RecordUsage};
pub use usage::{ModelUsage, UsageTracker};
