//! Interpretation record schema
//!
//! The structured JSON result associated with one source paragraph, as
//! produced by the completion endpoint and persisted to the results
//! directory.

use serde::{Deserialize, Serialize};

/// One interpreted paragraph
///
/// `letter` and `difficult_words` may be absent from a response and default
/// to empty; `original_text` and `detailed_interpretation` are required, and
/// their absence makes the record invalid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpretationRecord {
    /// Section heading, typically a single Hebrew letter
    #[serde(default)]
    pub letter: String,
    /// The source paragraph verbatim
    pub original_text: String,
    /// Glossary of difficult words with short explanations
    #[serde(default)]
    pub difficult_words: Vec<DifficultWord>,
    /// Quote-by-quote interpretation of the paragraph
    pub detailed_interpretation: Vec<InterpretationSegment>,
    /// Token usage of the call that produced this record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<RecordUsage>,
}

/// A difficult word and its explanation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultWord {
    pub word: String,
    pub explanation: String,
}

/// One quoted segment and its interpretation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpretationSegment {
    pub quote: String,
    pub explanation: String,
}

/// Token usage recorded alongside a persisted record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}
