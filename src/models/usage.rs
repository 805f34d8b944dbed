//! Token usage accounting
//!
//! Per-model and overall input/output token counters, updated after every
//! successful completion call and reported at end of run.

use crate::models::interpretation::RecordUsage;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

/// Usage of a single model
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Process-wide usage counters keyed by model identifier
///
/// Lives inside the batch report returned by the driver; there is no global
/// state. BTreeMap keeps the summary order deterministic.
#[derive(Debug, Default, Clone, Serialize)]
pub struct UsageTracker {
    pub total_input_tokens: u64,
    pub total_output_tokens: u64,
    pub per_model: BTreeMap<String, ModelUsage>,
}

impl UsageTracker {
    /// Add one call's usage to the totals and to the model's bucket
    pub fn record(&mut self, model: &str, usage: RecordUsage) {
        self.total_input_tokens += u64::from(usage.input_tokens);
        self.total_output_tokens += u64::from(usage.output_tokens);

        let entry = self.per_model.entry(model.to_string()).or_default();
        entry.input_tokens += u64::from(usage.input_tokens);
        entry.output_tokens += u64::from(usage.output_tokens);
    }

    /// Emit the end-of-run usage summary
    pub fn log_summary(&self) {
        info!("Total usage:");
        for (model, usage) in &self.per_model {
            info!(
                "Model: {} - Input tokens: {}, Output tokens: {}",
                model, usage.input_tokens, usage.output_tokens
            );
        }
        info!(
            "Overall - Input tokens: {}, Output tokens: {}",
            self.total_input_tokens, self.total_output_tokens
        );
    }
}
