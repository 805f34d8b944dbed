//! System instruction assembly
//!
//! Combines the static instruction text, the worked example paragraphs, and
//! the canonical example record into the single system-level instruction
//! string sent with every completion request.

use crate::config::Settings;
use crate::models::interpretation::{
    DifficultWord, InterpretationRecord, InterpretationSegment,
};
use crate::utils::error::AppResult;
use crate::utils::fs;
use tracing::debug;

/// The fixed worked example shown to the model as the correct structure
pub fn canonical_example() -> InterpretationRecord {
    InterpretationRecord {
        letter: "א".to_string(),
        original_text: "התכונה של יראת שמים, מצד עצמה, לית לה מגרמה כלום, ואי אפשר לה להיות מתחשבת בין הכשרונות ומעלות הנפש של האדם.".to_string(),
        difficult_words: vec![
            DifficultWord {
                word: "לית לה מגרמה כלום".to_string(),
                explanation: "אין לה מעצמה כלום".to_string(),
            },
            DifficultWord {
                word: "מתחשבת".to_string(),
                explanation: "נחשבת, נספרת".to_string(),
            },
        ],
        detailed_interpretation: vec![
            InterpretationSegment {
                quote: "התכונה של יראת שמים, מצד עצמה, לית לה מגרמה כלום".to_string(),
                explanation: "השאיפה הדתית (\"יראת שמים\") איננה תוכן העומד בפני עצמו. הרב קוק מסביר כי יראת שמים, כשלעצמה, אינה בעלת ערך עצמאי.".to_string(),
            },
            InterpretationSegment {
                quote: "ואי אפשר לה להיות מתחשבת בין הכשרונות ומעלות הנפש של האדם".to_string(),
                explanation: "יראת שמים איננה נספרת בין שאר כוחות הנפש. היא אינה יכולה להיחשב כאחת מהתכונות או היכולות של האדם.".to_string(),
            },
        ],
        usage: None,
    }
}

/// Assemble the system instruction from its three pieces
pub fn assemble(prompt: &str, examples: &str) -> AppResult<String> {
    let example = serde_json::to_string_pretty(&canonical_example())?;

    Ok(format!(
        "{prompt}\n\n\
         פסקאות לדוגמא:\n\n\
         {examples}\n\n\
         Please provide your interpretation in JSON format. \
         Here's an example of the correct structure:\n\n\
         {example}\n\n\
         Make sure to follow this structure in your response, using JSON mode."
    ))
}

/// Read the static instruction files and assemble the system instruction
///
/// A missing prompt or examples file is fatal; the process must abort
/// before any network call is made.
pub fn load_and_assemble(settings: &Settings) -> AppResult<String> {
    let prompt = fs::read_text(&settings.pipeline.prompt_file)?;
    let examples = fs::read_text(&settings.pipeline.examples_file)?;

    let system_prompt = assemble(&prompt, &examples)?;
    debug!("System prompt prepared ({} chars)", system_prompt.len());

    Ok(system_prompt)
}
