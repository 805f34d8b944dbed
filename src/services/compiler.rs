//! Document compiler service
//!
//! Reads every persisted interpretation record in sorted order and appends
//! one formatted right-to-left section per record to a single DOCX document.

use crate::docx::{Alignment, DocxDocument, Paragraph, Run};
use crate::models::interpretation::InterpretationRecord;
use crate::utils::error::AppResult;
use crate::utils::fs;
use std::ffi::OsStr;
use std::path::Path;
use tracing::{debug, error, info};

/// Outcome of one compilation pass
#[derive(Debug, Default)]
pub struct CompileOutcome {
    /// Number of records rendered into the document
    pub sections: usize,
    /// Per-file errors; each named file was skipped, not aborted on
    pub errors: Vec<String>,
}

/// Compile all result files in `results_dir` into one document
///
/// Files are visited in lexicographic order. A file that fails to read or
/// deserialize is logged, recorded, and skipped; compilation of the
/// remaining files continues.
pub fn compile(results_dir: &Path, output_path: &Path) -> AppResult<CompileOutcome> {
    info!(
        "Compiling results from {} to {}",
        results_dir.display(),
        output_path.display()
    );

    let mut doc = DocxDocument::new().rtl_page().default_font("Arial", 12);
    let mut outcome = CompileOutcome::default();

    for file in fs::list_files_with_extension(results_dir, "json")? {
        let name = file
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or("<unnamed>")
            .to_string();
        debug!("Processing file: {}", name);

        match read_record(&file) {
            Ok(record) => {
                append_record(&mut doc, &record);
                outcome.sections += 1;
                debug!("Finished processing file: {}", name);
            }
            Err(e) => {
                let message = format!("Error processing file {}: {}", name, e);
                error!("{}", message);
                outcome.errors.push(message);
            }
        }
    }

    debug!("Document contains {} paragraphs", doc.paragraph_count());
    doc.save(output_path)?;
    info!("Compiled document saved as {}", output_path.display());

    Ok(outcome)
}

fn read_record(path: &Path) -> AppResult<InterpretationRecord> {
    let raw = fs::read_text(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Append one record as four sections, each followed by a spacing paragraph
fn append_record(doc: &mut DocxDocument, record: &InterpretationRecord) {
    // Letter heading
    doc.add_paragraph(
        Paragraph::new()
            .rtl()
            .align(Alignment::Center)
            .add_run(Run::new(&record.letter).bold()),
    );
    doc.add_paragraph(Paragraph::new());

    // Original text
    doc.add_paragraph(
        Paragraph::new()
            .rtl()
            .align(Alignment::Right)
            .add_run(Run::new(&record.original_text)),
    );
    doc.add_paragraph(Paragraph::new());

    // Difficult words, omitted entirely when the list is empty
    if !record.difficult_words.is_empty() {
        let explanations = record
            .difficult_words
            .iter()
            .map(|item| format!("{} – {}", item.word, item.explanation))
            .collect::<Vec<_>>()
            .join("; ");
        doc.add_paragraph(
            Paragraph::new()
                .rtl()
                .align(Alignment::Right)
                .add_run(Run::new(explanations)),
        );
        doc.add_paragraph(Paragraph::new());
    }

    // Detailed interpretation: bold quote, then its explanation
    let mut paragraph = Paragraph::new().rtl().align(Alignment::Right);
    for part in &record.detailed_interpretation {
        paragraph = paragraph
            .add_run(Run::new(&part.quote).bold())
            .add_run(Run::new(format!(" - {} ", part.explanation)));
    }
    doc.add_paragraph(paragraph);
    doc.add_paragraph(Paragraph::new());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::interpretation::{DifficultWord, InterpretationSegment};

    fn record(difficult_words: Vec<DifficultWord>) -> InterpretationRecord {
        InterpretationRecord {
            letter: "א".to_string(),
            original_text: "שלום".to_string(),
            difficult_words,
            detailed_interpretation: vec![InterpretationSegment {
                quote: "שלום".to_string(),
                explanation: "greeting".to_string(),
            }],
            usage: None,
        }
    }

    #[test]
    fn test_empty_difficult_words_omits_section() {
        let mut doc = DocxDocument::new();
        append_record(&mut doc, &record(vec![]));
        // letter + spacer, original + spacer, interpretation + spacer
        assert_eq!(doc.paragraph_count(), 6);
    }

    #[test]
    fn test_difficult_words_joined_with_semicolons() {
        let mut doc = DocxDocument::new();
        append_record(
            &mut doc,
            &record(vec![
                DifficultWord {
                    word: "לית".to_string(),
                    explanation: "אין".to_string(),
                },
                DifficultWord {
                    word: "מגרמה".to_string(),
                    explanation: "מעצמה".to_string(),
                },
            ]),
        );
        assert_eq!(doc.paragraph_count(), 8);
        assert!(doc.document_xml().contains("לית – אין; מגרמה – מעצמה"));
    }

    #[test]
    fn test_interpretation_runs_alternate_bold_and_plain() {
        let mut doc = DocxDocument::new();
        append_record(&mut doc, &record(vec![]));

        let xml = doc.document_xml();
        let quote = "<w:r><w:rPr><w:b/><w:bCs/></w:rPr><w:t xml:space=\"preserve\">שלום</w:t></w:r>";
        let explanation = "<w:r><w:t xml:space=\"preserve\"> - greeting </w:t></w:r>";
        let quote_at = xml.rfind(quote).unwrap();
        let explanation_at = xml.find(explanation).unwrap();
        assert!(quote_at < explanation_at);
    }

    #[test]
    fn test_every_content_paragraph_is_rtl() {
        let mut doc = DocxDocument::new();
        append_record(&mut doc, &record(vec![]));

        let xml = doc.document_xml();
        assert_eq!(xml.matches("<w:bidi/>").count(), 3);
    }
}
