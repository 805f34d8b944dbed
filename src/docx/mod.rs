//! Minimal WordprocessingML document writer
//!
//! Models just the features the compiled document needs: paragraph
//! alignment, right-to-left paragraph direction, bold runs, swapped page
//! dimensions, and a document-wide default font. The four OOXML parts are
//! rendered as strings and packaged into the .docx ZIP container, so the
//! output is byte-deterministic for identical input.

use crate::utils::error::{AppError, AppResult};
use std::io::Write;
use std::path::Path;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>";

const WORDPROCESSINGML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// A4 page dimensions in twentieths of a point
const A4_WIDTH_TWIPS: u32 = 11906;
const A4_HEIGHT_TWIPS: u32 = 16838;

const CONTENT_TYPES: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>",
    "<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">",
    "<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>",
    "<Default Extension=\"xml\" ContentType=\"application/xml\"/>",
    "<Override PartName=\"/word/document.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml\"/>",
    "<Override PartName=\"/word/styles.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml\"/>",
    "</Types>",
);

const PACKAGE_RELS: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>",
    "<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
    "<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"word/document.xml\"/>",
    "</Relationships>",
);

const DOCUMENT_RELS: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>",
    "<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
    "<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles\" Target=\"styles.xml\"/>",
    "</Relationships>",
);

/// Paragraph justification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Center,
    Right,
}

impl Alignment {
    fn as_str(self) -> &'static str {
        match self {
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

/// A run of text with uniform formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    text: String,
    bold: bool,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn to_xml(&self) -> String {
        let mut xml = String::from("<w:r>");
        if self.bold {
            // w:bCs carries the bold through complex-script (Hebrew) shaping
            xml.push_str("<w:rPr><w:b/><w:bCs/></w:rPr>");
        }
        xml.push_str("<w:t xml:space=\"preserve\">");
        xml.push_str(&escape_xml(&self.text));
        xml.push_str("</w:t></w:r>");
        xml
    }
}

/// A paragraph: optional properties plus a sequence of runs
///
/// An empty paragraph (no runs, no properties) renders as a spacing
/// paragraph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    runs: Vec<Run>,
    align: Option<Alignment>,
    bidi: bool,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.align = Some(alignment);
        self
    }

    /// Mark the paragraph as right-to-left, independent of alignment
    pub fn rtl(mut self) -> Self {
        self.bidi = true;
        self
    }

    pub fn add_run(mut self, run: Run) -> Self {
        self.runs.push(run);
        self
    }

    fn to_xml(&self) -> String {
        let mut xml = String::from("<w:p>");
        if self.bidi || self.align.is_some() {
            // Schema order within pPr: w:bidi precedes w:jc
            xml.push_str("<w:pPr>");
            if self.bidi {
                xml.push_str("<w:bidi/>");
            }
            if let Some(align) = self.align {
                xml.push_str(&format!("<w:jc w:val=\"{}\"/>", align.as_str()));
            }
            xml.push_str("</w:pPr>");
        }
        for run in &self.runs {
            xml.push_str(&run.to_xml());
        }
        xml.push_str("</w:p>");
        xml
    }
}

/// A whole document: page setup, default font, and paragraphs in order
#[derive(Debug, Clone)]
pub struct DocxDocument {
    page_width: u32,
    page_height: u32,
    font: String,
    /// Half-points, per the w:sz convention
    font_size: u32,
    paragraphs: Vec<Paragraph>,
}

impl Default for DocxDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl DocxDocument {
    /// A4 portrait with Word's stock defaults
    pub fn new() -> Self {
        Self {
            page_width: A4_WIDTH_TWIPS,
            page_height: A4_HEIGHT_TWIPS,
            font: "Calibri".to_string(),
            font_size: 22,
            paragraphs: Vec::new(),
        }
    }

    /// Swap the page dimensions to treat the page as right-to-left oriented
    pub fn rtl_page(mut self) -> Self {
        std::mem::swap(&mut self.page_width, &mut self.page_height);
        self
    }

    /// Set the document-wide default font and size in points
    pub fn default_font(mut self, name: impl Into<String>, size_pt: u32) -> Self {
        self.font = name.into();
        self.font_size = size_pt * 2;
        self
    }

    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Render word/document.xml
    pub fn document_xml(&self) -> String {
        let mut xml = String::from(XML_DECLARATION);
        xml.push_str(&format!("<w:document xmlns:w=\"{}\">", WORDPROCESSINGML_NS));
        xml.push_str("<w:body>");
        for paragraph in &self.paragraphs {
            xml.push_str(&paragraph.to_xml());
        }
        xml.push_str(&format!(
            "<w:sectPr><w:pgSz w:w=\"{}\" w:h=\"{}\"/></w:sectPr>",
            self.page_width, self.page_height
        ));
        xml.push_str("</w:body></w:document>");
        xml
    }

    /// Render word/styles.xml with the document defaults
    fn styles_xml(&self) -> String {
        let font = escape_xml(&self.font);
        format!(
            "{}<w:styles xmlns:w=\"{}\"><w:docDefaults><w:rPrDefault><w:rPr>\
             <w:rFonts w:ascii=\"{font}\" w:hAnsi=\"{font}\" w:cs=\"{font}\"/>\
             <w:sz w:val=\"{size}\"/><w:szCs w:val=\"{size}\"/>\
             </w:rPr></w:rPrDefault></w:docDefaults></w:styles>",
            XML_DECLARATION,
            WORDPROCESSINGML_NS,
            font = font,
            size = self.font_size,
        )
    }

    /// Package the document parts into a .docx file
    pub fn save(&self, path: impl AsRef<Path>) -> AppResult<()> {
        let path = path.as_ref();
        let file =
            std::fs::File::create(path).map_err(|e| AppError::file(path.display(), e))?;
        let mut archive = ZipWriter::new(file);

        let parts: [(&str, String); 5] = [
            ("[Content_Types].xml", CONTENT_TYPES.to_string()),
            ("_rels/.rels", PACKAGE_RELS.to_string()),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS.to_string()),
            ("word/document.xml", self.document_xml()),
            ("word/styles.xml", self.styles_xml()),
        ];

        for (name, content) in parts {
            let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
            archive
                .start_file(name, options)
                .map_err(|e| AppError::Document(e.to_string()))?;
            archive
                .write_all(content.as_bytes())
                .map_err(|e| AppError::file(path.display(), e))?;
        }

        archive
            .finish()
            .map_err(|e| AppError::Document(e.to_string()))?;
        Ok(())
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
