//! Format dispatch for uploaded pitch decks.
//!
//! Turns raw document bytes plus a format tag into [`ExtractedText`], and
//! from there into a full [`AnalysisReport`]. Backend failures never escape
//! this crate: they are logged and degrade to empty text.

pub mod plain_text;

use pitch_core::{AnalysisReport, DocumentFormat, Error, ExtractedText, ReportComposer, Result};
use pitch_docx::DocxParser;
use pitch_pdf::PdfParser;
use pitch_pptx::SlideDeckParser;
use std::io::Cursor;
use std::path::PathBuf;

/// An uploaded document: its bytes and declared format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub bytes: Vec<u8>,
    pub format: DocumentFormat,
}

impl Document {
    pub fn new(bytes: impl Into<Vec<u8>>, format: DocumentFormat) -> Self {
        Self {
            bytes: bytes.into(),
            format,
        }
    }

    /// Build a document from a format tag; `None` if the tag is unknown.
    pub fn from_tag(bytes: impl Into<Vec<u8>>, tag: &str) -> Option<Self> {
        DocumentFormat::from_tag(tag).map(|format| Self::new(bytes, format))
    }
}

/// Dispatches documents to the backend for their format.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    pdf: PdfParser,
    slide_deck: SlideDeckParser,
    word_doc: DocxParser,
}

impl Extractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage DOCX backing files in `dir` instead of the system temp directory.
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.word_doc = self.word_doc.with_temp_dir(dir);
        self
    }

    /// Extract text for a format tag. Unknown tags yield empty text.
    pub fn extract(&self, bytes: &[u8], tag: &str) -> ExtractedText {
        match DocumentFormat::from_tag(tag) {
            Some(format) => self.extract_format(bytes, format),
            None => {
                log::warn!("{}", Error::UnsupportedFormat(tag.to_string()));
                ExtractedText::empty()
            }
        }
    }

    /// Extract text from a document.
    pub fn extract_document(&self, document: &Document) -> ExtractedText {
        self.extract_format(&document.bytes, document.format)
    }

    /// Extract text for a known format. Backend errors yield empty text.
    pub fn extract_format(&self, bytes: &[u8], format: DocumentFormat) -> ExtractedText {
        match self.try_extract(bytes, format) {
            Ok(text) => {
                log::debug!("Extracted {} chars from {} document", text.len(), format);
                ExtractedText::new(text)
            }
            Err(e) => {
                log::warn!("Failed to extract {} document: {}", format, e);
                ExtractedText::empty()
            }
        }
    }

    fn try_extract(&self, bytes: &[u8], format: DocumentFormat) -> Result<String> {
        match format {
            DocumentFormat::Pdf => self.pdf.extract_text(bytes),
            DocumentFormat::SlideDeck => self.slide_deck.extract_text(Cursor::new(bytes)),
            DocumentFormat::WordDoc => self.word_doc.extract_text(bytes),
            DocumentFormat::PlainText => Ok(plain_text::decode(bytes)),
        }
    }
}

/// Extract text from `bytes` with the default extractor.
pub fn extract(bytes: &[u8], tag: &str) -> ExtractedText {
    Extractor::new().extract(bytes, tag)
}

/// Extract and analyze a document in one step with default settings.
pub fn analyze(bytes: &[u8], tag: &str) -> AnalysisReport {
    let text = extract(bytes, tag);
    ReportComposer::new().compose(text.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitch_core::MaturityLevel;
    use std::io::Write;
    use zip::write::FileOptions;
    use zip::ZipWriter;

    const DECK: &str = "Our team of founders solves a real problem for clinics. \
        The market size is ten billion dollars and our product runs on proven technology. \
        We have strong traction with paying customers. \
        Our business model is a monthly subscription. Competitors are slow and expensive. \
        We are raising a seed round to fund growth.";

    fn build_pptx(slides: &[&str]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default();

        let rels: String = (1..=slides.len())
            .map(|n| {
                format!(
                    r#"<Relationship Id="rId{n}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{n}.xml"/>"#
                )
            })
            .collect();
        writer
            .start_file("ppt/_rels/presentation.xml.rels", options)
            .unwrap();
        writer
            .write_all(format!("<Relationships>{}</Relationships>", rels).as_bytes())
            .unwrap();

        for (idx, text) in slides.iter().enumerate() {
            writer
                .start_file(format!("ppt/slides/slide{}.xml", idx + 1), options)
                .unwrap();
            let xml = format!(
                r#"<?xml version="1.0" encoding="UTF-8"?><p:sld xmlns:a="a" xmlns:p="p"><p:cSld><p:spTree><p:sp><p:txBody><a:p><a:r><a:t>{}</a:t></a:r></a:p></p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#,
                text
            );
            writer.write_all(xml.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_unknown_tag_is_empty() {
        assert!(extract(b"anything", "xlsx").is_empty());
        assert!(Document::from_tag(b"x".to_vec(), "xlsx").is_none());

        let report = analyze(b"anything", "xlsx");
        assert_eq!(report.raw_text, "");
        assert_eq!(report.section_score, 0.0);
        assert_eq!(report.maturity_level, MaturityLevel::Beginner);
    }

    #[test]
    fn test_plain_text_scenario() {
        let report = analyze(DECK.as_bytes(), "txt");
        assert_eq!(report.raw_text, DECK);
        assert!(report.section_score >= 8.0);
        assert_eq!(report.maturity_level, MaturityLevel::SeriesAReady);
        assert!(!report.keywords.is_empty());
        assert!(report.readability.is_some());
    }

    #[test]
    fn test_non_ascii_text_survives_into_report() {
        let text = "Our \u{ff34}\u{ff21}\u{ff2d} is 10\u{b2} users\u{2122}";
        let report = analyze(text.as_bytes(), "txt");
        assert_eq!(report.raw_text, text);
        assert!(report.strengths.iter().any(|s| s == "Traction & Metrics"));
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let first = serde_json::to_string(&analyze(DECK.as_bytes(), ".TXT")).unwrap();
        let second = serde_json::to_string(&analyze(DECK.as_bytes(), "plain-text")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_garbage_bytes_degrade_to_empty() {
        let garbage = b"\x00\x01\x02 not a real document \xff\xfe";
        for tag in ["pdf", "pptx", "docx"] {
            assert!(extract(garbage, tag).is_empty(), "tag {}", tag);
        }
    }

    #[test]
    fn test_slide_deck_dispatch() {
        let bytes = build_pptx(&["The Problem", "Our Solution"]);
        let text = extract(&bytes, "pptx");
        assert_eq!(text.as_str(), "The Problem Our Solution");

        let document = Document::new(bytes, DocumentFormat::SlideDeck);
        assert_eq!(Extractor::new().extract_document(&document), text);
    }

    #[test]
    fn test_docx_failure_leaves_no_backing_file() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = Extractor::new().with_temp_dir(dir.path());
        assert!(extractor.extract(b"not a zip", "docx").is_empty());
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }
}
