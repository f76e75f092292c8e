//! Error types for pitch deck extraction and analysis.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while extracting or analyzing a pitch deck.
///
/// None of these escape the analysis pipeline: extraction backends return
/// them, and the dispatcher turns them into empty text.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open, read, or write a file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The format tag is not one we can extract.
    #[error("Unsupported or unrecognized file format: {0}")]
    UnsupportedFormat(String),

    /// Failed to extract text from a PDF.
    #[error("PDF parsing error: {0}")]
    PdfParseError(String),

    /// Failed to parse the PPTX file structure.
    #[error("Slide deck parsing error: {0}")]
    SlideDeckParseError(String),

    /// Failed to parse the DOCX file structure.
    #[error("Word document parsing error: {0}")]
    DocxParseError(String),

    /// ZIP archive error (for PPTX and DOCX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing error (for PPTX and DOCX).
    #[error("XML parsing error: {0}")]
    XmlError(String),

    /// No terms were left to weight after tokenization and stop-word removal.
    #[error("Empty vocabulary: text contains only stop words or no words at all")]
    EmptyVocabulary,

    /// The upload was refused before analysis (format or size).
    #[error("Input rejected: {0}")]
    InputRejected(String),
}
