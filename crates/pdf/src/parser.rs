//! PDF text extraction using the pdf-extract crate.
//!
//! Handles digital PDFs with an embedded text layer. Scanned pages have no
//! text and are skipped.

use pitch_core::{Error, Result};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Parser for PDF documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfParser;

impl PdfParser {
    /// Create a new PDF parser.
    pub fn new() -> Self {
        Self
    }

    /// Text of each page, in page order.
    ///
    /// pdf-extract panics on some malformed files; those panics are caught
    /// and reported as parse errors carrying the panic message. The process
    /// panic hook still runs first, so the default hook prints the message
    /// to stderr.
    pub fn pages(&self, bytes: &[u8]) -> Result<Vec<String>> {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        }));

        match outcome {
            Ok(Ok(pages)) => Ok(pages),
            Ok(Err(e)) => Err(Error::PdfParseError(e.to_string())),
            Err(payload) => Err(Error::PdfParseError(format!(
                "PDF library panicked while reading the document: {}",
                panic_message(payload.as_ref())
            ))),
        }
    }

    /// Flattened document text: non-empty pages joined with single spaces.
    pub fn extract_text(&self, bytes: &[u8]) -> Result<String> {
        let pages = self.pages(bytes)?;
        let total = pages.len();
        let texts: Vec<&str> = pages
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect();
        log::debug!("PDF has {} pages, {} with text", total, texts.len());
        Ok(texts.join(" "))
    }
}

/// Text of a caught panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}
