//! Upload admission: which files may enter the analysis pipeline.

use pitch_core::{DocumentFormat, Error, Result};
use std::path::Path;

/// Default upload ceiling in megabytes.
pub const DEFAULT_MAX_MB: u64 = 50;

const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "pptx", "docx", "txt"];

/// Extension and size rules applied to uploads before analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    max_bytes: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_MB * 1024 * 1024,
        }
    }
}

impl UploadPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the size ceiling in bytes.
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Admit a file by its extension and size, returning its format.
    pub fn admit(&self, path: &Path, size: u64) -> Result<DocumentFormat> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(Error::InputRejected(format!(
                "unsupported file type '{}' (allowed: {})",
                path.display(),
                ALLOWED_EXTENSIONS.join(", ")
            )));
        }
        self.check_size(size)?;

        DocumentFormat::from_tag(&extension)
            .ok_or_else(|| Error::InputRejected(format!("unknown format '{}'", extension)))
    }

    /// Admit a file whose format was given explicitly.
    pub fn admit_tagged(&self, tag: &str, size: u64) -> Result<DocumentFormat> {
        let format = DocumentFormat::from_tag(tag)
            .ok_or_else(|| Error::InputRejected(format!("unknown format tag '{}'", tag)))?;
        self.check_size(size)?;
        Ok(format)
    }

    fn check_size(&self, size: u64) -> Result<()> {
        if size > self.max_bytes {
            return Err(Error::InputRejected(format!(
                "file is {} bytes, limit is {} bytes",
                size, self.max_bytes
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_extensions() {
        let policy = UploadPolicy::new();
        assert_eq!(policy.admit(Path::new("deck.pdf"), 10).unwrap(), DocumentFormat::Pdf);
        assert_eq!(
            policy.admit(Path::new("Deck.PPTX"), 10).unwrap(),
            DocumentFormat::SlideDeck
        );
        assert_eq!(policy.admit(Path::new("a/b.docx"), 10).unwrap(), DocumentFormat::WordDoc);
        assert_eq!(policy.admit(Path::new("notes.txt"), 0).unwrap(), DocumentFormat::PlainText);
    }

    #[test]
    fn test_rejected_extensions() {
        let policy = UploadPolicy::new();
        for name in ["deck.ppt", "sheet.xlsx", "README", "deck.pdf.exe"] {
            assert!(
                matches!(policy.admit(Path::new(name), 10), Err(Error::InputRejected(_))),
                "{} should be rejected",
                name
            );
        }
    }

    #[test]
    fn test_size_ceiling() {
        let policy = UploadPolicy::new();
        assert_eq!(policy.max_bytes(), 50 * 1024 * 1024);
        assert!(policy.admit(Path::new("deck.pdf"), 50 * 1024 * 1024).is_ok());
        assert!(matches!(
            policy.admit(Path::new("deck.pdf"), 50 * 1024 * 1024 + 1),
            Err(Error::InputRejected(_))
        ));

        let small = UploadPolicy::new().with_max_bytes(100);
        assert!(small.admit(Path::new("deck.txt"), 100).is_ok());
        assert!(small.admit(Path::new("deck.txt"), 101).is_err());
    }

    #[test]
    fn test_explicit_tag() {
        let policy = UploadPolicy::new().with_max_bytes(10);
        assert_eq!(policy.admit_tagged("slide-deck", 5).unwrap(), DocumentFormat::SlideDeck);
        assert!(matches!(policy.admit_tagged("xlsx", 5), Err(Error::InputRejected(_))));
        assert!(matches!(policy.admit_tagged("pdf", 11), Err(Error::InputRejected(_))));
    }
}
