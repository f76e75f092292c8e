//! DOCX file parser implementation.

use crate::store::ScopedBackingStore;
use pitch_core::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Read, Seek};
use std::path::PathBuf;
use zip::ZipArchive;

const DOCUMENT_PATH: &str = "word/document.xml";

/// Parser for DOCX (Office Open XML) documents.
#[derive(Debug, Clone, Default)]
pub struct DocxParser {
    /// Directory for the backing file; the system default when None.
    temp_dir: Option<PathBuf>,
}

impl DocxParser {
    /// Create a new DOCX parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage documents in `dir` instead of the system temp directory.
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// Extract the text of a DOCX document.
    ///
    /// The bytes are written to a scoped backing file which is gone by the
    /// time this returns.
    pub fn extract_text(&self, bytes: &[u8]) -> Result<String> {
        let store = match &self.temp_dir {
            Some(dir) => ScopedBackingStore::create_in(bytes, ".docx", dir)?,
            None => ScopedBackingStore::create(bytes, ".docx")?,
        };
        let file = store.open()?;
        self.parse(file)
    }

    /// Extract text from an open DOCX archive: headers, body, then footers.
    pub fn parse<R: Read + Seek>(&self, reader: R) -> Result<String> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let parts = ordered_parts(&archive);
        if !parts.iter().any(|p| p == DOCUMENT_PATH) {
            return Err(Error::DocxParseError(format!(
                "Missing main document part '{}'",
                DOCUMENT_PATH
            )));
        }

        let mut text = String::new();
        for part in &parts {
            let content = read_file_from_archive(&mut archive, part)?;
            text.push_str(&xml_to_text(&content)?);
        }

        Ok(text.trim().to_string())
    }
}

/// Header parts, the main document, then footer parts, each group sorted
/// by name.
fn ordered_parts<R: Read + Seek>(archive: &ZipArchive<R>) -> Vec<String> {
    let names: Vec<&str> = archive.file_names().collect();
    let group = |prefix: &str| {
        let mut parts: Vec<String> = names
            .iter()
            .filter(|n| n.starts_with(prefix) && n.ends_with(".xml"))
            .map(|n| n.to_string())
            .collect();
        parts.sort();
        parts
    };

    let mut parts = group("word/header");
    if names.contains(&DOCUMENT_PATH) {
        parts.push(DOCUMENT_PATH.to_string());
    }
    parts.extend(group("word/footer"));
    parts
}

/// Flatten WordprocessingML to text: runs, tabs, line breaks, and a blank
/// line opening every paragraph.
fn xml_to_text(xml: &str) -> Result<String> {
    let mut text = String::new();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);
    let mut in_run_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                b"t" => in_run_text = true,
                b"p" => text.push_str("\n\n"),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match local_name(e.name().as_ref()) {
                b"tab" => text.push('\t'),
                b"br" | b"cr" => text.push('\n'),
                b"p" => text.push_str("\n\n"),
                _ => {}
            },
            Ok(Event::Text(ref e)) => {
                if in_run_text {
                    text.push_str(&e.unescape().unwrap_or_default());
                }
            }
            Ok(Event::End(ref e)) => {
                if local_name(e.name().as_ref()) == b"t" {
                    in_run_text = false;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!("Error parsing document: {}", e)));
            }
            _ => {}
        }
    }

    Ok(text)
}

fn read_file_from_archive<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: &str,
) -> Result<String> {
    let mut file = archive
        .by_name(path)
        .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

    Ok(content)
}

fn local_name(name: &[u8]) -> &[u8] {
    match name.iter().position(|&b| b == b':') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::FileOptions;
    use zip::ZipWriter;

    fn body(paragraphs: &[&str]) -> String {
        let paras: String = paragraphs
            .iter()
            .map(|p| format!("<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>", p))
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
            paras
        )
    }

    fn build_docx(parts: &[(&str, String)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in parts {
            writer.start_file(*name, FileOptions::default()).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    fn dir_is_empty(dir: &std::path::Path) -> bool {
        std::fs::read_dir(dir).unwrap().next().is_none()
    }

    #[test]
    fn test_extract_paragraphs() {
        let bytes = build_docx(&[(
            DOCUMENT_PATH,
            body(&["The Problem", "Small shops lose &amp; waste hours"]),
        )]);
        let text = DocxParser::new().extract_text(&bytes).unwrap();
        assert_eq!(text, "The Problem\n\nSmall shops lose & waste hours");
    }

    #[test]
    fn test_headers_and_footers_order() {
        let bytes = build_docx(&[
            ("word/footer1.xml", body(&["Confidential"])),
            (DOCUMENT_PATH, body(&["Body"])),
            ("word/header1.xml", body(&["Acme Inc"])),
        ]);
        let text = DocxParser::new().extract_text(&bytes).unwrap();
        assert_eq!(text, "Acme Inc\n\nBody\n\nConfidential");
    }

    #[test]
    fn test_tabs_and_breaks() {
        let xml = r#"<w:document xmlns:w="w"><w:body><w:p><w:r><w:t>ARR</w:t><w:tab/><w:t>$1M</w:t><w:br/><w:t>next</w:t></w:r></w:p></w:body></w:document>"#;
        assert_eq!(xml_to_text(xml).unwrap(), "\n\nARR\t$1M\nnext");
    }

    #[test]
    fn test_empty_paragraphs_keep_spacing() {
        let xml = r#"<w:document xmlns:w="w"><w:body><w:p><w:r><w:t>Ask</w:t></w:r></w:p><w:p/><w:p><w:r><w:t>$2M seed</w:t></w:r></w:p></w:body></w:document>"#;
        assert_eq!(xml_to_text(xml).unwrap(), "\n\nAsk\n\n\n\n$2M seed");
    }

    #[test]
    fn test_parts_concatenated_without_separator() {
        let bytes = build_docx(&[
            (DOCUMENT_PATH, body(&["Body"])),
            ("word/header1.xml", body(&["Acme Inc"])),
            ("word/header2.xml", body(&[""])),
        ]);
        let text = DocxParser::new().extract_text(&bytes).unwrap();
        assert_eq!(text, "Acme Inc\n\n\n\nBody");
    }

    #[test]
    fn test_backing_file_removed_on_success() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = build_docx(&[(DOCUMENT_PATH, body(&["Hello"]))]);
        let parser = DocxParser::new().with_temp_dir(dir.path());

        assert_eq!(parser.extract_text(&bytes).unwrap(), "Hello");
        assert!(dir_is_empty(dir.path()));
    }

    #[test]
    fn test_backing_file_removed_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let parser = DocxParser::new().with_temp_dir(dir.path());

        assert!(matches!(
            parser.extract_text(b"definitely not a zip"),
            Err(Error::ZipError(_))
        ));
        assert!(dir_is_empty(dir.path()));
    }

    #[test]
    fn test_missing_document_part() {
        let bytes = build_docx(&[("word/styles.xml", "<w:styles/>".to_string())]);
        assert!(matches!(
            DocxParser::new().extract_text(&bytes),
            Err(Error::DocxParseError(_))
        ));
    }
}
