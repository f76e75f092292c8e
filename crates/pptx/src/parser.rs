//! PPTX file parser implementation.

use pitch_core::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::{Read, Seek};
use zip::ZipArchive;

const PRESENTATION_PATH: &str = "ppt/presentation.xml";
const PRESENTATION_RELS_PATH: &str = "ppt/_rels/presentation.xml.rels";

/// Text pulled from one slide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slide {
    /// 1-based slide number in presentation order.
    pub number: usize,

    /// Text of each text-bearing shape, in document order. Paragraphs
    /// within a shape are separated by newlines.
    pub shapes: Vec<String>,
}

/// Parser for PPTX (Office Open XML) slide decks.
#[derive(Debug, Clone, Copy)]
pub struct SlideDeckParser;

impl SlideDeckParser {
    /// Create a new PPTX parser.
    pub fn new() -> Self {
        Self
    }

    /// Flattened text of the deck: every shape text on every slide, joined
    /// with single spaces.
    pub fn extract_text<R: Read + Seek>(&self, reader: R) -> Result<String> {
        let slides = self.parse(reader)?;
        let text = slides
            .iter()
            .flat_map(|s| s.shapes.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ");
        Ok(text.trim().to_string())
    }

    /// Parse every slide of a PPTX file from a reader.
    pub fn parse<R: Read + Seek>(&self, reader: R) -> Result<Vec<Slide>> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let slide_paths = self.get_slide_order(&mut archive)?;
        log::debug!("Slide deck has {} slides", slide_paths.len());

        let mut slides = Vec::with_capacity(slide_paths.len());
        for (idx, slide_path) in slide_paths.iter().enumerate() {
            let content = read_file_from_archive(&mut archive, slide_path)?;
            slides.push(Slide {
                number: idx + 1,
                shapes: extract_shape_texts(&content)?,
            });
        }

        Ok(slides)
    }

    /// Get the ordered list of slide paths.
    ///
    /// The authoritative order is the slide id list in presentation.xml.
    /// Decks without one fall back to the numbering in the slide targets.
    fn get_slide_order<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
        let rels_content = read_file_from_archive(archive, PRESENTATION_RELS_PATH)?;
        let slide_targets = parse_slide_relationships(&rels_content)?;
        if slide_targets.is_empty() {
            return Err(Error::SlideDeckParseError(
                "No slide relationships found".to_string(),
            ));
        }

        let ordered_ids = match read_file_from_archive(archive, PRESENTATION_PATH) {
            Ok(content) => parse_slide_id_list(&content)?,
            Err(e) => {
                log::warn!("Falling back to target numbering for slide order: {}", e);
                Vec::new()
            }
        };

        let mut paths: Vec<String> = ordered_ids
            .iter()
            .filter_map(|id| slide_targets.get(id))
            .map(|target| resolve_target(target))
            .collect();

        if paths.is_empty() {
            let mut targets: Vec<&String> = slide_targets.values().collect();
            targets.sort_by(|a, b| {
                match (extract_slide_number(a), extract_slide_number(b)) {
                    (Some(na), Some(nb)) => na.cmp(&nb),
                    (Some(_), None) => std::cmp::Ordering::Less,
                    (None, Some(_)) => std::cmp::Ordering::Greater,
                    (None, None) => a.cmp(b),
                }
            });
            paths = targets.into_iter().map(|t| resolve_target(t)).collect();
        }

        Ok(paths)
    }
}

impl Default for SlideDeckParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Map relationship id to target for every slide relationship.
fn parse_slide_relationships(xml: &str) -> Result<HashMap<String, String>> {
    let mut slides = HashMap::new();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"Relationship" =>
            {
                let rel_type = attribute(e, b"Type").unwrap_or_default();
                let is_slide = rel_type.ends_with("/slide");
                if let (true, Some(id), Some(target)) =
                    (is_slide, attribute(e, b"Id"), attribute(e, b"Target"))
                {
                    slides.insert(id, target);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing relationships: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(slides)
}

/// Relationship ids of `p:sldId` entries, in presentation order.
fn parse_slide_id_list(xml: &str) -> Result<Vec<String>> {
    let mut ids = Vec::new();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"sldId" =>
            {
                // The relationship id is the namespaced r:id, not the bare id.
                let rel_id = e.attributes().flatten().find_map(|attr| {
                    let key = attr.key.as_ref();
                    (key.contains(&b':') && local_name(key) == b"id")
                        .then(|| String::from_utf8_lossy(&attr.value).to_string())
                });
                if let Some(rel_id) = rel_id {
                    ids.push(rel_id);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing presentation: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(ids)
}

/// Text of every text-bearing shape in a slide, in document order.
fn extract_shape_texts(xml_content: &str) -> Result<Vec<String>> {
    let mut shapes = Vec::new();
    let mut reader = Reader::from_str(xml_content);
    // Run text keeps its own spacing.
    reader.trim_text(false);

    let mut paragraphs: Option<Vec<String>> = None;
    let mut in_text_body = false;
    let mut in_run_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                b"sp" => paragraphs = Some(Vec::new()),
                b"txBody" => in_text_body = true,
                b"p" if in_text_body => {
                    if let Some(ref mut paras) = paragraphs {
                        paras.push(String::new());
                    }
                }
                b"t" if in_text_body => in_run_text = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match local_name(e.name().as_ref()) {
                b"p" if in_text_body => {
                    if let Some(ref mut paras) = paragraphs {
                        paras.push(String::new());
                    }
                }
                b"br" if in_text_body => push_text(&mut paragraphs, "\n"),
                _ => {}
            },
            Ok(Event::Text(ref e)) => {
                if in_run_text {
                    let text = e.unescape().unwrap_or_default();
                    push_text(&mut paragraphs, &text);
                }
            }
            Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                b"sp" => {
                    if let Some(paras) = paragraphs.take() {
                        let text = paras.join("\n");
                        if !text.is_empty() {
                            shapes.push(text);
                        }
                    }
                    in_text_body = false;
                    in_run_text = false;
                }
                b"txBody" => in_text_body = false,
                b"t" => in_run_text = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!("Error parsing slide: {}", e)));
            }
            _ => {}
        }
    }

    Ok(shapes)
}

/// Append text to the current paragraph of the current shape.
fn push_text(paragraphs: &mut Option<Vec<String>>, text: &str) {
    if let Some(paras) = paragraphs {
        match paras.last_mut() {
            Some(last) => last.push_str(text),
            None => paras.push(text.to_string()),
        }
    }
}

/// Read a file from the ZIP archive.
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

fn attribute(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

/// Turn a relationship target into an archive path.
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("ppt/{}", target),
    }
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Extract a slide number from a target like "slides/slide3.xml".
fn extract_slide_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml");
    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}
