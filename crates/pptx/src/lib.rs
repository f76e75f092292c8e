//! PPTX (Office Open XML) slide deck backend for pitch deck extraction.
//!
//! Parses .pptx files which are ZIP archives containing XML documents.

pub mod parser;

pub use parser::{Slide, SlideDeckParser};
