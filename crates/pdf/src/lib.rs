//! PDF backend for pitch deck extraction.

pub mod parser;

pub use parser::PdfParser;
