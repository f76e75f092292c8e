//! DOCX (Office Open XML) word document backend for pitch deck extraction.
//!
//! Documents are staged in a temporary file that is removed when
//! extraction finishes, whether it succeeded or not.

pub mod parser;
pub mod store;

pub use parser::DocxParser;
pub use store::ScopedBackingStore;
