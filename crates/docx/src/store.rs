//! Scoped on-disk backing store for parsers that want a real file.

use pitch_core::Result;
use std::fs::File;
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// A temporary file holding a copy of an uploaded document.
///
/// The file is deleted when the store is dropped, on every exit path.
#[derive(Debug)]
pub struct ScopedBackingStore {
    file: NamedTempFile,
}

impl ScopedBackingStore {
    /// Write `bytes` to a fresh temporary file with the given suffix.
    pub fn create(bytes: &[u8], suffix: &str) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("pitch-")
            .suffix(suffix)
            .tempfile()?;
        file.write_all(bytes)?;
        file.flush()?;
        log::debug!("Staged {} bytes at {}", bytes.len(), file.path().display());
        Ok(Self { file })
    }

    /// Like [`create`](Self::create), but inside `dir`.
    pub fn create_in(bytes: &[u8], suffix: &str, dir: &Path) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("pitch-")
            .suffix(suffix)
            .tempfile_in(dir)?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(Self { file })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Open an independent read handle positioned at the start.
    pub fn open(&self) -> Result<File> {
        let mut handle = self.file.reopen()?;
        handle.seek(SeekFrom::Start(0))?;
        Ok(handle)
    }
}
