//! Plain-text backend.

/// Decode UTF-8 bytes, dropping any invalid sequences, and trim.
///
/// Never fails; arbitrary bytes decode to whatever valid text they hold.
pub fn decode(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    let mut dropped = 0usize;
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
        dropped += chunk.invalid().len();
    }
    if dropped > 0 {
        log::debug!("Dropped {} bytes of invalid UTF-8", dropped);
    }
    text.trim().to_string()
}
