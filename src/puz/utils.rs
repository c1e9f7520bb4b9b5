//! Latin-1 text helpers.
//!
//! `.puz` text is one byte per character. Rust strings are UTF-8, so every
//! text field crosses this boundary on the way in and out of a buffer.

use encoding_rs::mem::{decode_latin1, encode_latin1_lossy};

use super::types::error::{PuzError, Result};

/// Decodes single-byte text. Never fails: every byte is a valid code point.
pub fn latin1_to_string(bytes: &[u8]) -> String {
    decode_latin1(bytes).into_owned()
}

/// Encodes text as one byte per character.
///
/// Rejects characters above U+00FF instead of letting them degrade silently.
pub fn string_to_latin1(text: &str) -> Result<Vec<u8>> {
    if let Some(c) = text.chars().find(|&c| u32::from(c) > 0xFF) {
        return Err(PuzError::InvalidText(c));
    }
    Ok(encode_latin1_lossy(text).into_owned())
}

/// On-disk byte length of `text`.
pub fn latin1_len(text: &str) -> usize {
    text.chars().count()
}
