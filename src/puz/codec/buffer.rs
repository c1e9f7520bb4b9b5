//! Sequential byte cursor used by the `.puz` reader and writer.
//!
//! The same type serves both directions: `ByteCursor<&[u8]>` reads a
//! borrowed file image, `ByteCursor<Vec<u8>>` fills a buffer allocated to
//! its final size. Every access is bounds-checked; running off the end is
//! an error, never a truncation.

use byteorder::{ByteOrder, LittleEndian};
use log::trace;

use crate::puz::types::error::{PuzError, Result};
use crate::puz::utils;

#[derive(Debug)]
pub struct ByteCursor<B> {
    buf: B,
    pos: usize,
}

impl<B: AsRef<[u8]>> ByteCursor<B> {
    /// Wraps `buf` with the position at its first byte.
    pub fn new(buf: B) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.buf.as_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes left between the position and the end.
    pub fn remaining(&self) -> usize {
        self.len() - self.pos
    }

    /// True once every byte has been read or written.
    pub fn is_finished(&self) -> bool {
        self.pos == self.len()
    }

    pub fn into_inner(self) -> B {
        self.buf
    }

    /// Moves to the first occurrence of `literal` at or after the current
    /// position, shifted by `offset`.
    ///
    /// Returns `false` and parks the cursor at the end when the literal is
    /// absent or the shifted position would fall outside the buffer.
    pub fn seek_to(&mut self, literal: &[u8], offset: isize) -> bool {
        if literal.is_empty() {
            return false;
        }
        let haystack = &self.buf.as_ref()[self.pos..];
        let found = haystack
            .windows(literal.len())
            .position(|window| window == literal)
            .map(|i| i + self.pos)
            .and_then(|i| i.checked_add_signed(offset))
            .filter(|&target| target <= self.len());

        match found {
            Some(target) => {
                trace!("Seek to {:?}{:+}: position {}", String::from_utf8_lossy(literal), offset, target);
                self.pos = target;
                true
            }
            None => {
                self.pos = self.len();
                false
            }
        }
    }

    fn take(&mut self, count: usize, context: &'static str) -> Result<&[u8]> {
        if count > self.remaining() {
            return Err(PuzError::UnexpectedEof {
                context,
                needed: count,
                remaining: self.remaining(),
            });
        }
        let start = self.pos;
        self.pos += count;
        Ok(&self.buf.as_ref()[start..self.pos])
    }

    /// Reads one byte.
    ///
    /// # Parameters
    /// - `context`: Field name reported if the buffer is exhausted
    ///
    /// # Returns
    /// - `Ok(u8)` with the byte at the current position
    /// - `Err(PuzError::UnexpectedEof)` if no bytes remain
    pub fn read_u8(&mut self, context: &'static str) -> Result<u8> {
        Ok(self.take(1, context)?[0])
    }

    /// Reads a little-endian `u16`.
    ///
    /// # Parameters
    /// - `context`: Field name reported if the buffer is exhausted
    ///
    /// # Returns
    /// - `Ok(u16)` decoded from the next two bytes
    /// - `Err(PuzError::UnexpectedEof)` if fewer than two bytes remain
    pub fn read_u16(&mut self, context: &'static str) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.take(2, context)?))
    }

    /// Copies out the next `count` raw bytes.
    ///
    /// # Parameters
    /// - `count`: Number of bytes to read
    /// - `context`: Field name reported if the buffer is exhausted
    pub fn read_bytes(&mut self, count: usize, context: &'static str) -> Result<Vec<u8>> {
        Ok(self.take(count, context)?.to_vec())
    }

    /// Reads a fixed-size block such as a reserved area or the magic checksum.
    pub fn read_array<const N: usize>(&mut self, context: &'static str) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N, context)?);
        Ok(out)
    }

    /// Reads exactly `count` single-byte characters.
    pub fn read_string_n(&mut self, count: usize, context: &'static str) -> Result<String> {
        Ok(utils::latin1_to_string(self.take(count, context)?))
    }

    /// Reads up to the next NUL and steps past it.
    ///
    /// # Parameters
    /// - `context`: Field name reported if no terminator is found
    ///
    /// # Returns
    /// - `Ok(String)` without the terminator
    /// - `Err(PuzError::InvalidFormat)` if the buffer ends before a NUL
    pub fn read_cstring(&mut self, context: &'static str) -> Result<String> {
        let rest = &self.buf.as_ref()[self.pos..];
        let end = rest.iter().position(|&b| b == 0).ok_or_else(|| {
            PuzError::InvalidFormat(format!("Unterminated {} string at offset {}", context, self.pos))
        })?;
        let text = utils::latin1_to_string(&rest[..end]);
        self.pos += end + 1;
        Ok(text)
    }

    /// Everything from the current position to the end.
    pub fn read_rest(&mut self) -> Vec<u8> {
        let rest = self.buf.as_ref()[self.pos..].to_vec();
        self.pos = self.len();
        rest
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> ByteCursor<B> {
    fn slot(&mut self, count: usize) -> Result<&mut [u8]> {
        if count > self.remaining() {
            return Err(PuzError::BufferOverflow {
                needed: count,
                remaining: self.remaining(),
            });
        }
        let start = self.pos;
        self.pos += count;
        Ok(&mut self.buf.as_mut()[start..start + count])
    }

    /// Writes one byte.
    ///
    /// # Returns
    /// - `Ok(())` on success
    /// - `Err(PuzError::BufferOverflow)` if the buffer is already full
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.slot(1)?[0] = value;
        Ok(())
    }

    /// Writes `value` as two little-endian bytes.
    ///
    /// # Returns
    /// - `Ok(())` on success
    /// - `Err(PuzError::BufferOverflow)` if fewer than two bytes remain
    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        LittleEndian::write_u16(self.slot(2)?, value);
        Ok(())
    }

    /// Writes `bytes` verbatim, failing with `BufferOverflow` if they don't fit.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.slot(bytes.len())?.copy_from_slice(bytes);
        Ok(())
    }

    /// Writes `text` into a field of exactly `count` bytes.
    ///
    /// Shorter text is NUL-padded; longer text is an error.
    pub fn write_string_n(&mut self, text: &str, count: usize, context: &'static str) -> Result<()> {
        let bytes = utils::string_to_latin1(text)?;
        if bytes.len() > count {
            return Err(PuzError::SizeMismatch {
                context,
                expected: count,
                found: bytes.len(),
            });
        }
        let field = self.slot(count)?;
        field[..bytes.len()].copy_from_slice(&bytes);
        field[bytes.len()..].fill(0);
        Ok(())
    }

    /// Writes `text` followed by a NUL.
    ///
    /// # Parameters
    /// - `text`: Latin-1 representable text without embedded NULs
    ///
    /// # Returns
    /// - `Ok(())` on success
    /// - `Err(PuzError::InvalidFormat)` if `text` contains a NUL
    /// - `Err(PuzError::InvalidText)` if a character is outside Latin-1
    /// - `Err(PuzError::BufferOverflow)` if the buffer is too short
    pub fn write_cstring(&mut self, text: &str) -> Result<()> {
        if text.contains('\0') {
            return Err(PuzError::InvalidFormat(format!(
                "Embedded NUL in string field at offset {}",
                self.pos
            )));
        }
        let bytes = utils::string_to_latin1(text)?;
        self.write_bytes(&bytes)?;
        self.write_u8(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian_and_strings() {
        let data = [0x34, 0x12, b'a', b'b', 0, b'x', b'y', b'z'];
        let mut cursor = ByteCursor::new(&data[..]);
        assert_eq!(cursor.read_u16("short").unwrap(), 0x1234);
        assert_eq!(cursor.read_cstring("name").unwrap(), "ab");
        assert_eq!(cursor.position(), 5);
        assert_eq!(cursor.read_string_n(3, "tail").unwrap(), "xyz");
        assert!(cursor.is_finished());
    }

    #[test]
    fn reading_past_the_end_fails() {
        let data = [1u8];
        let mut cursor = ByteCursor::new(&data[..]);
        let err = cursor.read_u16("width").unwrap_err();
        assert!(matches!(
            err,
            PuzError::UnexpectedEof { context: "width", needed: 2, remaining: 1 }
        ));
    }

    #[test]
    fn unterminated_string_is_a_format_error() {
        let data = *b"abc";
        let mut cursor = ByteCursor::new(&data[..]);
        assert!(matches!(cursor.read_cstring("title"), Err(PuzError::InvalidFormat(_))));
    }

    #[test]
    fn seek_lands_relative_to_the_match() {
        let data = *b"junk..MARK rest";
        let mut cursor = ByteCursor::new(&data[..]);
        assert!(cursor.seek_to(b"MARK", -2));
        assert_eq!(cursor.position(), 4);
        assert!(!cursor.seek_to(b"NOPE", 0));
        assert!(cursor.is_finished());
    }

    #[test]
    fn seek_before_start_is_not_found() {
        let data = *b"MARK";
        let mut cursor = ByteCursor::new(&data[..]);
        assert!(!cursor.seek_to(b"MARK", -2));
    }

    #[test]
    fn writes_fill_exactly_and_refuse_overflow() {
        let mut cursor = ByteCursor::new(vec![0xFFu8; 7]);
        cursor.write_u16(0xBEEF).unwrap();
        cursor.write_string_n("1.3", 4, "version").unwrap();
        assert_eq!(cursor.remaining(), 1);
        assert!(matches!(
            cursor.write_bytes(b"xy"),
            Err(PuzError::BufferOverflow { needed: 2, remaining: 1 })
        ));
        cursor.write_u8(9).unwrap();
        assert!(cursor.is_finished());
        assert_eq!(cursor.into_inner(), vec![0xEF, 0xBE, b'1', b'.', b'3', 0, 9]);
    }

    #[test]
    fn fixed_width_text_must_fit() {
        let mut cursor = ByteCursor::new(vec![0u8; 4]);
        assert!(matches!(
            cursor.write_string_n("1.3.1", 4, "version"),
            Err(PuzError::SizeMismatch { context: "version", expected: 4, found: 5 })
        ));
    }
}
