//! The `.puz` checksum family.
//!
//! Every checksum in the format is built from one primitive: a 16-bit
//! accumulator rotated right by one bit before each byte is added. The file
//! checksum threads a single accumulator through all sections; the magic
//! checksum takes each section separately and masks the halves with the
//! ASCII bytes of `"ICHEATED"`.

use byteorder::{ByteOrder, LittleEndian};
use log::trace;

use crate::puz::types::error::Result;
use crate::puz::types::models::PuzRecord;
use crate::puz::utils;

/// Mask for the low bytes (`ICHE`) followed by the high bytes (`ATED`).
const MAGIC_MASK: &[u8; 8] = b"ICHEATED";

/// Running checksum over `data`, continuing from `seed`.
///
/// Chaining calls over consecutive chunks gives the same result as one call
/// over their concatenation.
pub fn checksum(data: &[u8], seed: u16) -> u16 {
    data.iter()
        .fold(seed, |acc, &byte| acc.rotate_right(1).wrapping_add(u16::from(byte)))
}

/// The four independently computed section checksums of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionChecksums {
    pub header: u16,
    pub solution: u16,
    pub state: u16,
    pub text: u16,
}

/// The 8 bytes covered by the header checksum: dimensions, clue count,
/// puzzle type and scrambled tag.
pub fn header_bytes(record: &PuzRecord) -> [u8; 8] {
    let mut out = [0u8; 8];
    out[0] = record.width;
    out[1] = record.height;
    // Clue count is a u16 on disk; the encoder rejects records that overflow it.
    LittleEndian::write_u16(&mut out[2..4], record.clues.len() as u16);
    LittleEndian::write_u16(&mut out[4..6], record.puzzle_type);
    LittleEndian::write_u16(&mut out[6..8], record.scrambled_tag);
    out
}

pub fn header_checksum(record: &PuzRecord, seed: u16) -> u16 {
    checksum(&header_bytes(record), seed)
}

/// Checksum over the string section.
///
/// Title, author and copyright include their NUL; clues do not; notes do.
/// Empty strings are skipped entirely. The order is fixed by the format.
pub fn text_checksum(record: &PuzRecord, seed: u16) -> Result<u16> {
    let mut acc = seed;
    for field in [&record.title, &record.author, &record.copyright] {
        if !field.is_empty() {
            acc = checksum_cstring(field, acc)?;
        }
    }
    for clue in record.clues.iter().filter(|c| !c.is_empty()) {
        acc = checksum(&utils::string_to_latin1(clue)?, acc);
    }
    if !record.notes.is_empty() {
        acc = checksum_cstring(&record.notes, acc)?;
    }
    Ok(acc)
}

fn checksum_cstring(text: &str, seed: u16) -> Result<u16> {
    let acc = checksum(&utils::string_to_latin1(text)?, seed);
    Ok(checksum(&[0], acc))
}

/// The per-section checksums, each seeded at zero.
pub fn section_checksums(record: &PuzRecord) -> Result<SectionChecksums> {
    Ok(SectionChecksums {
        header: header_checksum(record, 0),
        solution: checksum(&utils::string_to_latin1(&record.solution)?, 0),
        state: checksum(&utils::string_to_latin1(&record.state)?, 0),
        text: text_checksum(record, 0)?,
    })
}

/// Header, solution, state and text folded into one accumulator.
pub fn file_checksum(record: &PuzRecord) -> Result<u16> {
    let mut acc = header_checksum(record, 0);
    acc = checksum(&utils::string_to_latin1(&record.solution)?, acc);
    acc = checksum(&utils::string_to_latin1(&record.state)?, acc);
    let acc = text_checksum(record, acc)?;
    trace!("File checksum: {:#06x}", acc);
    Ok(acc)
}

/// The obfuscated 8-byte checksum block.
pub fn magic_checksum(sections: &SectionChecksums) -> [u8; 8] {
    let parts = [sections.header, sections.solution, sections.state, sections.text];
    let mut magic = [0u8; 8];
    for (i, part) in parts.iter().enumerate() {
        let [low, high] = part.to_le_bytes();
        magic[i] = MAGIC_MASK[i] ^ low;
        magic[i + 4] = MAGIC_MASK[i + 4] ^ high;
    }
    trace!("Magic checksum: {}", hex::encode(magic));
    magic
}
