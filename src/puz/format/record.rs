//! Field-level `.puz` reading and writing.
//!
//! # File Structure
//! ```text
//! [variable] preamble (anything before the file checksum)
//! [2 bytes]  file checksum
//! [12 bytes] "ACROSS&DOWN\0"
//! [2 bytes]  header checksum
//! [8 bytes]  magic checksum
//! [4 bytes]  version string, e.g. "1.3\0"
//! [2 bytes]  reserved
//! [2 bytes]  scrambled checksum
//! [12 bytes] reserved
//! [1 byte]   width
//! [1 byte]   height
//! [2 bytes]  clue count
//! [2 bytes]  puzzle type
//! [2 bytes]  scrambled tag
//! [w*h]      solution grid
//! [w*h]      player-state grid
//! [cstrings] title, author, copyright, clues..., notes
//! [variable] postscript (extension sections)
//! ```
//! All integers are little-endian.

use log::{debug, info, trace, warn};

use crate::puz::codec::buffer::ByteCursor;
use crate::puz::codec::checksum;
use crate::puz::types::error::{ChecksumKind, PuzError, Result};
use crate::puz::types::models::{PuzRecord, MAGIC};
use crate::puz::utils::latin1_len;

/// Fixed part of the layout, from the file checksum through the scrambled tag.
const HEADER_SIZE: usize = 52;

/// Parses and verifies a complete `.puz` image.
///
/// # Errors
/// Returns an error if:
/// - The `ACROSS&DOWN` marker is missing
/// - The buffer ends before all declared fields are read
/// - The file, header or magic checksum does not match the content
pub fn decode(bytes: &[u8]) -> Result<PuzRecord> {
    info!("Decoding .puz image ({} bytes)", bytes.len());
    let mut buf = ByteCursor::new(bytes);

    // Step 1: Locate the magic marker; the file checksum sits just before it
    if !buf.seek_to(MAGIC, -2) {
        return Err(PuzError::MagicNotFound);
    }
    let preamble = bytes[..buf.position()].to_vec();
    if !preamble.is_empty() {
        debug!("Skipping {} preamble bytes", preamble.len());
    }

    // Step 2: Stored checksums
    let stored_file_checksum = buf.read_u16("file checksum")?;
    buf.read_array::<12>("magic marker")?;
    let stored_header_checksum = buf.read_u16("header checksum")?;
    let stored_magic_checksum = buf.read_array::<8>("magic checksum")?;
    trace!(
        "Stored checksums: file={:#06x}, header={:#06x}, magic={}",
        stored_file_checksum,
        stored_header_checksum,
        hex::encode(stored_magic_checksum)
    );

    // Step 3: Fixed header fields
    let version = buf.read_array::<4>("version")?;
    let reserved_1c = buf.read_array::<2>("reserved block")?;
    let scrambled_checksum = buf.read_u16("scrambled checksum")?;
    let reserved_20 = buf.read_array::<12>("reserved block")?;
    let width = buf.read_u8("width")?;
    let height = buf.read_u8("height")?;
    let clue_count = buf.read_u16("clue count")?;
    let puzzle_type = buf.read_u16("puzzle type")?;
    let scrambled_tag = buf.read_u16("scrambled tag")?;

    // Step 4: Grids
    let cells = usize::from(width) * usize::from(height);
    let solution = buf.read_string_n(cells, "solution grid")?;
    let state = buf.read_string_n(cells, "player-state grid")?;

    // Step 5: String section
    let title = buf.read_cstring("title")?;
    let author = buf.read_cstring("author")?;
    let copyright = buf.read_cstring("copyright")?;
    let clues = (0..clue_count)
        .map(|_| buf.read_cstring("clue"))
        .collect::<Result<Vec<_>>>()?;
    let notes = buf.read_cstring("notes")?;
    let postscript = buf.read_rest();

    let record = PuzRecord {
        preamble,
        version,
        reserved_1c,
        scrambled_checksum,
        reserved_20,
        width,
        height,
        puzzle_type,
        scrambled_tag,
        solution,
        state,
        title,
        author,
        copyright,
        clues,
        notes,
        postscript,
    };

    // Step 6: Verify integrity
    verify_checksums(
        &record,
        stored_file_checksum,
        stored_header_checksum,
        &stored_magic_checksum,
    )?;

    let version_str = record.version_str();
    if !version_str.starts_with("1.") {
        warn!("Unexpected .puz version '{}'; decoding as 1.x", version_str);
    }
    if record.scrambled_tag != 0 {
        warn!("Puzzle is scrambled (tag {:#06x}); solution letters are not plain text", record.scrambled_tag);
    }

    info!(
        "Decoded .puz: version={}, size={}x{}, clues={}, title='{}', postscript={} bytes",
        version_str,
        record.width,
        record.height,
        record.clues.len(),
        record.title,
        record.postscript.len()
    );
    Ok(record)
}

fn verify_checksums(
    record: &PuzRecord,
    stored_file: u16,
    stored_header: u16,
    stored_magic: &[u8; 8],
) -> Result<()> {
    let actual_file = checksum::file_checksum(record)?;
    if actual_file != stored_file {
        return Err(PuzError::ChecksumMismatch {
            kind: ChecksumKind::File,
            expected: stored_file,
            actual: actual_file,
        });
    }

    let actual_header = checksum::header_checksum(record, 0);
    if actual_header != stored_header {
        return Err(PuzError::ChecksumMismatch {
            kind: ChecksumKind::Header,
            expected: stored_header,
            actual: actual_header,
        });
    }

    let actual_magic = checksum::magic_checksum(&checksum::section_checksums(record)?);
    if let Some(index) = (0..8).find(|&i| actual_magic[i] != stored_magic[i]) {
        return Err(PuzError::MagicChecksumMismatch {
            index,
            expected: stored_magic[index],
            actual: actual_magic[index],
        });
    }
    debug!("All checksums verified");
    Ok(())
}

/// Exact encoded length of `record`, derived from its current field lengths.
pub fn byte_size(record: &PuzRecord) -> usize {
    let grids = 2 * record.cell_count();
    let named = [&record.title, &record.author, &record.copyright, &record.notes]
        .iter()
        .map(|s| latin1_len(s) + 1)
        .sum::<usize>();
    let clues = record.clues.iter().map(|c| latin1_len(c) + 1).sum::<usize>();
    let verbatim = record.preamble.len() + record.postscript.len();
    HEADER_SIZE + grids + named + clues + verbatim
}

/// Serializes `record`, recomputing all checksums from its content.
///
/// Stored checksum values are never reused, so any edit to a text or grid
/// field is reflected in the output.
pub fn encode(record: &PuzRecord) -> Result<Vec<u8>> {
    validate_for_encode(record)?;

    let size = byte_size(record);
    info!("Encoding .puz image ({} bytes)", size);

    let sections = checksum::section_checksums(record)?;
    let file_checksum = checksum::file_checksum(record)?;
    let magic = checksum::magic_checksum(&sections);

    let mut buf = ByteCursor::new(vec![0u8; size]);
    buf.write_bytes(&record.preamble)?;
    buf.write_u16(file_checksum)?;
    buf.write_bytes(MAGIC)?;
    buf.write_u8(0)?;
    buf.write_u16(sections.header)?;
    buf.write_bytes(&magic)?;
    buf.write_bytes(&record.version)?;
    buf.write_bytes(&record.reserved_1c)?;
    buf.write_u16(record.scrambled_checksum)?;
    buf.write_bytes(&record.reserved_20)?;
    buf.write_bytes(&checksum::header_bytes(record))?;
    buf.write_string_n(&record.solution, record.cell_count(), "solution grid")?;
    buf.write_string_n(&record.state, record.cell_count(), "player-state grid")?;
    buf.write_cstring(&record.title)?;
    buf.write_cstring(&record.author)?;
    buf.write_cstring(&record.copyright)?;
    for clue in &record.clues {
        buf.write_cstring(clue)?;
    }
    buf.write_cstring(&record.notes)?;
    buf.write_bytes(&record.postscript)?;

    if !buf.is_finished() {
        return Err(PuzError::SizeMismatch {
            context: "encoded file",
            expected: size,
            found: buf.position(),
        });
    }
    debug!("Encoded checksums: file={:#06x}, header={:#06x}", file_checksum, sections.header);
    Ok(buf.into_inner())
}

fn validate_for_encode(record: &PuzRecord) -> Result<()> {
    if record.clues.len() > usize::from(u16::MAX) {
        return Err(PuzError::InvalidFormat(format!(
            "{} clues exceed the 16-bit clue count field",
            record.clues.len()
        )));
    }
    for (context, grid) in [("solution grid", &record.solution), ("player-state grid", &record.state)] {
        let found = latin1_len(grid);
        if found != record.cell_count() {
            return Err(PuzError::SizeMismatch {
                context,
                expected: record.cell_count(),
                found,
            });
        }
    }
    Ok(())
}
