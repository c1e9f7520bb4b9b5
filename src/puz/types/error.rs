//! Custom error types for the puz-editor crate.

use std::fmt;

use thiserror::Error;

use super::models::Cursor;

/// Which of the two plain 16-bit checksums failed verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumKind {
    File,
    Header,
}

impl fmt::Display for ChecksumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChecksumKind::File => write!(f, "file"),
            ChecksumKind::Header => write!(f, "header"),
        }
    }
}

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum PuzError {
    /// An error originating from I/O operations (stores and the CLI only).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The `ACROSS&DOWN` marker does not occur anywhere in the buffer.
    #[error("Missing ACROSS&DOWN magic marker; not a .puz file")]
    MagicNotFound,

    /// The stored file or header checksum disagrees with the recomputed one.
    #[error("{kind} checksum mismatch: expected {expected:#06x}, got {actual:#06x}")]
    ChecksumMismatch {
        kind: ChecksumKind,
        expected: u16,
        actual: u16,
    },

    /// One byte of the 8-byte magic checksum disagrees with the recomputed one.
    #[error("Magic checksum mismatch at byte {index}: expected {expected:#04x}, got {actual:#04x}")]
    MagicChecksumMismatch { index: usize, expected: u8, actual: u8 },

    /// A declared count of items does not match the actual number of items found.
    #[error("Count mismatch for {item_type}: expected {expected}, but found {found}")]
    CountMismatch {
        item_type: &'static str,
        expected: usize,
        found: usize,
    },

    /// The state model only accepts square grids.
    #[error("Only square puzzles are supported, got {width}x{height}")]
    NotSquare { width: usize, height: usize },

    /// The buffer ended before a field could be read.
    #[error("Unexpected end of data reading {context}: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof {
        context: &'static str,
        needed: usize,
        remaining: usize,
    },

    /// The file is structurally invalid in some other way.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// A location lies outside the grid.
    #[error("Invalid location ({row}, {column}) for a {rows}x{columns} grid")]
    InvalidLocation {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },

    /// A clue was addressed at a cursor that is not currently a word start.
    #[error("No word starts at {0}")]
    InvalidClueTarget(Cursor),

    /// The grid cannot be described by the one-byte width/height fields.
    #[error("Grid of {rows}x{columns} does not fit the .puz dimension fields")]
    GridTooLarge { rows: usize, columns: usize },

    /// Text holds a character that has no single-byte Latin-1 form.
    #[error("Character {0:?} cannot be stored in a .puz file")]
    InvalidText(char),

    /// An encoder write ran past the allocated buffer.
    #[error("Internal error: write of {needed} bytes overflows buffer ({remaining} remaining)")]
    BufferOverflow { needed: usize, remaining: usize },

    /// A buffer ended up with a different size than computed up front.
    #[error("Size mismatch for {context}: expected {expected} bytes, but found {found} bytes")]
    SizeMismatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },

    /// A model invariant was broken. Never expected at runtime.
    #[error("Internal error: {0}")]
    Internal(String),

    /// The configuration file could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// A convenience `Result` type alias using the crate's `PuzError` type.
pub type Result<T> = std::result::Result<T, PuzError>;
