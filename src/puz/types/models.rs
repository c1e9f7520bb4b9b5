//! Core data structures shared by the codec and the editing model.
//!
//! This module defines the fundamental types used throughout the library:
//! - Grid coordinates, orientations and cursors
//! - Cell values
//! - Word starts and clues
//! - The raw field-level `.puz` record

use std::fmt;

/// The literal that anchors every `.puz` file, without its NUL terminator.
pub const MAGIC: &[u8] = b"ACROSS&DOWN";

/// Byte used in solution and state grids for a blocked cell.
pub const BLOCK_BYTE: u8 = b'.';

/// Byte used in the player-state grid for an open, unfilled cell.
pub const EMPTY_BYTE: u8 = b'-';

/// A zero-based, row-major grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    pub row: usize,
    pub column: usize,
}

impl Location {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Direction of a word. `Across` orders before `Down`, which is the
/// order clues are stored in on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Orientation {
    Across,
    Down,
}

impl Orientation {
    /// Both orientations, in canonical clue order.
    pub const ALL: [Orientation; 2] = [Orientation::Across, Orientation::Down];

    pub fn flip(self) -> Self {
        match self {
            Orientation::Across => Orientation::Down,
            Orientation::Down => Orientation::Across,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Across => write!(f, "Across"),
            Orientation::Down => write!(f, "Down"),
        }
    }
}

/// A location plus a direction.
///
/// Used both as the identity of a word (when the location is a word start)
/// and as the editing focus. The derived ordering is row, column, then
/// orientation, i.e. canonical clue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cursor {
    pub location: Location,
    pub orientation: Orientation,
}

impl Cursor {
    pub fn new(row: usize, column: usize, orientation: Orientation) -> Self {
        Self {
            location: Location::new(row, column),
            orientation,
        }
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new(0, 0, Orientation::Across)
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.location, self.orientation)
    }
}

/// The content of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// An unfillable square.
    Block,
    /// An open square with no letter yet.
    #[default]
    Empty,
    /// An open square holding one Latin-1 character.
    Letter(char),
}

impl Cell {
    pub fn is_block(&self) -> bool {
        matches!(self, Cell::Block)
    }

    /// Maps a solution-grid byte to a cell: `.` is a block, `-` an empty
    /// square, anything else a letter.
    pub fn from_solution_byte(byte: u8) -> Self {
        match byte {
            BLOCK_BYTE => Cell::Block,
            EMPTY_BYTE => Cell::Empty,
            // Latin-1 bytes map one-to-one onto U+0000..=U+00FF.
            _ => Cell::Letter(char::from(byte)),
        }
    }

    /// Inverse of [`Cell::from_solution_byte`]. Empty cells have no solution
    /// letter and are written as `-`, so `Letter('-')` reads back as `Empty`.
    pub fn solution_char(&self) -> char {
        match self {
            Cell::Block => char::from(BLOCK_BYTE),
            Cell::Empty => char::from(EMPTY_BYTE),
            Cell::Letter(c) => *c,
        }
    }
}

/// A cell that begins a word, and the number printed in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordStart {
    pub cursor: Cursor,
    pub index: u32,
}

/// Clue text bound to a word-start cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clue {
    pub cursor: Cursor,
    pub text: String,
}

/// Free-text puzzle metadata carried in the `.puz` string section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub title: String,
    pub author: String,
    pub copyright: String,
    pub notes: String,
}

/// Every field of a `.puz` file, in file order.
///
/// Text fields are held as Latin-1 decoded strings, so `char` count equals
/// on-disk byte count. Fields the editor does not understand (`preamble`,
/// the reserved blocks, `postscript`) are carried verbatim so a decoded
/// record re-encodes to the identical bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzRecord {
    /// Bytes found before the file checksum.
    pub preamble: Vec<u8>,
    /// Version string including its NUL, e.g. `b"1.3\0"`.
    pub version: [u8; 4],
    pub reserved_1c: [u8; 2],
    pub scrambled_checksum: u16,
    pub reserved_20: [u8; 12],
    pub width: u8,
    pub height: u8,
    pub puzzle_type: u16,
    pub scrambled_tag: u16,
    /// Solution grid, row-major, `width * height` characters.
    pub solution: String,
    /// Player-state grid, same shape as `solution`.
    pub state: String,
    pub title: String,
    pub author: String,
    pub copyright: String,
    /// Clues in canonical order.
    pub clues: Vec<String>,
    pub notes: String,
    /// Extension sections and anything else after the notes.
    pub postscript: Vec<u8>,
}

impl Default for PuzRecord {
    fn default() -> Self {
        Self {
            preamble: Vec::new(),
            version: *b"1.3\0",
            reserved_1c: [0; 2],
            scrambled_checksum: 0,
            reserved_20: [0; 12],
            width: 0,
            height: 0,
            puzzle_type: 0x0001,
            scrambled_tag: 0x0000,
            solution: String::new(),
            state: String::new(),
            title: String::new(),
            author: String::new(),
            copyright: String::new(),
            clues: Vec::new(),
            notes: String::new(),
            postscript: Vec::new(),
        }
    }
}

impl PuzRecord {
    /// The version string without its trailing NULs, e.g. `"1.3"`.
    pub fn version_str(&self) -> String {
        let end = self.version.iter().position(|&b| b == 0).unwrap_or(self.version.len());
        self.version[..end].iter().map(|&b| char::from(b)).collect()
    }

    /// Number of cells in each of the two grids.
    pub fn cell_count(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}
