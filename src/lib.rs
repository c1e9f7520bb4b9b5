//! # puz-editor
//!
//! A byte-exact reader and writer for Across Lite `.puz` crossword files,
//! plus an immutable editing model with undo/redo.
//!
//! Decoding verifies every checksum the format carries. Anything the editor
//! does not model (preamble, reserved header bytes, player fill, extension
//! sections) survives a decode/encode round trip unchanged.
pub mod puz;

// Re-export the main types for convenience
pub use puz::{
    config::EditorConfig,
    format::{
        convert::{decode_state, encode_state},
        record::{decode, encode},
    },
    history::History,
    model::{clues::ClueSet, grid::Grid, state::PuzzleState, words::WordInfo},
    models::{Cell, Clue, Cursor, Location, Metadata, Orientation, PuzRecord, WordStart},
    session::{Session, SubscriptionId},
    store::{FileStore, MemoryStore, StateStore},
    ChecksumKind, PuzError, Result,
};
