//! Immutable editing model.
//!
//! - [`grid`]: cell matrix and word numbering
//! - [`clues`]: clue text keyed by word-start cursor
//! - [`words`]: derived word layout (`WordInfo`)
//! - [`state`]: the complete snapshot and its transitions

pub mod clues;
pub mod grid;
pub mod state;
pub mod words;
