//! Clue text keyed by word-start cursor.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::puz::types::error::{PuzError, Result};
use crate::puz::types::models::{Clue, Cursor, WordStart};

/// Immutable map from word-start cursor to clue text.
///
/// Keys are `(row, column, orientation)` rather than printed numbers, so a
/// clue keeps its text when edits elsewhere renumber the puzzle. Iteration
/// follows the key ordering, which is canonical clue order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClueSet {
    clues: Arc<BTreeMap<Cursor, String>>,
}

impl ClueSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Projects the set onto a new list of word starts.
    ///
    /// Text is kept for cursors that still start a word, new word starts get
    /// an empty clue, and cursors that no longer start a word are dropped.
    pub fn update_from(&self, starts: &[WordStart]) -> ClueSet {
        let clues = starts
            .iter()
            .map(|start| {
                let text = self.clues.get(&start.cursor).cloned().unwrap_or_default();
                (start.cursor, text)
            })
            .collect();
        ClueSet { clues: Arc::new(clues) }
    }

    /// Replaces the text of an existing clue.
    pub fn set_clue(&self, cursor: Cursor, text: impl Into<String>) -> Result<ClueSet> {
        if !self.clues.contains_key(&cursor) {
            return Err(PuzError::InvalidClueTarget(cursor));
        }
        let mut next = self.clone();
        Arc::make_mut(&mut next.clues).insert(cursor, text.into());
        Ok(next)
    }

    pub fn get(&self, cursor: &Cursor) -> Option<&str> {
        self.clues.get(cursor).map(String::as_str)
    }

    pub fn clue(&self, cursor: &Cursor) -> Option<Clue> {
        self.clues.get(cursor).map(|text| Clue {
            cursor: *cursor,
            text: text.clone(),
        })
    }

    pub fn contains(&self, cursor: &Cursor) -> bool {
        self.clues.contains_key(cursor)
    }

    /// Clues in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Cursor, &str)> + '_ {
        self.clues.iter().map(|(cursor, text)| (*cursor, text.as_str()))
    }

    pub fn len(&self) -> usize {
        self.clues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clues.is_empty()
    }
}
