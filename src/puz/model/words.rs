//! Derived word layout: which cells form which numbered word.

use std::collections::BTreeMap;

use super::clues::ClueSet;
use super::grid::Grid;
use crate::puz::types::error::{PuzError, Result};
use crate::puz::types::models::{Cell, Cursor, Location, Orientation};

/// Where a cell sits inside the word covering it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordPosition {
    /// Printed number of the word.
    pub word: u32,
    /// Zero-based offset from the word's first cell.
    pub position: usize,
}

/// One run of open cells plus its clue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub cursor: Cursor,
    pub index: u32,
    pub cells: Vec<(Location, Cell)>,
    pub clue: String,
}

impl Word {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The word's letters, with `-` for unfilled cells.
    pub fn text(&self) -> String {
        self.cells.iter().map(|(_, cell)| cell.solution_char()).collect()
    }
}

/// All words of a single orientation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrientedWords {
    words: BTreeMap<u32, Word>,
    positions: Vec<Option<WordPosition>>,
    columns: usize,
}

impl OrientedWords {
    fn new(rows: usize, columns: usize) -> Self {
        Self {
            words: BTreeMap::new(),
            positions: vec![None; rows * columns],
            columns,
        }
    }

    pub fn word(&self, index: u32) -> Option<&Word> {
        self.words.get(&index)
    }

    pub fn position_at(&self, location: Location) -> Option<WordPosition> {
        if location.column >= self.columns {
            return None;
        }
        self.positions
            .get(location.row * self.columns + location.column)
            .copied()
            .flatten()
    }

    /// The word covering `location`, if any.
    pub fn word_at(&self, location: Location) -> Option<&Word> {
        self.position_at(location).and_then(|pos| self.word(pos.word))
    }

    /// Words in numeric order.
    pub fn iter(&self) -> impl Iterator<Item = &Word> {
        self.words.values()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Per-orientation word maps and per-cell lookups for one puzzle snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordInfo {
    across: OrientedWords,
    down: OrientedWords,
}

impl WordInfo {
    /// Walks every word start until a block or the grid edge.
    ///
    /// # Errors
    /// Returns [`PuzError::Internal`] if a word start has no clue entry. A
    /// `PuzzleState` always keeps its clues projected onto its grid, so this
    /// only fires when that invariant has been broken.
    pub fn build(grid: &Grid, clues: &ClueSet) -> Result<Self> {
        let mut across = OrientedWords::new(grid.rows(), grid.columns());
        let mut down = OrientedWords::new(grid.rows(), grid.columns());

        for start in grid.word_starts() {
            let clue = clues.get(&start.cursor).ok_or_else(|| {
                PuzError::Internal(format!("word starting at {} has no matching clue", start.cursor))
            })?;
            let target = match start.cursor.orientation {
                Orientation::Across => &mut across,
                Orientation::Down => &mut down,
            };

            let mut cells = Vec::new();
            let mut location = start.cursor.location;
            while grid.contains(location) {
                let cell = grid.get(location)?;
                if cell.is_block() {
                    break;
                }
                target.positions[location.row * grid.columns() + location.column] = Some(WordPosition {
                    word: start.index,
                    position: cells.len(),
                });
                cells.push((location, cell));
                location = match start.cursor.orientation {
                    Orientation::Across => Location::new(location.row, location.column + 1),
                    Orientation::Down => Location::new(location.row + 1, location.column),
                };
            }

            target.words.insert(
                start.index,
                Word {
                    cursor: start.cursor,
                    index: start.index,
                    cells,
                    clue: clue.to_string(),
                },
            );
        }

        Ok(Self { across, down })
    }

    pub fn across(&self) -> &OrientedWords {
        &self.across
    }

    pub fn down(&self) -> &OrientedWords {
        &self.down
    }

    pub fn words(&self, orientation: Orientation) -> &OrientedWords {
        match orientation {
            Orientation::Across => &self.across,
            Orientation::Down => &self.down,
        }
    }

    /// The word under a cursor, in the cursor's orientation.
    pub fn word_at(&self, cursor: Cursor) -> Option<&Word> {
        self.words(cursor.orientation).word_at(cursor.location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info_for(grid: &Grid) -> WordInfo {
        let clues = ClueSet::new().update_from(&grid.word_starts());
        WordInfo::build(grid, &clues).unwrap()
    }

    #[test]
    fn runs_stop_at_blocks() {
        let grid = Grid::empty(3).set(Location::new(1, 1), Cell::Block).unwrap();
        let info = info_for(&grid);

        let first_down = info.down().word(1).unwrap();
        assert_eq!(first_down.len(), 3);
        // Cell (2, 1) begins a one-letter down word below the block.
        let below = info.down().word_at(Location::new(2, 1)).unwrap();
        assert_eq!(below.cursor, Cursor::new(2, 1, Orientation::Down));
        assert_eq!(below.len(), 1);
        assert_eq!(info.across().position_at(Location::new(1, 1)), None);
    }

    #[test]
    fn positions_count_from_the_word_start() {
        let info = info_for(&Grid::empty(3));
        assert_eq!(
            info.across().position_at(Location::new(1, 2)),
            Some(WordPosition { word: 4, position: 2 })
        );
        assert_eq!(
            info.down().position_at(Location::new(2, 2)),
            Some(WordPosition { word: 3, position: 2 })
        );
    }

    #[test]
    fn missing_clue_is_an_internal_error() {
        let grid = Grid::empty(2);
        let err = WordInfo::build(&grid, &ClueSet::new()).unwrap_err();
        assert!(matches!(err, PuzError::Internal(_)));
    }

    #[test]
    fn word_text_marks_unfilled_cells() {
        let grid = Grid::empty(2).set(Location::new(0, 0), Cell::Letter('O')).unwrap();
        let info = info_for(&grid);
        let word = info.word_at(Cursor::new(0, 1, Orientation::Across)).unwrap();
        assert_eq!(word.text(), "O-");
    }
}
