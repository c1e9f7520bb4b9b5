//! The immutable puzzle snapshot and its transitions.

use std::sync::Arc;

use log::trace;

use super::clues::ClueSet;
use super::grid::Grid;
use super::words::WordInfo;
use crate::puz::types::error::{PuzError, Result};
use crate::puz::types::models::{Cell, Cursor, Location, Metadata, PuzRecord};

/// Grid, clues, editing cursor and metadata at one point in an editing session.
///
/// Every transition returns a new snapshot; existing snapshots are never
/// modified, so they can be kept in undo history or handed to observers.
/// The clue set is re-projected onto the grid's word starts whenever a
/// snapshot is built, so it always holds exactly one clue per word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleState {
    grid: Grid,
    clues: ClueSet,
    cursor: Cursor,
    metadata: Metadata,
    origin: Option<Arc<PuzRecord>>,
}

impl PuzzleState {
    /// A blank `size × size` puzzle.
    pub fn new(size: usize) -> Self {
        Self::from_grid(Grid::empty(size))
    }

    pub fn from_grid(grid: Grid) -> Self {
        Self::build(grid, ClueSet::new(), Cursor::default(), Metadata::default(), None)
    }

    fn build(
        grid: Grid,
        clues: ClueSet,
        cursor: Cursor,
        metadata: Metadata,
        origin: Option<Arc<PuzRecord>>,
    ) -> Self {
        let clues = clues.update_from(&grid.word_starts());
        Self {
            grid,
            clues,
            cursor,
            metadata,
            origin,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn clues(&self) -> &ClueSet {
        &self.clues
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// The decoded file this puzzle was loaded from, if any.
    pub fn origin(&self) -> Option<&PuzRecord> {
        self.origin.as_deref()
    }

    /// Attaches the record whose unmodelled fields an export should keep.
    pub fn with_origin(&self, origin: PuzRecord) -> PuzzleState {
        Self {
            origin: Some(Arc::new(origin)),
            ..self.clone()
        }
    }

    /// Writes a cell, keeping blocks rotationally symmetric.
    ///
    /// - Block onto a block toggles the cell back to empty.
    /// - Any change to or from a block does the same to the 180° partner
    ///   (a partner that holds a letter is left alone when unblocking).
    /// - Letter edits on an open cell only touch that cell.
    pub fn set_cell(&self, location: Location, value: Cell) -> Result<PuzzleState> {
        let current = self.grid.get(location)?;
        let partner = self.grid.rotate_180(location);
        let symmetric = partner != location;

        let grid = match (current.is_block(), value.is_block()) {
            (true, true) => {
                let grid = self.grid.set(location, Cell::Empty)?;
                unblock(grid, partner, symmetric)?
            }
            (true, false) => {
                let grid = self.grid.set(location, value)?;
                unblock(grid, partner, symmetric)?
            }
            (false, true) => {
                let grid = self.grid.set(location, Cell::Block)?;
                if symmetric {
                    grid.set(partner, Cell::Block)?
                } else {
                    grid
                }
            }
            (false, false) => self.grid.set(location, value)?,
        };
        trace!("Set cell {} to {:?} (was {:?})", location, value, current);

        Ok(Self::build(
            grid,
            self.clues.clone(),
            self.cursor,
            self.metadata.clone(),
            self.origin.clone(),
        ))
    }

    pub fn set_clue(&self, cursor: Cursor, text: impl Into<String>) -> Result<PuzzleState> {
        let clues = self.clues.set_clue(cursor, text)?;
        Ok(Self {
            clues,
            ..self.clone()
        })
    }

    pub fn set_cursor(&self, cursor: Cursor) -> Result<PuzzleState> {
        if !self.grid.contains(cursor.location) {
            return Err(PuzError::InvalidLocation {
                row: cursor.location.row,
                column: cursor.location.column,
                rows: self.grid.rows(),
                columns: self.grid.columns(),
            });
        }
        Ok(Self {
            cursor,
            ..self.clone()
        })
    }

    pub fn set_metadata(&self, metadata: Metadata) -> PuzzleState {
        Self {
            metadata,
            ..self.clone()
        }
    }

    /// Numbered words and per-cell word lookups for this snapshot.
    pub fn word_info(&self) -> Result<WordInfo> {
        WordInfo::build(&self.grid, &self.clues)
    }
}

fn unblock(grid: Grid, partner: Location, symmetric: bool) -> Result<Grid> {
    if symmetric && grid.get(partner)?.is_block() {
        grid.set(partner, Cell::Empty)
    } else {
        Ok(grid)
    }
}
