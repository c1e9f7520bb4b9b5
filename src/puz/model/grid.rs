//! Immutable cell matrix and word-start numbering.

use std::fmt;
use std::sync::Arc;

use crate::puz::types::error::{PuzError, Result};
use crate::puz::types::models::{Cell, Cursor, Location, Orientation, WordStart};

/// A rectangular, row-major grid of cells.
///
/// Cell storage is shared between clones; [`Grid::set`] copies it only when
/// another snapshot still holds a reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Arc<Vec<Cell>>,
}

impl Grid {
    /// A `size × size` grid with every cell open and unfilled.
    pub fn empty(size: usize) -> Self {
        Self::filled(size, size, Cell::Empty)
    }

    /// A `rows × columns` grid with every cell set to `cell`.
    pub fn filled(rows: usize, columns: usize, cell: Cell) -> Self {
        Self {
            rows,
            columns,
            cells: Arc::new(vec![cell; rows * columns]),
        }
    }

    /// Builds a grid from explicit rows, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self> {
        let columns = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|row| row.len() != columns) {
            return Err(PuzError::CountMismatch {
                item_type: "cells in grid row",
                expected: columns,
                found: bad.len(),
            });
        }
        Ok(Self {
            rows: rows.len(),
            columns,
            cells: Arc::new(rows.into_iter().flatten().collect()),
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Whether `location` lies inside the grid.
    pub fn contains(&self, location: Location) -> bool {
        location.row < self.rows && location.column < self.columns
    }

    fn offset(&self, location: Location) -> Result<usize> {
        if !self.contains(location) {
            return Err(PuzError::InvalidLocation {
                row: location.row,
                column: location.column,
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(location.row * self.columns + location.column)
    }

    /// Reads one cell.
    ///
    /// # Parameters
    /// - `location`: Zero-based row and column
    ///
    /// # Returns
    /// - `Ok(Cell)` with the cell's value
    /// - `Err(PuzError::InvalidLocation)` if `location` is outside the grid
    pub fn get(&self, location: Location) -> Result<Cell> {
        Ok(self.cells[self.offset(location)?])
    }

    /// Returns a new grid with one cell replaced.
    ///
    /// # Parameters
    /// - `location`: Zero-based row and column
    /// - `value`: The new cell content
    ///
    /// # Returns
    /// - `Ok(Grid)` with the cell replaced; `self` is unchanged
    /// - `Err(PuzError::InvalidLocation)` if `location` is outside the grid
    pub fn set(&self, location: Location, value: Cell) -> Result<Grid> {
        let offset = self.offset(location)?;
        let mut next = self.clone();
        Arc::make_mut(&mut next.cells)[offset] = value;
        Ok(next)
    }

    /// The cell's partner under 180° rotation.
    pub fn rotate_180(&self, location: Location) -> Location {
        Location::new(
            self.rows.saturating_sub(location.row + 1),
            self.columns.saturating_sub(location.column + 1),
        )
    }

    fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.columns..(row + 1) * self.columns]
    }

    /// All cells with their locations, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (Location, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (Location::new(i / self.columns, i % self.columns), cell))
    }

    fn is_open(&self, row: usize, column: usize) -> bool {
        !self.cells[row * self.columns + column].is_block()
    }

    /// Every word start, numbered the way printed puzzles are.
    ///
    /// A single counter advances once per cell that starts at least one word;
    /// a cell starting both an Across and a Down word carries one number.
    /// Output is in canonical clue order: row-major, Across before Down.
    pub fn word_starts(&self) -> Vec<WordStart> {
        let mut starts = Vec::new();
        let mut index = 1;
        for row in 0..self.rows {
            for column in 0..self.columns {
                if !self.is_open(row, column) {
                    continue;
                }
                let across = column == 0 || !self.is_open(row, column - 1);
                let down = row == 0 || !self.is_open(row - 1, column);
                for (starts_here, orientation) in [(across, Orientation::Across), (down, Orientation::Down)] {
                    if starts_here {
                        starts.push(WordStart {
                            cursor: Cursor::new(row, column, orientation),
                            index,
                        });
                    }
                }
                if across || down {
                    index += 1;
                }
            }
        }
        starts
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            let line: String = self.row(row).iter().map(Cell::solution_char).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
