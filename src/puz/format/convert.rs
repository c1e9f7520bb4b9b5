//! Conversion between the raw `.puz` record and the editing model.
//!
//! Clues in a `.puz` file carry no numbers or positions; they are matched to
//! words purely by order. Both directions therefore walk the grid's word
//! starts in canonical order (row-major, Across before Down) and pair them
//! with the flat clue list one-to-one.

use log::{debug, info};

use crate::puz::model::grid::Grid;
use crate::puz::model::state::PuzzleState;
use crate::puz::types::error::{PuzError, Result};
use crate::puz::types::models::{Cell, Metadata, PuzRecord, BLOCK_BYTE, EMPTY_BYTE};

use super::record;

/// Builds a puzzle state from a decoded record.
///
/// The record is attached as the state's origin so that a later export
/// keeps the fields the editor does not model.
///
/// # Errors
/// - [`PuzError::NotSquare`] when `require_square` is set and width ≠ height
/// - [`PuzError::CountMismatch`] when the clue list does not cover every word
pub fn state_from_record(record: PuzRecord, require_square: bool) -> Result<PuzzleState> {
    let width = usize::from(record.width);
    let height = usize::from(record.height);
    if require_square && width != height {
        return Err(PuzError::NotSquare { width, height });
    }

    let cells = record
        .solution
        .chars()
        .map(|c| u8::try_from(c).map(Cell::from_solution_byte).map_err(|_| PuzError::InvalidText(c)))
        .collect::<Result<Vec<_>>>()?;
    if cells.len() != width * height {
        return Err(PuzError::SizeMismatch {
            context: "solution grid",
            expected: width * height,
            found: cells.len(),
        });
    }
    let rows = if width == 0 {
        Vec::new()
    } else {
        cells.chunks(width).map(<[Cell]>::to_vec).collect()
    };
    let grid = Grid::from_rows(rows)?;

    let starts = grid.word_starts();
    if starts.len() != record.clues.len() {
        return Err(PuzError::CountMismatch {
            item_type: "clues",
            expected: starts.len(),
            found: record.clues.len(),
        });
    }

    let mut state = PuzzleState::from_grid(grid);
    for (start, text) in starts.iter().zip(&record.clues) {
        state = state.set_clue(start.cursor, text.as_str())?;
    }
    let state = state.set_metadata(Metadata {
        title: record.title.clone(),
        author: record.author.clone(),
        copyright: record.copyright.clone(),
        notes: record.notes.clone(),
    });
    debug!("Assigned {} clues to {}x{} grid", starts.len(), height, width);
    Ok(state.with_origin(record))
}

/// Builds the record an export of `state` will write.
///
/// Starts from the state's origin record when there is one, so the preamble,
/// reserved blocks, flags and postscript pass through untouched.
pub fn record_from_state(state: &PuzzleState) -> Result<PuzRecord> {
    let grid = state.grid();
    let (Ok(width), Ok(height)) = (u8::try_from(grid.columns()), u8::try_from(grid.rows())) else {
        return Err(PuzError::GridTooLarge {
            rows: grid.rows(),
            columns: grid.columns(),
        });
    };

    let mut record = state.origin().cloned().unwrap_or_default();
    let previous_state: Vec<char> = if record.width == width && record.height == height {
        record.state.chars().collect()
    } else {
        Vec::new()
    };

    record.width = width;
    record.height = height;
    record.solution = grid.cells().map(|(_, cell)| cell.solution_char()).collect();
    record.state = grid
        .cells()
        .enumerate()
        .map(|(i, (_, cell))| player_state_char(cell, previous_state.get(i).copied()))
        .collect();

    let metadata = state.metadata();
    record.title = metadata.title.clone();
    record.author = metadata.author.clone();
    record.copyright = metadata.copyright.clone();
    record.notes = metadata.notes.clone();

    let starts = grid.word_starts();
    record.clues = starts
        .iter()
        .filter_map(|start| state.clues().get(&start.cursor).map(str::to_string))
        .collect();
    if record.clues.len() != starts.len() || state.clues().len() != starts.len() {
        return Err(PuzError::CountMismatch {
            item_type: "clues",
            expected: starts.len(),
            found: state.clues().len(),
        });
    }
    Ok(record)
}

/// Keeps a player's fill where the cell is still open; blocks always win.
fn player_state_char(cell: Cell, previous: Option<char>) -> char {
    let block = char::from(BLOCK_BYTE);
    match (cell, previous) {
        (Cell::Block, _) => block,
        (_, Some(c)) if c != block => c,
        _ => char::from(EMPTY_BYTE),
    }
}

/// Decodes `.puz` bytes straight into an editable state.
pub fn decode_state(bytes: &[u8], require_square: bool) -> Result<PuzzleState> {
    let record = record::decode(bytes)?;
    let state = state_from_record(record, require_square)?;
    info!(
        "Loaded puzzle '{}' ({}x{}, {} clues)",
        state.metadata().title,
        state.grid().rows(),
        state.grid().columns(),
        state.clues().len()
    );
    Ok(state)
}

/// Encodes an editable state as `.puz` bytes.
pub fn encode_state(state: &PuzzleState) -> Result<Vec<u8>> {
    record::encode(&record_from_state(state)?)
}
