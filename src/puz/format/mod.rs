//! File format layer for `.puz` crossword files.
//!
//! # Module Organization
//!
//! - [`record`]: byte image ⇄ [`PuzRecord`](crate::puz::types::models::PuzRecord)
//! - [`convert`]: `PuzRecord` ⇄ [`PuzzleState`](crate::puz::model::state::PuzzleState)
//!
//! ```text
//! bytes ──record::decode──▶ PuzRecord ──convert::state_from_record──▶ PuzzleState
//! bytes ◀──record::encode── PuzRecord ◀──convert::record_from_state── PuzzleState
//! ```

pub mod convert;
pub mod record;
