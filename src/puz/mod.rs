//! Core `.puz` crossword module.
//!
//! # Module Organization
//!
//! - [`codec`]: byte cursor and checksum primitives
//! - [`format`]: the file layout and its mapping onto the editing model
//! - [`model`]: immutable grid, clues and puzzle snapshots
//! - [`history`]: undo/redo over snapshots
//! - [`session`]: the editing front end with change notification
//! - [`store`]: saving and restoring snapshots
//! - [`config`]: TOML editor settings

pub mod codec;
pub mod config;
pub mod format;
pub mod history;
pub mod model;
pub mod session;
pub mod store;
pub mod types;
mod utils;

pub use types::error::{ChecksumKind, PuzError, Result};
pub use types::models;
