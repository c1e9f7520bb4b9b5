//! Byte-level primitives for the `.puz` format.
//!
//! # Submodules
//!
//! - [`buffer`][]: bounds-checked sequential reader/writer
//! - [`checksum`][]: running, file and magic checksums

pub mod buffer;
pub mod checksum;
