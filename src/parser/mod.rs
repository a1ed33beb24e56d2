//! Asset parsing utilities.
//!
//! This module provides the infrastructure for reading both asset formats:
//! - [`TokenScanner`]: Lazy whitespace tokenizer with access to the raw current line
//! - [`classify`]: Ordered tag table for mesh lines, preamble rule for line-strip files
//! - [`MeshReader`]: One [`MeshRecord`] per physical line of a mesh file
//! - [`LineStripReader`]: Positional records of a line-strip file
//!
//! Readers are lazy iterators; nothing is collected in memory, so a file can be
//! traversed any number of times by opening a fresh reader.

pub mod classify;
pub mod line_strip;
pub mod mesh;
pub mod scanner;

pub use classify::{is_preamble_terminator, MeshTag, RecordKind};
pub use line_strip::{LineStripReader, LineStripRecord};
pub use mesh::{MeshReader, MeshRecord};
pub use scanner::TokenScanner;
