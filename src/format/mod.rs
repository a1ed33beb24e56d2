//! Output formatting.
//!
//! - [`number`]: fixed-precision, sign-padded fields joined by two spaces
//! - [`report`]: the extent report printed to the diagnostic stream

pub mod number;
pub mod report;

pub use number::{fixed, fixed_fields, write_fixed, FIELD_SEPARATOR};
pub use report::{write_declared_extent, write_extent_report};
