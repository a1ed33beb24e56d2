//! File processing pipeline.
//!
//! This module orchestrates the two-pass normalization:
//!
//! **Pass 1 - Survey:**
//! - Classify every record of the input
//! - Accumulate the per-axis extent of the geometry records
//! - Report the extent to the diagnostic stream
//!
//! **Pass 2 - Rewrite:**
//! - Derive offset and scale from the requested mode and the extent
//! - Create the output file, never overwriting an existing one
//! - Reopen the input and re-emit every record, transforming geometry only
//!
//! The main entry point is [`run`], which drives both passes for a [`Job`].

pub mod output;
pub mod pipeline;
pub mod rewrite;

pub use output::derive_output_path;
pub use pipeline::{run, survey, Job, Outcome, Params, Survey};
pub use rewrite::RewriteStats;
