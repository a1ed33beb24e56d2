//! geonorm - Normalizer for mesh and line-strip geometry files
//!
//! Surveys the extent of a geometry file, then scales, translates or unitizes
//! its coordinates while copying every other record through unchanged.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod asset;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod geometry;
pub mod parser;
pub mod process;

// Re-export commonly used types
pub use asset::AssetFormat;
pub use cli::{build_cli, parse_args, parse_args_from, CliArgs};
pub use config::Config;
pub use error::{Error, ErrorKind, Result};
