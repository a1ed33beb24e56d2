//! Error types and result aliases for geonorm.
//!
//! This module defines the error handling infrastructure:
//! - [`Error`]: every fatal condition the pipeline can hit
//! - [`ErrorKind`]: the coarse taxonomy used for diagnostics and exit codes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, Error>` used throughout the crate

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Fatal conditions raised by the scanner, the transform policy and the pipeline
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("could not open input file {}: {source}", .path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not read input file {}: {source}", .path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A numeric field was demanded but the token was not a number
    #[error("line {line}: expected a number, found `{token}`")]
    MalformedNumber { line: usize, token: String },

    /// The stream ended while a record was still incomplete
    #[error("line {line}: unexpected end of input, expected {expected}")]
    UnexpectedEnd { line: usize, expected: &'static str },

    #[error("output file already exists: {}", .0.display())]
    OutputExists(PathBuf),

    #[error("could not create output file {}: {source}", .path.display())]
    OutputCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not write output file {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("input has no geometry to unitize")]
    EmptyGeometry,

    /// Every geometry record sits on the same point, so no scale fits it
    #[error("geometry extent is degenerate (longest span {0}), cannot unitize")]
    DegenerateExtent(f64),
}

/// Coarse error taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArguments,
    InputNotFound,
    InputReadError,
    OutputExists,
    OutputCreateError,
    OutputWriteError,
    EmptyGeometry,
}

impl ErrorKind {
    /// Process exit status for this kind of failure
    #[must_use]
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::InvalidArguments => 2,
            ErrorKind::InputNotFound => 3,
            ErrorKind::InputReadError => 4,
            ErrorKind::OutputExists => 5,
            ErrorKind::OutputCreateError => 6,
            ErrorKind::OutputWriteError => 7,
            ErrorKind::EmptyGeometry => 8,
        }
    }
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidArguments(_) => ErrorKind::InvalidArguments,
            Error::InputNotFound { .. } => ErrorKind::InputNotFound,
            Error::InputRead { .. } | Error::MalformedNumber { .. } | Error::UnexpectedEnd { .. } => {
                ErrorKind::InputReadError
            }
            Error::OutputExists(_) => ErrorKind::OutputExists,
            Error::OutputCreate { .. } => ErrorKind::OutputCreateError,
            Error::OutputWrite { .. } => ErrorKind::OutputWriteError,
            Error::EmptyGeometry | Error::DegenerateExtent(_) => ErrorKind::EmptyGeometry,
        }
    }

    #[must_use]
    pub fn exit_code(&self) -> u8 {
        self.kind().exit_code()
    }

    /// Attach the input path to a bare I/O error raised while reading
    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::InputRead {
            path: path.into(),
            source,
        }
    }
}
