//! Error types for the coil conversion pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading, converting or writing coil files.
#[derive(Debug, Error)]
pub enum CoilError {
    /// The input file does not exist.
    #[error("file named {0:?} does not exist")]
    InputNotFound(PathBuf),

    /// The output file already exists and would be clobbered.
    #[error("file named {0:?} already exists")]
    OutputExists(PathBuf),

    /// A data line token is not a floating-point number.
    #[error("line {line}: could not parse {token:?} as a number")]
    Parse { line: usize, token: String },

    /// A data line has fewer than the nine required columns.
    #[error("line {line}: expected at least 9 columns, found {found}")]
    MissingFields { line: usize, found: usize },

    /// Colinearity was required but the coil set is not colinear.
    #[error("coils are not colinear with the first coil's axis")]
    NotColinear,

    /// Underlying file system failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
