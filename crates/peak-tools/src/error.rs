//! Error types for histogram peak measurements.

use std::fmt;
use thiserror::Error;

/// Which side of a peak a half-maximum search ran off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Lower,
    Upper,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Lower => write!(f, "lower"),
            Side::Upper => write!(f, "upper"),
        }
    }
}

/// Errors that can occur while measuring a peak.
#[derive(Debug, Error)]
pub enum PeakError {
    /// Histogram binning is unusable.
    #[error("invalid histogram: {0}")]
    InvalidHistogram(String),

    /// The requested interval is reversed, non-finite or not a bin number.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// The interval holds no usable bins.
    #[error("no usable bins in the interval")]
    EmptyInterval,

    /// The content never drops below half maximum on one side of the peak.
    #[error("no half-maximum crossing on the {0} side of the peak")]
    NoHalfMaxCrossing(Side),

    /// A parameter's lower bound is above its upper bound.
    #[error("invalid bounds for parameter {0}")]
    InvalidBounds(String),

    /// Fewer data points than free parameters.
    #[error("{points} points cannot constrain {parameters} free parameters")]
    TooFewPoints { points: usize, parameters: usize },

    /// The fitter could not make progress from the starting values.
    #[error("fit failed: {0}")]
    FitFailed(String),
}
