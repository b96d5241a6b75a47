//! coil-convert: Translate magfield3 coil inputs to magfield2 coil inputs
//!
//! This crate provides:
//! - Parsing of magfield3 coil tables (endpoints, radii, current density)
//! - An advisory colinearity check against the first coil's axis
//! - Conversion to magfield2 coils (axial position, thickness, length, current)
//! - Writing of the magfield2 flat-file layout
//!
//! magfield2 only models coils stacked on one axis, so the colinearity check
//! tells callers whether the conversion is meaningful. It does not block it
//! unless [`ConversionConfig::require_colinear`] is set.

pub mod coil;
pub mod colinear;
pub mod convert;
pub mod error;
pub mod reader;
pub mod writer;

pub use coil::{CoilSet, SourceCoil, TargetCoil};
pub use colinear::{is_colinear, is_colinear_within};
pub use convert::convert;
pub use error::CoilError;
pub use reader::{parse_coils, read_coils};
pub use writer::{create_coils, write_coils, write_coils_to};

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Configuration for a file conversion
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Per-component tolerance for the colinearity check (0 = exact equality)
    pub colinearity_tolerance: f64,
    /// Refuse to write output when the coils are not colinear
    pub require_colinear: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            colinearity_tolerance: 0.0,
            require_colinear: false,
        }
    }
}

/// Summary of a completed conversion
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    pub generated: String,
    pub input: PathBuf,
    pub output: PathBuf,
    pub coil_count: usize,
    pub colinear: bool,
    pub colinearity_tolerance: f64,
    pub coils: Vec<TargetCoil>,
}

/// Main entry point: convert the magfield3 file at `input` into a new magfield2 file at `output`
///
/// Fails before touching the file system if `input` is missing or `output`
/// already exists. The output is only created once every coil has converted.
pub fn convert_file(
    input: &Path,
    output: &Path,
    config: &ConversionConfig,
) -> Result<ConversionReport, CoilError> {
    if !input.exists() {
        return Err(CoilError::InputNotFound(input.to_path_buf()));
    }
    if output.exists() {
        return Err(CoilError::OutputExists(output.to_path_buf()));
    }

    let coils = read_coils(input)?;

    let colinear = is_colinear_within(&coils, config.colinearity_tolerance);
    if !colinear {
        if config.require_colinear {
            return Err(CoilError::NotColinear);
        }
        tracing::warn!(
            "Coils in {:?} are not colinear; magfield2 output assumes a single axis",
            input
        );
    }

    let targets = convert(&coils);
    create_coils(output, &targets).map_err(|e| match e.kind() {
        std::io::ErrorKind::AlreadyExists => CoilError::OutputExists(output.to_path_buf()),
        _ => CoilError::Io(e),
    })?;

    Ok(ConversionReport {
        generated: chrono::Utc::now().to_rfc3339(),
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        coil_count: targets.len(),
        colinear,
        colinearity_tolerance: config.colinearity_tolerance,
        coils: targets,
    })
}
