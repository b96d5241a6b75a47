//! magfield3 input parsing

use std::fs;
use std::path::Path;

use crate::coil::{CoilSet, SourceCoil, SOURCE_COLUMNS};
use crate::error::CoilError;

/// Read a magfield3 coil table from disk
pub fn read_coils(path: &Path) -> Result<CoilSet, CoilError> {
    let text = fs::read_to_string(path)?;
    let coils = parse_coils(&text)?;
    tracing::debug!("Read {} coils from {:?}", coils.len(), path);
    Ok(coils)
}

/// Parse magfield3 text: one header line, then one coil per non-blank line
///
/// Every token on a data line must parse as `f64`, including trailing columns
/// past the ninth, which are otherwise ignored.
pub fn parse_coils(text: &str) -> Result<CoilSet, CoilError> {
    let mut coils = Vec::new();

    // Header is skipped without inspection
    for (idx, line) in text.lines().enumerate().skip(1) {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        let columns = line
            .split_whitespace()
            .map(|token| {
                token.parse::<f64>().map_err(|_| CoilError::Parse {
                    line: line_no,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let coil = SourceCoil::from_columns(&columns).ok_or(CoilError::MissingFields {
            line: line_no,
            found: columns.len(),
        })?;
        coils.push(coil);
    }

    Ok(coils)
}
