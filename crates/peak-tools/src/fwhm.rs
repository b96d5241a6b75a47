//! Literal full width at half maximum
//!
//! The peak is taken as the highest bin in the interval. Moving out from it,
//! the first bin below half maximum on each side is found, and the crossing is
//! placed by linear interpolation between that bin's center and its neighbour
//! toward the peak. No smoothing is done, so noisy peaks give noisy widths.

use crate::error::{PeakError, Side};
use crate::histogram::BinnedData;
use crate::range::FitRange;

/// FWHM of the highest peak within `range`, in x-axis units
pub fn literal_fwhm<D>(data: &D, range: &FitRange) -> Result<f64, PeakError>
where
    D: BinnedData + ?Sized,
{
    let (low, high) = range.to_bins(data)?;
    let values: Vec<f64> = (low..=high).map(|bin| data.bin_content(bin)).collect();

    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let peak = values
        .iter()
        .position(|&v| v == max)
        .ok_or(PeakError::EmptyInterval)?;
    let half = max / 2.0;

    let below = (0..peak)
        .rev()
        .find(|&i| values[i] < half)
        .ok_or(PeakError::NoHalfMaxCrossing(Side::Lower))?;
    let above = (peak + 1..values.len())
        .find(|&i| values[i] < half)
        .ok_or(PeakError::NoHalfMaxCrossing(Side::Upper))?;

    let x_lower = crossing(data, half, low + below, low + below + 1);
    let x_upper = crossing(data, half, low + above, low + above - 1);
    tracing::debug!("Half maximum {} crossed at {} and {}", half, x_lower, x_upper);

    Ok(x_upper - x_lower)
}

/// Where the line through the centers of `outside` and `inside` reaches `level`
fn crossing<D: BinnedData + ?Sized>(data: &D, level: f64, outside: usize, inside: usize) -> f64 {
    let (x1, y1) = (data.bin_center(outside), data.bin_content(outside));
    let (x2, y2) = (data.bin_center(inside), data.bin_content(inside));
    (level - y1) * (x2 - x1) / (y2 - y1) + x1
}
