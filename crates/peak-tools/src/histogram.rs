//! Binned data access with ROOT-style bin numbering
//!
//! Bin 0 is the underflow bin, bins `1..=n` are in range and bin `n + 1` is the
//! overflow bin.

use serde::{Deserialize, Serialize};

use crate::error::PeakError;

/// Read access to a one-dimensional binned histogram
pub trait BinnedData {
    /// Number of in-range bins
    fn bin_count(&self) -> usize;

    fn bin_low_edge(&self, bin: usize) -> f64;

    fn bin_width(&self, bin: usize) -> f64;

    /// Content of `bin`; under/overflow bins may report zero
    fn bin_content(&self, bin: usize) -> f64;

    /// Bin holding axis value `x` (0 below range, `bin_count() + 1` above)
    fn find_bin(&self, x: f64) -> usize;

    fn bin_center(&self, bin: usize) -> f64 {
        self.bin_low_edge(bin) + 0.5 * self.bin_width(bin)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawHistogram {
    low: f64,
    high: f64,
    contents: Vec<f64>,
}

/// Uniformly binned histogram over `[low, high)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHistogram")]
pub struct Histogram1D {
    low: f64,
    high: f64,
    contents: Vec<f64>,
}

impl TryFrom<RawHistogram> for Histogram1D {
    type Error = PeakError;

    fn try_from(raw: RawHistogram) -> Result<Self, Self::Error> {
        Self::from_contents(raw.low, raw.high, raw.contents)
    }
}

impl Histogram1D {
    /// Empty histogram with `bins` uniform bins
    pub fn new(bins: usize, low: f64, high: f64) -> Result<Self, PeakError> {
        Self::from_contents(low, high, vec![0.0; bins])
    }

    /// Histogram over `[low, high)` with the given in-range bin contents
    pub fn from_contents(low: f64, high: f64, contents: Vec<f64>) -> Result<Self, PeakError> {
        if contents.is_empty() {
            return Err(PeakError::InvalidHistogram("no bins".to_string()));
        }
        if !(low.is_finite() && high.is_finite() && low < high) {
            return Err(PeakError::InvalidHistogram(format!(
                "axis [{}, {}) is not a finite increasing interval",
                low, high
            )));
        }
        Ok(Self { low, high, contents })
    }

    /// Add `weight` to the bin containing `x`; values outside the axis are dropped
    pub fn fill(&mut self, x: f64, weight: f64) {
        let bin = self.find_bin(x);
        if let Some(content) = bin.checked_sub(1).and_then(|i| self.contents.get_mut(i)) {
            *content += weight;
        }
    }

    pub fn contents(&self) -> &[f64] {
        &self.contents
    }

    fn width(&self) -> f64 {
        (self.high - self.low) / self.contents.len() as f64
    }
}

impl BinnedData for Histogram1D {
    fn bin_count(&self) -> usize {
        self.contents.len()
    }

    fn bin_low_edge(&self, bin: usize) -> f64 {
        self.low + (bin as f64 - 1.0) * self.width()
    }

    fn bin_width(&self, _bin: usize) -> f64 {
        self.width()
    }

    fn bin_content(&self, bin: usize) -> f64 {
        bin.checked_sub(1)
            .and_then(|i| self.contents.get(i))
            .copied()
            .unwrap_or(0.0)
    }

    fn find_bin(&self, x: f64) -> usize {
        let n = self.contents.len();
        if x.is_nan() || x < self.low {
            0
        } else if x >= self.high {
            n + 1
        } else {
            // Rounding near `high` can land one past the last bin
            (((x - self.low) / self.width()) as usize + 1).min(n)
        }
    }
}
