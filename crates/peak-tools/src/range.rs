//! Peak search and fit intervals

use crate::error::PeakError;
use crate::histogram::BinnedData;

/// Units an interval's limits are given in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeUnits {
    /// x-axis coordinates
    Axis,
    /// Bin numbers
    Bins,
}

/// Closed interval `[low, high]` on a histogram
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitRange {
    pub low: f64,
    pub high: f64,
    pub units: RangeUnits,
}

impl FitRange {
    pub fn axis(low: f64, high: f64) -> Self {
        Self {
            low,
            high,
            units: RangeUnits::Axis,
        }
    }

    pub fn bins(low: usize, high: usize) -> Self {
        Self {
            low: low as f64,
            high: high as f64,
            units: RangeUnits::Bins,
        }
    }

    /// First and last bin numbers of the interval
    pub fn to_bins<D: BinnedData + ?Sized>(&self, data: &D) -> Result<(usize, usize), PeakError> {
        let (low, high) = match self.units {
            RangeUnits::Axis => {
                self.check_finite()?;
                (data.find_bin(self.low), data.find_bin(self.high))
            }
            RangeUnits::Bins => {
                let last = data.bin_count() + 1;
                (bin_number(self.low, last)?, bin_number(self.high, last)?)
            }
        };
        if low > high {
            return Err(PeakError::InvalidRange(format!(
                "bin {} is above bin {}",
                low, high
            )));
        }
        Ok((low, high))
    }

    /// Interval in axis units; bin ranges span from the low bin's lower edge
    /// to the high bin's upper edge
    pub fn to_axis<D: BinnedData + ?Sized>(&self, data: &D) -> Result<(f64, f64), PeakError> {
        let (low, high) = match self.units {
            RangeUnits::Axis => {
                self.check_finite()?;
                (self.low, self.high)
            }
            RangeUnits::Bins => {
                let (lo, hi) = self.to_bins(data)?;
                (data.bin_low_edge(lo), data.bin_low_edge(hi) + data.bin_width(hi))
            }
        };
        if low >= high {
            return Err(PeakError::InvalidRange(format!("[{}, {}] is empty", low, high)));
        }
        Ok((low, high))
    }

    fn check_finite(&self) -> Result<(), PeakError> {
        if self.low.is_finite() && self.high.is_finite() {
            Ok(())
        } else {
            Err(PeakError::InvalidRange(format!(
                "[{}, {}] is not finite",
                self.low, self.high
            )))
        }
    }
}

/// Bin number in `0..=last` (underflow through overflow)
fn bin_number(value: f64, last: usize) -> Result<usize, PeakError> {
    if !(value >= 0.0 && value.fract() == 0.0 && value.is_finite()) {
        return Err(PeakError::InvalidRange(format!("{} is not a bin number", value)));
    }
    if value > last as f64 {
        return Err(PeakError::InvalidRange(format!(
            "bin {} is past the overflow bin {}",
            value, last
        )));
    }
    Ok(value as usize)
}
