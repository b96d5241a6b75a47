//! Single Lorentzian (Cauchy) peak fit over a histogram interval

use std::collections::BTreeMap;
use std::f64::consts::PI;

use serde::Serialize;

use crate::error::PeakError;
use crate::fitter::{CurveFitter, DataPoint, Parameter};
use crate::histogram::BinnedData;
use crate::range::FitRange;

/// `(area / π) · (fwhm / 2) / ((x − center)² + (fwhm / 2)²)`
pub fn lorentzian(x: f64, area: f64, fwhm: f64, center: f64) -> f64 {
    let half = 0.5 * fwhm;
    (area / PI) * half / ((x - center).powi(2) + half * half)
}

fn model(x: f64, params: &[f64]) -> f64 {
    lorentzian(x, params[0], params[1], params[2])
}

/// Limits and starting guesses for the area and FWHM parameters
///
/// A missing or zero start value defaults to the midpoint of its limits.
#[derive(Debug, Clone)]
pub struct LorentzianBounds {
    pub min_area: f64,
    pub max_area: f64,
    pub start_area: Option<f64>,
    pub min_fwhm: f64,
    pub max_fwhm: f64,
    pub start_fwhm: Option<f64>,
}

impl Default for LorentzianBounds {
    fn default() -> Self {
        Self {
            min_area: 0.0,
            max_area: 1e6,
            start_area: None,
            min_fwhm: 0.0,
            max_fwhm: 1e6,
            start_fwhm: None,
        }
    }
}

/// `start` unless it is unset or zero, otherwise the midpoint of `[min, max]`
fn start_value(start: Option<f64>, min: f64, max: f64) -> f64 {
    start
        .filter(|&v| v != 0.0)
        .unwrap_or((min + max) / 2.0)
}

impl LorentzianBounds {
    /// Fit parameters `[area, fwhm, center]` for an axis interval
    fn parameters(&self, low: f64, high: f64) -> [Parameter; 3] {
        [
            Parameter::bounded(
                "area",
                start_value(self.start_area, self.min_area, self.max_area),
                self.min_area,
                self.max_area,
            ),
            Parameter::bounded(
                "fwhm",
                start_value(self.start_fwhm, self.min_fwhm, self.max_fwhm),
                self.min_fwhm,
                self.max_fwhm,
            ),
            Parameter::bounded("center", (low + high) / 2.0, low, high),
        ]
    }
}

/// Fitted Lorentzian parameters with their uncertainties and fit quality
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LorentzianFit {
    pub area: f64,
    pub area_error: f64,
    pub fwhm: f64,
    pub fwhm_error: f64,
    pub center: f64,
    pub center_error: f64,
    pub chi_square: f64,
    pub ndf: usize,
}

impl LorentzianFit {
    /// Flat name → value map (`area`, `area_error`, …, `ChiSquare`, `NDegreesFreedom`)
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        [
            ("area", self.area),
            ("area_error", self.area_error),
            ("fwhm", self.fwhm),
            ("fwhm_error", self.fwhm_error),
            ("center", self.center),
            ("center_error", self.center_error),
            ("ChiSquare", self.chi_square),
            ("NDegreesFreedom", self.ndf as f64),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }
}

/// Chi-square points for bins whose centers fall in `[low, high]`
///
/// Errors are `√content`; empty bins carry no weight and are skipped.
pub fn fit_points<D: BinnedData + ?Sized>(data: &D, low: f64, high: f64) -> Vec<DataPoint> {
    (1..=data.bin_count())
        .filter_map(|bin| {
            let x = data.bin_center(bin);
            let y = data.bin_content(bin);
            (x >= low && x <= high && y != 0.0).then(|| DataPoint {
                x,
                y,
                sigma: y.abs().sqrt(),
            })
        })
        .collect()
}

/// Fit a single Lorentzian to `data` over `range`
///
/// The peak center is free within the (axis-unit) interval.
pub fn fit_lorentzian<D, F>(
    data: &D,
    range: &FitRange,
    bounds: &LorentzianBounds,
    fitter: &F,
) -> Result<LorentzianFit, PeakError>
where
    D: BinnedData + ?Sized,
    F: CurveFitter + ?Sized,
{
    let (low, high) = range.to_axis(data)?;
    let points = fit_points(data, low, high);
    if points.is_empty() {
        return Err(PeakError::EmptyInterval);
    }

    tracing::debug!(
        "Fitting Lorentzian to {} bins in [{}, {}]",
        points.len(),
        low,
        high
    );
    let outcome = fitter.fit(&model, &points, &bounds.parameters(low, high))?;

    Ok(LorentzianFit {
        area: outcome.values[0],
        area_error: outcome.errors[0],
        fwhm: outcome.values[1],
        fwhm_error: outcome.errors[1],
        center: outcome.values[2],
        center_error: outcome.errors[2],
        chi_square: outcome.chi_square,
        ndf: outcome.ndf,
    })
}
