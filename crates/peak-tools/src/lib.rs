//! peak-tools: Peak width measurements on binned histograms
//!
//! This crate provides:
//! - A [`BinnedData`] view of histograms with ROOT-style bin numbering
//! - A literal full-width-at-half-maximum measurement
//! - A single-Lorentzian fit returning area, FWHM and center with errors
//!
//! The Lorentzian fit goes through the [`CurveFitter`] trait; the bundled
//! [`SimplexFitter`] (argmin Nelder-Mead) is used unless another one is supplied.

pub mod error;
pub mod fitter;
pub mod fwhm;
pub mod histogram;
pub mod lorentzian;
pub mod range;

pub use error::{PeakError, Side};
pub use fitter::{
    CurveFitter, DataPoint, FitOutcome, FitterSettings, ModelFunction, Parameter, SimplexFitter,
};
pub use fwhm::literal_fwhm;
pub use histogram::{BinnedData, Histogram1D};
pub use lorentzian::{fit_lorentzian, lorentzian, LorentzianBounds, LorentzianFit};
pub use range::{FitRange, RangeUnits};
