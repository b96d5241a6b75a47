//! Peak width measurements on synthetic histograms.

use peak_tools::{
    fit_lorentzian, literal_fwhm, lorentzian, BinnedData, FitRange, Histogram1D,
    LorentzianBounds, PeakError, SimplexFitter,
};
use pretty_assertions::assert_eq;
use std::fs;

/// 100 bins over [0, 10) holding a Lorentzian sampled at bin centers
fn lorentzian_histogram(area: f64, fwhm: f64, center: f64) -> Histogram1D {
    let mut hist = Histogram1D::new(100, 0.0, 10.0).unwrap();
    for bin in 1..=hist.bin_count() {
        let x = hist.bin_center(bin);
        hist.fill(x, lorentzian(x, area, fwhm, center));
    }
    hist
}

#[test]
fn lorentzian_fit_recovers_parameters() {
    let hist = lorentzian_histogram(1000.0, 2.0, 5.0);
    let bounds = LorentzianBounds {
        start_area: Some(800.0),
        start_fwhm: Some(1.5),
        ..LorentzianBounds::default()
    };

    let fitter = SimplexFitter::default();
    let fit = fit_lorentzian(&hist, &FitRange::axis(2.0, 8.0), &bounds, &fitter).unwrap();

    assert!((fit.area - 1000.0).abs() < 1.0, "area = {}", fit.area);
    assert!((fit.fwhm - 2.0).abs() < 1e-3, "fwhm = {}", fit.fwhm);
    assert!((fit.center - 5.0).abs() < 1e-3, "center = {}", fit.center);
    assert!(fit.chi_square < 1e-3);
    assert_eq!(fit.ndf, 60 - 3);
    assert!(fit.area_error.is_finite() && fit.area_error > 0.0);
}

#[test]
fn lorentzian_fit_center_stays_in_interval() {
    let hist = lorentzian_histogram(1000.0, 2.0, 5.0);
    let bounds = LorentzianBounds {
        start_area: Some(1000.0),
        start_fwhm: Some(2.0),
        ..LorentzianBounds::default()
    };

    // Peak lies above the interval
    let fitter = SimplexFitter::default();
    let fit = fit_lorentzian(&hist, &FitRange::axis(1.0, 3.0), &bounds, &fitter).unwrap();
    assert!(fit.center >= 1.0 && fit.center <= 3.0);
}

#[test]
fn literal_fwhm_of_sampled_lorentzian() {
    let hist = lorentzian_histogram(1000.0, 2.0, 5.05);
    let fwhm = literal_fwhm(&hist, &FitRange::axis(1.0, 9.0)).unwrap();
    // Linear interpolation on 0.1-wide bins
    assert!((fwhm - 2.0).abs() < 0.01, "fwhm = {}", fwhm);
}

#[test]
fn literal_fwhm_needs_both_crossings() {
    let hist = lorentzian_histogram(1000.0, 2.0, 5.05);
    let err = literal_fwhm(&hist, &FitRange::axis(4.5, 9.0)).unwrap_err();
    assert!(matches!(err, PeakError::NoHalfMaxCrossing(_)));
}

#[test]
fn histogram_round_trips_through_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hist.json");
    let hist = Histogram1D::from_contents(-1.0, 1.0, vec![1.0, 5.0, 2.0, 0.0]).unwrap();
    fs::write(&path, serde_json::to_string(&hist).unwrap()).unwrap();

    let loaded: Histogram1D = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(loaded, hist);
    assert_eq!(loaded.bin_center(2), -0.25);
}
