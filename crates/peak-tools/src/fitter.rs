//! Bounded nonlinear least-squares fitting
//!
//! Peak fits only talk to the [`CurveFitter`] trait, so the numerical engine can
//! be swapped out. [`SimplexFitter`] is the bundled implementation: argmin's
//! Nelder-Mead minimises chi-square, and parameter errors come from the
//! curvature matrix at the minimum.

use argmin::core::{CostFunction, Executor, State};
use argmin::solver::neldermead::NelderMead;
use nalgebra::DMatrix;

use crate::error::PeakError;

/// One weighted measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
    /// Uncertainty on `y`; must be non-zero
    pub sigma: f64,
}

/// A fit parameter with its starting value and bounds
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub value: f64,
    pub lower: f64,
    pub upper: f64,
    pub fixed: bool,
}

impl Parameter {
    pub fn bounded(name: &str, value: f64, lower: f64, upper: f64) -> Self {
        Self {
            name: name.to_string(),
            value,
            lower,
            upper,
            fixed: false,
        }
    }

    pub fn fixed(name: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            value,
            lower: value,
            upper: value,
            fixed: true,
        }
    }
}

/// A model `y = f(x; params)`
pub trait ModelFunction {
    fn evaluate(&self, x: f64, params: &[f64]) -> f64;
}

impl<F> ModelFunction for F
where
    F: Fn(f64, &[f64]) -> f64,
{
    fn evaluate(&self, x: f64, params: &[f64]) -> f64 {
        self(x, params)
    }
}

/// Fitted parameter values, in the order they were passed in
#[derive(Debug, Clone, PartialEq)]
pub struct FitOutcome {
    pub values: Vec<f64>,
    /// One-sigma uncertainties; zero for fixed parameters, NaN when the
    /// curvature matrix could not be inverted
    pub errors: Vec<f64>,
    pub chi_square: f64,
    pub ndf: usize,
    pub iterations: u64,
}

/// Capability to fit a model to weighted points within parameter bounds
pub trait CurveFitter {
    fn fit(
        &self,
        model: &dyn ModelFunction,
        points: &[DataPoint],
        params: &[Parameter],
    ) -> Result<FitOutcome, PeakError>;
}

/// Iteration control for [`SimplexFitter`]
#[derive(Debug, Clone)]
pub struct FitterSettings {
    pub max_iterations: u64,
    /// Stop once the simplex chi-square values spread less than this
    pub tolerance: f64,
}

impl Default for FitterSettings {
    fn default() -> Self {
        Self {
            max_iterations: 5000,
            tolerance: 1e-12,
        }
    }
}

/// Nelder-Mead simplex fitter with bounds enforced by projection
#[derive(Debug, Clone, Default)]
pub struct SimplexFitter {
    pub settings: FitterSettings,
}

impl SimplexFitter {
    pub fn new(settings: FitterSettings) -> Self {
        Self { settings }
    }
}

/// Chi-square over the free parameters, with the rest held at their values
struct ChiSquare<'a> {
    model: &'a dyn ModelFunction,
    points: &'a [DataPoint],
    params: &'a [Parameter],
    free: &'a [usize],
}

impl ChiSquare<'_> {
    /// Full parameter vector with free values projected into their bounds
    fn expand(&self, free_values: &[f64]) -> Vec<f64> {
        let mut values: Vec<f64> = self.params.iter().map(|p| p.value).collect();
        for (&i, &v) in self.free.iter().zip(free_values) {
            values[i] = v.clamp(self.params[i].lower, self.params[i].upper);
        }
        values
    }
}

impl CostFunction for ChiSquare<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, param: &Self::Param) -> Result<Self::Output, argmin_math::Error> {
        let chi2 = chi_square(self.model, self.points, &self.expand(param));
        // Keep the simplex ordering well defined
        Ok(if chi2.is_finite() { chi2 } else { f64::MAX })
    }
}

impl CurveFitter for SimplexFitter {
    fn fit(
        &self,
        model: &dyn ModelFunction,
        points: &[DataPoint],
        params: &[Parameter],
    ) -> Result<FitOutcome, PeakError> {
        for p in params {
            if !(p.lower <= p.upper) {
                return Err(PeakError::InvalidBounds(p.name.clone()));
            }
        }

        let free: Vec<usize> = params
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.fixed)
            .map(|(i, _)| i)
            .collect();
        if points.len() <= free.len() {
            return Err(PeakError::TooFewPoints {
                points: points.len(),
                parameters: free.len(),
            });
        }

        let start: Vec<f64> = free
            .iter()
            .map(|&i| params[i].value.clamp(params[i].lower, params[i].upper))
            .collect();
        let problem = ChiSquare {
            model,
            points,
            params,
            free: &free,
        };
        if !chi_square(model, points, &problem.expand(&start)).is_finite() {
            return Err(PeakError::FitFailed(
                "model is not finite at the starting values".to_string(),
            ));
        }

        let (values, iterations) = if free.is_empty() {
            (problem.expand(&start), 0)
        } else {
            let solver = NelderMead::new(initial_simplex(&start, params, &free))
                .with_sd_tolerance(self.settings.tolerance)
                .map_err(|e| PeakError::FitFailed(e.to_string()))?;
            let res = Executor::new(problem, solver)
                .configure(|state| {
                    state
                        .param(start.clone())
                        .max_iters(self.settings.max_iterations)
                })
                .run()
                .map_err(|e| PeakError::FitFailed(e.to_string()))?;

            let state = res.state();
            let best = state
                .get_best_param()
                .ok_or_else(|| PeakError::FitFailed("no best parameters".to_string()))?;
            let problem = ChiSquare {
                model,
                points,
                params,
                free: &free,
            };
            (problem.expand(best), state.get_iter())
        };

        let chi2 = chi_square(model, points, &values);
        tracing::debug!("Fit finished after {} iterations, chi2 = {}", iterations, chi2);

        let jacobian = weighted_jacobian(model, points, &values, &free);
        let covariance = (jacobian.transpose() * &jacobian).try_inverse();
        if covariance.is_none() {
            tracing::warn!("Curvature matrix is singular; parameter errors unavailable");
        }

        let mut errors = vec![0.0; params.len()];
        for (k, &i) in free.iter().enumerate() {
            errors[i] = covariance
                .as_ref()
                .map_or(f64::NAN, |cov| cov[(k, k)].max(0.0).sqrt());
        }

        Ok(FitOutcome {
            values,
            errors,
            chi_square: chi2,
            ndf: points.len() - free.len(),
            iterations,
        })
    }
}

/// Start vertex plus one vertex per free parameter, stepped 10% inside the bounds
fn initial_simplex(start: &[f64], params: &[Parameter], free: &[usize]) -> Vec<Vec<f64>> {
    let mut simplex = vec![start.to_vec()];
    for (k, &i) in free.iter().enumerate() {
        let p = &params[i];
        let step = if start[k] != 0.0 { 0.1 * start[k].abs() } else { 0.1 };
        let mut vertex = start.to_vec();
        vertex[k] = if start[k] + step <= p.upper {
            start[k] + step
        } else {
            start[k] - step
        };
        simplex.push(vertex);
    }
    simplex
}

fn chi_square(model: &dyn ModelFunction, points: &[DataPoint], values: &[f64]) -> f64 {
    points
        .iter()
        .map(|p| {
            let r = (p.y - model.evaluate(p.x, values)) / p.sigma;
            r * r
        })
        .sum()
}

/// Central-difference Jacobian of the free parameters, each row divided by sigma
fn weighted_jacobian(
    model: &dyn ModelFunction,
    points: &[DataPoint],
    values: &[f64],
    free: &[usize],
) -> DMatrix<f64> {
    let mut jacobian = DMatrix::zeros(points.len(), free.len());
    let mut shifted = values.to_vec();
    for (k, &i) in free.iter().enumerate() {
        let h = 1e-7 * values[i].abs().max(1.0);
        for (row, p) in points.iter().enumerate() {
            shifted[i] = values[i] + h;
            let up = model.evaluate(p.x, &shifted);
            shifted[i] = values[i] - h;
            let down = model.evaluate(p.x, &shifted);
            jacobian[(row, k)] = (up - down) / (2.0 * h) / p.sigma;
        }
        shifted[i] = values[i];
    }
    jacobian
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(x: f64, p: &[f64]) -> f64 {
        p[0] + p[1] * x
    }

    fn points_from(f: impl Fn(f64) -> f64) -> Vec<DataPoint> {
        (0..20)
            .map(|i| {
                let x = i as f64 * 0.5;
                DataPoint { x, y: f(x), sigma: 1.0 }
            })
            .collect()
    }

    #[test]
    fn test_fits_straight_line() {
        let points = points_from(|x| 3.0 - 0.5 * x);
        let params = [
            Parameter::bounded("offset", 0.0, -10.0, 10.0),
            Parameter::bounded("slope", 1.0, -10.0, 10.0),
        ];
        let outcome = SimplexFitter::default().fit(&line, &points, &params).unwrap();
        assert!((outcome.values[0] - 3.0).abs() < 1e-4, "offset = {}", outcome.values[0]);
        assert!((outcome.values[1] + 0.5).abs() < 1e-4, "slope = {}", outcome.values[1]);
        assert_eq!(outcome.ndf, 18);
        assert!(outcome.errors.iter().all(|e| e.is_finite() && *e > 0.0));
    }

    #[test]
    fn test_line_errors_match_closed_form() {
        // Unit weights: var(slope) = 1 / Σ(x - x̄)²
        let points = points_from(|x| 1.0 + 2.0 * x);
        let params = [
            Parameter::bounded("offset", 0.5, -10.0, 10.0),
            Parameter::bounded("slope", 1.5, -10.0, 10.0),
        ];
        let outcome = SimplexFitter::default().fit(&line, &points, &params).unwrap();
        let mean = points.iter().map(|p| p.x).sum::<f64>() / points.len() as f64;
        let sxx: f64 = points.iter().map(|p| (p.x - mean).powi(2)).sum();
        assert!((outcome.errors[1] - sxx.recip().sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_bounds_are_respected() {
        let points = points_from(|x| 3.0 - 0.5 * x);
        let params = [
            Parameter::bounded("offset", 0.0, -10.0, 10.0),
            Parameter::bounded("slope", 1.0, 0.0, 10.0),
        ];
        let outcome = SimplexFitter::default().fit(&line, &points, &params).unwrap();
        assert!(outcome.values[1] >= 0.0 && outcome.values[1] <= 10.0);
    }

    #[test]
    fn test_fixed_parameter_is_untouched() {
        let points = points_from(|x| 3.0 - 0.5 * x);
        let params = [
            Parameter::fixed("offset", 3.0),
            Parameter::bounded("slope", 1.0, -10.0, 10.0),
        ];
        let outcome = SimplexFitter::default().fit(&line, &points, &params).unwrap();
        assert_eq!(outcome.values[0], 3.0);
        assert_eq!(outcome.errors[0], 0.0);
        assert_eq!(outcome.ndf, 19);
        assert!((outcome.values[1] + 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_initial_simplex_stays_inside_upper_bound() {
        let params = [Parameter::bounded("a", 1.0, 0.0, 1.0)];
        let simplex = initial_simplex(&[1.0], &params, &[0]);
        assert_eq!(simplex, vec![vec![1.0], vec![0.9]]);
    }

    #[test]
    fn test_rejects_reversed_bounds() {
        let points = points_from(|x| x);
        let params = [Parameter::bounded("slope", 1.0, 2.0, -2.0)];
        let err = SimplexFitter::default().fit(&line, &points, &params).unwrap_err();
        assert!(matches!(err, PeakError::InvalidBounds(name) if name == "slope"));
    }

    #[test]
    fn test_too_few_points() {
        let points = [DataPoint { x: 0.0, y: 1.0, sigma: 1.0 }];
        let params = [
            Parameter::bounded("a", 0.0, -1.0, 1.0),
            Parameter::bounded("b", 0.0, -1.0, 1.0),
        ];
        let err = SimplexFitter::default().fit(&line, &points, &params).unwrap_err();
        assert!(matches!(err, PeakError::TooFewPoints { points: 1, parameters: 2 }));
    }
}
