//! Nelder–Mead downhill simplex.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{evaluate_only, OptimizationResult, Optimizer};

const REFLECT: f64 = 1.0;
const EXPAND: f64 = 2.0;
const CONTRACT: f64 = 0.5;
const SHRINK: f64 = 0.5;

/// Relative step for nonzero initial coordinates.
const NONZERO_DELTA: f64 = 0.05;
/// Absolute step for zero initial coordinates.
const ZERO_DELTA: f64 = 0.00025;

/// Derivative-free simplex optimizer.
///
/// Stops when every simplex vertex lies within `xatol` of the best vertex
/// (per coordinate) and every vertex value within `fatol` of the best value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NelderMead {
    pub maxiter: usize,
    pub maxfev: usize,
    pub xatol: f64,
    pub fatol: f64,
}

impl Default for NelderMead {
    fn default() -> Self {
        Self {
            maxiter: 1000,
            maxfev: 2000,
            xatol: 1e-6,
            fatol: 1e-10,
        }
    }
}

impl NelderMead {
    /// Create a new optimizer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum iterations.
    pub fn with_maxiter(mut self, maxiter: usize) -> Self {
        self.maxiter = maxiter;
        self
    }

    /// Set the evaluation budget.
    pub fn with_maxfev(mut self, maxfev: usize) -> Self {
        self.maxfev = maxfev;
        self
    }

    /// Set the parameter and value tolerances.
    pub fn with_tolerances(mut self, xatol: f64, fatol: f64) -> Self {
        self.xatol = xatol;
        self.fatol = fatol;
        self
    }
}

impl Optimizer for NelderMead {
    fn name(&self) -> &'static str {
        "nelder_mead"
    }

    fn minimize(
        &self,
        objective: &mut dyn FnMut(&[f64]) -> f64,
        initial_params: &[f64],
    ) -> OptimizationResult {
        let n = initial_params.len();
        if n == 0 {
            return evaluate_only(objective, initial_params);
        }

        let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(n + 1);
        simplex.push(initial_params.to_vec());
        for k in 0..n {
            let mut vertex = initial_params.to_vec();
            vertex[k] = if vertex[k] != 0.0 {
                (1.0 + NONZERO_DELTA) * vertex[k]
            } else {
                ZERO_DELTA
            };
            simplex.push(vertex);
        }
        let mut values: Vec<f64> = simplex.iter().map(|v| objective(v)).collect();
        let mut evaluations = n + 1;
        let mut iterations = 0;
        let mut history = Vec::new();
        let mut converged = false;

        let mut eval = |x: &[f64], evaluations: &mut usize| {
            *evaluations += 1;
            objective(x)
        };

        while evaluations < self.maxfev && iterations < self.maxiter {
            sort_simplex(&mut simplex, &mut values);

            let x_spread = simplex[1..]
                .iter()
                .flat_map(|v| v.iter().zip(&simplex[0]).map(|(a, b)| (a - b).abs()))
                .fold(0.0, f64::max);
            let f_spread = values[1..]
                .iter()
                .map(|f| (f - values[0]).abs())
                .fold(0.0, f64::max);
            if x_spread <= self.xatol && f_spread <= self.fatol {
                converged = true;
                break;
            }

            let centroid: Vec<f64> = (0..n)
                .map(|j| simplex[..n].iter().map(|v| v[j]).sum::<f64>() / n as f64)
                .collect();
            let along = |t: f64| -> Vec<f64> {
                centroid
                    .iter()
                    .zip(&simplex[n])
                    .map(|(c, w)| (1.0 + t) * c - t * w)
                    .collect()
            };

            let xr = along(REFLECT);
            let fr = eval(&xr, &mut evaluations);
            let mut shrink = false;

            if fr < values[0] {
                let xe = along(REFLECT * EXPAND);
                let fe = eval(&xe, &mut evaluations);
                if fe < fr {
                    simplex[n] = xe;
                    values[n] = fe;
                } else {
                    simplex[n] = xr;
                    values[n] = fr;
                }
            } else if fr < values[n - 1] {
                simplex[n] = xr;
                values[n] = fr;
            } else if fr < values[n] {
                let xc = along(CONTRACT * REFLECT);
                let fc = eval(&xc, &mut evaluations);
                if fc <= fr {
                    simplex[n] = xc;
                    values[n] = fc;
                } else {
                    shrink = true;
                }
            } else {
                let xcc = along(-CONTRACT);
                let fcc = eval(&xcc, &mut evaluations);
                if fcc < values[n] {
                    simplex[n] = xcc;
                    values[n] = fcc;
                } else {
                    shrink = true;
                }
            }

            if shrink {
                for i in 1..=n {
                    let shrunk: Vec<f64> = simplex[i]
                        .iter()
                        .zip(&simplex[0])
                        .map(|(x, b)| b + SHRINK * (x - b))
                        .collect();
                    values[i] = eval(&shrunk, &mut evaluations);
                    simplex[i] = shrunk;
                }
            }

            iterations += 1;
            history.push(values.iter().copied().fold(f64::INFINITY, f64::min));
            if iterations % 50 == 0 {
                debug!(iterations, evaluations, best = history[iterations - 1], "nelder-mead progress");
            }
        }

        sort_simplex(&mut simplex, &mut values);
        debug!(iterations, evaluations, converged, best = values[0], "nelder-mead finished");

        OptimizationResult {
            optimal_params: simplex.swap_remove(0),
            optimal_value: values[0],
            num_iterations: iterations,
            num_evaluations: evaluations,
            history,
            converged,
        }
    }
}

fn sort_simplex(simplex: &mut Vec<Vec<f64>>, values: &mut Vec<f64>) {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
    *simplex = order.iter().map(|&i| simplex[i].clone()).collect();
    *values = order.iter().map(|&i| values[i]).collect();
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_quadratic() {
        let mut f = |x: &[f64]| (x[0] - 1.0).powi(2) + (x[1] + 2.0).powi(2);
        let result = NelderMead::new().minimize(&mut f, &[0.0, 0.0]);
        assert!(result.converged);
        assert_abs_diff_eq!(result.optimal_params[0], 1.0, epsilon = 1e-4);
        assert_abs_diff_eq!(result.optimal_params[1], -2.0, epsilon = 1e-4);
        assert!(result.optimal_value < 1e-8);
    }

    #[test]
    fn test_starts_at_maximum() {
        // cos(a + b) has zero gradient at the origin
        let mut f = |x: &[f64]| (x[0] + x[1]).cos();
        let result = NelderMead::new().minimize(&mut f, &[0.0, 0.0]);
        assert!(result.converged);
        assert_abs_diff_eq!(result.optimal_value, -1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_budget_exhaustion_reports_not_converged() {
        let mut evaluations = 0;
        let mut f = |x: &[f64]| {
            evaluations += 1;
            x.iter().map(|v| (v - 3.0).powi(2)).sum::<f64>()
        };
        let result = NelderMead::new().with_maxiter(5).minimize(&mut f, &[0.0; 3]);
        assert!(!result.converged);
        assert_eq!(result.num_iterations, 5);
        assert_eq!(result.num_evaluations, evaluations);
        assert_eq!(result.history.len(), 5);
    }

    #[test]
    fn test_history_is_monotone() {
        let mut f = |x: &[f64]| (x[0] - 0.5).powi(2) + 10.0 * (x[1] - x[0] * x[0]).powi(2);
        let result = NelderMead::new().with_maxiter(200).minimize(&mut f, &[-1.0, 1.0]);
        assert!(result.history.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_maxfev_respected() {
        let mut f = |x: &[f64]| x[0].sin() + x[1].cos();
        let result = NelderMead::new().with_maxfev(20).minimize(&mut f, &[1.0, 1.0]);
        // one iteration may overshoot by at most a full shrink
        assert!(result.num_evaluations <= 20 + 2 + 2);
    }

    #[test]
    fn test_zero_dimensional() {
        let mut f = |_: &[f64]| 4.2;
        let result = NelderMead::new().minimize(&mut f, &[]);
        assert!(result.converged);
        assert_eq!(result.optimal_value, 4.2);
        assert_eq!(result.num_evaluations, 1);
    }
}
