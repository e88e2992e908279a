//! Finite-difference gradient descent.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{evaluate_only, OptimizationResult, Optimizer};

/// Plain gradient descent with central-difference gradients.
///
/// Converges when the gradient's largest component falls below `gtol`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientDescent {
    pub maxiter: usize,
    pub learning_rate: f64,
    pub gtol: f64,
    pub epsilon: f64,
}

impl Default for GradientDescent {
    fn default() -> Self {
        Self {
            maxiter: 500,
            learning_rate: 0.1,
            gtol: 1e-6,
            epsilon: 1e-6,
        }
    }
}

impl GradientDescent {
    /// Create a new optimizer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum iterations.
    pub fn with_maxiter(mut self, maxiter: usize) -> Self {
        self.maxiter = maxiter;
        self
    }

    /// Set learning rate.
    pub fn with_learning_rate(mut self, lr: f64) -> Self {
        self.learning_rate = lr;
        self
    }
}

impl Optimizer for GradientDescent {
    fn name(&self) -> &'static str {
        "gradient_descent"
    }

    fn minimize(
        &self,
        objective: &mut dyn FnMut(&[f64]) -> f64,
        initial_params: &[f64],
    ) -> OptimizationResult {
        if initial_params.is_empty() {
            return evaluate_only(objective, initial_params);
        }

        let mut x = initial_params.to_vec();
        let mut value = objective(&x);
        let mut best_params = x.clone();
        let mut best_value = value;
        let mut evaluations = 1;
        let mut history = Vec::new();
        let mut converged = false;
        let mut iterations = 0;

        while iterations < self.maxiter {
            let mut gradient = vec![0.0; x.len()];
            let mut shifted = x.clone();
            for (i, g) in gradient.iter_mut().enumerate() {
                shifted[i] = x[i] + self.epsilon;
                let forward = objective(&shifted);
                shifted[i] = x[i] - self.epsilon;
                let backward = objective(&shifted);
                shifted[i] = x[i];
                *g = (forward - backward) / (2.0 * self.epsilon);
            }
            evaluations += 2 * x.len();

            if gradient.iter().all(|g| g.abs() < self.gtol) {
                converged = true;
                break;
            }

            for (xi, g) in x.iter_mut().zip(&gradient) {
                *xi -= self.learning_rate * g;
            }
            value = objective(&x);
            evaluations += 1;
            iterations += 1;

            if value < best_value {
                best_value = value;
                best_params.clone_from(&x);
            }
            history.push(best_value);
        }

        debug!(iterations, evaluations, converged, best = best_value, last = value, "gradient descent finished");

        OptimizationResult {
            optimal_params: best_params,
            optimal_value: best_value,
            num_iterations: iterations,
            num_evaluations: evaluations,
            history,
            converged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_quadratic() {
        let mut f = |x: &[f64]| (x[0] - 1.0).powi(2) + 2.0 * (x[1] + 1.0).powi(2);
        let result = GradientDescent::new().minimize(&mut f, &[0.0, 0.0]);
        assert!(result.converged);
        assert_abs_diff_eq!(result.optimal_params[0], 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(result.optimal_params[1], -1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_stationary_start_converges_immediately() {
        let mut f = |x: &[f64]| x[0] * x[0];
        let result = GradientDescent::new().minimize(&mut f, &[0.0]);
        assert!(result.converged);
        assert_eq!(result.num_iterations, 0);
        assert_eq!(result.num_evaluations, 3);
    }

    #[test]
    fn test_budget_exhaustion() {
        let mut f = |x: &[f64]| (x[0] - 10.0).powi(2);
        let result = GradientDescent::new()
            .with_maxiter(3)
            .with_learning_rate(0.01)
            .minimize(&mut f, &[0.0]);
        assert!(!result.converged);
        assert_eq!(result.num_iterations, 3);
        assert_eq!(result.history.len(), 3);
    }
}
