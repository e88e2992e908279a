//! Simultaneous perturbation stochastic approximation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{evaluate_only, OptimizationResult, Optimizer};

const ALPHA: f64 = 0.602;
const GAMMA: f64 = 0.101;

/// SPSA with the standard gain sequences
/// `a_k = a / (k + 1 + A)^0.602` and `c_k = c / (k + 1)^0.101`, `A = maxiter / 10`.
///
/// Each iteration spends two evaluations on the gradient estimate and one on
/// the new point. Converges when the largest parameter update falls below `tol`.
/// Suited to noisy objectives such as shot-sampled energies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spsa {
    pub maxiter: usize,
    pub learning_rate: f64,
    pub perturbation: f64,
    pub tol: f64,
    pub seed: Option<u64>,
}

impl Default for Spsa {
    fn default() -> Self {
        Self {
            maxiter: 300,
            learning_rate: 0.2,
            perturbation: 0.1,
            tol: 1e-8,
            seed: None,
        }
    }
}

impl Spsa {
    /// Create a new optimizer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum iterations.
    pub fn with_maxiter(mut self, maxiter: usize) -> Self {
        self.maxiter = maxiter;
        self
    }

    /// Set the perturbation directions' seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the gain constants `a` and `c`.
    pub fn with_gains(mut self, learning_rate: f64, perturbation: f64) -> Self {
        self.learning_rate = learning_rate;
        self.perturbation = perturbation;
        self
    }
}

impl Optimizer for Spsa {
    fn name(&self) -> &'static str {
        "spsa"
    }

    fn minimize(
        &self,
        objective: &mut dyn FnMut(&[f64]) -> f64,
        initial_params: &[f64],
    ) -> OptimizationResult {
        if initial_params.is_empty() {
            return evaluate_only(objective, initial_params);
        }

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let stability = self.maxiter as f64 / 10.0;

        let mut x = initial_params.to_vec();
        let mut best_params = x.clone();
        let mut best_value = objective(&x);
        let mut evaluations = 1;
        let mut history = Vec::with_capacity(self.maxiter);
        let mut converged = false;
        let mut iterations = 0;

        while iterations < self.maxiter {
            let k = iterations as f64;
            let a_k = self.learning_rate / (k + 1.0 + stability).powf(ALPHA);
            let c_k = self.perturbation / (k + 1.0).powf(GAMMA);

            let delta: Vec<f64> = (0..x.len())
                .map(|_| if rng.gen_bool(0.5) { 1.0 } else { -1.0 })
                .collect();
            let plus: Vec<f64> = x.iter().zip(&delta).map(|(xi, d)| xi + c_k * d).collect();
            let minus: Vec<f64> = x.iter().zip(&delta).map(|(xi, d)| xi - c_k * d).collect();
            let slope = (objective(&plus) - objective(&minus)) / (2.0 * c_k);

            let mut max_step: f64 = 0.0;
            for (xi, d) in x.iter_mut().zip(&delta) {
                let step = a_k * slope * d;
                *xi -= step;
                max_step = max_step.max(step.abs());
            }
            let value = objective(&x);
            evaluations += 3;
            iterations += 1;

            if value < best_value {
                best_value = value;
                best_params.clone_from(&x);
            }
            history.push(best_value);

            if max_step < self.tol {
                converged = true;
                break;
            }
        }

        debug!(iterations, evaluations, converged, best = best_value, "spsa finished");

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

    fn quadratic(x: &[f64]) -> f64 {
        (x[0] - 1.0).powi(2) + (x[1] + 0.5).powi(2)
    }

    #[test]
    fn test_quadratic() {
        for seed in 0..5 {
            let result = Spsa::new().with_seed(seed).minimize(&mut quadratic, &[0.0, 0.0]);
            assert!(result.optimal_value < 1e-3, "seed {seed}: {}", result.optimal_value);
            assert_eq!(result.num_evaluations, 1 + 3 * result.num_iterations);
        }
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let a = Spsa::new().with_seed(11).with_maxiter(50).minimize(&mut quadratic, &[0.3, 0.3]);
        let b = Spsa::new().with_seed(11).with_maxiter(50).minimize(&mut quadratic, &[0.3, 0.3]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_budget_exhaustion() {
        let result = Spsa::new().with_seed(1).with_maxiter(10).minimize(&mut quadratic, &[5.0, 5.0]);
        assert!(!result.converged);
        assert_eq!(result.num_iterations, 10);
        assert!(result.history.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_flat_objective_converges() {
        let mut flat = |_: &[f64]| 1.0;
        let result = Spsa::new().with_seed(2).minimize(&mut flat, &[0.0; 3]);
        assert!(result.converged);
        assert_eq!(result.num_iterations, 1);
    }
}
