//! Classical optimizers for variational algorithms.

mod gradient_descent;
mod nelder_mead;
mod spsa;

pub use gradient_descent::GradientDescent;
pub use nelder_mead::NelderMead;
pub use spsa::Spsa;

use serde::{Deserialize, Serialize};

/// Result of an optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Best parameters found.
    pub optimal_params: Vec<f64>,
    /// Objective value at `optimal_params`.
    pub optimal_value: f64,
    /// Number of iterations.
    pub num_iterations: usize,
    /// Number of objective evaluations.
    pub num_evaluations: usize,
    /// Best value after each iteration.
    pub history: Vec<f64>,
    /// Whether the stopping tolerance was met before the budget ran out.
    pub converged: bool,
}

/// Trait for classical optimizers.
pub trait Optimizer: std::fmt::Debug + Send + Sync {
    /// Short name of the method.
    fn name(&self) -> &'static str;

    /// Minimize the objective function.
    ///
    /// # Arguments
    /// * `objective` - The function to minimize, takes parameters and returns value
    /// * `initial_params` - Starting point
    fn minimize(
        &self,
        objective: &mut dyn FnMut(&[f64]) -> f64,
        initial_params: &[f64],
    ) -> OptimizationResult;
}

impl<T: Optimizer + ?Sized> Optimizer for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn minimize(
        &self,
        objective: &mut dyn FnMut(&[f64]) -> f64,
        initial_params: &[f64],
    ) -> OptimizationResult {
        (**self).minimize(objective, initial_params)
    }
}

/// Zero-dimensional problems are evaluated once and are trivially converged.
fn evaluate_only(objective: &mut dyn FnMut(&[f64]) -> f64, params: &[f64]) -> OptimizationResult {
    let value = objective(params);
    OptimizationResult {
        optimal_params: params.to_vec(),
        optimal_value: value,
        num_iterations: 0,
        num_evaluations: 1,
        history: vec![value],
        converged: true,
    }
}
