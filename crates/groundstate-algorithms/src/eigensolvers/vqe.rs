//! Variational quantum eigensolver.

use groundstate_ops::SparsePauliOp;
use groundstate_sim::{Estimator, ParameterizedCircuit, SimError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{check_hermitian, EigenState, MinimumEigensolver, NamedQubitOp, ObservableValue, SolverResult, SolverStatistics};
use crate::error::AlgorithmResult;
use crate::optimizers::Optimizer;

/// Starting parameters for the optimizer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InitialPoint {
    /// All parameters zero. For UCCSD this starts at the reference state.
    #[default]
    Zeros,
    /// Uniform in `[-π, π)`.
    Random {
        #[serde(default)]
        seed: Option<u64>,
    },
    /// Caller-supplied values.
    Explicit { values: Vec<f64> },
}

impl InitialPoint {
    /// Materialize `num_parameters` starting values.
    pub fn resolve(&self, num_parameters: usize) -> AlgorithmResult<Vec<f64>> {
        match self {
            InitialPoint::Zeros => Ok(vec![0.0; num_parameters]),
            InitialPoint::Random { seed } => {
                let mut rng = match seed {
                    Some(seed) => StdRng::seed_from_u64(*seed),
                    None => StdRng::from_entropy(),
                };
                Ok((0..num_parameters)
                    .map(|_| rng.gen_range(-std::f64::consts::PI..std::f64::consts::PI))
                    .collect())
            }
            InitialPoint::Explicit { values } => {
                if values.len() != num_parameters {
                    return Err(SimError::ParameterCount {
                        expected: num_parameters,
                        got: values.len(),
                    }
                    .into());
                }
                Ok(values.clone())
            }
        }
    }
}

/// Called after every energy evaluation with the evaluation count, the
/// parameters and the energy.
pub type VqeCallback = Box<dyn Fn(usize, &[f64], f64) + Send + Sync>;

/// Variational minimum eigensolver.
///
/// Minimizes `⟨ψ(θ)|H|ψ(θ)⟩` over the ansatz parameters with a classical
/// optimizer, then evaluates the auxiliary operators at the optimum.
pub struct Vqe {
    ansatz: ParameterizedCircuit,
    optimizer: Box<dyn Optimizer>,
    estimator: Box<dyn Estimator>,
    initial_point: InitialPoint,
    callback: Option<VqeCallback>,
}

impl std::fmt::Debug for Vqe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vqe")
            .field("ansatz", &self.ansatz.name())
            .field("num_parameters", &self.ansatz.num_parameters())
            .field("optimizer", &self.optimizer)
            .field("estimator", &self.estimator)
            .field("initial_point", &self.initial_point)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

impl Vqe {
    pub fn new(
        ansatz: ParameterizedCircuit,
        optimizer: Box<dyn Optimizer>,
        estimator: Box<dyn Estimator>,
    ) -> Self {
        Self {
            ansatz,
            optimizer,
            estimator,
            initial_point: InitialPoint::Zeros,
            callback: None,
        }
    }

    pub fn with_initial_point(mut self, initial_point: InitialPoint) -> Self {
        self.initial_point = initial_point;
        self
    }

    pub fn with_callback(mut self, callback: impl Fn(usize, &[f64], f64) + Send + Sync + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    pub fn ansatz(&self) -> &ParameterizedCircuit {
        &self.ansatz
    }

    pub fn optimizer(&self) -> &dyn Optimizer {
        &*self.optimizer
    }
}

impl MinimumEigensolver for Vqe {
    fn name(&self) -> &'static str {
        "vqe"
    }

    fn solve(&self, hamiltonian: &SparsePauliOp, aux_operators: &[NamedQubitOp]) -> AlgorithmResult<SolverResult> {
        if self.ansatz.num_qubits() != hamiltonian.num_qubits() {
            return Err(SimError::QubitCountMismatch {
                circuit: self.ansatz.num_qubits(),
                observable: hamiltonian.num_qubits(),
            }
            .into());
        }
        check_hermitian(hamiltonian)?;

        let initial = self.initial_point.resolve(self.ansatz.num_parameters())?;
        info!(
            ansatz = self.ansatz.name(),
            num_qubits = self.ansatz.num_qubits(),
            num_parameters = self.ansatz.num_parameters(),
            optimizer = self.optimizer.name(),
            "starting vqe"
        );

        let mut failure: Option<SimError> = None;
        let mut evaluations = 0usize;
        let mut objective = |params: &[f64]| -> f64 {
            if failure.is_some() {
                return f64::INFINITY;
            }
            match self.estimator.estimate(&self.ansatz, params, hamiltonian) {
                Ok(estimate) => {
                    evaluations += 1;
                    if let Some(callback) = &self.callback {
                        callback(evaluations, params, estimate.value);
                    }
                    estimate.value
                }
                Err(e) => {
                    failure = Some(e);
                    f64::INFINITY
                }
            }
        };
        let outcome = self.optimizer.minimize(&mut objective, &initial);
        if let Some(e) = failure {
            return Err(e.into());
        }

        if outcome.converged {
            debug!(
                iterations = outcome.num_iterations,
                evaluations = outcome.num_evaluations,
                "optimizer converged"
            );
        } else {
            warn!(
                evaluations = outcome.num_evaluations,
                best = outcome.optimal_value,
                "optimizer stopped on its budget"
            );
        }

        let observables: Vec<&SparsePauliOp> = aux_operators.iter().map(|(_, op)| op).collect();
        let estimates = self
            .estimator
            .estimate_all(&self.ansatz, &outcome.optimal_params, &observables)?;
        let aux_values = aux_operators
            .iter()
            .zip(estimates)
            .map(|((name, _), estimate)| {
                (
                    name.clone(),
                    ObservableValue {
                        value: estimate.value,
                        std_error: estimate.std_error(),
                    },
                )
            })
            .collect();

        info!(eigenvalue = outcome.optimal_value, "vqe complete");

        Ok(SolverResult {
            eigenvalue: outcome.optimal_value,
            eigenstate: EigenState::Variational {
                ansatz: self.ansatz.clone(),
                parameters: outcome.optimal_params.clone(),
            },
            aux_values,
            statistics: SolverStatistics {
                iterations: outcome.num_iterations,
                evaluations: outcome.num_evaluations,
                history: outcome.history,
                optimal_parameters: Some(outcome.optimal_params),
                optimizer: Some(self.optimizer.name().to_string()),
            },
            converged: outcome.converged,
        })
    }
}
