//! Minimum eigensolvers over qubit Hamiltonians.

mod exact;
mod vqe;

pub use exact::{EigenstateFilter, ExactSolver, ParticleNumberFilter, DEFAULT_MAX_QUBITS};
pub use vqe::{InitialPoint, Vqe, VqeCallback};

use groundstate_ops::SparsePauliOp;
use groundstate_sim::{ParameterizedCircuit, SimResult, Statevector};
use serde::{Deserialize, Serialize};

use crate::error::{AlgorithmError, AlgorithmResult};

/// Largest imaginary Pauli coefficient tolerated in a Hamiltonian.
pub const HERMITIAN_TOL: f64 = 1e-10;

/// A named qubit operator.
pub type NamedQubitOp = (String, SparsePauliOp);

/// An observable's value on the solution state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservableValue {
    pub value: f64,
    /// Standard error when the value was sampled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub std_error: Option<f64>,
}

impl ObservableValue {
    /// An exactly known value.
    pub fn exact(value: f64) -> Self {
        Self {
            value,
            std_error: None,
        }
    }
}

/// The state found by a solver.
#[derive(Debug, Clone, PartialEq)]
pub enum EigenState {
    /// Full eigenvector from diagonalization.
    Exact(Statevector),
    /// Ansatz and optimal parameters from a variational run.
    Variational {
        ansatz: ParameterizedCircuit,
        parameters: Vec<f64>,
    },
}

impl EigenState {
    /// Materialize the state.
    pub fn statevector(&self) -> SimResult<Statevector> {
        match self {
            EigenState::Exact(state) => Ok(state.clone()),
            EigenState::Variational { ansatz, parameters } => ansatz.simulate(parameters),
        }
    }
}

/// Optimizer bookkeeping carried into results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolverStatistics {
    pub iterations: usize,
    pub evaluations: usize,
    /// Best energy after each optimizer iteration.
    pub history: Vec<f64>,
    /// Optimal ansatz parameters, for variational solvers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimal_parameters: Option<Vec<f64>>,
    /// Optimizer used, for variational solvers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimizer: Option<String>,
}

/// Output of a [`MinimumEigensolver`].
#[derive(Debug, Clone, PartialEq)]
pub struct SolverResult {
    /// Lowest eigenvalue found.
    pub eigenvalue: f64,
    pub eigenstate: EigenState,
    /// Auxiliary operator values, in the order they were given.
    pub aux_values: Vec<(String, ObservableValue)>,
    pub statistics: SolverStatistics,
    /// `false` when an optimizer ran out of budget.
    pub converged: bool,
}

/// Trait for solvers that find the lowest eigenvalue of a qubit Hamiltonian.
pub trait MinimumEigensolver: std::fmt::Debug + Send + Sync {
    /// Short name of the solver.
    fn name(&self) -> &'static str;

    /// Find the lowest eigenvalue of `hamiltonian` and evaluate
    /// `aux_operators` on the corresponding state.
    fn solve(&self, hamiltonian: &SparsePauliOp, aux_operators: &[NamedQubitOp]) -> AlgorithmResult<SolverResult>;
}

/// Reject Hamiltonians whose simplified Pauli sum carries imaginary coefficients.
pub(crate) fn check_hermitian(hamiltonian: &SparsePauliOp) -> AlgorithmResult<()> {
    let max_imaginary = hamiltonian
        .simplify(0.0)
        .iter()
        .map(|(_, coeff)| coeff.im.abs())
        .fold(0.0, f64::max);
    if max_imaginary > HERMITIAN_TOL {
        return Err(AlgorithmError::NonHermitianHamiltonian { max_imaginary });
    }
    Ok(())
}

impl<T: MinimumEigensolver + ?Sized> MinimumEigensolver for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn solve(&self, hamiltonian: &SparsePauliOp, aux_operators: &[NamedQubitOp]) -> AlgorithmResult<SolverResult> {
        (**self).solve(hamiltonian, aux_operators)
    }
}
