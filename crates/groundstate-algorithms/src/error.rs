//! Error types for eigensolvers and the ground-state pipeline.

use groundstate_chem::ChemError;
use groundstate_ops::OpError;
use groundstate_sim::SimError;
use thiserror::Error;

/// Result type for algorithm operations.
pub type AlgorithmResult<T> = std::result::Result<T, AlgorithmError>;

/// Errors raised by solvers, the orchestrator and pipeline configuration.
#[derive(Debug, Error)]
pub enum AlgorithmError {
    // =========================================================================
    // Solver errors
    // =========================================================================
    /// The exact solver refuses problems above its qubit limit.
    #[error("exact diagonalization of {num_qubits} qubits exceeds the limit of {limit}")]
    ResourceExhausted { num_qubits: usize, limit: usize },

    /// The optimizer stopped on its budget rather than its tolerance.
    #[error("optimization did not converge after {evaluations} evaluations (best value {best_value:.12})")]
    OptimizationDidNotConverge { evaluations: usize, best_value: f64 },

    /// The qubit Hamiltonian is not Hermitian, so it has no real spectrum to minimize.
    #[error("Hamiltonian is not Hermitian (largest imaginary Pauli coefficient {max_imaginary:.3e})")]
    NonHermitianHamiltonian { max_imaginary: f64 },

    /// An eigenstate filter rejected every eigenpair.
    #[error("no eigenstate satisfies the filter")]
    NoEigenstateMatchesFilter,

    // =========================================================================
    // Result errors
    // =========================================================================
    /// A derived quantity needs observables the solver did not produce.
    #[error("cannot derive {quantity}: missing {}", missing.join(", "))]
    InsufficientObservables { quantity: String, missing: Vec<String> },

    // =========================================================================
    // Configuration errors
    // =========================================================================
    /// Pipeline configuration failed validation or parsing.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reading a configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // =========================================================================
    // Wrapped errors
    // =========================================================================
    #[error(transparent)]
    Op(#[from] OpError),

    #[error(transparent)]
    Sim(#[from] SimError),

    #[error(transparent)]
    Chem(#[from] ChemError),
}
