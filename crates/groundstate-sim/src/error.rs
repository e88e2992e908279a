//! Error types for circuit simulation and estimation.

use groundstate_ops::OpError;
use thiserror::Error;

/// Result type for simulation operations.
pub type SimResult<T> = std::result::Result<T, SimError>;

/// Errors that can occur while building or simulating circuits.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Wrong number of parameter values bound to a circuit.
    #[error("circuit expects {expected} parameters, got {got}")]
    ParameterCount { expected: usize, got: usize },

    /// Circuit and observable act on different numbers of qubits.
    #[error("circuit has {circuit} qubits but observable has {observable}")]
    QubitCountMismatch { circuit: usize, observable: usize },

    /// A gate addresses a qubit outside the register.
    #[error("qubit {qubit} out of range for {num_qubits}-qubit circuit")]
    QubitOutOfRange { qubit: usize, num_qubits: usize },

    /// An ansatz cannot be built for the requested system.
    #[error("invalid ansatz: {0}")]
    InvalidAnsatz(String),

    /// A sampled estimator needs at least one shot.
    #[error("shot count must be positive")]
    InvalidShots,

    /// A basis-state index beyond the register.
    #[error("basis index {index} out of range for dimension {dim}")]
    BasisIndexOutOfRange { index: usize, dim: usize },

    /// Amplitude vector length is not a power of two.
    #[error("statevector length {0} is not a power of two")]
    InvalidDimension(usize),

    /// Operator algebra failed.
    #[error(transparent)]
    Op(#[from] OpError),
}
