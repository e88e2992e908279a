//! Error types for operator construction and fermion-to-qubit mapping.

use thiserror::Error;

/// Result type for operator operations.
pub type OpResult<T> = std::result::Result<T, OpError>;

/// Errors raised while building or mapping operators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpError {
    /// The operator's register length disagrees with the mapper's configured size.
    #[error("encoding mismatch: mapper is configured for {expected} modes, operator declares {found}")]
    EncodingMismatch { expected: usize, found: usize },

    /// A ladder operator addresses a mode outside the register.
    #[error("mode {mode} out of range for a register of {register_length} modes")]
    ModeOutOfRange { mode: usize, register_length: usize },

    /// Two operators act on a different number of qubits.
    #[error("qubit count mismatch: {left} vs {right}")]
    QubitCountMismatch { left: usize, right: usize },

    /// A Pauli addresses a qubit outside the operator.
    #[error("qubit {qubit} out of range for a {num_qubits}-qubit operator")]
    QubitOutOfRange { qubit: usize, num_qubits: usize },

    /// A Pauli or ladder label could not be parsed.
    #[error("invalid operator label '{0}'")]
    InvalidLabel(String),
}
