//! Error types for problem construction and integral loading.

use groundstate_ops::OpError;
use thiserror::Error;

/// Result type for chemistry operations.
pub type ChemResult<T> = std::result::Result<T, ChemError>;

/// Errors raised while loading integrals or building problems.
#[derive(Debug, Error)]
pub enum ChemError {
    /// Reading a molecule file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML molecule file could not be parsed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON molecule file could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension is not one of `yaml`, `yml` or `json`.
    #[error("unsupported molecule file format '{0}' (expected .yaml, .yml or .json)")]
    UnsupportedFormat(String),

    /// Integral tensors have the wrong shape or index.
    #[error("invalid integrals: {0}")]
    InvalidIntegrals(String),

    /// More electrons per spin than spatial orbitals.
    #[error("invalid particle number ({num_alpha}, {num_beta}) for {num_orbitals} spatial orbitals")]
    InvalidParticleNumber {
        num_alpha: usize,
        num_beta: usize,
        num_orbitals: usize,
    },

    /// No built-in molecule with this name.
    #[error("unknown molecule '{0}'")]
    UnknownMolecule(String),

    /// Operator construction failed.
    #[error(transparent)]
    Op(#[from] OpError),
}
