//! Statevector simulation for variational ground-state solvers.
//!
//! - [`Statevector`]: dense pure-state simulation with the usual one- and
//!   two-qubit gates and Pauli rotations.
//! - [`ParameterizedCircuit`]: gate lists with bound-at-runtime angles.
//! - [`ansatz`]: `two_local`, `efficient_su2`, `hartree_fock` and `uccsd`.
//! - [`Estimator`]: expectation values, optionally with shot noise.
//!
//! # Example
//!
//! ```
//! use groundstate_ops::SparsePauliOp;
//! use groundstate_sim::{ansatz, Estimator, StatevectorEstimator};
//!
//! let circuit = ansatz::two_local(1, 0).unwrap();
//! let z = SparsePauliOp::from_labels([("Z", 1.0)]).unwrap();
//! let estimate = StatevectorEstimator::new()
//!     .estimate(&circuit, &[std::f64::consts::PI], &z)
//!     .unwrap();
//! assert!((estimate.value + 1.0).abs() < 1e-12);
//! ```

pub mod ansatz;
pub mod circuit;
pub mod error;
pub mod estimator;
pub mod statevector;

pub use circuit::{Angle, Gate, ParameterizedCircuit};
pub use error::{SimError, SimResult};
pub use estimator::{Estimate, Estimator, StatevectorEstimator};
pub use statevector::Statevector;
