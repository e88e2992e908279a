//! Operator algebra for ground-state pipelines.
//!
//! This crate provides the two operator representations a ground-state
//! computation passes between stages:
//!
//! - [`FermionicOp`]: second-quantized operators built from creation and
//!   annihilation operators over spin-orbital modes.
//! - [`SparsePauliOp`]: qubit operators as weighted sums of [`PauliString`]s.
//!
//! and the [`QubitMapper`] encodings that translate one into the other:
//! [`JordanWignerMapper`] and [`ParityMapper`].
//!
//! # Example
//!
//! ```
//! use groundstate_ops::{FermionicOp, JordanWignerMapper, QubitMapper};
//!
//! let hopping = FermionicOp::from_labels(2, [("+_0 -_1", 1.0), ("+_1 -_0", 1.0)]).unwrap();
//! let qubit_op = JordanWignerMapper::new(2).map(&hopping).unwrap();
//! assert_eq!(qubit_op.num_terms(), 2); // ½ XX + ½ YY
//! ```

pub mod error;
pub mod fermionic;
pub mod mapper;
pub mod pauli;
pub mod sparse_pauli;

pub use error::{OpError, OpResult};
pub use fermionic::{FermionicOp, FermionicTerm, LadderKind, LadderOp};
pub use mapper::{JordanWignerMapper, MapperKind, ParityMapper, QubitMapper};
pub use pauli::{Pauli, PauliString};
pub use sparse_pauli::{DEFAULT_ATOL, SparsePauliOp};
