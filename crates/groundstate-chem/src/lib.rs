//! Electronic-structure problems for ground-state solvers.
//!
//! This crate turns precomputed molecular integrals into an
//! [`ElectronicStructureProblem`]: a second-quantized Hamiltonian over spin
//! orbitals, the nuclear repulsion energy, electron counts and a set of named
//! auxiliary observables.
//!
//! # Example
//!
//! ```
//! use groundstate_chem::{ElectronicStructureDriver, IntegralDriver};
//!
//! let problem = IntegralDriver::h2_sto3g().run().unwrap();
//! assert_eq!(problem.num_spin_orbitals(), 4);
//! assert_eq!(problem.num_particles(), (1, 1));
//! ```

pub mod driver;
pub mod error;
pub mod integrals;
pub mod molecules;
pub mod observables;
pub mod problem;

pub use driver::{Atom, DipoleData, ElectronicStructureDriver, IntegralDriver, MoleculeData};
pub use error::{ChemError, ChemResult};
pub use integrals::{ElectronicIntegrals, TwoBodyEntry};
pub use problem::ElectronicStructureProblem;
