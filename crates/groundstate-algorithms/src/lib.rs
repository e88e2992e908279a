//! Ground-state eigensolvers.
//!
//! This crate runs the final stages of a ground-state calculation:
//!
//! - [`optimizers`]: classical optimizers for variational solvers
//! - [`eigensolvers`]: the [`MinimumEigensolver`] trait with [`ExactSolver`]
//!   and [`Vqe`]
//! - [`GroundStateEigensolver`]: maps an [`ElectronicStructureProblem`],
//!   solves it and packages a [`GroundStateResult`]
//! - [`ResultFormatter`]: renders results as text
//! - [`PipelineConfig`]: builds the whole pipeline from YAML or JSON
//!
//! # Example
//!
//! ```
//! use groundstate_algorithms::{ExactSolver, GroundStateEigensolver};
//! use groundstate_chem::{ElectronicStructureDriver, IntegralDriver};
//! use groundstate_ops::JordanWignerMapper;
//!
//! let problem = IntegralDriver::h2_sto3g().run().unwrap();
//! let solver = GroundStateEigensolver::new(JordanWignerMapper::new(4), ExactSolver::new());
//! let result = solver.solve(&problem).unwrap();
//! assert!((result.total_energy() + 1.137306036).abs() < 1e-8);
//! println!("{result}");
//! ```
//!
//! [`ElectronicStructureProblem`]: groundstate_chem::ElectronicStructureProblem

pub mod config;
pub mod eigensolvers;
pub mod error;
pub mod formatter;
pub mod ground_state;
pub mod optimizers;

pub use config::{
    AnsatzConfig, DynGroundStateEigensolver, EstimatorConfig, OptimizerConfig, PipelineConfig, SolverConfig,
    VqeConfig,
};
pub use eigensolvers::{
    EigenState, EigenstateFilter, ExactSolver, InitialPoint, MinimumEigensolver, NamedQubitOp, ObservableValue,
    ParticleNumberFilter, SolverResult, SolverStatistics, Vqe,
};
pub use error::{AlgorithmError, AlgorithmResult};
pub use formatter::{ResultFormatter, AU_TO_DEBYE};
pub use ground_state::{DipoleMoment, GroundStateEigensolver, GroundStateResult, ResultWarning};
pub use optimizers::{GradientDescent, NelderMead, OptimizationResult, Optimizer, Spsa};
