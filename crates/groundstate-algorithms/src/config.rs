//! Pipeline configuration.
//!
//! A [`PipelineConfig`] names a mapper and a solver with all their settings,
//! and can be read from YAML or JSON:
//!
//! ```yaml
//! mapper: parity
//! solver:
//!   kind: vqe
//!   ansatz:
//!     kind: uccsd
//!   optimizer:
//!     kind: nelder_mead
//!     maxiter: 2000
//!   estimator:
//!     shots: 4096
//!     seed: 7
//! ```

use std::fs;
use std::path::Path;

use groundstate_chem::ElectronicStructureProblem;
use groundstate_ops::{FermionicOp, MapperKind, QubitMapper};
use groundstate_sim::ansatz::{efficient_su2, hartree_fock, two_local, uccsd};
use groundstate_sim::{ParameterizedCircuit, StatevectorEstimator};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::eigensolvers::{
    ExactSolver, InitialPoint, MinimumEigensolver, ParticleNumberFilter, Vqe, DEFAULT_MAX_QUBITS,
};
use crate::error::{AlgorithmError, AlgorithmResult};
use crate::ground_state::GroundStateEigensolver;
use crate::optimizers::{GradientDescent, NelderMead, Optimizer, Spsa};

/// Largest register an exact solver may be configured for.
pub const MAX_EXACT_QUBITS: usize = 30;

/// A ground-state solver assembled from configuration.
pub type DynGroundStateEigensolver = GroundStateEigensolver<Box<dyn QubitMapper>, Box<dyn MinimumEigensolver>>;

/// Mapper and solver selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub mapper: MapperKind,
    #[serde(default)]
    pub solver: SolverConfig,
}

/// Solver selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SolverConfig {
    /// Exact diagonalization.
    Exact {
        #[serde(default = "default_max_qubits")]
        max_qubits: usize,
        /// Restrict to eigenstates with the problem's electron count.
        #[serde(default)]
        filter_particle_number: bool,
    },
    /// Variational quantum eigensolver.
    Vqe(VqeConfig),
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig::Exact {
            max_qubits: DEFAULT_MAX_QUBITS,
            filter_particle_number: false,
        }
    }
}

/// VQE settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VqeConfig {
    #[serde(default)]
    pub ansatz: AnsatzConfig,
    #[serde(default)]
    pub optimizer: OptimizerConfig,
    #[serde(default)]
    pub estimator: EstimatorConfig,
    #[serde(default)]
    pub initial_point: InitialPoint,
}

/// Ansatz family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnsatzConfig {
    /// Unitary coupled cluster, singles and doubles.
    Uccsd {
        #[serde(default = "default_reps")]
        reps: usize,
        #[serde(default = "default_true")]
        hartree_fock: bool,
    },
    /// RY layers with CZ entanglers.
    TwoLocal {
        #[serde(default = "default_reps")]
        reps: usize,
        #[serde(default)]
        hartree_fock: bool,
    },
    /// RY and RZ layers with CX entanglers.
    EfficientSu2 {
        #[serde(default = "default_reps")]
        reps: usize,
        #[serde(default)]
        hartree_fock: bool,
    },
}

impl Default for AnsatzConfig {
    fn default() -> Self {
        AnsatzConfig::Uccsd {
            reps: 1,
            hartree_fock: true,
        }
    }
}

/// Classical optimizer and its settings. Omitted fields take the
/// optimizer's defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OptimizerConfig {
    NelderMead(NelderMead),
    Spsa(Spsa),
    GradientDescent(GradientDescent),
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        OptimizerConfig::NelderMead(NelderMead::default())
    }
}

/// Estimator settings. No shots means exact expectation values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    #[serde(default)]
    pub shots: Option<u32>,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_max_qubits() -> usize {
    DEFAULT_MAX_QUBITS
}
fn default_reps() -> usize {
    1
}
fn default_true() -> bool {
    true
}

fn invalid(message: impl Into<String>) -> AlgorithmError {
    AlgorithmError::InvalidConfig(message.into())
}

impl PipelineConfig {
    /// Parse and validate a YAML configuration.
    pub fn from_yaml_str(text: &str) -> AlgorithmResult<Self> {
        let config: PipelineConfig = serde_yaml::from_str(text).map_err(|e| invalid(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(text: &str) -> AlgorithmResult<Self> {
        let config: PipelineConfig = serde_json::from_str(text).map_err(|e| invalid(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file, choosing the format by extension.
    pub fn from_path(path: impl AsRef<Path>) -> AlgorithmResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&fs::read_to_string(path)?),
            Some("json") => Self::from_json_str(&fs::read_to_string(path)?),
            _ => Err(invalid(format!(
                "unsupported configuration format: {}",
                path.display()
            ))),
        }
    }

    pub fn to_yaml(&self) -> AlgorithmResult<String> {
        serde_yaml::to_string(self).map_err(|e| invalid(e.to_string()))
    }

    /// Check every setting for values no solver can work with.
    pub fn validate(&self) -> AlgorithmResult<()> {
        match &self.solver {
            SolverConfig::Exact { max_qubits, .. } => {
                if *max_qubits == 0 || *max_qubits > MAX_EXACT_QUBITS {
                    return Err(invalid(format!(
                        "max_qubits must be between 1 and {MAX_EXACT_QUBITS}, got {max_qubits}"
                    )));
                }
            }
            SolverConfig::Vqe(vqe) => vqe.validate()?,
        }
        Ok(())
    }

    /// Assemble the configured mapper and solver for `problem`.
    pub fn build(&self, problem: &ElectronicStructureProblem) -> AlgorithmResult<DynGroundStateEigensolver> {
        self.validate()?;
        let num_modes = problem.num_spin_orbitals();
        let mapper = self.mapper.build(num_modes);

        let solver: Box<dyn MinimumEigensolver> = match &self.solver {
            SolverConfig::Exact {
                max_qubits,
                filter_particle_number,
            } => {
                let mut solver = ExactSolver::new().with_max_qubits(*max_qubits);
                if *filter_particle_number {
                    let (alpha, beta) = problem.num_particles();
                    let number = mapper.map(&FermionicOp::number(num_modes))?;
                    solver = solver.with_filter(ParticleNumberFilter::new(number, alpha + beta));
                }
                Box::new(solver)
            }
            SolverConfig::Vqe(vqe) => Box::new(vqe.build(&*mapper, problem)?),
        };
        debug!(mapper = mapper.name(), solver = solver.name(), num_modes, "pipeline assembled");
        Ok(GroundStateEigensolver::new(mapper, solver))
    }
}

impl VqeConfig {
    pub fn validate(&self) -> AlgorithmResult<()> {
        if let AnsatzConfig::Uccsd { reps: 0, .. } = self.ansatz {
            return Err(invalid("uccsd needs at least one repetition"));
        }

        match &self.optimizer {
            OptimizerConfig::NelderMead(nm) => {
                if nm.maxiter == 0 || nm.maxfev == 0 {
                    return Err(invalid("nelder_mead budgets must be positive"));
                }
                if nm.xatol <= 0.0 || nm.fatol <= 0.0 {
                    return Err(invalid("nelder_mead tolerances must be positive"));
                }
            }
            OptimizerConfig::Spsa(spsa) => {
                if spsa.maxiter == 0 {
                    return Err(invalid("spsa maxiter must be positive"));
                }
                if spsa.learning_rate <= 0.0 || spsa.perturbation <= 0.0 || spsa.tol <= 0.0 {
                    return Err(invalid("spsa gains and tolerance must be positive"));
                }
            }
            OptimizerConfig::GradientDescent(gd) => {
                if gd.maxiter == 0 {
                    return Err(invalid("gradient_descent maxiter must be positive"));
                }
                if gd.learning_rate <= 0.0 || gd.gtol <= 0.0 || gd.epsilon <= 0.0 {
                    return Err(invalid("gradient_descent step sizes and tolerance must be positive"));
                }
            }
        }

        if self.estimator.shots == Some(0) {
            return Err(invalid("shots must be positive"));
        }
        if let InitialPoint::Explicit { values } = &self.initial_point {
            if values.iter().any(|v| !v.is_finite()) {
                return Err(invalid("initial point values must be finite"));
            }
        }
        Ok(())
    }

    /// Build the ansatz for `problem` in `mapper`'s encoding.
    pub fn build_ansatz(
        &self,
        mapper: &dyn QubitMapper,
        problem: &ElectronicStructureProblem,
    ) -> AlgorithmResult<ParameterizedCircuit> {
        let num_qubits = problem.num_spin_orbitals();
        let (ansatz, start_from_reference) = match self.ansatz {
            AnsatzConfig::Uccsd { reps, hartree_fock } => (
                uccsd(mapper, problem.num_spatial_orbitals(), problem.num_particles(), reps)?,
                hartree_fock,
            ),
            AnsatzConfig::TwoLocal { reps, hartree_fock } => (two_local(num_qubits, reps)?, hartree_fock),
            AnsatzConfig::EfficientSu2 { reps, hartree_fock } => (efficient_su2(num_qubits, reps)?, hartree_fock),
        };
        if !start_from_reference {
            return Ok(ansatz);
        }
        let reference = hartree_fock(mapper, &problem.hartree_fock_occupation())?;
        Ok(reference.compose(&ansatz)?)
    }

    /// Build a ready [`Vqe`] for `problem`.
    pub fn build(&self, mapper: &dyn QubitMapper, problem: &ElectronicStructureProblem) -> AlgorithmResult<Vqe> {
        let ansatz = self.build_ansatz(mapper, problem)?;
        let optimizer: Box<dyn Optimizer> = match &self.optimizer {
            OptimizerConfig::NelderMead(nm) => Box::new(nm.clone()),
            OptimizerConfig::Spsa(spsa) => Box::new(spsa.clone()),
            OptimizerConfig::GradientDescent(gd) => Box::new(gd.clone()),
        };
        let estimator = match self.estimator.shots {
            Some(shots) => StatevectorEstimator::with_shots(shots, self.estimator.seed)?,
            None => StatevectorEstimator::new(),
        };
        Ok(Vqe::new(ansatz, optimizer, Box::new(estimator)).with_initial_point(self.initial_point.clone()))
    }
}
