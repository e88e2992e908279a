//! The ground-state orchestrator and its result.

use std::collections::BTreeMap;
use std::fmt;

use groundstate_chem::observables::DIPOLE_COMPONENTS;
use groundstate_chem::ElectronicStructureProblem;
use groundstate_ops::QubitMapper;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::eigensolvers::{MinimumEigensolver, ObservableValue, SolverStatistics};
use crate::error::{AlgorithmError, AlgorithmResult};

/// Dipole moment in atomic units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DipoleMoment {
    pub nuclear: [f64; 3],
    pub electronic: [f64; 3],
    /// `nuclear - electronic`, since electrons carry negative charge.
    pub total: [f64; 3],
}

impl DipoleMoment {
    pub fn new(nuclear: [f64; 3], electronic: [f64; 3]) -> Self {
        let total = [
            nuclear[0] - electronic[0],
            nuclear[1] - electronic[1],
            nuclear[2] - electronic[2],
        ];
        Self {
            nuclear,
            electronic,
            total,
        }
    }

    /// Length of the total dipole vector.
    pub fn magnitude(&self) -> f64 {
        self.total.iter().map(|c| c * c).sum::<f64>().sqrt()
    }
}

/// Recoverable conditions attached to a result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultWarning {
    /// The optimizer ran out of budget; the energy is the best seen.
    OptimizationDidNotConverge { evaluations: usize, best_value: f64 },
    /// A derived quantity was requested but some inputs were not measured.
    InsufficientObservables { quantity: String, missing: Vec<String> },
}

impl fmt::Display for ResultWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultWarning::OptimizationDidNotConverge {
                evaluations,
                best_value,
            } => write!(
                f,
                "optimization did not converge after {evaluations} evaluations; best energy {best_value:.12}"
            ),
            ResultWarning::InsufficientObservables { quantity, missing } => {
                write!(f, "{quantity} not derived: missing {}", missing.join(", "))
            }
        }
    }
}

/// Outcome of a ground-state calculation.
///
/// The total energy is fixed at construction as `computed + correction`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroundStateResult {
    solver: String,
    computed_energy: f64,
    correction: f64,
    total_energy: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference_energy: Option<f64>,
    observables: BTreeMap<String, ObservableValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dipole: Option<DipoleMoment>,
    warnings: Vec<ResultWarning>,
    statistics: SolverStatistics,
}

impl GroundStateResult {
    pub fn new(solver: impl Into<String>, computed_energy: f64, correction: f64) -> Self {
        Self {
            solver: solver.into(),
            computed_energy,
            correction,
            total_energy: computed_energy + correction,
            reference_energy: None,
            observables: BTreeMap::new(),
            dipole: None,
            warnings: Vec::new(),
            statistics: SolverStatistics::default(),
        }
    }

    pub fn with_observable(mut self, name: impl Into<String>, value: ObservableValue) -> Self {
        self.observables.insert(name.into(), value);
        self
    }

    pub fn with_dipole(mut self, dipole: DipoleMoment) -> Self {
        self.dipole = Some(dipole);
        self
    }

    pub fn with_warning(mut self, warning: ResultWarning) -> Self {
        self.warnings.push(warning);
        self
    }

    pub fn with_statistics(mut self, statistics: SolverStatistics) -> Self {
        self.statistics = statistics;
        self
    }

    pub fn with_reference_energy(mut self, energy: f64) -> Self {
        self.reference_energy = Some(energy);
        self
    }

    /// Name of the solver that produced this result.
    pub fn solver(&self) -> &str {
        &self.solver
    }

    /// Electronic energy as returned by the solver.
    pub fn computed_energy(&self) -> f64 {
        self.computed_energy
    }

    /// Classical correction (nuclear repulsion).
    pub fn correction(&self) -> f64 {
        self.correction
    }

    pub fn total_energy(&self) -> f64 {
        self.total_energy
    }

    /// Reference (Hartree-Fock) total energy, when the problem carried one.
    pub fn reference_energy(&self) -> Option<f64> {
        self.reference_energy
    }

    pub fn observables(&self) -> &BTreeMap<String, ObservableValue> {
        &self.observables
    }

    pub fn observable(&self, name: &str) -> Option<ObservableValue> {
        self.observables.get(name).copied()
    }

    pub fn dipole(&self) -> Option<&DipoleMoment> {
        self.dipole.as_ref()
    }

    pub fn warnings(&self) -> &[ResultWarning] {
        &self.warnings
    }

    pub fn statistics(&self) -> &SolverStatistics {
        &self.statistics
    }

    pub fn is_converged(&self) -> bool {
        !self
            .warnings
            .iter()
            .any(|w| matches!(w, ResultWarning::OptimizationDidNotConverge { .. }))
    }

    /// Fail if the optimizer stopped on its budget.
    pub fn require_converged(&self) -> AlgorithmResult<&Self> {
        for warning in &self.warnings {
            if let ResultWarning::OptimizationDidNotConverge {
                evaluations,
                best_value,
            } = warning
            {
                return Err(AlgorithmError::OptimizationDidNotConverge {
                    evaluations: *evaluations,
                    best_value: *best_value,
                });
            }
        }
        Ok(self)
    }

    /// The derived dipole moment, or the reason it is missing.
    pub fn dipole_moment(&self) -> AlgorithmResult<&DipoleMoment> {
        if let Some(dipole) = &self.dipole {
            return Ok(dipole);
        }
        let missing = self
            .warnings
            .iter()
            .find_map(|w| match w {
                ResultWarning::InsufficientObservables { quantity, missing } if quantity == "dipole moment" => {
                    Some(missing.clone())
                }
                _ => None,
            })
            .unwrap_or_else(|| DIPOLE_COMPONENTS.iter().map(|c| c.to_string()).collect());
        Err(AlgorithmError::InsufficientObservables {
            quantity: "dipole moment".to_string(),
            missing,
        })
    }
}

/// Runs a [`MinimumEigensolver`] on an [`ElectronicStructureProblem`]
/// encoded by a [`QubitMapper`].
#[derive(Debug)]
pub struct GroundStateEigensolver<M, S> {
    mapper: M,
    solver: S,
}

impl<M: QubitMapper, S: MinimumEigensolver> GroundStateEigensolver<M, S> {
    pub fn new(mapper: M, solver: S) -> Self {
        Self { mapper, solver }
    }

    pub fn mapper(&self) -> &M {
        &self.mapper
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Compute the ground state of `problem`.
    ///
    /// Mapper and solver errors are returned unchanged. Budget exhaustion
    /// and missing dipole components become warnings on the result.
    pub fn solve(&self, problem: &ElectronicStructureProblem) -> AlgorithmResult<GroundStateResult> {
        let hamiltonian = self.mapper.map(problem.hamiltonian())?;
        let aux_operators = self.mapper.map_all(problem.aux_operators())?;
        info!(
            problem = problem.name(),
            mapper = self.mapper.name(),
            solver = self.solver.name(),
            num_qubits = hamiltonian.num_qubits(),
            hamiltonian_terms = hamiltonian.num_terms(),
            aux_operators = aux_operators.len(),
            "solving ground state"
        );

        let raw = self.solver.solve(&hamiltonian, &aux_operators)?;
        let evaluations = raw.statistics.evaluations;

        let mut result =
            GroundStateResult::new(self.solver.name(), raw.eigenvalue, problem.nuclear_repulsion_energy())
                .with_statistics(raw.statistics);
        if let Some(reference) = problem.reference_energy() {
            result = result.with_reference_energy(reference);
        }
        if !raw.converged {
            warn!(evaluations, best = raw.eigenvalue, "ground state energy is a best-effort estimate");
            result = result.with_warning(ResultWarning::OptimizationDidNotConverge {
                evaluations,
                best_value: raw.eigenvalue,
            });
        }

        let mut observables: BTreeMap<String, ObservableValue> = raw.aux_values.into_iter().collect();
        let dipole_requested = problem.nuclear_dipole().is_some()
            || observables.keys().any(|name| DIPOLE_COMPONENTS.contains(&name.as_str()));
        if dipole_requested {
            let missing: Vec<String> = DIPOLE_COMPONENTS
                .iter()
                .filter(|c| !observables.contains_key(**c))
                .map(|c| c.to_string())
                .collect();
            if missing.is_empty() {
                let mut electronic = [0.0; 3];
                for (axis, component) in DIPOLE_COMPONENTS.iter().enumerate() {
                    if let Some(value) = observables.remove(*component) {
                        electronic[axis] = value.value;
                    }
                }
                let dipole = DipoleMoment::new(problem.nuclear_dipole().unwrap_or([0.0; 3]), electronic);
                debug!(total = ?dipole.total, "derived dipole moment");
                result = result.with_dipole(dipole);
            } else {
                warn!(missing = ?missing, "dipole moment requested but not all components were measured");
                result = result.with_warning(ResultWarning::InsufficientObservables {
                    quantity: "dipole moment".to_string(),
                    missing,
                });
            }
        }
        for (name, value) in observables {
            result = result.with_observable(name, value);
        }

        info!(
            computed = result.computed_energy(),
            total = result.total_energy(),
            converged = result.is_converged(),
            "ground state solved"
        );
        Ok(result)
    }
}
