//! Exact diagonalization.

use groundstate_ops::SparsePauliOp;
use groundstate_sim::Statevector;
use nalgebra::DMatrix;
use num_complex::Complex64;
use tracing::{debug, info};

use super::{check_hermitian, EigenState, MinimumEigensolver, NamedQubitOp, ObservableValue, SolverResult, SolverStatistics};
use crate::error::{AlgorithmError, AlgorithmResult};

/// Default qubit limit: a 2¹⁴ × 2¹⁴ complex matrix is 4 GiB.
pub const DEFAULT_MAX_QUBITS: usize = 14;

/// Selects which eigenpairs the exact solver may return.
pub trait EigenstateFilter: std::fmt::Debug + Send + Sync {
    fn accepts(&self, eigenvalue: f64, state: &Statevector) -> bool;
}

/// Accepts eigenstates with a given particle number.
#[derive(Debug, Clone)]
pub struct ParticleNumberFilter {
    number_operator: SparsePauliOp,
    expected: f64,
    tolerance: f64,
}

impl ParticleNumberFilter {
    /// `number_operator` must be the mapped particle-number operator.
    pub fn new(number_operator: SparsePauliOp, expected: usize) -> Self {
        Self {
            number_operator,
            expected: expected as f64,
            tolerance: 1e-6,
        }
    }
}

impl EigenstateFilter for ParticleNumberFilter {
    fn accepts(&self, _eigenvalue: f64, state: &Statevector) -> bool {
        state
            .expectation(&self.number_operator)
            .map(|n| (n - self.expected).abs() < self.tolerance)
            .unwrap_or(false)
    }
}

/// Dense-matrix minimum eigensolver.
///
/// Builds the full `2ⁿ × 2ⁿ` Hermitian matrix of the Hamiltonian and
/// diagonalizes it. The qubit limit is checked before anything is allocated.
#[derive(Debug)]
pub struct ExactSolver {
    max_qubits: usize,
    filter: Option<Box<dyn EigenstateFilter>>,
}

impl Default for ExactSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ExactSolver {
    pub fn new() -> Self {
        Self {
            max_qubits: DEFAULT_MAX_QUBITS,
            filter: None,
        }
    }

    /// Set the largest register this solver will diagonalize.
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Only return eigenpairs accepted by `filter`.
    pub fn with_filter(mut self, filter: impl EigenstateFilter + 'static) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    pub fn max_qubits(&self) -> usize {
        self.max_qubits
    }
}

/// Dense matrix of a qubit operator in the computational basis.
pub(crate) fn dense_matrix(op: &SparsePauliOp) -> DMatrix<Complex64> {
    let dim = 1usize << op.num_qubits();
    let mut matrix = DMatrix::<Complex64>::zeros(dim, dim);
    for (pauli, coeff) in op.iter() {
        for col in 0..dim {
            let (row, phase) = pauli.apply_to_basis(col);
            matrix[(row, col)] += *coeff * phase;
        }
    }
    matrix
}

impl MinimumEigensolver for ExactSolver {
    fn name(&self) -> &'static str {
        "exact"
    }

    fn solve(&self, hamiltonian: &SparsePauliOp, aux_operators: &[NamedQubitOp]) -> AlgorithmResult<SolverResult> {
        let num_qubits = hamiltonian.num_qubits();
        if num_qubits > self.max_qubits {
            return Err(AlgorithmError::ResourceExhausted {
                num_qubits,
                limit: self.max_qubits,
            });
        }
        // symmetric_eigen reads a single triangle
        check_hermitian(hamiltonian)?;

        let matrix = dense_matrix(hamiltonian);
        debug!(num_qubits, dim = matrix.nrows(), terms = hamiltonian.num_terms(), "diagonalizing");
        let eigen = matrix.symmetric_eigen();

        let mut order: Vec<usize> = (0..eigen.eigenvalues.len()).collect();
        order.sort_by(|&a, &b| eigen.eigenvalues[a].total_cmp(&eigen.eigenvalues[b]));

        let mut found = None;
        for index in order {
            let amplitudes: Vec<Complex64> = eigen.eigenvectors.column(index).iter().copied().collect();
            let state = Statevector::from_amplitudes(amplitudes)?;
            let eigenvalue = eigen.eigenvalues[index];
            match &self.filter {
                Some(filter) if !filter.accepts(eigenvalue, &state) => continue,
                _ => {
                    found = Some((eigenvalue, state));
                    break;
                }
            }
        }
        let (eigenvalue, state) = found.ok_or(AlgorithmError::NoEigenstateMatchesFilter)?;

        let aux_values = aux_operators
            .iter()
            .map(|(name, op)| -> AlgorithmResult<(String, ObservableValue)> {
                Ok((name.clone(), ObservableValue::exact(state.expectation(op)?)))
            })
            .collect::<AlgorithmResult<Vec<_>>>()?;

        info!(num_qubits, eigenvalue, "exact solve complete");

        Ok(SolverResult {
            eigenvalue,
            eigenstate: EigenState::Exact(state),
            aux_values,
            statistics: SolverStatistics {
                evaluations: 1,
                ..SolverStatistics::default()
            },
            converged: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use groundstate_ops::PauliString;

    #[test]
    fn test_single_z() {
        let h = SparsePauliOp::from_labels([("Z", 1.0)]).unwrap();
        let result = ExactSolver::new().solve(&h, &[]).unwrap();
        assert_abs_diff_eq!(result.eigenvalue, -1.0, epsilon = 1e-12);
        assert!(result.converged);
    }

    #[test]
    fn test_dense_matrix_of_xx_plus_zz() {
        let h = SparsePauliOp::from_labels([("XX", 1.0), ("ZZ", 1.0)]).unwrap();
        let m = dense_matrix(&h);
        assert_eq!(m[(3, 0)], Complex64::new(1.0, 0.0));
        assert_eq!(m[(0, 0)], Complex64::new(1.0, 0.0));
        assert_eq!(m[(1, 1)], Complex64::new(-1.0, 0.0));
        let result = ExactSolver::new().solve(&h, &[]).unwrap();
        assert_abs_diff_eq!(result.eigenvalue, -2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_aux_values_on_eigenstate() {
        let h = SparsePauliOp::from_labels([("IZ", -1.0), ("ZI", 0.5)]).unwrap();
        let aux = vec![
            ("z0".to_string(), SparsePauliOp::from_labels([("IZ", 1.0)]).unwrap()),
            ("z1".to_string(), SparsePauliOp::from_labels([("ZI", 1.0)]).unwrap()),
        ];
        let result = ExactSolver::new().solve(&h, &aux).unwrap();
        assert_abs_diff_eq!(result.eigenvalue, -1.5, epsilon = 1e-12);
        assert_eq!(result.aux_values[0].0, "z0");
        assert_abs_diff_eq!(result.aux_values[0].1.value, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(result.aux_values[1].1.value, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_resource_limit() {
        let h = SparsePauliOp::identity(5, 1.0);
        let err = ExactSolver::new().with_max_qubits(4).solve(&h, &[]).unwrap_err();
        assert!(matches!(err, AlgorithmError::ResourceExhausted { num_qubits: 5, limit: 4 }));
    }

    #[test]
    fn test_non_hermitian_rejected() {
        // σ⁻ on one qubit: (X + iY) / 2
        let lowering = SparsePauliOp::from_terms(
            1,
            vec![
                (PauliString::from_label("X").unwrap(), Complex64::new(0.5, 0.0)),
                (PauliString::from_label("Y").unwrap(), Complex64::new(0.0, 0.5)),
            ],
        )
        .unwrap();
        let err = ExactSolver::new().solve(&lowering, &[]).unwrap_err();
        assert!(matches!(
            err,
            AlgorithmError::NonHermitianHamiltonian { max_imaginary } if (max_imaginary - 0.5).abs() < 1e-12
        ));

        // σ⁻ + σ⁺ = X is fine
        let x = lowering.add(&lowering.adjoint()).unwrap();
        let result = ExactSolver::new().solve(&x, &[]).unwrap();
        assert_abs_diff_eq!(result.eigenvalue, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_filter_rejecting_everything() {
        #[derive(Debug)]
        struct Never;
        impl EigenstateFilter for Never {
            fn accepts(&self, _: f64, _: &Statevector) -> bool {
                false
            }
        }
        let h = SparsePauliOp::from_labels([("Z", 1.0)]).unwrap();
        let err = ExactSolver::new().with_filter(Never).solve(&h, &[]).unwrap_err();
        assert!(matches!(err, AlgorithmError::NoEigenstateMatchesFilter));
    }

    #[test]
    fn test_particle_number_filter() {
        // H = -n0 + 3 n0 n1 on two qubits: the unfiltered minimum has one
        // particle, the two-particle sector sits at +2
        let h = SparsePauliOp::from_labels([("II", 0.25), ("IZ", -0.25), ("ZI", -0.75), ("ZZ", 0.75)]).unwrap();
        let number = SparsePauliOp::from_labels([("II", 1.0), ("IZ", -0.5), ("ZI", -0.5)]).unwrap();

        let unfiltered = ExactSolver::new().solve(&h, &[]).unwrap();
        assert_abs_diff_eq!(unfiltered.eigenvalue, -1.0, epsilon = 1e-12);

        let filtered = ExactSolver::new()
            .with_filter(ParticleNumberFilter::new(number, 2))
            .solve(&h, &[])
            .unwrap();
        assert_abs_diff_eq!(filtered.eigenvalue, 2.0, epsilon = 1e-12);
    }
}
