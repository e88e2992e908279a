//! Expectation-value estimators.

use std::sync::Mutex;

use groundstate_ops::SparsePauliOp;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::circuit::ParameterizedCircuit;
use crate::error::{SimError, SimResult};
use crate::statevector::Statevector;

/// One estimated expectation value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub value: f64,
    /// Variance of `value`; zero for exact estimates.
    pub variance: f64,
    /// Shots per Pauli term, `None` for exact estimates.
    pub shots: Option<u32>,
}

impl Estimate {
    /// An exact (noise-free) estimate.
    pub fn exact(value: f64) -> Self {
        Self {
            value,
            variance: 0.0,
            shots: None,
        }
    }

    /// Standard error of the estimate, if it was sampled.
    pub fn std_error(&self) -> Option<f64> {
        self.shots.map(|_| self.variance.sqrt())
    }
}

/// Computes `⟨ψ(θ)|O|ψ(θ)⟩` for a parameterized state.
pub trait Estimator: std::fmt::Debug + Send + Sync {
    /// Estimate one observable at the given parameters.
    fn estimate(
        &self,
        circuit: &ParameterizedCircuit,
        params: &[f64],
        observable: &SparsePauliOp,
    ) -> SimResult<Estimate>;

    /// Estimate several observables on the same state.
    fn estimate_all(
        &self,
        circuit: &ParameterizedCircuit,
        params: &[f64],
        observables: &[&SparsePauliOp],
    ) -> SimResult<Vec<Estimate>> {
        observables
            .iter()
            .map(|op| self.estimate(circuit, params, op))
            .collect()
    }
}

impl<T: Estimator + ?Sized> Estimator for Box<T> {
    fn estimate(
        &self,
        circuit: &ParameterizedCircuit,
        params: &[f64],
        observable: &SparsePauliOp,
    ) -> SimResult<Estimate> {
        (**self).estimate(circuit, params, observable)
    }

    fn estimate_all(
        &self,
        circuit: &ParameterizedCircuit,
        params: &[f64],
        observables: &[&SparsePauliOp],
    ) -> SimResult<Vec<Estimate>> {
        (**self).estimate_all(circuit, params, observables)
    }
}

/// Statevector estimator, exact or with Gaussian shot noise.
///
/// With `shots = Some(s)`, every Pauli term `cₖPₖ` is treated as measured
/// `s` times: its sample mean has variance `cₖ² (1 − ⟨Pₖ⟩²) / s`. The total
/// variance is the sum over non-identity terms and the returned value is
/// the exact expectation plus a normal deviate with that variance.
#[derive(Debug)]
pub struct StatevectorEstimator {
    shots: Option<u32>,
    rng: Mutex<StdRng>,
}

impl StatevectorEstimator {
    /// Exact estimator.
    pub fn new() -> Self {
        Self {
            shots: None,
            rng: Mutex::new(StdRng::seed_from_u64(0)),
        }
    }

    /// Sampled estimator with `shots` per term, seeded for reproducibility.
    pub fn with_shots(shots: u32, seed: Option<u64>) -> SimResult<Self> {
        if shots == 0 {
            return Err(SimError::InvalidShots);
        }
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            shots: Some(shots),
            rng: Mutex::new(rng),
        })
    }

    pub fn shots(&self) -> Option<u32> {
        self.shots
    }

    fn sample(&self, state: &Statevector, observable: &SparsePauliOp, shots: u32) -> Estimate {
        let mut exact = 0.0;
        let mut variance = 0.0;
        for (pauli, coeff) in observable.iter() {
            let e = state.expectation_pauli(pauli);
            exact += coeff.re * e;
            if !pauli.is_identity() {
                variance += coeff.re * coeff.re * (1.0 - e * e).max(0.0) / f64::from(shots);
            }
        }

        let mut value = exact;
        if variance > 0.0 {
            let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            if let Ok(noise) = Normal::new(0.0, variance.sqrt()) {
                value += noise.sample(&mut *rng);
            }
        }
        Estimate {
            value,
            variance,
            shots: Some(shots),
        }
    }
}

impl Default for StatevectorEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl Estimator for StatevectorEstimator {
    fn estimate(
        &self,
        circuit: &ParameterizedCircuit,
        params: &[f64],
        observable: &SparsePauliOp,
    ) -> SimResult<Estimate> {
        check_width(circuit, observable)?;
        let state = circuit.simulate(params)?;
        match self.shots {
            None => Ok(Estimate::exact(state.expectation(observable)?)),
            Some(shots) => Ok(self.sample(&state, observable, shots)),
        }
    }

    fn estimate_all(
        &self,
        circuit: &ParameterizedCircuit,
        params: &[f64],
        observables: &[&SparsePauliOp],
    ) -> SimResult<Vec<Estimate>> {
        for op in observables {
            check_width(circuit, op)?;
        }
        let state = circuit.simulate(params)?;
        observables
            .iter()
            .map(|op| match self.shots {
                None => Ok(Estimate::exact(state.expectation(op)?)),
                Some(shots) => Ok(self.sample(&state, op, shots)),
            })
            .collect()
    }
}

fn check_width(circuit: &ParameterizedCircuit, observable: &SparsePauliOp) -> SimResult<()> {
    if circuit.num_qubits() != observable.num_qubits() {
        return Err(SimError::QubitCountMismatch {
            circuit: circuit.num_qubits(),
            observable: observable.num_qubits(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansatz::two_local;
    use approx::assert_abs_diff_eq;

    fn z_plus_x() -> SparsePauliOp {
        SparsePauliOp::from_labels([("I", 0.5), ("Z", 1.0), ("X", 0.5)]).unwrap()
    }

    #[test]
    fn test_exact_estimate() {
        let circuit = two_local(1, 0).unwrap();
        let est = StatevectorEstimator::new()
            .estimate(&circuit, &[std::f64::consts::FRAC_PI_2], &z_plus_x())
            .unwrap();
        // Ry(π/2)|0⟩ = |+⟩
        assert_abs_diff_eq!(est.value, 1.0, epsilon = 1e-12);
        assert_eq!(est.std_error(), None);
    }

    #[test]
    fn test_sampled_estimate_is_reproducible() {
        let circuit = two_local(1, 0).unwrap();
        let params = [0.3];
        let a = StatevectorEstimator::with_shots(1000, Some(7)).unwrap();
        let b = StatevectorEstimator::with_shots(1000, Some(7)).unwrap();
        let ea = a.estimate(&circuit, &params, &z_plus_x()).unwrap();
        let eb = b.estimate(&circuit, &params, &z_plus_x()).unwrap();
        assert_eq!(ea, eb);
        assert!(ea.std_error().unwrap() > 0.0);
        // within 6 standard errors of the exact value
        let exact = 0.5 + 0.3_f64.cos() + 0.5 * 0.3_f64.sin();
        assert!((ea.value - exact).abs() < 6.0 * ea.std_error().unwrap());
    }

    #[test]
    fn test_eigenstate_has_no_noise() {
        let circuit = two_local(1, 0).unwrap();
        let op = SparsePauliOp::from_labels([("Z", 2.0)]).unwrap();
        let est = StatevectorEstimator::with_shots(100, Some(1))
            .unwrap()
            .estimate(&circuit, &[0.0], &op)
            .unwrap();
        assert_eq!(est.value, 2.0);
        assert_eq!(est.variance, 0.0);
    }

    #[test]
    fn test_zero_shots_rejected() {
        assert_eq!(
            StatevectorEstimator::with_shots(0, None).unwrap_err(),
            SimError::InvalidShots
        );
    }

    #[test]
    fn test_width_mismatch() {
        let circuit = two_local(2, 1).unwrap();
        let params = vec![0.0; circuit.num_parameters()];
        let err = StatevectorEstimator::new()
            .estimate(&circuit, &params, &z_plus_x())
            .unwrap_err();
        assert_eq!(err, SimError::QubitCountMismatch { circuit: 2, observable: 1 });
    }

    #[test]
    fn test_estimate_all_shares_state() {
        let circuit = two_local(1, 0).unwrap();
        let z = SparsePauliOp::from_labels([("Z", 1.0)]).unwrap();
        let x = SparsePauliOp::from_labels([("X", 1.0)]).unwrap();
        let values = StatevectorEstimator::new()
            .estimate_all(&circuit, &[0.4], &[&z, &x])
            .unwrap();
        assert_abs_diff_eq!(values[0].value, 0.4_f64.cos(), epsilon = 1e-12);
        assert_abs_diff_eq!(values[1].value, 0.4_f64.sin(), epsilon = 1e-12);
    }
}
