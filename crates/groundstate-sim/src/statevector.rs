//! Dense statevector simulation.
//!
//! Qubit `q` corresponds to bit `q` of the basis-state index, matching the
//! little-endian Pauli labels of `groundstate_ops`.

use groundstate_ops::{Pauli, PauliString, SparsePauliOp};
use num_complex::Complex64;

use crate::error::{SimError, SimResult};

/// A pure state of `num_qubits` qubits.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    num_qubits: usize,
    amplitudes: Vec<Complex64>,
}

impl Statevector {
    /// The all-zeros state `|0…0⟩`.
    pub fn new(num_qubits: usize) -> Self {
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1 << num_qubits];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            num_qubits,
            amplitudes,
        }
    }

    /// The computational basis state `|index⟩`.
    pub fn from_basis(num_qubits: usize, index: usize) -> SimResult<Self> {
        let dim = 1usize << num_qubits;
        if index >= dim {
            return Err(SimError::BasisIndexOutOfRange { index, dim });
        }
        let mut state = Self::new(num_qubits);
        state.amplitudes.swap(0, index);
        Ok(state)
    }

    /// Wrap an amplitude vector. Its length must be a power of two.
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> SimResult<Self> {
        let dim = amplitudes.len();
        if !dim.is_power_of_two() {
            return Err(SimError::InvalidDimension(dim));
        }
        Ok(Self {
            num_qubits: dim.trailing_zeros() as usize,
            amplitudes,
        })
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Squared norm, 1 for a normalized state.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Measurement probability of every basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    pub fn h(&mut self, q: usize) {
        let h = Complex64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
        self.for_each_pair(q, |a, b| (h * (a + b), h * (a - b)));
    }

    pub fn x(&mut self, q: usize) {
        self.for_each_pair(q, |a, b| (b, a));
    }

    pub fn y(&mut self, q: usize) {
        let i = Complex64::new(0.0, 1.0);
        self.for_each_pair(q, |a, b| (-i * b, i * a));
    }

    pub fn z(&mut self, q: usize) {
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if (i >> q) & 1 == 1 {
                *amp = -*amp;
            }
        }
    }

    pub fn rx(&mut self, q: usize, theta: f64) {
        let c = Complex64::new((theta / 2.0).cos(), 0.0);
        let s = Complex64::new(0.0, -(theta / 2.0).sin());
        self.for_each_pair(q, |a, b| (c * a + s * b, s * a + c * b));
    }

    pub fn ry(&mut self, q: usize, theta: f64) {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        self.for_each_pair(q, |a, b| (a * c - b * s, a * s + b * c));
    }

    pub fn rz(&mut self, q: usize, theta: f64) {
        let phase0 = Complex64::from_polar(1.0, -theta / 2.0);
        let phase1 = Complex64::from_polar(1.0, theta / 2.0);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if (i >> q) & 1 == 0 {
                *amp *= phase0;
            } else {
                *amp *= phase1;
            }
        }
    }

    pub fn cx(&mut self, control: usize, target: usize) {
        for i in 0..self.amplitudes.len() {
            if (i >> control) & 1 == 1 && (i >> target) & 1 == 0 {
                self.amplitudes.swap(i, i | (1 << target));
            }
        }
    }

    pub fn cz(&mut self, q0: usize, q1: usize) {
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if (i >> q0) & 1 == 1 && (i >> q1) & 1 == 1 {
                *amp = -*amp;
            }
        }
    }

    /// Apply `exp(-i θ/2 · P)` for a Pauli string `P`.
    pub fn pauli_rotation(&mut self, pauli: &PauliString, theta: f64) {
        let cos = (theta / 2.0).cos();
        let sin = Complex64::new(0.0, -(theta / 2.0).sin());
        let rotated = self.apply_pauli(pauli);
        for (amp, p_amp) in self.amplitudes.iter_mut().zip(rotated) {
            *amp = *amp * cos + sin * p_amp;
        }
    }

    /// `P|ψ⟩` as a new amplitude vector.
    fn apply_pauli(&self, pauli: &PauliString) -> Vec<Complex64> {
        let mut out = vec![Complex64::new(0.0, 0.0); self.amplitudes.len()];
        for (i, &amp) in self.amplitudes.iter().enumerate() {
            let (j, phase) = pauli.apply_to_basis(i);
            out[j] += phase * amp;
        }
        out
    }

    /// `⟨ψ|P|ψ⟩` for a single Pauli string.
    pub fn expectation_pauli(&self, pauli: &PauliString) -> f64 {
        if pauli.ops().all(|(_, p)| p == Pauli::Z) {
            // diagonal: only the sign of each basis state matters
            return self
                .amplitudes
                .iter()
                .enumerate()
                .map(|(i, a)| pauli.apply_to_basis(i).1.re * a.norm_sqr())
                .sum();
        }
        let mut value = Complex64::new(0.0, 0.0);
        for (i, &amp) in self.amplitudes.iter().enumerate() {
            let (j, phase) = pauli.apply_to_basis(i);
            value += self.amplitudes[j].conj() * phase * amp;
        }
        value.re
    }

    /// `⟨ψ|O|ψ⟩` for a qubit operator, real part only.
    pub fn expectation(&self, observable: &SparsePauliOp) -> SimResult<f64> {
        if observable.num_qubits() != self.num_qubits {
            return Err(SimError::QubitCountMismatch {
                circuit: self.num_qubits,
                observable: observable.num_qubits(),
            });
        }
        Ok(observable
            .iter()
            .map(|(pauli, coeff)| coeff.re * self.expectation_pauli(pauli))
            .sum())
    }

    fn for_each_pair(&mut self, q: usize, f: impl Fn(Complex64, Complex64) -> (Complex64, Complex64)) {
        for i in 0..self.amplitudes.len() {
            if (i >> q) & 1 == 0 {
                let j = i | (1 << q);
                let (a, b) = f(self.amplitudes[i], self.amplitudes[j]);
                self.amplitudes[i] = a;
                self.amplitudes[j] = b;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    fn label(s: &str) -> PauliString {
        PauliString::from_label(s).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2);
        assert_eq!(sv.amplitudes().len(), 4);
        assert_abs_diff_eq!(sv.expectation_pauli(&label("ZZ")), 1.0);
        assert_abs_diff_eq!(sv.expectation_pauli(&label("IZ")), 1.0);
    }

    #[test]
    fn test_x_flips() {
        let mut sv = Statevector::new(2);
        sv.x(1);
        assert_abs_diff_eq!(sv.amplitudes()[0b10].re, 1.0);
        assert_abs_diff_eq!(sv.expectation_pauli(&label("ZI")), -1.0);
    }

    #[test]
    fn test_bell_state() {
        let mut sv = Statevector::new(2);
        sv.h(0);
        sv.cx(0, 1);
        assert_abs_diff_eq!(sv.probabilities()[0], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(sv.probabilities()[3], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(sv.expectation_pauli(&label("XX")), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(sv.expectation_pauli(&label("YY")), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ry_rotation() {
        let mut sv = Statevector::new(1);
        sv.ry(0, PI / 3.0);
        assert_abs_diff_eq!(sv.expectation_pauli(&label("Z")), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(sv.expectation_pauli(&label("X")), (PI / 3.0).sin(), epsilon = 1e-12);
    }

    #[test]
    fn test_rx_rz_consistency() {
        // Rz(π/2) Rx(θ) |0⟩ rotates the Bloch vector from -Y into X
        let theta = 0.7;
        let mut sv = Statevector::new(1);
        sv.rx(0, theta);
        assert_abs_diff_eq!(sv.expectation_pauli(&label("Y")), -theta.sin(), epsilon = 1e-12);
        sv.rz(0, PI / 2.0);
        assert_abs_diff_eq!(sv.expectation_pauli(&label("X")), theta.sin(), epsilon = 1e-12);
        assert_abs_diff_eq!(sv.norm_sqr(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_y_and_z_gates() {
        let mut sv = Statevector::new(1);
        sv.y(0);
        assert_abs_diff_eq!(sv.amplitudes()[1].im, 1.0);
        sv.z(0);
        assert_abs_diff_eq!(sv.amplitudes()[1].im, -1.0);
    }

    #[test]
    fn test_cz_phase() {
        let mut sv = Statevector::new(2);
        sv.h(0);
        sv.h(1);
        sv.cz(0, 1);
        assert_abs_diff_eq!(sv.amplitudes()[3].re, -0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_pauli_rotation_matches_ry() {
        let mut a = Statevector::new(2);
        let mut b = Statevector::new(2);
        a.ry(1, 0.4);
        b.pauli_rotation(&label("YI"), 0.4);
        for (x, y) in a.amplitudes().iter().zip(b.amplitudes()) {
            assert_abs_diff_eq!(x.re, y.re, epsilon = 1e-12);
            assert_abs_diff_eq!(x.im, y.im, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_expectation_qubit_mismatch() {
        let sv = Statevector::new(2);
        let op = SparsePauliOp::from_labels([("Z", 1.0)]).unwrap();
        assert_eq!(
            sv.expectation(&op).unwrap_err(),
            SimError::QubitCountMismatch { circuit: 2, observable: 1 }
        );
    }

    #[test]
    fn test_from_basis_checks_index() {
        let state = Statevector::from_basis(2, 3).unwrap();
        assert_abs_diff_eq!(state.amplitudes()[3].re, 1.0);
        assert_abs_diff_eq!(state.amplitudes()[0].re, 0.0);
        assert_eq!(
            Statevector::from_basis(1, 3).unwrap_err(),
            SimError::BasisIndexOutOfRange { index: 3, dim: 2 }
        );
    }

    #[test]
    fn test_from_amplitudes_dimension() {
        let amps = vec![Complex64::new(1.0, 0.0); 3];
        assert_eq!(
            Statevector::from_amplitudes(amps).unwrap_err(),
            SimError::InvalidDimension(3)
        );
    }
}
