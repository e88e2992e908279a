//! Qubit operators as weighted sums of Pauli strings.
//!
//! H = Σᵢ cᵢ Pᵢ
//!
//! Terms keep their insertion order. [`SparsePauliOp::simplify`] merges
//! repeated strings into the position of their first occurrence, so any
//! sequence of operations produces the same term order every time.

use num_complex::Complex64;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{OpError, OpResult};
use crate::pauli::PauliString;

/// Coefficients with a magnitude below this are dropped by [`SparsePauliOp::simplify`].
pub const DEFAULT_ATOL: f64 = 1e-12;

/// A qubit operator represented as a sum of Pauli strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparsePauliOp {
    num_qubits: usize,
    terms: Vec<(PauliString, Complex64)>,
}

impl SparsePauliOp {
    /// The zero operator.
    pub fn zero(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            terms: Vec::new(),
        }
    }

    /// `coeff · I` on `num_qubits` qubits.
    pub fn identity(num_qubits: usize, coeff: f64) -> Self {
        Self {
            num_qubits,
            terms: vec![(PauliString::identity(num_qubits), Complex64::new(coeff, 0.0))],
        }
    }

    /// Create an operator from explicit terms.
    pub fn from_terms(
        num_qubits: usize,
        terms: impl IntoIterator<Item = (PauliString, Complex64)>,
    ) -> OpResult<Self> {
        let terms: Vec<_> = terms.into_iter().collect();
        if let Some((pauli, _)) = terms.iter().find(|(p, _)| p.num_qubits() != num_qubits) {
            return Err(OpError::QubitCountMismatch {
                left: num_qubits,
                right: pauli.num_qubits(),
            });
        }
        Ok(Self { num_qubits, terms })
    }

    /// Create an operator from `(label, real coefficient)` pairs.
    pub fn from_labels<'a>(terms: impl IntoIterator<Item = (&'a str, f64)>) -> OpResult<Self> {
        let terms = terms
            .into_iter()
            .map(|(label, coeff)| -> OpResult<(PauliString, Complex64)> {
                Ok((PauliString::from_label(label)?, Complex64::new(coeff, 0.0)))
            })
            .collect::<OpResult<Vec<_>>>()?;
        let num_qubits = terms.first().map(|(p, _)| p.num_qubits()).unwrap_or(0);
        Self::from_terms(num_qubits, terms)
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get the number of terms.
    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    /// The terms, in order.
    pub fn terms(&self) -> &[(PauliString, Complex64)] {
        &self.terms
    }

    /// Iterate over `(string, coefficient)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = &(PauliString, Complex64)> {
        self.terms.iter()
    }

    /// Check if the operator has no terms.
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Sum of the coefficients on the identity string.
    pub fn identity_coefficient(&self) -> Complex64 {
        self.terms
            .iter()
            .filter(|(p, _)| p.is_identity())
            .map(|(_, c)| *c)
            .sum()
    }

    /// Total coefficient of `pauli` in this operator.
    pub fn coefficient(&self, pauli: &PauliString) -> Complex64 {
        self.terms
            .iter()
            .filter(|(p, _)| p == pauli)
            .map(|(_, c)| *c)
            .sum()
    }

    /// Sum of `|cᵢ|`, an upper bound on the spectral radius.
    pub fn lambda(&self) -> f64 {
        self.terms.iter().map(|(_, c)| c.norm()).sum()
    }

    /// `self + other`, terms concatenated without merging.
    pub fn add(&self, other: &SparsePauliOp) -> OpResult<Self> {
        self.check_size(other)?;
        let mut terms = self.terms.clone();
        terms.extend(other.terms.iter().cloned());
        Ok(Self {
            num_qubits: self.num_qubits,
            terms,
        })
    }

    /// Multiply every coefficient by `factor`.
    pub fn scale(&self, factor: Complex64) -> Self {
        Self {
            num_qubits: self.num_qubits,
            terms: self.terms.iter().map(|(p, c)| (p.clone(), c * factor)).collect(),
        }
    }

    /// Operator product `self · other`, simplified.
    pub fn compose(&self, other: &SparsePauliOp) -> OpResult<Self> {
        self.check_size(other)?;
        let mut terms = Vec::with_capacity(self.terms.len() * other.terms.len());
        for (pa, ca) in &self.terms {
            for (pb, cb) in &other.terms {
                let (phase, pauli) = pa.compose(pb)?;
                terms.push((pauli, ca * cb * phase));
            }
        }
        Ok(Self {
            num_qubits: self.num_qubits,
            terms,
        }
        .simplify(DEFAULT_ATOL))
    }

    /// Hermitian adjoint. Pauli strings are Hermitian, so only coefficients conjugate.
    pub fn adjoint(&self) -> Self {
        Self {
            num_qubits: self.num_qubits,
            terms: self.terms.iter().map(|(p, c)| (p.clone(), c.conj())).collect(),
        }
    }

    /// Merge repeated strings and drop coefficients with `|c| < atol`.
    pub fn simplify(&self, atol: f64) -> Self {
        let mut index: FxHashMap<&PauliString, usize> = FxHashMap::default();
        let mut merged: Vec<(PauliString, Complex64)> = Vec::new();

        for (pauli, coeff) in &self.terms {
            match index.get(pauli) {
                Some(&slot) => merged[slot].1 += *coeff,
                None => {
                    index.insert(pauli, merged.len());
                    merged.push((pauli.clone(), *coeff));
                }
            }
        }
        merged.retain(|(_, c)| c.norm() >= atol);

        Self {
            num_qubits: self.num_qubits,
            terms: merged,
        }
    }

    /// Whether the operator equals its adjoint up to `atol`.
    pub fn is_hermitian(&self, atol: f64) -> bool {
        self.simplify(0.0)
            .terms
            .iter()
            .all(|(_, c)| c.im.abs() < atol)
    }

    /// Keep only the real part of every coefficient.
    ///
    /// Use on operators known to be Hermitian to strip round-off imaginary parts.
    pub fn real_part(&self) -> Self {
        Self {
            num_qubits: self.num_qubits,
            terms: self
                .terms
                .iter()
                .map(|(p, c)| (p.clone(), Complex64::new(c.re, 0.0)))
                .collect(),
        }
    }

    fn check_size(&self, other: &SparsePauliOp) -> OpResult<()> {
        if self.num_qubits != other.num_qubits {
            return Err(OpError::QubitCountMismatch {
                left: self.num_qubits,
                right: other.num_qubits,
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for SparsePauliOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "SparsePauliOp ({} terms, {} qubits):",
            self.num_terms(),
            self.num_qubits
        )?;
        for (pauli, coeff) in &self.terms {
            if coeff.im.abs() < DEFAULT_ATOL {
                writeln!(f, "  {:+.8} {}", coeff.re, pauli)?;
            } else {
                writeln!(f, "  ({:+.8}{:+.8}i) {}", coeff.re, coeff.im, pauli)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_from_labels() {
        let op = SparsePauliOp::from_labels([("II", -1.0), ("IZ", 0.5), ("ZI", -0.5)]).unwrap();
        assert_eq!(op.num_qubits(), 2);
        assert_eq!(op.num_terms(), 3);
        assert_abs_diff_eq!(op.identity_coefficient().re, -1.0);
        assert_abs_diff_eq!(op.lambda(), 2.0);
    }

    #[test]
    fn test_mixed_sizes_rejected() {
        let err = SparsePauliOp::from_labels([("II", 1.0), ("Z", 1.0)]).unwrap_err();
        assert_eq!(err, OpError::QubitCountMismatch { left: 2, right: 1 });
    }

    #[test]
    fn test_simplify_merges_in_first_seen_order() {
        let op = SparsePauliOp::from_labels([("ZI", 1.0), ("IZ", 2.0), ("ZI", 3.0), ("XX", 0.0)])
            .unwrap()
            .simplify(DEFAULT_ATOL);
        let labels: Vec<String> = op.iter().map(|(p, _)| p.label()).collect();
        assert_eq!(labels, vec!["ZI", "IZ"]);
        assert_abs_diff_eq!(op.terms()[0].1.re, 4.0);
    }

    #[test]
    fn test_compose_cancels_terms() {
        // (X + Y)(X - Y) = XX - XY + YX - YY = -2iZ
        let a = SparsePauliOp::from_labels([("X", 1.0), ("Y", 1.0)]).unwrap();
        let b = SparsePauliOp::from_labels([("X", 1.0), ("Y", -1.0)]).unwrap();
        let c = a.compose(&b).unwrap();
        assert_eq!(c.num_terms(), 1);
        assert_eq!(c.terms()[0].0.label(), "Z");
        assert_abs_diff_eq!(c.terms()[0].1.im, -2.0);
        assert!(!c.is_hermitian(1e-12));
    }

    #[test]
    fn test_adjoint_and_hermiticity() {
        let op = SparsePauliOp::from_labels([("XY", 0.25), ("ZZ", -0.5)]).unwrap();
        assert!(op.is_hermitian(1e-12));
        let anti = op.scale(Complex64::i());
        assert_eq!(anti.adjoint(), op.scale(-Complex64::i()));
    }

    #[test]
    fn test_add_size_mismatch() {
        let a = SparsePauliOp::identity(2, 1.0);
        let b = SparsePauliOp::identity(3, 1.0);
        assert!(a.add(&b).is_err());
    }
}
