//! Fermion-to-qubit mappers.
//!
//! Every mapper in this module is described by a Pauli table: for each mode
//! `j` a pair of Pauli strings `(A_j, B_j)` such that
//!
//! ```text
//! a†_j = ½ (A_j − i·B_j)
//! a_j  = ½ (A_j + i·B_j)
//! ```
//!
//! Mapping a [`FermionicOp`] substitutes these sums for every ladder
//! operator, multiplies the products out and simplifies. Hamiltonian and
//! auxiliary observables mapped by the same mapper share one encoding.

mod jordan_wigner;
mod parity;

pub use jordan_wigner::JordanWignerMapper;
pub use parity::ParityMapper;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{OpError, OpResult};
use crate::fermionic::{FermionicOp, LadderKind};
use crate::pauli::PauliString;
use crate::sparse_pauli::{DEFAULT_ATOL, SparsePauliOp};

/// Trait for fermion-to-qubit encodings.
pub trait QubitMapper: std::fmt::Debug + Send + Sync {
    /// Short name of the encoding.
    fn name(&self) -> &'static str;

    /// Number of fermionic modes (and qubits) this mapper is configured for.
    fn num_modes(&self) -> usize;

    /// Pauli pair `(A_j, B_j)` for every mode.
    fn pauli_table(&self) -> &[(PauliString, PauliString)];

    /// Translate a fermionic occupation bitstring into the computational
    /// basis bitstring that represents it under this encoding.
    fn encode_occupation(&self, occupation: &[bool]) -> OpResult<Vec<bool>>;

    /// Map a fermionic operator into qubit space.
    ///
    /// Fails with [`OpError::EncodingMismatch`] if the operator's register
    /// length differs from [`QubitMapper::num_modes`].
    fn map(&self, op: &FermionicOp) -> OpResult<SparsePauliOp> {
        let mapped = map_with_table(self.num_modes(), self.pauli_table(), op)?;
        debug!(
            mapper = self.name(),
            fermionic_terms = op.num_terms(),
            qubit_terms = mapped.num_terms(),
            "mapped operator"
        );
        Ok(mapped)
    }

    /// Map a list of named operators with the same encoding.
    fn map_all(&self, ops: &[(String, FermionicOp)]) -> OpResult<Vec<(String, SparsePauliOp)>> {
        ops.iter()
            .map(|(name, op)| -> OpResult<(String, SparsePauliOp)> {
                Ok((name.clone(), self.map(op)?))
            })
            .collect()
    }
}

impl<T: QubitMapper + ?Sized> QubitMapper for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn num_modes(&self) -> usize {
        (**self).num_modes()
    }

    fn pauli_table(&self) -> &[(PauliString, PauliString)] {
        (**self).pauli_table()
    }

    fn encode_occupation(&self, occupation: &[bool]) -> OpResult<Vec<bool>> {
        (**self).encode_occupation(occupation)
    }

    fn map(&self, op: &FermionicOp) -> OpResult<SparsePauliOp> {
        (**self).map(op)
    }

    fn map_all(&self, ops: &[(String, FermionicOp)]) -> OpResult<Vec<(String, SparsePauliOp)>> {
        (**self).map_all(ops)
    }
}

/// The recognized encodings, for configuration files and CLIs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapperKind {
    /// One qubit per spin-orbital, occupation stored directly.
    #[default]
    JordanWigner,
    /// One qubit per spin-orbital, prefix parities stored.
    Parity,
}

impl MapperKind {
    /// Build a mapper of this kind for `num_modes` modes.
    pub fn build(self, num_modes: usize) -> Box<dyn QubitMapper> {
        match self {
            MapperKind::JordanWigner => Box::new(JordanWignerMapper::new(num_modes)),
            MapperKind::Parity => Box::new(ParityMapper::new(num_modes)),
        }
    }
}

impl std::str::FromStr for MapperKind {
    type Err = OpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "jordan_wigner" | "jw" => Ok(MapperKind::JordanWigner),
            "parity" => Ok(MapperKind::Parity),
            _ => Err(OpError::InvalidLabel(s.to_string())),
        }
    }
}

fn check_occupation(num_modes: usize, occupation: &[bool]) -> OpResult<()> {
    if occupation.len() != num_modes {
        return Err(OpError::EncodingMismatch {
            expected: num_modes,
            found: occupation.len(),
        });
    }
    Ok(())
}

fn map_with_table(
    num_modes: usize,
    table: &[(PauliString, PauliString)],
    op: &FermionicOp,
) -> OpResult<SparsePauliOp> {
    if op.register_length() != num_modes {
        return Err(OpError::EncodingMismatch {
            expected: num_modes,
            found: op.register_length(),
        });
    }

    let half = Complex64::new(0.5, 0.0);
    let half_i = Complex64::new(0.0, 0.5);
    let ladders: Vec<[SparsePauliOp; 2]> = table
        .iter()
        .map(|(a, b)| -> OpResult<[SparsePauliOp; 2]> {
            let create = SparsePauliOp::from_terms(num_modes, [(a.clone(), half), (b.clone(), -half_i)])?;
            let annihilate = SparsePauliOp::from_terms(num_modes, [(a.clone(), half), (b.clone(), half_i)])?;
            Ok([create, annihilate])
        })
        .collect::<OpResult<Vec<_>>>()?;

    let mut terms = Vec::new();
    for term in op.terms() {
        let mut product = SparsePauliOp::identity(num_modes, 1.0);
        for ladder in &term.ladders {
            let slot = match ladder.kind {
                LadderKind::Create => 0,
                LadderKind::Annihilate => 1,
            };
            product = product.compose(&ladders[ladder.mode][slot])?;
            if product.is_zero() {
                break;
            }
        }
        let coeff = Complex64::new(term.coeff, 0.0);
        terms.extend(product.terms().iter().map(|(p, c)| (p.clone(), c * coeff)));
    }

    Ok(SparsePauliOp::from_terms(num_modes, terms)?.simplify(DEFAULT_ATOL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapper_kind_parse() {
        assert_eq!("jw".parse::<MapperKind>().unwrap(), MapperKind::JordanWigner);
        assert_eq!("Jordan-Wigner".parse::<MapperKind>().unwrap(), MapperKind::JordanWigner);
        assert_eq!("parity".parse::<MapperKind>().unwrap(), MapperKind::Parity);
        assert!("bravyi".parse::<MapperKind>().is_err());
    }

    #[test]
    fn test_boxed_mapper_delegates() {
        let mapper = MapperKind::Parity.build(3);
        assert_eq!(mapper.name(), "parity");
        assert_eq!(mapper.num_modes(), 3);
        assert_eq!(mapper.pauli_table().len(), 3);
    }

    #[test]
    fn test_encoding_mismatch_returns_no_operator() {
        let mapper = JordanWignerMapper::new(4);
        let op = FermionicOp::number(2);
        let err = mapper.map(&op).unwrap_err();
        assert_eq!(err, OpError::EncodingMismatch { expected: 4, found: 2 });
    }

    #[test]
    fn test_pauli_exclusion() {
        // a†_0 a†_0 = 0
        let mapper = JordanWignerMapper::new(2);
        let op = FermionicOp::from_labels(2, [("+_0 +_0", 1.0)]).unwrap();
        assert!(mapper.map(&op).unwrap().is_zero());
    }
}
