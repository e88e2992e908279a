//! Single-qubit Paulis and dense Pauli strings.
//!
//! A [`PauliString`] stores one [`Pauli`] per qubit, indexed by qubit. Labels
//! follow the little-endian convention: the rightmost character of
//! `"XIZY"` acts on qubit 0.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{OpError, OpResult};

/// A single Pauli operator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Pauli {
    /// Identity operator.
    #[default]
    I,
    /// Pauli-X operator.
    X,
    /// Pauli-Y operator.
    Y,
    /// Pauli-Z operator.
    Z,
}

impl Pauli {
    /// Get the name of this Pauli operator.
    pub fn name(&self) -> &'static str {
        match self {
            Pauli::I => "I",
            Pauli::X => "X",
            Pauli::Y => "Y",
            Pauli::Z => "Z",
        }
    }

    /// Parse a Pauli from its label character.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(Pauli::I),
            'X' => Some(Pauli::X),
            'Y' => Some(Pauli::Y),
            'Z' => Some(Pauli::Z),
            _ => None,
        }
    }

    /// Product `self · other`, returned as `(phase, pauli)`.
    pub fn compose(self, other: Pauli) -> (Complex64, Pauli) {
        let one = Complex64::new(1.0, 0.0);
        let i = Complex64::i();
        match (self, other) {
            (Pauli::I, p) | (p, Pauli::I) => (one, p),
            (Pauli::X, Pauli::X) | (Pauli::Y, Pauli::Y) | (Pauli::Z, Pauli::Z) => (one, Pauli::I),
            (Pauli::X, Pauli::Y) => (i, Pauli::Z),
            (Pauli::Y, Pauli::X) => (-i, Pauli::Z),
            (Pauli::Y, Pauli::Z) => (i, Pauli::X),
            (Pauli::Z, Pauli::Y) => (-i, Pauli::X),
            (Pauli::Z, Pauli::X) => (i, Pauli::Y),
            (Pauli::X, Pauli::Z) => (-i, Pauli::Y),
        }
    }
}

impl std::fmt::Display for Pauli {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A tensor product of Paulis over a fixed number of qubits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PauliString {
    paulis: Vec<Pauli>,
}

impl PauliString {
    /// The identity string on `num_qubits` qubits.
    pub fn identity(num_qubits: usize) -> Self {
        Self {
            paulis: vec![Pauli::I; num_qubits],
        }
    }

    /// Build a string from `(qubit, pauli)` pairs; unlisted qubits are identity.
    pub fn from_ops(
        num_qubits: usize,
        ops: impl IntoIterator<Item = (usize, Pauli)>,
    ) -> OpResult<Self> {
        let mut paulis = vec![Pauli::I; num_qubits];
        for (qubit, pauli) in ops {
            let slot = paulis
                .get_mut(qubit)
                .ok_or(OpError::QubitOutOfRange { qubit, num_qubits })?;
            *slot = pauli;
        }
        Ok(Self { paulis })
    }

    /// Parse a little-endian label such as `"IZXY"`.
    pub fn from_label(label: &str) -> OpResult<Self> {
        let paulis = label
            .chars()
            .rev()
            .map(|c| Pauli::from_char(c).ok_or_else(|| OpError::InvalidLabel(label.to_string())))
            .collect::<OpResult<Vec<Pauli>>>()?;
        Ok(Self { paulis })
    }

    /// Number of qubits this string acts on.
    pub fn num_qubits(&self) -> usize {
        self.paulis.len()
    }

    /// The Pauli acting on `qubit`.
    pub fn get(&self, qubit: usize) -> Pauli {
        self.paulis.get(qubit).copied().unwrap_or(Pauli::I)
    }

    /// All Paulis, indexed by qubit.
    pub fn paulis(&self) -> &[Pauli] {
        &self.paulis
    }

    /// Iterate over the non-identity `(qubit, pauli)` pairs.
    pub fn ops(&self) -> impl Iterator<Item = (usize, Pauli)> + '_ {
        self.paulis
            .iter()
            .enumerate()
            .filter(|(_, p)| **p != Pauli::I)
            .map(|(q, p)| (q, *p))
    }

    /// Number of non-identity factors.
    pub fn weight(&self) -> usize {
        self.ops().count()
    }

    /// Check if this is the identity string.
    pub fn is_identity(&self) -> bool {
        self.paulis.iter().all(|p| *p == Pauli::I)
    }

    /// Product `self · other` as `(phase, string)`.
    pub fn compose(&self, other: &PauliString) -> OpResult<(Complex64, PauliString)> {
        if self.num_qubits() != other.num_qubits() {
            return Err(OpError::QubitCountMismatch {
                left: self.num_qubits(),
                right: other.num_qubits(),
            });
        }
        let mut phase = Complex64::new(1.0, 0.0);
        let paulis = self
            .paulis
            .iter()
            .zip(&other.paulis)
            .map(|(a, b)| {
                let (factor, p) = a.compose(*b);
                phase *= factor;
                p
            })
            .collect();
        Ok((phase, PauliString { paulis }))
    }

    /// Whether the two strings commute.
    pub fn commutes_with(&self, other: &PauliString) -> bool {
        let anticommuting = self
            .paulis
            .iter()
            .zip(&other.paulis)
            .filter(|(a, b)| **a != Pauli::I && **b != Pauli::I && a != b)
            .count();
        anticommuting % 2 == 0
    }

    /// Apply the string to the computational basis state `|index⟩`.
    ///
    /// Returns the index of the resulting basis state and the accumulated phase.
    pub fn apply_to_basis(&self, index: usize) -> (usize, Complex64) {
        let mut new_index = index;
        let mut phase = Complex64::new(1.0, 0.0);

        for (qubit, pauli) in self.ops() {
            let bit = (index >> qubit) & 1;

            match pauli {
                Pauli::I => {}
                Pauli::X => {
                    new_index ^= 1 << qubit;
                }
                Pauli::Y => {
                    new_index ^= 1 << qubit;
                    if bit == 0 {
                        phase *= Complex64::new(0.0, 1.0);
                    } else {
                        phase *= Complex64::new(0.0, -1.0);
                    }
                }
                Pauli::Z => {
                    if bit == 1 {
                        phase = -phase;
                    }
                }
            }
        }

        (new_index, phase)
    }

    /// Little-endian label, qubit 0 rightmost.
    pub fn label(&self) -> String {
        self.paulis.iter().rev().map(|p| p.name()).collect()
    }
}

impl std::fmt::Display for PauliString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
