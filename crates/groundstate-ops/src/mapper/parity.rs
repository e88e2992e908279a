//! Parity encoding.

use super::{QubitMapper, check_occupation};
use crate::error::OpResult;
use crate::pauli::{Pauli, PauliString};

/// Parity mapper: qubit `j` holds the parity of modes `0..=j`.
///
/// `A_j = Z_{j-1} X_j X_{j+1} ⋯ X_{n-1}`, `B_j = Y_j X_{j+1} ⋯ X_{n-1}`.
#[derive(Debug, Clone)]
pub struct ParityMapper {
    table: Vec<(PauliString, PauliString)>,
}

impl ParityMapper {
    /// Create a mapper for `num_modes` spin-orbitals.
    pub fn new(num_modes: usize) -> Self {
        let table = (0..num_modes)
            .map(|j| {
                let mut a = vec![Pauli::I; num_modes];
                let mut b = vec![Pauli::I; num_modes];
                if j > 0 {
                    a[j - 1] = Pauli::Z;
                }
                a[j] = Pauli::X;
                b[j] = Pauli::Y;
                for k in j + 1..num_modes {
                    a[k] = Pauli::X;
                    b[k] = Pauli::X;
                }
                (to_string(&a), to_string(&b))
            })
            .collect();
        Self { table }
    }
}

fn to_string(paulis: &[Pauli]) -> PauliString {
    let n = paulis.len();
    PauliString::from_ops(n, paulis.iter().copied().enumerate())
        .unwrap_or_else(|_| PauliString::identity(n))
}

impl QubitMapper for ParityMapper {
    fn name(&self) -> &'static str {
        "parity"
    }

    fn num_modes(&self) -> usize {
        self.table.len()
    }

    fn pauli_table(&self) -> &[(PauliString, PauliString)] {
        &self.table
    }

    fn encode_occupation(&self, occupation: &[bool]) -> OpResult<Vec<bool>> {
        check_occupation(self.num_modes(), occupation)?;
        let mut parity = false;
        Ok(occupation
            .iter()
            .map(|&occupied| {
                parity ^= occupied;
                parity
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fermionic::FermionicOp;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_table() {
        let mapper = ParityMapper::new(4);
        let (a, b) = &mapper.pauli_table()[1];
        assert_eq!(a.label(), "XXXZ");
        assert_eq!(a.num_qubits(), 4);
        assert_eq!(a.paulis()[0], Pauli::Z);
        assert_eq!(b.label(), "XXYI");
    }

    #[test]
    fn test_number_operator_is_local_parity() {
        // n_1 = ½ (I - Z_0 Z_1) under the parity encoding
        let mapper = ParityMapper::new(2);
        let op = FermionicOp::one_body(2, 1, 1, 1.0).unwrap();
        let q = mapper.map(&op).unwrap();
        let zz = PauliString::from_label("ZZ").unwrap();
        assert_abs_diff_eq!(q.identity_coefficient().re, 0.5);
        assert_abs_diff_eq!(q.coefficient(&zz).re, -0.5);
        assert_eq!(q.num_terms(), 2);
    }

    #[test]
    fn test_occupation_prefix_parity() {
        let mapper = ParityMapper::new(4);
        let encoded = mapper.encode_occupation(&[true, false, true, false]).unwrap();
        assert_eq!(encoded, vec![true, true, false, false]);
    }
}
