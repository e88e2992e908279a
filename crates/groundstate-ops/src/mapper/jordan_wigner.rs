//! Jordan-Wigner encoding.

use super::{QubitMapper, check_occupation};
use crate::error::OpResult;
use crate::pauli::{Pauli, PauliString};

/// Jordan-Wigner mapper: qubit `j` holds the occupation of mode `j`.
///
/// `A_j = Z_0 ⋯ Z_{j-1} X_j`, `B_j = Z_0 ⋯ Z_{j-1} Y_j`.
#[derive(Debug, Clone)]
pub struct JordanWignerMapper {
    table: Vec<(PauliString, PauliString)>,
}

impl JordanWignerMapper {
    /// Create a mapper for `num_modes` spin-orbitals.
    pub fn new(num_modes: usize) -> Self {
        let table = (0..num_modes)
            .map(|j| {
                let mut a = vec![Pauli::Z; j];
                a.push(Pauli::X);
                a.resize(num_modes, Pauli::I);
                let mut b = vec![Pauli::Z; j];
                b.push(Pauli::Y);
                b.resize(num_modes, Pauli::I);
                (to_string(a), to_string(b))
            })
            .collect();
        Self { table }
    }
}

fn to_string(paulis: Vec<Pauli>) -> PauliString {
    let n = paulis.len();
    // Every index is below n, so construction cannot fail.
    PauliString::from_ops(n, paulis.into_iter().enumerate())
        .unwrap_or_else(|_| PauliString::identity(n))
}

impl QubitMapper for JordanWignerMapper {
    fn name(&self) -> &'static str {
        "jordan_wigner"
    }

    fn num_modes(&self) -> usize {
        self.table.len()
    }

    fn pauli_table(&self) -> &[(PauliString, PauliString)] {
        &self.table
    }

    fn encode_occupation(&self, occupation: &[bool]) -> OpResult<Vec<bool>> {
        check_occupation(self.num_modes(), occupation)?;
        Ok(occupation.to_vec())
    }
}
