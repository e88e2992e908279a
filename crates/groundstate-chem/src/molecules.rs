//! Built-in molecular data.
//!
//! Integrals were generated once with an external electronic-structure code
//! and are stored here as input data.

use crate::driver::{Atom, DipoleData, MoleculeData};
use crate::error::{ChemError, ChemResult};
use crate::integrals::TwoBodyEntry;

/// Bond length of the built-in H2 geometry in bohr (0.735 Å).
pub const H2_BOND_LENGTH_BOHR: f64 = 1.388948701599941;

/// H2 molecule in the minimal STO-3G basis at 0.735 Å.
///
/// Two spatial orbitals (σg, σu), one alpha and one beta electron, four
/// qubits in either encoding.
///
/// Exact ground state energy: -1.137306036 Hartree
pub fn h2_sto3g() -> MoleculeData {
    let r = H2_BOND_LENGTH_BOHR;
    MoleculeData {
        name: "H2".to_string(),
        basis: Some("sto-3g".to_string()),
        num_alpha: 1,
        num_beta: 1,
        nuclear_repulsion_energy: 0.7199689944489797,
        reference_energy: Some(-1.1169989967540033),
        atoms: vec![
            Atom::new("H", 1.0, [0.0, 0.0, 0.0]),
            Atom::new("H", 1.0, [0.0, 0.0, r]),
        ],
        one_body: vec![
            vec![-1.2563390730032498, 0.0],
            vec![0.0, -0.4718960072811421],
        ],
        two_body: vec![
            TwoBodyEntry::new(0, 0, 0, 0, 0.6757101548035165),
            TwoBodyEntry::new(0, 0, 1, 1, 0.6645817302552968),
            TwoBodyEntry::new(0, 1, 0, 1, 0.18093119978423136),
            TwoBodyEntry::new(1, 1, 1, 1, 0.6985737227320185),
        ],
        dipole: Some(DipoleData {
            x: vec![vec![0.0; 2]; 2],
            y: vec![vec![0.0; 2]; 2],
            z: vec![
                vec![0.5 * r, -0.9278334638370213],
                vec![-0.9278334638370213, 0.5 * r],
            ],
            nuclear: None,
        }),
    }
}

/// Two-site Hubbard model at half filling.
///
/// `t` is the hopping amplitude, `u` the on-site repulsion. Each site is one
/// spatial orbital.
pub fn hubbard_dimer(t: f64, u: f64) -> MoleculeData {
    MoleculeData {
        name: "hubbard_dimer".to_string(),
        basis: None,
        num_alpha: 1,
        num_beta: 1,
        nuclear_repulsion_energy: 0.0,
        reference_energy: None,
        atoms: Vec::new(),
        one_body: vec![vec![0.0, -t], vec![-t, 0.0]],
        two_body: vec![
            TwoBodyEntry::new(0, 0, 0, 0, u),
            TwoBodyEntry::new(1, 1, 1, 1, u),
        ],
        dipole: None,
    }
}

/// Look up a built-in system by name.
pub fn builtin(name: &str) -> ChemResult<MoleculeData> {
    match name.to_lowercase().as_str() {
        "h2" | "h2_sto3g" => Ok(h2_sto3g()),
        "hubbard" | "hubbard_dimer" => Ok(hubbard_dimer(1.0, 4.0)),
        _ => Err(ChemError::UnknownMolecule(name.to_string())),
    }
}

/// Get the exact ground state energy for a built-in system.
pub fn exact_ground_state_energy(name: &str) -> Option<f64> {
    match name.to_lowercase().as_str() {
        "h2" | "h2_sto3g" => Some(-1.1373060357530203),
        // 2 - sqrt(8) for t = 1, U = 4
        "hubbard" | "hubbard_dimer" => Some(-0.8284271247461904),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_h2_data() {
        let h2 = h2_sto3g();
        assert_eq!(h2.one_body.len(), 2);
        assert_eq!(h2.two_body.len(), 4);
        assert_eq!(h2.nuclear_dipole(), Some([0.0, 0.0, H2_BOND_LENGTH_BOHR]));
    }

    #[test]
    fn test_builtin_lookup() {
        assert_eq!(builtin("H2").unwrap().name, "H2");
        assert_eq!(builtin("hubbard").unwrap().one_body[0][1], -1.0);
        assert!(matches!(builtin("lih"), Err(ChemError::UnknownMolecule(_))));
    }

    #[test]
    fn test_exact_energies() {
        assert!(exact_ground_state_energy("h2").is_some());
        assert_eq!(exact_ground_state_energy("unknown"), None);
    }
}
