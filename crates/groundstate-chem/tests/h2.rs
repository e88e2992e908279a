//! H2 / STO-3G problem construction and mapping.

use approx::assert_abs_diff_eq;
use groundstate_chem::observables::{ANGULAR_MOMENTUM, DIPOLE_COMPONENTS, MAGNETIZATION, PARTICLE_NUMBER};
use groundstate_chem::{molecules, ElectronicStructureDriver, IntegralDriver};
use groundstate_ops::{JordanWignerMapper, ParityMapper, PauliString, QubitMapper};

// ---------------------------------------------------------------------------
// Problem
// ---------------------------------------------------------------------------

#[test]
fn test_h2_problem_metadata() {
    let problem = IntegralDriver::h2_sto3g().run().unwrap();
    assert_eq!(problem.name(), "H2");
    assert_eq!(problem.num_spatial_orbitals(), 2);
    assert_eq!(problem.num_spin_orbitals(), 4);
    assert_abs_diff_eq!(problem.nuclear_repulsion_energy(), 0.7199689944489797);
    assert_abs_diff_eq!(problem.reference_energy().unwrap(), -1.1169989967540033, epsilon = 1e-10);
}

#[test]
fn test_h2_observable_order() {
    let problem = IntegralDriver::h2_sto3g().run().unwrap();
    let names: Vec<&str> = problem.aux_operators().iter().map(|(n, _)| n.as_str()).collect();
    let mut expected = vec![PARTICLE_NUMBER, ANGULAR_MOMENTUM, MAGNETIZATION];
    expected.extend(DIPOLE_COMPONENTS);
    assert_eq!(names, expected);
}

#[test]
fn test_h2_nuclear_dipole() {
    let problem = IntegralDriver::h2_sto3g().run().unwrap();
    let dipole = problem.nuclear_dipole().unwrap();
    assert_abs_diff_eq!(dipole[2], molecules::H2_BOND_LENGTH_BOHR);
    assert_eq!(dipole[0], 0.0);
}

// ---------------------------------------------------------------------------
// Mapping
// ---------------------------------------------------------------------------

#[test]
fn test_h2_jordan_wigner_hamiltonian() {
    let problem = IntegralDriver::h2_sto3g().run().unwrap();
    let qubit_op = JordanWignerMapper::new(4).map(problem.hamiltonian()).unwrap();

    assert_eq!(qubit_op.num_qubits(), 4);
    assert_eq!(qubit_op.num_terms(), 15);
    assert!(qubit_op.is_hermitian(1e-12));
    assert_abs_diff_eq!(qubit_op.identity_coefficient().re, -0.8105479805373266, epsilon = 1e-9);

    // n_0 n_2 coupling between the two spin blocks of orbital 0
    let z0z2 = PauliString::from_label("IZIZ").unwrap();
    assert_abs_diff_eq!(qubit_op.coefficient(&z0z2).re, 0.6757101548035165 / 4.0, epsilon = 1e-12);
}

#[test]
fn test_h2_parity_hamiltonian() {
    let problem = IntegralDriver::h2_sto3g().run().unwrap();
    let jw = JordanWignerMapper::new(4).map(problem.hamiltonian()).unwrap();
    let parity = ParityMapper::new(4).map(problem.hamiltonian()).unwrap();

    assert_eq!(parity.num_terms(), jw.num_terms());
    assert_abs_diff_eq!(
        parity.identity_coefficient().re,
        jw.identity_coefficient().re,
        epsilon = 1e-12
    );
}

#[test]
fn test_h2_particle_number_maps_to_z_sum() {
    let problem = IntegralDriver::h2_sto3g().run().unwrap();
    let mapped = JordanWignerMapper::new(4).map_all(problem.aux_operators()).unwrap();
    let (name, number) = &mapped[0];
    assert_eq!(name, PARTICLE_NUMBER);
    // N = 2·I − ½ Σ Z_p
    assert_eq!(number.num_terms(), 5);
    assert_abs_diff_eq!(number.identity_coefficient().re, 2.0);
}

#[test]
fn test_hubbard_problem() {
    let problem = IntegralDriver::new(molecules::hubbard_dimer(1.0, 4.0)).run().unwrap();
    assert_eq!(problem.num_spin_orbitals(), 4);
    assert_eq!(problem.nuclear_dipole(), None);
    assert_eq!(problem.aux_operators().len(), 3);
    // Hartree-Fock: both electrons on site 0 pay U
    assert_abs_diff_eq!(problem.reference_energy().unwrap(), 4.0);
}
