//! Ansatz circuits against chemistry Hamiltonians.

use approx::assert_abs_diff_eq;
use groundstate_chem::{ElectronicStructureDriver, IntegralDriver};
use groundstate_ops::{JordanWignerMapper, MapperKind, ParityMapper, QubitMapper, SparsePauliOp};
use groundstate_sim::ansatz::{efficient_su2, hartree_fock, two_local, uccsd};
use groundstate_sim::{Estimator, StatevectorEstimator};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Hartree-Fock reference
// ---------------------------------------------------------------------------

#[test]
fn test_hartree_fock_energy_both_encodings() {
    let problem = IntegralDriver::h2_sto3g().run().unwrap();
    let occupation = problem.hartree_fock_occupation();

    for kind in [MapperKind::JordanWigner, MapperKind::Parity] {
        let mapper = kind.build(4);
        let hamiltonian = mapper.map(problem.hamiltonian()).unwrap();
        let circuit = hartree_fock(mapper.as_ref(), &occupation).unwrap();
        let energy = StatevectorEstimator::new()
            .estimate(&circuit, &[], &hamiltonian)
            .unwrap();
        assert_abs_diff_eq!(energy.value, -1.836967991202983, epsilon = 1e-9);
    }
}

#[test]
fn test_hartree_fock_observables() {
    let problem = IntegralDriver::h2_sto3g().run().unwrap();
    let mapper = ParityMapper::new(4);
    let circuit = hartree_fock(&mapper, &problem.hartree_fock_occupation()).unwrap();
    let state = circuit.simulate(&[]).unwrap();

    let mapped = mapper.map_all(problem.aux_operators()).unwrap();
    let value = |name: &str| {
        let (_, op) = mapped.iter().find(|(n, _)| n == name).unwrap();
        state.expectation(op).unwrap()
    };
    assert_abs_diff_eq!(value("particle_number"), 2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(value("angular_momentum"), 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(value("magnetization"), 0.0, epsilon = 1e-12);
}

// ---------------------------------------------------------------------------
// UCCSD
// ---------------------------------------------------------------------------

#[test]
fn test_uccsd_double_excitation_lowers_energy() {
    let problem = IntegralDriver::h2_sto3g().run().unwrap();
    let mapper = JordanWignerMapper::new(4);
    let hamiltonian = mapper.map(problem.hamiltonian()).unwrap();
    let ansatz = hartree_fock(&mapper, &problem.hartree_fock_occupation())
        .unwrap()
        .compose(&uccsd(&mapper, 2, (1, 1), 1).unwrap())
        .unwrap();

    let estimator = StatevectorEstimator::new();
    let at = |theta: f64| {
        estimator
            .estimate(&ansatz, &[0.0, 0.0, theta], &hamiltonian)
            .unwrap()
            .value
    };
    let hf = at(0.0);
    // one of the two directions of the double excitation must go downhill
    assert!(at(0.05).min(at(-0.05)) < hf);
}

#[test]
fn test_uccsd_preserves_particle_number() {
    let problem = IntegralDriver::h2_sto3g().run().unwrap();
    let mapper = ParityMapper::new(4);
    let ansatz = hartree_fock(&mapper, &problem.hartree_fock_occupation())
        .unwrap()
        .compose(&uccsd(&mapper, 2, (1, 1), 1).unwrap())
        .unwrap();
    let number = mapper.map(&groundstate_chem::observables::particle_number(2)).unwrap();
    let est = StatevectorEstimator::new()
        .estimate(&ansatz, &[0.3, -0.2, 0.7], &number)
        .unwrap();
    assert_abs_diff_eq!(est.value, 2.0, epsilon = 1e-10);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_hardware_efficient_circuits_stay_normalized(
        params in proptest::collection::vec(-3.2f64..3.2, 16)
    ) {
        let tl = two_local(4, 3).unwrap();
        let su2 = efficient_su2(2, 3).unwrap();
        let a = tl.simulate(&params[..tl.num_parameters()]).unwrap();
        let b = su2.simulate(&params[..su2.num_parameters()]).unwrap();
        prop_assert!((a.norm_sqr() - 1.0).abs() < 1e-10);
        prop_assert!((b.norm_sqr() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn prop_expectation_bounded_by_lambda(
        params in proptest::collection::vec(-3.2f64..3.2, 6)
    ) {
        let op = SparsePauliOp::from_labels([("ZZ", 0.7), ("XI", -0.4), ("YY", 0.2)]).unwrap();
        let circuit = two_local(2, 2).unwrap();
        let est = StatevectorEstimator::new().estimate(&circuit, &params, &op).unwrap();
        prop_assert!(est.value.abs() <= op.lambda() + 1e-12);
    }
}
