//! The sample molecule and pipeline files shipped with the demos.

use std::path::Path;

use groundstate_algorithms::{PipelineConfig, SolverConfig};
use groundstate_chem::molecules;
use groundstate_demos::{load_problem, solve_with_progress};

#[test]
fn test_h2_file_matches_builtin() {
    let from_file = load_problem("ignored", Some(Path::new("molecules/h2_sto3g.yaml"))).unwrap();
    let builtin = load_problem("h2", None).unwrap();
    assert_eq!(from_file.name(), builtin.name());
    assert_eq!(from_file.hamiltonian(), builtin.hamiltonian());
    assert_eq!(from_file.aux_operators().len(), builtin.aux_operators().len());
    assert_eq!(from_file.nuclear_dipole(), builtin.nuclear_dipole());
}

#[test]
fn test_hubbard_file_solves() {
    let problem = load_problem("ignored", Some(Path::new("molecules/hubbard_dimer.json"))).unwrap();
    let config = PipelineConfig::from_path("configs/exact.yaml").unwrap();
    let result = solve_with_progress(&config, &problem).unwrap();
    let exact = molecules::exact_ground_state_energy("hubbard").unwrap();
    assert!((result.total_energy() - exact).abs() < 1e-10);
}

#[test]
fn test_sample_configs_are_valid() {
    for path in ["configs/exact.yaml", "configs/vqe_uccsd.yaml", "configs/vqe_spsa_shots.yaml"] {
        let config = PipelineConfig::from_path(path).unwrap();
        if path.contains("vqe") {
            assert!(matches!(config.solver, SolverConfig::Vqe(_)), "{path}");
        }
    }
}
