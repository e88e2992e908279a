//! Ground-State Eigensolver Demo
//!
//! Maps a molecular Hamiltonian to qubits, solves for its ground state and
//! prints the formatted report.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use groundstate_algorithms::{
    AnsatzConfig, EstimatorConfig, GradientDescent, InitialPoint, NelderMead, OptimizerConfig, PipelineConfig,
    ResultFormatter, SolverConfig, Spsa, VqeConfig,
};
use groundstate_chem::molecules;
use groundstate_demos::{
    init_tracing, load_problem, print_header, print_info, print_report, print_result, print_section,
    print_success, print_warning, solve_with_progress,
};
use groundstate_ops::MapperKind;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MapperArg {
    JordanWigner,
    Parity,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SolverArg {
    Exact,
    Vqe,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AnsatzArg {
    Uccsd,
    TwoLocal,
    EfficientSu2,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OptimizerArg {
    NelderMead,
    Spsa,
    GradientDescent,
}

#[derive(Parser, Debug)]
#[command(name = "demo-ground-state")]
#[command(about = "Compute a molecular ground state with an exact or variational solver")]
struct Args {
    /// Built-in system to solve (h2, hubbard)
    #[arg(short, long, default_value = "h2")]
    molecule: String,

    /// Integral file (YAML or JSON) to load instead of a built-in system
    #[arg(long)]
    molecule_file: Option<PathBuf>,

    /// Pipeline configuration file (YAML or JSON); overrides the solver flags
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fermion-to-qubit mapping
    #[arg(long, value_enum, default_value = "jordan-wigner")]
    mapper: MapperArg,

    /// Eigensolver
    #[arg(long, value_enum, default_value = "exact")]
    solver: SolverArg,

    /// Ansatz for the variational solver
    #[arg(long, value_enum, default_value = "uccsd")]
    ansatz: AnsatzArg,

    /// Ansatz repetitions
    #[arg(long, default_value = "1")]
    reps: usize,

    /// Classical optimizer for the variational solver
    #[arg(long, value_enum, default_value = "nelder-mead")]
    optimizer: OptimizerArg,

    /// Maximum optimizer iterations
    #[arg(long)]
    maxiter: Option<usize>,

    /// Shots per Pauli term (exact expectation values when omitted)
    #[arg(short, long)]
    shots: Option<u32>,

    /// Seed for shot noise, SPSA and random initial points
    #[arg(long)]
    seed: Option<u64>,

    /// Only accept eigenstates with the problem's electron count
    #[arg(long)]
    filter_particle_number: bool,

    /// Decimals in the report
    #[arg(long, default_value = "12")]
    precision: usize,

    /// Write the result as JSON to this file
    #[arg(long)]
    json: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn config_from_args(args: &Args) -> PipelineConfig {
    let mapper = match args.mapper {
        MapperArg::JordanWigner => MapperKind::JordanWigner,
        MapperArg::Parity => MapperKind::Parity,
    };

    let solver = match args.solver {
        SolverArg::Exact => SolverConfig::Exact {
            max_qubits: groundstate_algorithms::eigensolvers::DEFAULT_MAX_QUBITS,
            filter_particle_number: args.filter_particle_number,
        },
        SolverArg::Vqe => {
            let ansatz = match args.ansatz {
                AnsatzArg::Uccsd => AnsatzConfig::Uccsd {
                    reps: args.reps,
                    hartree_fock: true,
                },
                AnsatzArg::TwoLocal => AnsatzConfig::TwoLocal {
                    reps: args.reps,
                    hartree_fock: false,
                },
                AnsatzArg::EfficientSu2 => AnsatzConfig::EfficientSu2 {
                    reps: args.reps,
                    hartree_fock: false,
                },
            };
            let optimizer = match args.optimizer {
                OptimizerArg::NelderMead => {
                    let mut nm = NelderMead::new();
                    if let Some(maxiter) = args.maxiter {
                        nm = nm.with_maxiter(maxiter).with_maxfev(2 * maxiter);
                    }
                    OptimizerConfig::NelderMead(nm)
                }
                OptimizerArg::Spsa => {
                    let mut spsa = Spsa::new();
                    spsa.seed = args.seed;
                    if let Some(maxiter) = args.maxiter {
                        spsa = spsa.with_maxiter(maxiter);
                    }
                    OptimizerConfig::Spsa(spsa)
                }
                OptimizerArg::GradientDescent => {
                    let mut gd = GradientDescent::new();
                    if let Some(maxiter) = args.maxiter {
                        gd = gd.with_maxiter(maxiter);
                    }
                    OptimizerConfig::GradientDescent(gd)
                }
            };
            // hardware-efficient ansatzes are stuck at |0…0⟩ from zeros
            let initial_point = match args.ansatz {
                AnsatzArg::Uccsd => InitialPoint::Zeros,
                _ => InitialPoint::Random { seed: args.seed },
            };
            SolverConfig::Vqe(VqeConfig {
                ansatz,
                optimizer,
                estimator: EstimatorConfig {
                    shots: args.shots,
                    seed: args.seed,
                },
                initial_point,
            })
        }
    };

    PipelineConfig { mapper, solver }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    print_header("Ground-State Eigensolver Demo");

    let problem = load_problem(&args.molecule, args.molecule_file.as_deref())?;
    let config = match &args.config {
        Some(path) => PipelineConfig::from_path(path)
            .with_context(|| format!("failed to load pipeline config {}", path.display()))?,
        None => config_from_args(&args),
    };

    print_section("Problem Setup");
    print_result("System", problem.name());
    print_result("Spatial orbitals", problem.num_spatial_orbitals());
    print_result("Spin orbitals (qubits)", problem.num_spin_orbitals());
    let (alpha, beta) = problem.num_particles();
    print_result("Electrons (α, β)", format!("({alpha}, {beta})"));
    print_result("Hamiltonian terms", problem.hamiltonian().num_terms());
    print_result("Auxiliary operators", problem.aux_operators().len());
    if let Some(reference) = problem.reference_energy() {
        print_result("Reference energy", format!("{reference:.6} Hartree"));
    }

    print_section("Pipeline");
    match config.to_yaml() {
        Ok(yaml) => print_report(&yaml),
        Err(e) => print_warning(&format!("could not render configuration: {e}")),
    }

    print_section("Solving");
    let result = solve_with_progress(&config, &problem)?;

    print_section("Result");
    print_report(&ResultFormatter::new().with_precision(args.precision).format(&result));

    let statistics = result.statistics();
    if let Some(optimizer) = &statistics.optimizer {
        print_section("Optimization");
        print_result("Optimizer", optimizer);
        print_result("Iterations", statistics.iterations);
        print_result("Energy evaluations", statistics.evaluations);
        print_result("Converged", if result.is_converged() { "Yes" } else { "No" });

        let history = &statistics.history;
        if !history.is_empty() {
            let show_points = 10.min(history.len());
            let step = (history.len() / show_points).max(1);
            for (i, chunk) in history.chunks(step).enumerate().take(show_points) {
                if let Some(&energy) = chunk.first() {
                    println!("  Iteration {:4}: {:.8} Ha", i * step, energy + result.correction());
                }
            }
        }
    }

    if let Some(exact) = molecules::exact_ground_state_energy(problem.name()) {
        let error = (result.total_energy() - exact).abs();
        print_result("Error vs. exact", format!("{error:.2e} Hartree"));
    }

    if let Some(path) = &args.json {
        let json = serde_json::to_string_pretty(&result)?;
        std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
        print_info(&format!("Result written to {}", path.display()));
    }

    println!();
    if result.warnings().is_empty() {
        print_success("Ground-state calculation complete");
    } else {
        print_warning("Ground-state calculation finished with warnings");
    }
    Ok(())
}
