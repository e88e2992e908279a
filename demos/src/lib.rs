//! Ground-state demo suite.
//!
//! Shared helpers for the demo binaries:
//!
//! - **demo-ground-state**: solve one problem with a configurable pipeline
//! - **demo-compare**: exact diagonalization against UCCSD-VQE on the same problem

use std::path::Path;

use anyhow::Context;
use console::style;
use groundstate_algorithms::{
    GroundStateEigensolver, GroundStateResult, OptimizerConfig, PipelineConfig, SolverConfig,
};
use groundstate_chem::{molecules, ElectronicStructureDriver, ElectronicStructureProblem, IntegralDriver};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Install the log subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load a built-in molecule by name, or integral data from a YAML/JSON file.
pub fn load_problem(molecule: &str, file: Option<&Path>) -> anyhow::Result<ElectronicStructureProblem> {
    let driver = match file {
        Some(path) => IntegralDriver::from_path(path)
            .with_context(|| format!("failed to load molecule file {}", path.display()))?,
        None => IntegralDriver::new(molecules::builtin(molecule)?),
    };
    Ok(driver.run()?)
}

/// Solve `problem`, showing a progress bar while a VQE optimizes.
pub fn solve_with_progress(
    config: &PipelineConfig,
    problem: &ElectronicStructureProblem,
) -> anyhow::Result<GroundStateResult> {
    config.validate()?;
    let SolverConfig::Vqe(vqe_config) = &config.solver else {
        return Ok(config.build(problem)?.solve(problem)?);
    };

    let mapper = config.mapper.build(problem.num_spin_orbitals());
    let vqe = vqe_config.build(&*mapper, problem)?;
    let budget = evaluation_budget(&vqe_config.optimizer, vqe.ansatz().num_parameters());
    info!(
        ansatz = vqe.ansatz().name(),
        parameters = vqe.ansatz().num_parameters(),
        budget,
        "starting variational optimization"
    );

    let pb = create_progress_bar(budget, "Optimizing...");
    let bar = pb.clone();
    let vqe = vqe.with_callback(move |evaluation, _, energy| {
        bar.set_position(evaluation as u64);
        bar.set_message(format!("E = {energy:.8} Ha"));
    });
    let result = GroundStateEigensolver::new(mapper, vqe).solve(problem);
    pb.finish_with_message("Optimization complete");
    Ok(result?)
}

/// Upper bound on objective evaluations for a progress bar.
pub fn evaluation_budget(optimizer: &OptimizerConfig, num_parameters: usize) -> u64 {
    let evaluations = match optimizer {
        OptimizerConfig::NelderMead(nm) => nm.maxfev,
        OptimizerConfig::Spsa(spsa) => 1 + 3 * spsa.maxiter,
        OptimizerConfig::GradientDescent(gd) => 1 + gd.maxiter * (2 * num_parameters + 1),
    };
    evaluations as u64
}

/// Create a progress bar for demo operations.
pub fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

/// Print a demo header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {}", title)).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a demo section.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {}", title)).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a result line.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{}:", label)).dim(), value);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("ℹ").blue(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("!").yellow().bold(), message);
}

/// Print a report block, indented.
pub fn print_report(report: &str) {
    for line in report.lines() {
        println!("  {line}");
    }
}
