use std::path::PathBuf;

use clap::Parser;
use shallow_water_fv::{
    SolverError,
    initialization::{initialize_params_by_file, initialize_physics},
    io::write_to_csv::write_to_csv,
    solver::Solver,
};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

/// Explicit finite-volume shallow water solver
#[derive(Parser)]
#[command(name = "shallow-water-fv")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "1D shallow water finite-volume solver", long_about = None)]
struct Cli {
    /// JSON parameter file
    #[arg(short, long, default_value = "inputs/solverparam.json")]
    params: PathBuf,

    /// CSV file for the final interior state
    #[arg(short, long, default_value = "outputs/solutions_final.csv")]
    output: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let (flow_params, solver_params) = initialize_params_by_file(&cli.params)?;
    let physics = initialize_physics(&flow_params);
    let grid = solver_params.grid;
    let solver = Solver::new(
        solver_params.stop_time,
        grid,
        solver_params.time_step.build(physics),
        solver_params.flux.build(physics),
        solver_params.boundary,
        &solver_params.initial_condition,
    )?
    .with_max_steps(solver_params.max_steps);

    let snapshot_dir = cli
        .output
        .parent()
        .map(PathBuf::from)
        .unwrap_or_default();
    let mut snapshot_error: Option<SolverError> = None;
    if solver_params.output_interval.is_some() {
        write_to_csv(solver.solutions(), &grid, snapshot_dir.join("solutions_0.csv"))?;
    }
    let outcome = solver.run_with(|clock, qs| {
        let Some(interval) = solver_params.output_interval else {
            return;
        };
        if interval == 0 || clock.timesteps_taken % interval != 0 || snapshot_error.is_some() {
            return;
        }
        let filename = snapshot_dir.join(format!("solutions_{}.csv", clock.timesteps_taken));
        if let Err(e) = write_to_csv(qs, &grid, filename) {
            snapshot_error = Some(e);
        }
    })?;
    if let Some(e) = snapshot_error {
        return Err(e.into());
    }

    write_to_csv(outcome.solutions.view(), &grid, &cli.output)?;
    info!(
        time = outcome.elapsed_time,
        steps = outcome.steps_taken,
        output = %cli.output.display(),
        "wrote final state"
    );
    Ok(())
}
