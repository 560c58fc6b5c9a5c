use std::{process::ExitCode, time::Instant};

use log::info;

use tsp_order_core::{Result, SolverInput, SolverOptions, Tour, logging, solve, write_order};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let now = Instant::now();
    let options = SolverOptions::from_args()?;
    logging::init_logger(&options)?;
    let input = SolverInput::from_options(&options)?;

    info!("input: {input}");
    info!("options: {options}");

    let matrix = input.into_matrix();
    let solution = solve(&matrix, options.solve_config()?)?;

    write_order(&solution.order, options.output_path())?;

    info!(
        "output: n={} strategy={} cost={} time={:.2}s",
        solution.len(),
        solution.strategy,
        solution.cost,
        now.elapsed().as_secs_f32()
    );

    let metrics = Tour::new(&matrix, &solution.order)?.tour_metrics();
    info!("metrics: n={} {metrics}", solution.len());

    Ok(())
}
