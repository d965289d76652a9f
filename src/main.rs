use clap::Parser;
use dustbox::cli::{self, Args};
use dustbox::prelude::*;
use dustbox::scenario;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Console telemetry: reads body state after each step, never touches it.
struct Telemetry {
    interval: usize,
}

impl StepObserver for Telemetry {
    fn after_step(&mut self, simulation: &Simulation) {
        let step = simulation.steps_completed();
        if step % self.interval != 0 && step != simulation.step_count() {
            return;
        }

        info!(
            step,
            time = simulation.time(),
            time_step = simulation.time_step(),
            bodies = simulation.bodies().len(),
            kinetic_energy = simulation.kinetic_energy(),
            "step complete"
        );
    }
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    if args.list_scenarios {
        cli::handle_list_scenarios();
        return;
    }

    if let Err(error) = run(&args) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli::load_and_apply_config(args)?;
    let mut rng = SharedRng::from_optional_seed(config.scenario.initial_seed);

    let mut simulation = match &args.bodies_file {
        Some(path) => scenario::from_table(path, &config)?,
        None => scenario::build(&config.scenario.name, &config, &mut rng)?,
    };

    info!(
        scenario = %config.scenario.name,
        bodies = simulation.bodies().len(),
        steps = simulation.step_count(),
        time_step = simulation.time_step(),
        build = env!("BUILD_DATE"),
        "starting run"
    );

    let mut telemetry = Telemetry {
        interval: args.telemetry_interval.max(1),
    };
    simulation.run_with_observer(&mut telemetry)?;

    info!(
        time = simulation.time(),
        bodies = simulation.bodies().len(),
        kinetic_energy = simulation.kinetic_energy(),
        "run complete"
    );
    Ok(())
}
