//! Command line interface for dustbox

use clap::Parser;
use std::fmt;

use crate::config::SimulationConfig;
use crate::scenario;

/// CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Configuration file could not be loaded
    ConfigLoad(String),
    /// Invalid scenario name provided
    InvalidScenario(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::ConfigLoad(msg) => write!(f, "Failed to load configuration: {msg}"),
            CliError::InvalidScenario(msg) => write!(f, "Invalid scenario: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// dustbox - 2D n-body physics sandbox
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// Scenario to run (e.g., bouncy_balls, solar_system)
    #[arg(short = 'x', long, value_name = "NAME")]
    pub scenario: Option<String>,

    /// Number of bodies to simulate (overrides config file)
    #[arg(short = 'n', long, value_name = "COUNT")]
    pub bodies: Option<usize>,

    /// Number of steps to run (overrides config file)
    #[arg(long, value_name = "COUNT")]
    pub steps: Option<usize>,

    /// Step size in seconds (overrides the scenario's natural step)
    #[arg(long, value_name = "SECONDS")]
    pub time_step: Option<f64>,

    /// Gravitational constant (overrides config file)
    #[arg(short = 'g', long, value_name = "VALUE")]
    pub gravity: Option<f64>,

    /// Random seed for body generation
    #[arg(short = 's', long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Run bodies from a tab-delimited table instead of a scenario
    #[arg(long, value_name = "FILE")]
    pub bodies_file: Option<String>,

    /// Print telemetry every N steps
    #[arg(long, value_name = "N", default_value = "1")]
    pub telemetry_interval: usize,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// List available scenarios and exit
    #[arg(long)]
    pub list_scenarios: bool,
}

/// Handles the --list-scenarios flag by printing available scenarios
pub fn handle_list_scenarios() {
    println!("Available scenarios:");
    for name in scenario::list_available() {
        println!("  - {name}");
    }
}

/// Loads configuration from file or defaults, then applies command-line overrides
pub fn load_and_apply_config(args: &Args) -> Result<SimulationConfig, CliError> {
    // Load configuration
    let mut config = if let Some(config_path) = &args.config {
        println!("Loading configuration from: {config_path}");
        SimulationConfig::load_or_default(config_path)
    } else {
        SimulationConfig::load_from_user_config()
    };

    // Apply command-line overrides
    if let Some(name) = &args.scenario {
        if !scenario::list_available().contains(&name.as_str()) {
            return Err(CliError::InvalidScenario(format!(
                "unknown scenario '{name}'; available: {}",
                scenario::list_available().join(", ")
            )));
        }
        config.scenario.name = name.clone();
    }

    if let Some(body_count) = args.bodies {
        println!("Overriding body count to: {body_count}");
        config.scenario.body_count = body_count;
    }

    if let Some(steps) = args.steps {
        config.physics.step_count = steps;
    }

    if let Some(time_step) = args.time_step {
        config.physics.time_step = Some(time_step);
    }

    if let Some(gravity) = args.gravity {
        println!("Overriding gravitational constant to: {gravity}");
        config.physics.gravitational_constant = gravity;
    }

    if let Some(seed) = args.seed {
        println!("Using random seed: {seed}");
        config.scenario.initial_seed = Some(seed);
    }

    Ok(config)
}
