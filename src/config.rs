//! Layered configuration for simulations and scenarios.

use crate::physics::boundary::BoundaryMode;
use crate::physics::forces::{COULOMB_CONSTANT, GRAVITATIONAL_CONSTANT};
use crate::physics::math::Scalar;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub physics: PhysicsConfig,
    pub boundary: BoundaryConfig,
    pub scenario: ScenarioConfig,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Step size in seconds; `None` uses the scenario's natural step.
    pub time_step: Option<Scalar>,
    pub step_count: usize,
    /// Adaptive floor: the step doubles when every per-body velocity change
    /// sits below this. `None` keeps the scenario's setting.
    pub min_velocity_delta: Option<Scalar>,
    /// Adaptive ceiling: the step halves when any per-body velocity change
    /// exceeds this. `None` keeps the scenario's setting.
    pub max_velocity_delta: Option<Scalar>,
    pub gravitational_constant: Scalar,
    pub coulomb_constant: Scalar,
    pub spring_constant: Scalar,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            time_step: None,
            step_count: 1000,
            min_velocity_delta: None,
            max_velocity_delta: None,
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            coulomb_constant: COULOMB_CONSTANT,
            spring_constant: 1.0e5,
        }
    }
}

/// The box used by the table-scale scenarios (single_ball, bouncy_balls).
/// Star-scale scenarios size their own boxes from their orbital radii.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct BoundaryConfig {
    pub enabled: bool,
    pub mode: BoundaryMode,
    pub left: Scalar,
    pub right: Scalar,
    pub bottom: Scalar,
    pub top: Scalar,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: BoundaryMode::Reflect,
            left: 0.0,
            right: 1.0,
            bottom: 0.0,
            top: 1.0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ScenarioConfig {
    pub name: String,
    pub body_count: usize,
    pub initial_seed: Option<u64>,
    pub max_body_mass: Scalar,
    pub max_body_radius: Scalar,
    /// Largest-to-smallest ratio for randomized radii.
    pub radius_spread: Scalar,
    /// How many times random placement may retry an overlapping position
    /// before giving up.
    pub placement_attempts: usize,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            name: "bouncy_balls".to_string(),
            body_count: 10,
            initial_seed: None,
            max_body_mass: 1.0,
            max_body_radius: 0.05,
            radius_spread: 2.0,
            placement_attempts: 100,
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a file, falling back to defaults if the file
    /// is missing or malformed.
    pub fn load_or_default(path: &str) -> Self {
        let loaded = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()
            .and_then(|source| source.try_deserialize());

        match loaded {
            Ok(config) => config,
            Err(e) => {
                warn!("failed to load config file {path}: {e}; using defaults");
                Self::default()
            }
        }
    }

    /// Load from the user's configuration directory, falling back to
    /// defaults when no file exists there.
    pub fn load_from_user_config() -> Self {
        let Some(dirs) = ProjectDirs::from("", "", "dustbox") else {
            return Self::default();
        };
        let path = dirs.config_dir().join("config.toml");
        if !path.exists() {
            info!("no user config at {}; using defaults", path.display());
            return Self::default();
        }

        let loaded = config::Config::builder()
            .add_source(config::File::from(path.as_path()))
            .build()
            .and_then(|source| source.try_deserialize());

        match loaded {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "failed to load user config {}: {e}; using defaults",
                    path.display()
                );
                Self::default()
            }
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
