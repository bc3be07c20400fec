use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest allowed walk step
pub const MIN_STEP_MAGNITUDE: u32 = 1;
/// Largest allowed walk step
pub const MAX_STEP_MAGNITUDE: u32 = 50;
/// Largest lattice side; keeps the `N x N` cell buffer allocatable
pub const MAX_GRID_SIZE: usize = 8192;
/// Largest initial radius; keeps spawn coordinates far inside `i32`
pub const MAX_INIT_RADIUS: f64 = MAX_GRID_SIZE as f64;

/// Rejected simulation parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid size must be positive")]
    ZeroGridSize,
    #[error("grid size {0} exceeds the maximum of {}", MAX_GRID_SIZE)]
    GridTooLarge(usize),
    #[error("particle count must be positive")]
    ZeroParticles,
    #[error("initial radius must be in (0, {}] (got {0})", MAX_INIT_RADIUS)]
    InvalidRadius(f64),
    #[error("step magnitude must be between 1 and 50 (got {0})")]
    StepOutOfRange(u32),
    #[error("steps per frame must be positive")]
    ZeroStepsPerFrame,
}

/// Check a walk step against the allowed range
pub fn validate_step_magnitude(step: u32) -> Result<(), ConfigError> {
    if (MIN_STEP_MAGNITUDE..=MAX_STEP_MAGNITUDE).contains(&step) {
        Ok(())
    } else {
        Err(ConfigError::StepOutOfRange(step))
    }
}

/// Parameters fixed when a simulation is constructed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Side length of the square lattice
    pub grid_size: usize,
    /// Number of walkers in flight
    pub num_particles: usize,
    /// Radius the aggregate starts from on every reset
    pub init_radius: f64,
    /// Largest per-axis jump of a walker (live tunable, 1-50)
    pub step_magnitude: u32,
    /// Simulation steps run per rendered frame
    pub steps_per_frame: usize,
    /// Optional RNG seed for reproducible runs
    pub rng_seed: Option<u64>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            grid_size: 1024,
            num_particles: 2500,
            init_radius: 15.0,
            step_magnitude: 1,
            steps_per_frame: 1,
            rng_seed: None,
        }
    }
}

impl SimulationSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::ZeroGridSize);
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge(self.grid_size));
        }
        if self.num_particles == 0 {
            return Err(ConfigError::ZeroParticles);
        }
        if !(self.init_radius > 0.0 && self.init_radius <= MAX_INIT_RADIUS) {
            return Err(ConfigError::InvalidRadius(self.init_radius));
        }
        validate_step_magnitude(self.step_magnitude)?;
        if self.steps_per_frame == 0 {
            return Err(ConfigError::ZeroStepsPerFrame);
        }
        Ok(())
    }
}
