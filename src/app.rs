use crate::config::AppConfig;
use crate::settings::{ConfigError, MAX_STEP_MAGNITUDE, MIN_STEP_MAGNITUDE};
use crate::simulation::DlaSimulation;
use crate::snapshot;
use std::path::PathBuf;
use tracing::{info, warn};

/// Main application state: the simulation plus presentation toggles
pub struct App {
    pub simulation: DlaSimulation,
    /// Sidebar and in-flight walkers visible
    pub show_ui: bool,
    pub snapshot_dir: PathBuf,
    /// Last user-facing status line (snapshot path or error)
    pub status: Option<String>,
}

impl App {
    pub fn new(config: &AppConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            simulation: DlaSimulation::new(config.settings.clone())?,
            show_ui: config.show_ui,
            snapshot_dir: config.snapshot_dir.clone(),
            status: None,
        })
    }

    /// Run simulation steps for current frame
    pub fn tick(&mut self) {
        self.simulation.run_frames(1);
    }

    /// Reset simulation
    pub fn reset(&mut self) {
        self.simulation.reset();
        self.status = None;
    }

    /// Set the walk step, clamped to the allowed range
    pub fn set_step(&mut self, step: u32) {
        let step = step.clamp(MIN_STEP_MAGNITUDE, MAX_STEP_MAGNITUDE);
        if let Err(err) = self.simulation.set_step_magnitude(step) {
            warn!(%err, "step change rejected");
        }
    }

    pub fn increase_step(&mut self) {
        self.set_step(self.simulation.step_magnitude() + 1);
    }

    pub fn decrease_step(&mut self) {
        self.set_step(self.simulation.step_magnitude().saturating_sub(1));
    }

    /// Toggle sidebar and walker overlay
    pub fn toggle_ui(&mut self) {
        self.show_ui = !self.show_ui;
    }

    /// Export the lattice as a PNG into the snapshot directory
    pub fn take_snapshot(&mut self) {
        match snapshot::save_snapshot(&self.simulation, self.show_ui, &self.snapshot_dir) {
            Ok(path) => {
                info!(path = %path.display(), "snapshot saved");
                self.status = Some(format!("Saved {}", path.display()));
            }
            Err(err) => {
                warn!(%err, "snapshot failed");
                self.status = Some(format!("Snapshot failed: {}", err));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SimulationSettings;

    fn app() -> App {
        let config = AppConfig {
            settings: SimulationSettings {
                grid_size: 48,
                num_particles: 40,
                init_radius: 6.0,
                rng_seed: Some(21),
                ..Default::default()
            },
            ..Default::default()
        };
        App::new(&config).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = AppConfig {
            settings: SimulationSettings {
                num_particles: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(App::new(&config), Err(ConfigError::ZeroParticles)));
    }

    #[test]
    fn test_step_adjustment_is_clamped() {
        let mut app = app();
        app.decrease_step();
        assert_eq!(app.simulation.step_magnitude(), 1);

        app.increase_step();
        app.increase_step();
        assert_eq!(app.simulation.step_magnitude(), 3);

        app.set_step(500);
        assert_eq!(app.simulation.step_magnitude(), 50);
        app.increase_step();
        assert_eq!(app.simulation.step_magnitude(), 50);
    }

    #[test]
    fn test_tick_advances_one_step_per_frame() {
        let mut app = app();
        app.tick();
        app.tick();
        assert_eq!(app.simulation.steps, 2);
    }

    #[test]
    fn test_tick_runs_configured_steps_per_frame() {
        let config = AppConfig {
            settings: SimulationSettings {
                grid_size: 32,
                num_particles: 10,
                init_radius: 5.0,
                steps_per_frame: 4,
                rng_seed: Some(2),
                ..Default::default()
            },
            ..Default::default()
        };
        let mut app = App::new(&config).unwrap();
        app.tick();
        assert_eq!(app.simulation.steps, 4);
    }

    #[test]
    fn test_toggle_ui() {
        let mut app = app();
        assert!(app.show_ui);
        app.toggle_ui();
        assert!(!app.show_ui);
        app.toggle_ui();
        assert!(app.show_ui);
    }

    #[test]
    fn test_reset_clears_growth_and_status() {
        let mut app = app();
        for _ in 0..200 {
            app.tick();
        }
        app.status = Some("old".to_string());
        app.reset();
        assert_eq!(app.simulation.grid().filled_count(), 1);
        assert_eq!(app.simulation.radius(), 6.0);
        assert!(app.status.is_none());
    }

    #[test]
    fn test_take_snapshot_sets_status() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app();
        app.snapshot_dir = dir.path().to_path_buf();

        app.take_snapshot();
        let status = app.status.clone().unwrap();
        assert!(status.starts_with("Saved"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
