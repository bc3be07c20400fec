use crate::grid::Grid;
use crate::particle::Particle;
use crate::radius::RadiusTracker;
use crate::settings::{validate_step_magnitude, ConfigError, SimulationSettings};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

/// What happened to one walker after it moved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Still walking
    Drifting,
    /// Touched the aggregate; `filled` is the cell that froze, if it was on the lattice
    Attached { filled: Option<(i32, i32)> },
    /// Strayed past the escape band and was put back on the spawn circle
    Recycled,
}

/// Per-step tallies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub attached: usize,
    pub recycled: usize,
}

/// DLA simulation state: lattice, active radius and the walker population
pub struct DlaSimulation {
    settings: SimulationSettings,
    grid: Grid,
    radius: RadiusTracker,
    particles: Vec<Particle>,
    step_magnitude: u32,
    /// Steps advanced since the last reset
    pub steps: u64,
    /// Cells frozen since the last reset (seed excluded)
    pub attached_total: u64,
    rng: StdRng,
}

impl DlaSimulation {
    pub fn new(settings: SimulationSettings) -> Result<Self, ConfigError> {
        settings.validate()?;

        let rng = match settings.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut sim = Self {
            grid: Grid::new(settings.grid_size),
            radius: RadiusTracker::new(settings.init_radius),
            particles: vec![Particle::default(); settings.num_particles],
            step_magnitude: settings.step_magnitude,
            steps: 0,
            attached_total: 0,
            rng,
            settings,
        };
        sim.reset();
        Ok(sim)
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Current active radius
    pub fn radius(&self) -> f64 {
        self.radius.current()
    }

    /// Filled cells including the seed, without scanning the lattice
    pub fn filled_cells(&self) -> u64 {
        self.attached_total + 1
    }

    pub fn step_magnitude(&self) -> u32 {
        self.step_magnitude
    }

    /// Change the walk step (1-50); out-of-range values leave it unchanged
    pub fn set_step_magnitude(&mut self, step: u32) -> Result<(), ConfigError> {
        validate_step_magnitude(step)?;
        self.step_magnitude = step;
        Ok(())
    }

    /// Re-seed the lattice, restore the initial radius and respawn every walker
    pub fn reset(&mut self) {
        self.grid.reset();
        self.radius.reset(self.settings.init_radius);

        let center = self.grid.center();
        let radius = self.radius.current();
        for particle in &mut self.particles {
            particle.respawn(radius, center, &mut self.rng);
        }

        self.steps = 0;
        self.attached_total = 0;

        info!(
            grid_size = self.settings.grid_size,
            particles = self.particles.len(),
            radius,
            "simulation reset"
        );
    }

    /// Run one step: every walker moves once, in population order.
    ///
    /// Cells filled earlier in the pass are visible to walkers processed later.
    pub fn advance(&mut self) -> StepReport {
        let mut report = StepReport::default();

        for index in 0..self.particles.len() {
            self.particles[index].move_by(self.step_magnitude, &mut self.rng);
            match self.settle(index) {
                Outcome::Attached { .. } => report.attached += 1,
                Outcome::Recycled => report.recycled += 1,
                Outcome::Drifting => {}
            }
        }

        self.steps += 1;
        report
    }

    /// Apply the attach/recycle rule to walker `index` at its current position
    pub fn settle(&mut self, index: usize) -> Outcome {
        let center = self.grid.center();
        let particle = self.particles[index];

        if particle.has_attachment_contact(&self.grid) {
            let newly_filled = !self.grid.is_filled(particle.row, particle.col);
            let filled = if self.grid.mark_filled(particle.row, particle.col) {
                if newly_filled {
                    self.attached_total += 1;
                }
                let distance = particle.distance_from(center);
                if self.radius.grow_if_exceeds(distance) {
                    debug!(distance, radius = self.radius.current(), "radius grew");
                }
                Some((particle.row, particle.col))
            } else {
                None
            };

            let radius = self.radius.current();
            self.particles[index].respawn(radius, center, &mut self.rng);
            return Outcome::Attached { filled };
        }

        if particle.distance_from(center) > self.radius.escape_distance() {
            let radius = self.radius.current();
            self.particles[index].respawn(radius, center, &mut self.rng);
            return Outcome::Recycled;
        }

        Outcome::Drifting
    }

    /// Advance `frames` frames of `steps_per_frame` steps each
    pub fn run_frames(&mut self, frames: usize) -> StepReport {
        let mut total = StepReport::default();
        for _ in 0..frames {
            for _ in 0..self.settings.steps_per_frame {
                let report = self.advance();
                total.attached += report.attached;
                total.recycled += report.recycled;
            }
        }
        total
    }

    /// Place walker `index` at `(row, col)`
    #[cfg(test)]
    pub fn place_particle(&mut self, index: usize, row: i32, col: i32) {
        self.particles[index] = Particle::new(row, col);
    }

    #[cfg(test)]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }
}
