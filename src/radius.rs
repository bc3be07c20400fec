/// Attachments farther out than this fraction of the radius push it outward
pub const GROWTH_TRIGGER: f64 = 0.95;

/// Multiplier applied to the radius on each growth event
pub const GROWTH_FACTOR: f64 = 1.05;

/// Walkers farther out than this multiple of the radius are recycled
pub const ESCAPE_FACTOR: f64 = 1.05;

/// Active radius of the aggregate.
///
/// Only grows, and only through [`RadiusTracker::grow_if_exceeds`]. Both the
/// respawn circle and the escape band are derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusTracker {
    radius: f64,
}

impl RadiusTracker {
    pub fn new(initial: f64) -> Self {
        Self { radius: initial }
    }

    pub fn current(&self) -> f64 {
        self.radius
    }

    /// Start over from `initial`. Positivity is checked by settings validation.
    pub fn reset(&mut self, initial: f64) {
        self.radius = initial;
    }

    /// Grow by [`GROWTH_FACTOR`] when `distance` lies beyond the trigger fraction.
    ///
    /// Returns true if the radius grew.
    pub fn grow_if_exceeds(&mut self, distance: f64) -> bool {
        if distance > GROWTH_TRIGGER * self.radius {
            self.radius *= GROWTH_FACTOR;
            true
        } else {
            false
        }
    }

    /// Distance beyond which a walker is recycled
    pub fn escape_distance(&self) -> f64 {
        ESCAPE_FACTOR * self.radius
    }
}
