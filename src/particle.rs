use crate::grid::Grid;
use rand::Rng;

/// Offsets checked for attachment. `(0, 0)` is included, so a walker standing
/// on a filled cell is in contact.
#[rustfmt::skip]
const CONTACT_OFFSETS: [(i32, i32); 9] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),  (0, 0),  (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// A random walker on the lattice (may sit outside it between steps)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Particle {
    pub row: i32,
    pub col: i32,
}

/// Signed jump with magnitude in `[0, step]` and independent random sign
fn jump<R: Rng + ?Sized>(step: u32, rng: &mut R) -> i32 {
    let magnitude = rng.gen_range(0..=step) as i32;
    if rng.gen_bool(0.5) {
        magnitude
    } else {
        -magnitude
    }
}

impl Particle {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Jump-walk: each axis moves independently by up to `step` cells
    pub fn move_by<R: Rng + ?Sized>(&mut self, step: u32, rng: &mut R) {
        self.row = self.row.saturating_add(jump(step, rng));
        self.col = self.col.saturating_add(jump(step, rng));
    }

    /// True if this cell or any of its 8 neighbours is filled
    pub fn has_attachment_contact(&self, grid: &Grid) -> bool {
        CONTACT_OFFSETS.iter().any(|&(dr, dc)| {
            grid.is_filled(self.row.saturating_add(dr), self.col.saturating_add(dc))
        })
    }

    /// Euclidean distance to `center`
    pub fn distance_from(&self, center: (i32, i32)) -> f64 {
        let dr = self.row as f64 - center.0 as f64;
        let dc = self.col as f64 - center.1 as f64;
        (dr * dr + dc * dc).sqrt()
    }

    /// Drop the walker on the circle of `radius` around `center` at a random angle
    pub fn respawn<R: Rng + ?Sized>(&mut self, radius: f64, center: (i32, i32), rng: &mut R) {
        let theta = rng.gen_range(0.0..std::f64::consts::TAU);
        // `as i32` saturates, so an oversized radius pins to the coordinate limit
        self.row = center.0.saturating_add((radius * theta.cos()).round() as i32);
        self.col = center.1.saturating_add((radius * theta.sin()).round() as i32);
    }
}
