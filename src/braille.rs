use crate::simulation::DlaSimulation;
use ratatui::style::Color;

/// Braille character rendering for high-resolution terminal graphics.
/// Each Braille character represents a 2x4 grid of dots (8 dots total).
///
/// Dot positions and their bit values:
/// ```text
/// (0,0)=0x01  (1,0)=0x08
/// (0,1)=0x02  (1,1)=0x10
/// (0,2)=0x04  (1,2)=0x20
/// (0,3)=0x40  (1,3)=0x80
/// ```
///
/// Unicode Braille patterns: U+2800 to U+28FF (256 patterns)
const BRAILLE_BASE: u32 = 0x2800;

/// Dot position to bit mapping for Braille characters
const BRAILLE_DOTS: [[u8; 4]; 2] = [
    [0x01, 0x02, 0x04, 0x40], // Left column (x=0): rows 0,1,2,3
    [0x08, 0x10, 0x20, 0x80], // Right column (x=1): rows 0,1,2,3
];

pub const AGGREGATE_COLOR: Color = Color::White;
pub const WALKER_COLOR: Color = Color::DarkGray;

/// A single rendered Braille cell with position and color
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrailleCell {
    pub x: u16,
    pub y: u16,
    pub char: char,
    pub color: Color,
}

/// Mapping from lattice coordinates onto the dot raster.
///
/// The lattice is square and Braille dots are roughly square, so one scale is
/// used for both axes and the picture is centered in the canvas.
struct Viewport {
    dots_w: usize,
    dots_h: usize,
    scale: f64,
    offset_x: usize,
    offset_y: usize,
}

impl Viewport {
    fn new(grid_size: usize, canvas_width: u16, canvas_height: u16) -> Self {
        let dots_w = canvas_width as usize * 2;
        let dots_h = canvas_height as usize * 4;
        let side = dots_w.min(dots_h).max(1);
        let scale = side as f64 / grid_size.max(1) as f64;
        let drawn = ((grid_size as f64 * scale) as usize).min(side);
        Self {
            dots_w,
            dots_h,
            scale,
            offset_x: (dots_w - drawn.min(dots_w)) / 2,
            offset_y: (dots_h - drawn.min(dots_h)) / 2,
        }
    }

    /// Dot holding lattice cell `(row, col)`, if on canvas
    fn dot(&self, row: i32, col: i32) -> Option<(usize, usize)> {
        if row < 0 || col < 0 {
            return None;
        }
        let x = self.offset_x + (col as f64 * self.scale) as usize;
        let y = self.offset_y + (row as f64 * self.scale) as usize;
        (x < self.dots_w && y < self.dots_h).then_some((x, y))
    }
}

/// Per-character accumulation of dot bits
#[derive(Clone, Copy, Default)]
struct Glyph {
    pattern: u8,
    aggregate: bool,
}

/// Render the lattice (and optionally walkers) to Braille characters.
///
/// A dot is lit if any cell mapping onto it is filled, so thin branches stay
/// visible when the lattice is larger than the dot raster.
pub fn render_to_braille(
    simulation: &DlaSimulation,
    canvas_width: u16,
    canvas_height: u16,
    show_particles: bool,
) -> Vec<BrailleCell> {
    if canvas_width == 0 || canvas_height == 0 {
        return Vec::new();
    }

    let grid = simulation.grid();
    let view = Viewport::new(grid.size(), canvas_width, canvas_height);
    let mut glyphs = vec![Glyph::default(); canvas_width as usize * canvas_height as usize];

    let mut plot = |x: usize, y: usize, aggregate: bool| {
        let glyph = &mut glyphs[(y / 4) * canvas_width as usize + x / 2];
        glyph.pattern |= BRAILLE_DOTS[x % 2][y % 4];
        glyph.aggregate |= aggregate;
    };

    grid.for_each_cell(|cell| {
        if cell.filled {
            if let Some((x, y)) = view.dot(cell.row, cell.col) {
                plot(x, y, true);
            }
        }
    });

    if show_particles {
        for particle in simulation.particles() {
            if grid.cell_at(particle.row, particle.col).is_none() {
                continue;
            }
            if let Some((x, y)) = view.dot(particle.row, particle.col) {
                plot(x, y, false);
            }
        }
    }

    let mut cells = Vec::new();
    for (idx, glyph) in glyphs.iter().enumerate() {
        // Only emit cells that have at least one dot
        if glyph.pattern == 0 {
            continue;
        }
        let braille_char = char::from_u32(BRAILLE_BASE + glyph.pattern as u32).unwrap_or(' ');
        cells.push(BrailleCell {
            x: (idx % canvas_width as usize) as u16,
            y: (idx / canvas_width as usize) as u16,
            char: braille_char,
            color: if glyph.aggregate { AGGREGATE_COLOR } else { WALKER_COLOR },
        });
    }

    cells
}
