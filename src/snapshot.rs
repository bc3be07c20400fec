use crate::simulation::DlaSimulation;
use image::{Rgb, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

const BACKGROUND: Rgb<u8> = Rgb([0, 0, 0]);
const AGGREGATE: Rgb<u8> = Rgb([255, 255, 255]);
const WALKER: Rgb<u8> = Rgb([130, 130, 130]);

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to create snapshot directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write snapshot {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Render the lattice one pixel per cell. Walkers are drawn under the
/// aggregate when `show_particles` is set.
pub fn render_image(simulation: &DlaSimulation, show_particles: bool) -> RgbImage {
    let size = simulation.grid().size() as u32;
    let mut img = RgbImage::from_pixel(size, size, BACKGROUND);

    if show_particles {
        for particle in simulation.particles() {
            if let Some(cell) = simulation.grid().cell_at(particle.row, particle.col) {
                img.put_pixel(cell.col as u32, cell.row as u32, WALKER);
            }
        }
    }

    simulation.grid().for_each_cell(|cell| {
        if cell.filled {
            img.put_pixel(cell.col as u32, cell.row as u32, AGGREGATE);
        }
    });

    img
}

/// Write `<unix-seconds>.png` into `dir`, creating it if needed
pub fn save_snapshot(
    simulation: &DlaSimulation,
    show_particles: bool,
    dir: &Path,
) -> Result<PathBuf, SnapshotError> {
    fs::create_dir_all(dir).map_err(|source| SnapshotError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    // Several snapshots in one second get a suffix instead of overwriting
    let mut path = dir.join(format!("{}.png", stamp));
    let mut n = 1;
    while path.exists() {
        path = dir.join(format!("{}-{}.png", stamp, n));
        n += 1;
    }

    render_image(simulation, show_particles)
        .save(&path)
        .map_err(|source| SnapshotError::Write {
            path: path.clone(),
            source,
        })?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SimulationSettings;

    fn small_sim() -> DlaSimulation {
        DlaSimulation::new(SimulationSettings {
            grid_size: 32,
            num_particles: 20,
            init_radius: 5.0,
            rng_seed: Some(5),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_render_marks_seed_and_walkers() {
        let sim = small_sim();
        let img = render_image(&sim, true);
        assert_eq!(img.dimensions(), (32, 32));
        assert_eq!(*img.get_pixel(16, 16), AGGREGATE);

        let walker = sim.particles()[0];
        assert_eq!(*img.get_pixel(walker.col as u32, walker.row as u32), WALKER);
    }

    #[test]
    fn test_render_without_walkers() {
        let sim = small_sim();
        let img = render_image(&sim, false);
        let lit = img.pixels().filter(|p| **p != BACKGROUND).count();
        assert_eq!(lit, 1);
    }

    #[test]
    fn test_save_snapshot_creates_png() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("snapshots");
        let sim = small_sim();

        let first = save_snapshot(&sim, true, &target).unwrap();
        let second = save_snapshot(&sim, true, &target).unwrap();
        assert!(first.exists());
        assert!(second.exists());
        assert_ne!(first, second);

        let loaded = image::open(&first).unwrap().to_rgb8();
        assert_eq!(loaded.dimensions(), (32, 32));
        assert_eq!(*loaded.get_pixel(16, 16), AGGREGATE);
    }

    #[test]
    fn test_save_snapshot_reports_bad_dir() {
        let file = tempfile::NamedTempFile::new().unwrap();
        // A regular file cannot hold a snapshot directory
        let result = save_snapshot(&small_sim(), false, &file.path().join("nested"));
        assert!(matches!(result, Err(SnapshotError::CreateDir { .. })));
    }
}
