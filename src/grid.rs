/// A single lattice site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
    pub filled: bool,
}

/// Square occupancy lattice with the aggregation seed at its center.
///
/// Cells are stored row-major. `row`/`col` on every cell always match the
/// cell's position; they are only written by [`Grid::reset`].
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Build a lattice of side `size` with the center seed already filled
    pub fn new(size: usize) -> Self {
        let mut grid = Self {
            size,
            cells: Vec::with_capacity(size * size),
        };
        grid.reset();
        grid
    }

    /// Side length of the lattice
    pub fn size(&self) -> usize {
        self.size
    }

    /// Center coordinates `(N/2, N/2)`
    pub fn center(&self) -> (i32, i32) {
        let c = (self.size / 2) as i32;
        (c, c)
    }

    /// Clear every cell, then fill the center seed
    pub fn reset(&mut self) {
        self.cells.clear();
        for row in 0..self.size {
            for col in 0..self.size {
                self.cells.push(Cell {
                    row: row as i32,
                    col: col as i32,
                    filled: false,
                });
            }
        }

        if self.size > 0 {
            let (row, col) = self.center();
            self.mark_filled(row, col);
        }
    }

    /// Row-major index for in-range coordinates
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        // i64 keeps the comparison exact for every i32 input
        let n = self.size as i64;
        let (r, c) = (row as i64, col as i64);
        if r < 0 || c < 0 || r >= n || c >= n {
            return None;
        }
        Some(r as usize * self.size + c as usize)
    }

    /// Cell at `(row, col)`, or `None` outside `[0, N)`
    pub fn cell_at(&self, row: i32, col: i32) -> Option<&Cell> {
        self.index(row, col).map(|idx| &self.cells[idx])
    }

    /// Whether `(row, col)` is an in-range filled cell
    pub fn is_filled(&self, row: i32, col: i32) -> bool {
        self.cell_at(row, col).is_some_and(|cell| cell.filled)
    }

    /// Fill the cell at `(row, col)`. Filling twice is a no-op.
    ///
    /// Returns `false` if the coordinates are outside the lattice.
    pub fn mark_filled(&mut self, row: i32, col: i32) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx].filled = true;
                true
            }
            None => false,
        }
    }

    /// Visit every cell in row-major order
    pub fn for_each_cell<F: FnMut(&Cell)>(&self, mut visit: F) {
        for cell in &self.cells {
            visit(cell);
        }
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        let mut count = 0;
        self.for_each_cell(|cell| {
            if cell.filled {
                count += 1;
            }
        });
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_has_only_center_seed() {
        let grid = Grid::new(9);
        assert_eq!(grid.center(), (4, 4));
        assert_eq!(grid.filled_count(), 1);
        assert!(grid.is_filled(4, 4));
    }

    #[test]
    fn test_cells_carry_their_coordinates() {
        let grid = Grid::new(6);
        let mut visited = Vec::new();
        grid.for_each_cell(|cell| visited.push((cell.row, cell.col)));

        assert_eq!(visited.len(), 36);
        // Row-major order
        assert_eq!(visited[0], (0, 0));
        assert_eq!(visited[1], (0, 1));
        assert_eq!(visited[6], (1, 0));
        assert_eq!(visited[35], (5, 5));

        for row in 0..6 {
            for col in 0..6 {
                let cell = grid.cell_at(row, col).unwrap();
                assert_eq!((cell.row, cell.col), (row, col));
            }
        }
    }

    #[test]
    fn test_cell_at_out_of_range_is_none() {
        let grid = Grid::new(5);
        assert!(grid.cell_at(-1, 0).is_none());
        assert!(grid.cell_at(0, -1).is_none());
        assert!(grid.cell_at(5, 0).is_none());
        assert!(grid.cell_at(0, 5).is_none());
        assert!(grid.cell_at(i32::MIN, i32::MIN).is_none());
        assert!(grid.cell_at(i32::MAX, i32::MAX).is_none());
        assert!(grid.cell_at(i32::MIN, 2).is_none());
        assert!(grid.cell_at(2, i32::MAX).is_none());
        assert!(grid.cell_at(4, 4).is_some());
    }

    #[test]
    fn test_mark_filled_is_idempotent() {
        let mut grid = Grid::new(5);
        assert!(grid.mark_filled(0, 0));
        assert_eq!(grid.filled_count(), 2);
        assert!(grid.mark_filled(0, 0));
        assert_eq!(grid.filled_count(), 2);

        // Re-filling the seed does nothing either
        assert!(grid.mark_filled(2, 2));
        assert_eq!(grid.filled_count(), 2);
    }

    #[test]
    fn test_mark_filled_out_of_range() {
        let mut grid = Grid::new(5);
        assert!(!grid.mark_filled(-1, 2));
        assert!(!grid.mark_filled(2, 7));
        assert_eq!(grid.filled_count(), 1);
    }

    #[test]
    fn test_reset_restores_single_seed() {
        let mut grid = Grid::new(8);
        grid.mark_filled(0, 0);
        grid.mark_filled(7, 7);
        grid.mark_filled(3, 5);
        assert_eq!(grid.filled_count(), 4);

        grid.reset();
        assert_eq!(grid.size(), 8);
        assert_eq!(grid.filled_count(), 1);
        assert!(grid.is_filled(4, 4));
    }

    #[test]
    fn test_single_cell_grid() {
        let grid = Grid::new(1);
        assert_eq!(grid.center(), (0, 0));
        assert!(grid.is_filled(0, 0));
        assert_eq!(grid.filled_count(), 1);
    }
}
