use crate::grid::CellState::{Alive, Dead};
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Dead,
    Alive,
}

impl CellState {
    pub fn toggled(self) -> Self {
        match self {
            Dead => Alive,
            Alive => Dead,
        }
    }

    pub fn is_alive(self) -> bool {
        self == Alive
    }
}

/// One cell whose state differs from the previous report, for incremental redraws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellChange {
    pub x: usize,
    pub y: usize,
    pub state: CellState,
}

/// Coordinate outside the grid. Always a caller bug; never recovered internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
pub struct OutOfRange {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// The cell matrix. Dimensions are fixed at construction; addressing is
/// `(x, y)` with `0 <= x < width`, `0 <= y < height`, and neighbor lookups
/// wrap toroidally.
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Vec<CellState>>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width >= 1 && height >= 1, "grid dimensions must be at least 1x1");
        Grid {
            width,
            height,
            cells: vec![vec![Dead; width]; height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn check(&self, x: usize, y: usize) -> Result<(), OutOfRange> {
        if x < self.width && y < self.height {
            Ok(())
        } else {
            Err(OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Result<CellState, OutOfRange> {
        self.check(x, y)?;
        Ok(self.cells[y][x])
    }

    pub fn set(&mut self, x: usize, y: usize, state: CellState) -> Result<(), OutOfRange> {
        self.check(x, y)?;
        self.cells[y][x] = state;
        Ok(())
    }

    /// Flip one cell, returning its new state.
    pub fn toggle(&mut self, x: usize, y: usize) -> Result<CellState, OutOfRange> {
        self.check(x, y)?;
        let state = self.cells[y][x].toggled();
        self.cells[y][x] = state;
        Ok(state)
    }

    /// Count the live cells among the 8 toroidally-wrapped neighbors of an
    /// in-bounds `(x, y)`.
    pub fn live_neighbors(&self, x: usize, y: usize) -> u8 {
        let mut count = 0;

        for dy in [-1, 0, 1] {
            for dx in [-1, 0, 1] {
                if dx == 0 && dy == 0 {
                    // Skip the current cell
                    continue;
                }

                let neighbor_y = (y as isize + dy).rem_euclid(self.height as isize) as usize;
                let neighbor_x = (x as isize + dx).rem_euclid(self.width as isize) as usize;

                if self.cells[neighbor_y][neighbor_x] == Alive {
                    count += 1;
                }
            }
        }

        count
    }

    /// What an in-bounds cell becomes next generation. Pure; no mutation.
    pub fn next_state(&self, x: usize, y: usize) -> CellState {
        match (self.cells[y][x], self.live_neighbors(x, y)) {
            (Alive, 2..=3) => Alive, // Survives
            (Dead, 3) => Alive,      // Becomes alive
            _ => Dead,               // Dies or remains dead
        }
    }

    /// Advance the grid by one generation (Game of Life logic).
    ///
    /// Every `next_state` reads the pre-advance matrix; changed cells are
    /// collected and written back as one batch afterwards, so no cell's
    /// neighbor count ever reflects a same-generation update. Returns only
    /// the cells that changed.
    pub fn advance(&mut self) -> Vec<CellChange> {
        let mut changes = Vec::new();

        for y in 0..self.height {
            for x in 0..self.width {
                let state = self.next_state(x, y);
                if state != self.cells[y][x] {
                    changes.push(CellChange { x, y, state });
                }
            }
        }

        for change in &changes {
            self.cells[change.y][change.x] = change.state;
        }

        changes
    }

    pub fn clear_all(&mut self) {
        for row in &mut self.cells {
            row.fill(Dead);
        }
    }

    pub fn randomize(&mut self) {
        let mut rng = rand::rng();
        for row in &mut self.cells {
            for cell in row.iter_mut() {
                *cell = if rng.random_bool(0.5) { Alive } else { Dead };
            }
        }
    }

    /// Full-grid change list, for an initial render or a post-clear redraw.
    pub fn snapshot(&self) -> Vec<CellChange> {
        let mut cells = Vec::with_capacity(self.width * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                cells.push(CellChange {
                    x,
                    y,
                    state: self.cells[y][x],
                });
            }
        }
        cells
    }

    pub fn live_count(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|cell| cell.is_alive()).count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::CellState::{Alive, Dead};
    use super::*;

    /// Build a grid from ASCII rows: '#' is alive, '.' is dead.
    fn grid_from_rows(rows: &[&str]) -> Grid {
        let mut grid = Grid::new(rows[0].len(), rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, byte) in row.bytes().enumerate() {
                if byte == b'#' {
                    grid.set(x, y, Alive).unwrap();
                }
            }
        }
        grid
    }

    fn live_cells(grid: &Grid) -> Vec<(usize, usize)> {
        grid.snapshot()
            .into_iter()
            .filter(|change| change.state == Alive)
            .map(|change| (change.x, change.y))
            .collect()
    }

    /// Place `n` live neighbors around the center of a 5x5 grid without
    /// touching the center itself.
    fn grid_with_center(center: CellState, neighbors: u8) -> Grid {
        let mut grid = Grid::new(5, 5);
        grid.set(2, 2, center).unwrap();
        let spots = [
            (1, 1),
            (2, 1),
            (3, 1),
            (1, 2),
            (3, 2),
            (1, 3),
            (2, 3),
            (3, 3),
        ];
        for &(x, y) in spots.iter().take(neighbors as usize) {
            grid.set(x, y, Alive).unwrap();
        }
        grid
    }

    #[test]
    fn live_cell_dies_of_underpopulation() {
        for n in 0..2 {
            let grid = grid_with_center(Alive, n);
            assert_eq!(grid.next_state(2, 2), Dead, "n = {n}");
        }
    }

    #[test]
    fn live_cell_survives_with_two_or_three_neighbors() {
        for n in 2..=3 {
            let grid = grid_with_center(Alive, n);
            assert_eq!(grid.next_state(2, 2), Alive, "n = {n}");
        }
    }

    #[test]
    fn live_cell_dies_of_overpopulation() {
        for n in 4..=8 {
            let grid = grid_with_center(Alive, n);
            assert_eq!(grid.next_state(2, 2), Dead, "n = {n}");
        }
    }

    #[test]
    fn dead_cell_born_with_exactly_three_neighbors() {
        for n in 0..=8 {
            let grid = grid_with_center(Dead, n);
            let expected = if n == 3 { Alive } else { Dead };
            assert_eq!(grid.next_state(2, 2), expected, "n = {n}");
        }
    }

    #[test]
    fn neighbor_count_covers_zero_to_eight() {
        for n in 0..=8 {
            let grid = grid_with_center(Dead, n);
            assert_eq!(grid.live_neighbors(2, 2), n);
        }
    }

    #[test]
    fn neighbors_wrap_around_all_corners() {
        let mut grid = Grid::new(7, 4);
        grid.set(6, 3, Alive).unwrap();

        // The far corner is diagonally adjacent to (0, 0) on a torus.
        assert_eq!(grid.live_neighbors(0, 0), 1);
        // ...and to the other three corners.
        assert_eq!(grid.live_neighbors(0, 3), 1);
        assert_eq!(grid.live_neighbors(6, 0), 1);
        // Its straight-line wrapped neighbors see it too.
        assert_eq!(grid.live_neighbors(0, 2), 1);
        assert_eq!(grid.live_neighbors(5, 0), 1);
        // A cell two rows and columns away does not.
        assert_eq!(grid.live_neighbors(3, 1), 0);
    }

    #[test]
    fn edge_cells_have_eight_neighbors() {
        let mut grid = Grid::new(3, 3);
        for y in 0..3 {
            for x in 0..3 {
                if (x, y) != (0, 0) {
                    grid.set(x, y, Alive).unwrap();
                }
            }
        }
        assert_eq!(grid.live_neighbors(0, 0), 8);
    }

    #[test]
    fn blinker_flips_orientation_in_one_advance() {
        let mut grid = grid_from_rows(&[".#...", ".#...", ".#...", ".....", "....."]);

        let changes = grid.advance();

        assert_eq!(live_cells(&grid), vec![(0, 1), (1, 1), (2, 1)]);
        // Four cells changed: two died, two were born.
        assert_eq!(changes.len(), 4);
        assert!(changes.contains(&CellChange { x: 1, y: 0, state: Dead }));
        assert!(changes.contains(&CellChange { x: 1, y: 2, state: Dead }));
        assert!(changes.contains(&CellChange { x: 0, y: 1, state: Alive }));
        assert!(changes.contains(&CellChange { x: 2, y: 1, state: Alive }));
    }

    #[test]
    fn blinker_returns_home_after_two_advances() {
        let mut grid = grid_from_rows(&[".#...", ".#...", ".#...", ".....", "....."]);
        grid.advance();
        grid.advance();
        assert_eq!(live_cells(&grid), vec![(1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn block_still_life_is_fixed_point() {
        let mut grid = grid_from_rows(&["....", ".##.", ".##.", "...."]);
        let before = live_cells(&grid);
        for _ in 0..25 {
            assert!(grid.advance().is_empty());
        }
        assert_eq!(live_cells(&grid), before);
    }

    #[test]
    fn get_set_toggle_reject_out_of_range() {
        let mut grid = Grid::new(4, 3);
        let err = OutOfRange {
            x: 4,
            y: 0,
            width: 4,
            height: 3,
        };
        assert_eq!(grid.get(4, 0), Err(err));
        assert_eq!(grid.set(4, 0, Alive), Err(err));
        assert_eq!(grid.toggle(4, 0), Err(err));
        assert!(grid.get(0, 3).is_err());
        assert!(grid.get(usize::MAX, 0).is_err());
        assert!(grid.get(0, usize::MAX).is_err());
        assert_eq!(grid.get(3, 2), Ok(Dead));
    }

    #[test]
    fn toggle_flips_and_reports_new_state() {
        let mut grid = Grid::new(3, 3);
        assert_eq!(grid.toggle(1, 1), Ok(Alive));
        assert_eq!(grid.get(1, 1), Ok(Alive));
        assert_eq!(grid.toggle(1, 1), Ok(Dead));
        assert_eq!(grid.get(1, 1), Ok(Dead));
    }

    #[test]
    fn clear_all_kills_everything() {
        let mut grid = grid_from_rows(&["###", "#.#", "###"]);
        grid.clear_all();
        assert_eq!(grid.live_count(), 0);
        assert!(grid.snapshot().iter().all(|change| change.state == Dead));
    }

    #[test]
    fn snapshot_covers_whole_grid_in_row_major_order() {
        let grid = Grid::new(4, 3);
        let snapshot = grid.snapshot();
        assert_eq!(snapshot.len(), 12);
        assert_eq!((snapshot[0].x, snapshot[0].y), (0, 0));
        assert_eq!((snapshot[4].x, snapshot[4].y), (0, 1));
        assert_eq!((snapshot[11].x, snapshot[11].y), (3, 2));
    }
}
