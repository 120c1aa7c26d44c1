//! Seeded maze generation (recursive backtracker)
//!
//! Produces a binary [`Grid`] of `(rows*2 + 1) × (cols*2 + 1)` cells: each
//! maze cell sits at `(col*2 + 1, row*2 + 1)` and the cells between them are
//! walls or opened passages. The outer border is always wall.
//!
//! Algorithm: depth-first search with an explicit stack
//! 1. Start at cell (0, 0), mark it visited
//! 2. While the stack is not empty:
//!    - collect the unvisited neighbours of the top cell
//!    - if there are any, pick one at random, open the wall between them,
//!      mark it visited and push it
//!    - otherwise pop
//!
//! The result is a perfect maze (exactly one path between any two cells).
//! `loops` extra interior walls can then be knocked out to create cycles.

use crate::direction::Direction;
use crate::grid::{Coord, Grid, GridError};
use crate::rng::MinStd;

/// A generated maze with its canonical start (top-left) and end (bottom-right)
#[derive(Clone, Debug)]
pub struct GeneratedMaze {
    pub grid: Grid,
    pub start: Coord,
    pub end: Coord,
    pub seed: u32,
}

/// Maze generator settings
#[derive(Clone, Copy, Debug)]
pub struct MazeGenerator {
    rows: usize,
    cols: usize,
    seed: u32,
    loops: usize,
}

impl MazeGenerator {
    /// `rows` × `cols` maze cells, not counting walls.
    pub fn new(rows: usize, cols: usize, seed: u32) -> Self {
        Self {
            rows,
            cols,
            seed,
            loops: 0,
        }
    }

    /// Open `loops` additional interior walls after carving.
    pub fn loops(mut self, loops: usize) -> Self {
        self.loops = loops;
        self
    }

    pub fn generate(&self) -> Result<GeneratedMaze, GridError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GridError::Empty);
        }

        let (width, height) = Grid::walled_size(self.cols, self.rows)?;
        let mut open = vec![vec![false; width]; height];
        let mut rng = MinStd::new(self.seed);

        self.carve(&mut open, &mut rng);
        let opened = Self::knock_out_walls(&mut open, self.loops, &mut rng);

        tracing::debug!(
            "Generated {}x{} maze from seed {} ({} extra openings)",
            self.cols,
            self.rows,
            self.seed,
            opened
        );

        Ok(GeneratedMaze {
            grid: Grid::from_rows(&open)?,
            start: Coord::new(1, 1),
            end: Coord::new(width - 2, height - 2),
            seed: self.seed,
        })
    }

    fn carve(&self, open: &mut [Vec<bool>], rng: &mut MinStd) {
        let mut visited = vec![vec![false; self.cols]; self.rows];
        let mut stack = vec![(0usize, 0usize)];
        visited[0][0] = true;
        open[1][1] = true;

        while let Some(&(col, row)) = stack.last() {
            let neighbours: Vec<(Direction, usize, usize)> = Direction::SCAN_ORDER
                .into_iter()
                .filter_map(|dir| {
                    let next = Coord::new(col, row).step(dir)?;
                    (next.x < self.cols && next.y < self.rows && !visited[next.y][next.x])
                        .then_some((dir, next.x, next.y))
                })
                .collect();

            if neighbours.is_empty() {
                stack.pop();
                continue;
            }

            let (dir, nc, nr) = neighbours[rng.below(neighbours.len())];
            let (dx, dy) = dir.delta();

            // Passage cell between the two centres, then the new centre.
            let wall_x = (col * 2 + 1).wrapping_add_signed(dx);
            let wall_y = (row * 2 + 1).wrapping_add_signed(dy);
            open[wall_y][wall_x] = true;
            open[nr * 2 + 1][nc * 2 + 1] = true;

            visited[nr][nc] = true;
            stack.push((nc, nr));
        }
    }

    /// Open up to `count` interior walls that separate two maze cells.
    fn knock_out_walls(open: &mut [Vec<bool>], count: usize, rng: &mut MinStd) -> usize {
        let height = open.len();
        let width = open.first().map_or(0, Vec::len);

        // Walls between horizontal or vertical neighbours: exactly one
        // coordinate even, never on the border.
        let mut candidates: Vec<(usize, usize)> = (1..height.saturating_sub(1))
            .flat_map(|y| (1..width.saturating_sub(1)).map(move |x| (x, y)))
            .filter(|&(x, y)| (x % 2 == 0) != (y % 2 == 0) && !open[y][x])
            .collect();

        let mut opened = 0;
        while opened < count && !candidates.is_empty() {
            let (x, y) = candidates.swap_remove(rng.below(candidates.len()));
            open[y][x] = true;
            opened += 1;
        }
        opened
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_shape_and_border() {
        let maze = MazeGenerator::new(5, 7, 12345).generate().unwrap();
        let grid = &maze.grid;

        assert_eq!(grid.cols(), 15);
        assert_eq!(grid.rows(), 11);
        assert_eq!(maze.start, Coord::new(1, 1));
        assert_eq!(maze.end, Coord::new(13, 9));
        assert!(grid.is_open(maze.start));
        assert!(grid.is_open(maze.end));

        for x in 0..grid.cols() {
            assert!(!grid.is_open(Coord::new(x, 0)));
            assert!(!grid.is_open(Coord::new(x, grid.rows() - 1)));
        }
        for y in 0..grid.rows() {
            assert!(!grid.is_open(Coord::new(0, y)));
            assert!(!grid.is_open(Coord::new(grid.cols() - 1, y)));
        }
    }

    #[test]
    fn test_every_cell_centre_is_open() {
        let maze = MazeGenerator::new(8, 8, 99999).generate().unwrap();
        for row in 0..8 {
            for col in 0..8 {
                assert!(maze.grid.is_open(Coord::new(col * 2 + 1, row * 2 + 1)));
            }
        }
    }

    #[test]
    fn test_perfect_maze_passage_count() {
        // A spanning tree over n cells has n - 1 passages.
        let maze = MazeGenerator::new(6, 9, 4242).generate().unwrap();
        let open = maze.grid.coords().filter(|&at| maze.grid.is_open(at)).count();
        let cells = 6 * 9;
        assert_eq!(open, cells + (cells - 1));
    }

    #[test]
    fn test_loops_add_openings() {
        let plain = MazeGenerator::new(6, 9, 4242).generate().unwrap();
        let braided = MazeGenerator::new(6, 9, 4242).loops(5).generate().unwrap();
        let count = |grid: &Grid| grid.coords().filter(|&at| grid.is_open(at)).count();
        assert_eq!(count(&braided.grid), count(&plain.grid) + 5);
    }

    #[test]
    fn test_determinism() {
        let a = MazeGenerator::new(10, 10, 2918957128).loops(3).generate().unwrap();
        let b = MazeGenerator::new(10, 10, 2918957128).loops(3).generate().unwrap();
        assert_eq!(a.grid, b.grid);
    }

    #[test]
    fn test_different_seeds() {
        let a = MazeGenerator::new(10, 10, 11111).generate().unwrap();
        let b = MazeGenerator::new(10, 10, 22222).generate().unwrap();
        assert_ne!(a.grid, b.grid);
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(MazeGenerator::new(0, 4, 1).generate().is_err());
    }

    #[test]
    fn test_oversized_rejected() {
        assert!(matches!(
            MazeGenerator::new(usize::MAX, 2, 1).generate(),
            Err(GridError::TooLarge { .. })
        ));
        assert!(matches!(
            MazeGenerator::new(100_000, 100_000, 1).generate(),
            Err(GridError::TooLarge { .. })
        ));
    }
}
