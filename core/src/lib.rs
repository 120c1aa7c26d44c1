//! Wall-following maze solver
//!
//! This crate holds everything needed to solve rectangular grid mazes:
//! the grid model, the dead-end sealing pass, the depth-first
//! wall-following search, solution replay, and a seeded maze generator
//! used by the host tooling and tests.
//!
//! ```
//! use wallfollow_core::{solve, Coord, Direction, Grid};
//!
//! let grid = Grid::from_art("...\n#.#\n#..").unwrap();
//! let steps = solve(&grid, Coord::new(0, 0), Coord::new(2, 2)).unwrap();
//! assert_eq!(
//!     steps,
//!     vec![Direction::Right, Direction::Down, Direction::Down, Direction::Right]
//! );
//! ```

pub mod direction;
pub mod engine;
pub mod grid;
pub mod heuristic;
pub mod maze_gen;
pub mod path;
pub mod rng;
pub mod scout;
pub mod terrain;
pub mod trail;
pub mod verify;

// Re-export commonly used types for convenience
pub use direction::{Direction, DirectionError};
pub use engine::{
    seal_dead_ends, solve, solve_rows, Endpoint, NoopObserver, Solution, SolveError,
    SolveObserver, Solver,
};
pub use grid::{Coord, Grid, GridError, MAX_GRID_CELLS};
pub use maze_gen::{GeneratedMaze, MazeGenerator};
pub use rng::MinStd;
pub use terrain::Terrain;
pub use verify::{verify_solution, walk, WalkError};

/// Default generated maze dimensions (cells, not including walls)
pub const DEFAULT_MAZE_ROWS: usize = 20;
pub const DEFAULT_MAZE_COLS: usize = 20;

/// Seed used by the generator when none is given
pub const DEFAULT_SEED: u32 = 2918957128;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_maze_solves() {
        let maze = MazeGenerator::new(DEFAULT_MAZE_ROWS, DEFAULT_MAZE_COLS, DEFAULT_SEED)
            .generate()
            .unwrap();
        assert_eq!(maze.grid.cols(), DEFAULT_MAZE_COLS * 2 + 1);

        let steps = solve(&maze.grid, maze.start, maze.end).unwrap();
        verify_solution(&maze.grid, maze.start, maze.end, &steps).unwrap();
    }
}
