//! Host-side tooling for the wall-following solver: maze files, solution
//! reports, ASCII rendering and the command-line options of the
//! `wallfollow` binary.

pub mod loader;
pub mod options;
pub mod render;
pub mod report;

pub use loader::{load_maze, LoadError, Maze};
pub use options::{GenerateOptions, MazeFormat, Options, SolveOptions};
pub use render::{render, FrameRecorder, MazeView};
pub use report::{solve_maze, SolutionReport};

use wallfollow_core::{verify_solution, MazeGenerator, WalkError};

/// Generate a maze from `options`, named after its seed.
///
/// # Example
/// ```
/// use wallfollow::{generate_maze, GenerateOptions, MazeFormat};
///
/// let maze = generate_maze(&GenerateOptions {
///     rows: 4,
///     cols: 6,
///     seed: 2918957128,
///     loops: 0,
///     format: MazeFormat::Text,
///     output: None,
/// })
/// .unwrap();
/// assert_eq!(maze.grid.cols(), 13);
/// ```
pub fn generate_maze(options: &GenerateOptions) -> Result<Maze, LoadError> {
    tracing::info!(
        "Generating {}x{} maze from seed {} with {} loops",
        options.cols,
        options.rows,
        options.seed,
        options.loops
    );

    let generated = MazeGenerator::new(options.rows, options.cols, options.seed)
        .loops(options.loops)
        .generate()?;
    Ok(Maze::from_generated(format!("seed-{}", options.seed), generated))
}

/// Draw `maze` with the path and roadblocks from `report`.
///
/// Fails if the report's steps do not replay cleanly on the maze.
pub fn render_solution(maze: &Maze, report: &SolutionReport) -> Result<String, WalkError> {
    let waypoints = verify_solution(&maze.grid, maze.start, maze.end, &report.steps)?;
    let view = MazeView {
        roadblocks: &report.roadblocks,
        path: &waypoints,
        ..MazeView::new(&maze.grid, maze.start, maze.end)
    };
    Ok(render(&view))
}
