use std::time::Instant;

use serde::{Deserialize, Serialize};
use wallfollow_core::{Coord, Direction, SolveObserver, Solver};

use crate::loader::Maze;

/// Outcome of solving one maze, ready to print or serialize
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SolutionReport {
    pub name: String,
    pub solved: bool,
    pub step_count: usize,
    pub steps: Vec<Direction>,
    pub roadblocks: Vec<Coord>,
    pub moves_walked: usize,
    pub backtracks: usize,
    pub elapsed_ms: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SolutionReport {
    /// A report for a maze that could not be solved or loaded.
    pub fn failed(name: &str, error: String, elapsed_ms: f64) -> Self {
        Self {
            name: name.to_string(),
            solved: false,
            step_count: 0,
            steps: Vec::new(),
            roadblocks: Vec::new(),
            moves_walked: 0,
            backtracks: 0,
            elapsed_ms,
            error: Some(error),
        }
    }

    /// Steps as a compact string of initials, e.g. `RRDDL`.
    pub fn step_string(&self) -> String {
        self.steps
            .iter()
            .filter_map(|dir| dir.name().chars().next())
            .collect()
    }
}

/// Solve `maze`, reporting progress to `observer`. Failures are captured in
/// the report rather than returned.
pub fn solve_maze(maze: &Maze, observer: &mut dyn SolveObserver) -> SolutionReport {
    let start = Instant::now();
    let outcome = Solver::new(&maze.grid, maze.start, maze.end)
        .and_then(|solver| solver.run_with(observer));
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    match outcome {
        Ok(solution) => SolutionReport {
            name: maze.name.clone(),
            solved: true,
            step_count: solution.steps.len(),
            steps: solution.steps,
            roadblocks: solution.roadblocks,
            moves_walked: solution.moves_walked,
            backtracks: solution.backtracks,
            elapsed_ms,
            error: None,
        },
        Err(e) => {
            tracing::error!("Failed to solve {}: {}", maze.name, e);
            SolutionReport::failed(&maze.name, e.to_string(), elapsed_ms)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wallfollow_core::{Grid, NoopObserver};

    fn maze(art: &str, start: Coord, end: Coord) -> Maze {
        Maze {
            name: "test".to_string(),
            grid: Grid::from_art(art).unwrap(),
            start,
            end,
        }
    }

    #[test]
    fn test_solved_report() {
        let maze = maze(".....", Coord::new(0, 0), Coord::new(4, 0));
        let report = solve_maze(&maze, &mut NoopObserver);
        assert!(report.solved);
        assert_eq!(report.step_count, 4);
        assert_eq!(report.step_string(), "RRRR");
        assert!(report.error.is_none());
    }

    #[test]
    fn test_failed_report_keeps_error_text() {
        let maze = maze("..#..", Coord::new(0, 0), Coord::new(4, 0));
        let report = solve_maze(&maze, &mut NoopObserver);
        assert!(!report.solved);
        assert!(report.steps.is_empty());
        assert_eq!(report.error.as_deref(), Some("no path leads from start to end"));
    }

    #[test]
    fn test_report_json() {
        let maze = maze("...", Coord::new(0, 0), Coord::new(2, 0));
        let report = solve_maze(&maze, &mut NoopObserver);
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();

        assert_eq!(json["name"], "test");
        assert_eq!(json["solved"], true);
        assert_eq!(json["steps"], serde_json::json!(["RIGHT", "RIGHT"]));
        assert!(json.get("error").is_none());
    }
}
