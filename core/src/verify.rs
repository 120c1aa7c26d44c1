//! Solution replay
//!
//! Replays a step sequence over a terrain and checks that:
//! - every step stays on the grid,
//! - every cell entered is passable and not a roadblock,
//! - the walk ends on the goal.
//!
//! Passing over the goal early is allowed; only the final cell counts.

use thiserror::Error;

use crate::direction::Direction;
use crate::grid::{Coord, Grid};
use crate::terrain::Terrain;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalkError {
    #[error("start {0} is not a passable cell")]
    BadStart(Coord),
    #[error("step {step} ({direction}) leaves the grid at {from}")]
    OffGrid {
        step: usize,
        from: Coord,
        direction: Direction,
    },
    #[error("step {step} ({direction}) runs into blocked cell {at}")]
    Blocked {
        step: usize,
        at: Coord,
        direction: Direction,
    },
    #[error("walk ends at {at}, not at the goal {goal}")]
    MissedGoal { at: Coord, goal: Coord },
}

/// Replay `steps` from `start`; returns every cell stood on, `start` first.
pub fn walk(
    terrain: &Terrain<'_>,
    start: Coord,
    goal: Coord,
    steps: &[Direction],
) -> Result<Vec<Coord>, WalkError> {
    if terrain.blocked(start) {
        return Err(WalkError::BadStart(start));
    }

    let mut waypoints = Vec::with_capacity(steps.len() + 1);
    waypoints.push(start);

    let mut at = start;
    for (step, &direction) in steps.iter().enumerate() {
        let next = at
            .step(direction)
            .filter(|&next| terrain.in_bounds(next))
            .ok_or(WalkError::OffGrid {
                step,
                from: at,
                direction,
            })?;

        if terrain.blocked(next) {
            return Err(WalkError::Blocked {
                step,
                at: next,
                direction,
            });
        }

        at = next;
        waypoints.push(at);
    }

    if at != goal {
        return Err(WalkError::MissedGoal { at, goal });
    }

    Ok(waypoints)
}

/// Replay `steps` over the bare grid.
pub fn verify_solution(
    grid: &Grid,
    start: Coord,
    goal: Coord,
    steps: &[Direction],
) -> Result<Vec<Coord>, WalkError> {
    walk(&Terrain::new(grid), start, goal, steps)
}
