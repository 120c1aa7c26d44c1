//! Search engine
//!
//! Solving runs in three phases:
//! 1. Sealing: every dead end gets a [`Scout`], and each corridor entrance it
//!    reports becomes a roadblock. Later scouts see earlier roadblocks.
//! 2. Scoring: a [`HeuristicTable`] is built against the maze end.
//! 3. Search: a depth-first wall-following walk over a [`PathStack`] of
//!    junctions and movements, backtracking out of dead ends and loops and
//!    trying the cheapest untried branch of each junction first.

use core::fmt;

use thiserror::Error;

use crate::direction::Direction;
use crate::grid::{Coord, Grid, GridError};
use crate::heuristic::HeuristicTable;
use crate::path::{Junction, PathElement, PathStack};
use crate::scout::Scout;
use crate::terrain::Terrain;
use crate::trail::Trail;

/// Which end of the maze an input error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::End => write!(f, "end"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("malformed grid: {0}")]
    Grid(#[from] GridError),
    #[error("{role} {coord} is outside the grid")]
    OutOfBounds { role: Endpoint, coord: Coord },
    #[error("{role} {coord} is not a passable cell")]
    Blocked { role: Endpoint, coord: Coord },
    #[error("start and end are the same cell {0}")]
    StartIsEnd(Coord),
    #[error("no path leads from start to end")]
    Unsolvable,
}

impl SolveError {
    /// Rejected before any search work was done.
    pub fn is_malformed_input(&self) -> bool {
        !matches!(self, SolveError::Unsolvable)
    }
}

/// Notification hooks for animation and telemetry.
///
/// Every method defaults to doing nothing; the solver never reads anything
/// back from an observer.
pub trait SolveObserver {
    /// A dead-end corridor entrance was sealed.
    fn on_seal(&mut self, _entrance: Coord) {}

    /// The walker committed a step during the search, backtracking included.
    fn on_step(&mut self, _position: Coord, _direction: Direction) {}

    /// The end was reached.
    fn on_finish(&mut self, _solution: &Solution) {}
}

/// Observer that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SolveObserver for NoopObserver {}

/// Result of a successful solve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Steps from start to end.
    pub steps: Vec<Direction>,
    /// Cells sealed by the sealing pass, in the order they were sealed.
    pub roadblocks: Vec<Coord>,
    /// Every step the walker took, forwards and backwards.
    pub moves_walked: usize,
    /// How many times the walker had to retreat to an earlier junction.
    pub backtracks: usize,
}

/// Solve `grid` from `start` to `end`.
pub fn solve(grid: &Grid, start: Coord, end: Coord) -> Result<Vec<Direction>, SolveError> {
    Ok(Solver::new(grid, start, end)?.run()?.steps)
}

/// Solve a grid given as rows of passability flags.
pub fn solve_rows<R: AsRef<[bool]>>(
    rows: &[R],
    start: Coord,
    end: Coord,
) -> Result<Vec<Direction>, SolveError> {
    let grid = Grid::from_rows(rows)?;
    solve(&grid, start, end)
}

/// Seal every dead-end corridor reachable by a scout.
///
/// Cells are visited in row-major order. A scout only stops next to a cell
/// with fewer than two walls, so a seal never creates a new dead end and a
/// second pass over the same terrain seals nothing.
///
/// Returns the roadblocks added by this call.
pub fn seal_dead_ends(
    terrain: &mut Terrain<'_>,
    start: Coord,
    end: Coord,
    observer: &mut dyn SolveObserver,
) -> Vec<Coord> {
    let grid = terrain.grid();
    let mut sealed = Vec::new();

    for at in grid.coords() {
        if terrain.blocked(at) || terrain.wall_count(at) != 3 {
            continue;
        }

        tracing::trace!("Deploying scout to {}", at);
        let Some(entrance) = Scout::new(terrain, at, start, end).find_entrance() else {
            continue;
        };

        if terrain.add_roadblock(entrance) {
            tracing::debug!("Sealed dead end at {} by blocking {}", at, entrance);
            observer.on_seal(entrance);
            sealed.push(entrance);
        }
    }

    sealed
}

/// A validated solve request
#[derive(Debug, Clone, Copy)]
pub struct Solver<'g> {
    grid: &'g Grid,
    start: Coord,
    end: Coord,
}

impl<'g> Solver<'g> {
    /// Check that both endpoints are distinct passable cells of `grid`.
    pub fn new(grid: &'g Grid, start: Coord, end: Coord) -> Result<Self, SolveError> {
        for (role, coord) in [(Endpoint::Start, start), (Endpoint::End, end)] {
            if !grid.in_bounds(coord) {
                return Err(SolveError::OutOfBounds { role, coord });
            }
            if !grid.is_open(coord) {
                return Err(SolveError::Blocked { role, coord });
            }
        }

        if start == end {
            return Err(SolveError::StartIsEnd(start));
        }

        Ok(Self { grid, start, end })
    }

    pub fn run(&self) -> Result<Solution, SolveError> {
        self.run_with(&mut NoopObserver)
    }

    pub fn run_with(&self, observer: &mut dyn SolveObserver) -> Result<Solution, SolveError> {
        tracing::info!(
            "Solving {}x{} maze from {} to {}",
            self.grid.cols(),
            self.grid.rows(),
            self.start,
            self.end
        );

        let mut terrain = Terrain::new(self.grid);
        let sealed = seal_dead_ends(&mut terrain, self.start, self.end, observer);
        tracing::info!("Sealed {} dead-end corridors", sealed.len());

        let heuristic = HeuristicTable::build(self.grid, self.end);

        let mut search = Search::new(&terrain, heuristic, self.start, self.end);
        let steps = match search.run(observer) {
            Ok(steps) => steps,
            Err(e) => {
                tracing::info!(
                    "Maze has no solution after {} moves and {} backtracks",
                    search.moves_walked,
                    search.backtracks
                );
                return Err(e);
            }
        };

        let solution = Solution {
            steps,
            roadblocks: terrain.roadblocks().as_slice().to_vec(),
            moves_walked: search.moves_walked,
            backtracks: search.backtracks,
        };

        tracing::info!(
            "Maze solved in {} steps ({} moves walked, {} backtracks)",
            solution.steps.len(),
            solution.moves_walked,
            solution.backtracks
        );

        observer.on_finish(&solution);
        Ok(solution)
    }
}

/// State of the interactive walk
struct Search<'a, 'g> {
    terrain: &'a Terrain<'g>,
    heuristic: HeuristicTable,
    end: Coord,
    position: Coord,
    facing: Direction,
    trail: Trail,
    stack: PathStack,
    moves_walked: usize,
    backtracks: usize,
}

impl<'a, 'g> Search<'a, 'g> {
    fn new(terrain: &'a Terrain<'g>, heuristic: HeuristicTable, start: Coord, end: Coord) -> Self {
        Self {
            terrain,
            heuristic,
            end,
            position: start,
            facing: Direction::Up,
            trail: Trail::starting_at(start),
            stack: PathStack::new(),
            moves_walked: 0,
            backtracks: 0,
        }
    }

    fn run(&mut self, observer: &mut dyn SolveObserver) -> Result<Vec<Direction>, SolveError> {
        let origin = Junction::new(self.position, self.terrain.open_exits(self.position));
        self.facing = cheapest_branch(&origin, &self.heuristic).ok_or(SolveError::Unsolvable)?;
        self.stack.push_junction(origin);

        loop {
            let target = self
                .position
                .step(self.facing)
                .filter(|&next| !self.terrain.blocked(next) && !self.trail.visited(next));

            let Some(target) = target else {
                self.backtrack(observer)?;
                continue;
            };

            self.advance(target, observer);

            if self.position == self.end {
                break;
            }

            if let Some(dir) = self.sight_of_end() {
                self.dash(dir, observer);
                break;
            }

            let walls = self.terrain.wall_count(self.position);
            if walls < 2 || (walls == 2 && self.terrain.collision(self.position, self.facing)) {
                self.branch(observer)?;
            } else if walls == 3 {
                self.backtrack(observer)?;
            }
        }

        Ok(std::mem::take(&mut self.stack).into_directions())
    }

    /// Take a pioneering step onto `target`.
    fn advance(&mut self, target: Coord, observer: &mut dyn SolveObserver) {
        self.position = target;
        self.trail.record(target);
        self.stack.push_movement(self.facing);
        self.moves_walked += 1;
        tracing::trace!("Stepped {} to {}", self.facing, target);
        observer.on_step(target, self.facing);
    }

    /// Undo one movement without treating it as a new visit.
    fn retreat(&mut self, movement: Direction, observer: &mut dyn SolveObserver) {
        let back = movement.opposite();
        if let Some(previous) = self.position.step(back) {
            self.position = previous;
            self.moves_walked += 1;
            observer.on_step(previous, back);
        }
    }

    /// Direction to the end when it lies straight ahead with nothing between.
    fn sight_of_end(&self) -> Option<Direction> {
        if !self.terrain.clear_line(self.position, self.end) {
            return None;
        }
        let (dx, dy) = self.position.delta_to(self.end);
        Direction::from_delta(dx, dy).ok()
    }

    /// Walk straight to the end.
    fn dash(&mut self, dir: Direction, observer: &mut dyn SolveObserver) {
        self.facing = dir;
        while self.position != self.end {
            let Some(next) = self.position.step(dir) else {
                break;
            };
            self.advance(next, observer);
        }
    }

    /// Arrived at a fork or a turn: pick the next branch or give up on it.
    fn branch(&mut self, observer: &mut dyn SolveObserver) -> Result<(), SolveError> {
        let here = self.position;
        let revisited = matches!(
            self.stack.top(),
            Some(PathElement::Junction(j)) if j.at() == here
        );
        if !revisited {
            let junction = self.junction_here();
            self.stack.push_junction(junction);
        }

        let next = match self.stack.top() {
            Some(PathElement::Junction(junction)) => cheapest_branch(junction, &self.heuristic),
            _ => None,
        };

        match next {
            Some(dir) => {
                self.facing = dir;
                Ok(())
            }
            None => self.backtrack(observer),
        }
    }

    /// Branches of the current cell, minus the way we came in. A cell with a
    /// single way on keeps the way back too.
    fn junction_here(&self) -> Junction {
        let back = self.facing.opposite();
        let mut branches: Vec<Direction> = self
            .terrain
            .open_exits(self.position)
            .into_iter()
            .filter(|&dir| dir != back)
            .collect();

        if branches.len() == 1 {
            branches.push(back);
        }

        Junction::new(self.position, branches)
    }

    /// Retreat to the nearest junction with an untried branch and face it.
    fn backtrack(&mut self, observer: &mut dyn SolveObserver) -> Result<(), SolveError> {
        self.backtracks += 1;

        // Branch being abandoned: the first movement of the branch, or the
        // step that failed straight out of a junction.
        let mut abandoned = self.facing;

        loop {
            match self.stack.pop() {
                Some(PathElement::Movement(dir)) => {
                    self.retreat(dir, observer);
                    abandoned = dir;
                }
                Some(PathElement::Junction(mut junction)) => {
                    junction.remove(abandoned);

                    if let Some(dir) = cheapest_branch(&junction, &self.heuristic) {
                        tracing::trace!("Backtracked to {}, trying {}", junction.at(), dir);
                        self.facing = dir;
                        self.stack.push_junction(junction);
                        return Ok(());
                    }

                    tracing::trace!("Junction at {} exhausted", junction.at());
                }
                None => {
                    tracing::debug!("Backtracked past the maze start");
                    return Err(SolveError::Unsolvable);
                }
            }
        }
    }
}

fn cheapest_branch(junction: &Junction, heuristic: &HeuristicTable) -> Option<Direction> {
    let at = junction.at();
    junction.cheapest_by(|dir| at.step(dir).and_then(|next| heuristic.get(next)))
}
