//! Static branch-ordering scores
//!
//! Each cell scores `manhattan + round(euclidean)` to the maze end. The score
//! only decides which untried branch of a junction goes first; it is not an
//! admissible distance estimate.

use crate::grid::{Coord, Grid};

#[derive(Clone, Debug)]
pub struct HeuristicTable {
    cols: usize,
    rows: usize,
    scores: Vec<u32>,
}

impl HeuristicTable {
    /// Score every cell of `grid` against `end`, walls included.
    pub fn build(grid: &Grid, end: Coord) -> Self {
        let scores = grid.coords().map(|at| Self::score(at, end)).collect();
        Self {
            cols: grid.cols(),
            rows: grid.rows(),
            scores,
        }
    }

    pub fn score(at: Coord, end: Coord) -> u32 {
        let manhattan = at.manhattan(end) as u32;
        let straight = at.euclidean(end).round() as u32;
        manhattan + straight
    }

    pub fn get(&self, at: Coord) -> Option<u32> {
        (at.x < self.cols && at.y < self.rows).then(|| self.scores[at.y * self.cols + at.x])
    }
}
