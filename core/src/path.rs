//! Path stack entries
//!
//! The search keeps its route as a stack of [`PathElement`]s. Reading it
//! bottom to top and keeping only the movements gives the exact walk from the
//! maze start to the walker's current cell. Junctions are bookkeeping only:
//! they remember which branches of a cell are still untried.

use crate::direction::Direction;
use crate::grid::Coord;

/// Untried branches of a branching cell
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Junction {
    at: Coord,
    unexplored: Vec<Direction>,
}

impl Junction {
    pub fn new(at: Coord, unexplored: Vec<Direction>) -> Self {
        Self { at, unexplored }
    }

    pub fn at(&self) -> Coord {
        self.at
    }

    /// Strike `dir` from the untried branches.
    pub fn remove(&mut self, dir: Direction) {
        self.unexplored.retain(|&d| d != dir);
    }

    /// The untried branch with the lowest cost; ties go to the earliest.
    /// Branches `cost` cannot price lose to any that it can.
    pub fn cheapest_by<F>(&self, cost: F) -> Option<Direction>
    where
        F: Fn(Direction) -> Option<u32>,
    {
        let mut best: Option<(Direction, u32)> = None;
        for &dir in &self.unexplored {
            let price = cost(dir).unwrap_or(u32::MAX);
            if best.map_or(true, |(_, record)| price < record) {
                best = Some((dir, price));
            }
        }
        best.map(|(dir, _)| dir)
    }
}

/// One entry of the path stack
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathElement {
    Junction(Junction),
    Movement(Direction),
}

/// The walker's route from the maze start
#[derive(Clone, Debug, Default)]
pub struct PathStack {
    elements: Vec<PathElement>,
}

impl PathStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_junction(&mut self, junction: Junction) {
        self.elements.push(PathElement::Junction(junction));
    }

    pub fn push_movement(&mut self, dir: Direction) {
        self.elements.push(PathElement::Movement(dir));
    }

    pub fn pop(&mut self) -> Option<PathElement> {
        self.elements.pop()
    }

    pub fn top(&self) -> Option<&PathElement> {
        self.elements.last()
    }

    /// Movements from bottom to top: the route from start to the walker.
    pub fn directions(&self) -> Vec<Direction> {
        self.elements
            .iter()
            .filter_map(|element| match element {
                PathElement::Movement(dir) => Some(*dir),
                PathElement::Junction(_) => None,
            })
            .collect()
    }

    /// Consume the stack into its route.
    pub fn into_directions(self) -> Vec<Direction> {
        self.directions()
    }
}
