//! Navigation over a grid plus its roadblocks
//!
//! [`Terrain`] is the one place that answers "can I stand here". Both the
//! search engine and the scouts navigate through it, and neither ever reads
//! the raw [`Grid`] for movement decisions.

use crate::direction::Direction;
use crate::grid::{Coord, Grid};

/// Cells sealed off on top of the grid.
///
/// Membership is a dense bitmap; insertion order is kept for reporting.
#[derive(Clone, Debug)]
pub struct Roadblocks {
    mask: Vec<bool>,
    order: Vec<Coord>,
}

impl Roadblocks {
    fn for_grid(grid: &Grid) -> Self {
        Self {
            mask: vec![false; grid.len()],
            order: Vec::new(),
        }
    }

    /// Roadblocks in the order they were added.
    pub fn as_slice(&self) -> &[Coord] {
        &self.order
    }
}

/// A borrowed grid with a growing set of roadblocks
#[derive(Clone, Debug)]
pub struct Terrain<'g> {
    grid: &'g Grid,
    roadblocks: Roadblocks,
}

impl<'g> Terrain<'g> {
    pub fn new(grid: &'g Grid) -> Self {
        Self {
            grid,
            roadblocks: Roadblocks::for_grid(grid),
        }
    }

    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    pub fn roadblocks(&self) -> &Roadblocks {
        &self.roadblocks
    }

    pub fn in_bounds(&self, at: Coord) -> bool {
        self.grid.in_bounds(at)
    }

    pub fn is_roadblock(&self, at: Coord) -> bool {
        self.grid
            .index(at)
            .map(|i| self.roadblocks.mask[i])
            .unwrap_or(false)
    }

    /// Seal `at`. Returns `false` if it was already sealed or is off the grid.
    pub fn add_roadblock(&mut self, at: Coord) -> bool {
        let Some(i) = self.grid.index(at) else {
            return false;
        };
        if self.roadblocks.mask[i] {
            return false;
        }
        self.roadblocks.mask[i] = true;
        self.roadblocks.order.push(at);
        true
    }

    /// Off the grid, a wall, or a roadblock.
    pub fn blocked(&self, at: Coord) -> bool {
        match self.grid.index(at) {
            Some(i) => !self.grid.is_open(at) || self.roadblocks.mask[i],
            None => true,
        }
    }

    /// Whether the neighbour of `at` in `dir` is blocked. Neighbours past the
    /// top or left edge count as blocked.
    pub fn collision(&self, at: Coord, dir: Direction) -> bool {
        at.step(dir).map_or(true, |next| self.blocked(next))
    }

    /// Number of blocked orthogonal neighbours, 0 to 4.
    pub fn wall_count(&self, at: Coord) -> u8 {
        Direction::SCAN_ORDER
            .iter()
            .filter(|&&dir| self.collision(at, dir))
            .count() as u8
    }

    /// Unblocked neighbour directions in scan order.
    pub fn open_exits(&self, at: Coord) -> Vec<Direction> {
        Direction::SCAN_ORDER
            .into_iter()
            .filter(|&dir| !self.collision(at, dir))
            .collect()
    }

    /// `a` and `b` share a row or column and every cell on the segment
    /// between them, both ends included, is unblocked.
    pub fn clear_line(&self, a: Coord, b: Coord) -> bool {
        if a.x == b.x {
            (a.y.min(b.y)..=a.y.max(b.y)).all(|y| !self.blocked(Coord::new(a.x, y)))
        } else if a.y == b.y {
            (a.x.min(b.x)..=a.x.max(b.x)).all(|x| !self.blocked(Coord::new(x, a.y)))
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plus() -> Grid {
        Grid::from_art("#.#\n...\n#.#").unwrap()
    }

    #[test]
    fn test_wall_count_counts_edges_and_walls() {
        let grid = plus();
        let terrain = Terrain::new(&grid);
        assert_eq!(terrain.wall_count(Coord::new(1, 1)), 0);
        // Top arm: wall left, wall right, off-grid above.
        assert_eq!(terrain.wall_count(Coord::new(1, 0)), 3);
    }

    #[test]
    fn test_roadblocks_layer_over_grid() {
        let grid = plus();
        let mut terrain = Terrain::new(&grid);
        let arm = Coord::new(1, 0);

        assert!(!terrain.blocked(arm));
        assert!(terrain.add_roadblock(arm));
        assert!(!terrain.add_roadblock(arm));
        assert!(terrain.blocked(arm));
        assert!(terrain.is_roadblock(arm));
        assert_eq!(terrain.roadblocks().as_slice(), &[arm]);
        assert_eq!(terrain.wall_count(Coord::new(1, 1)), 1);
        // The underlying grid is untouched.
        assert!(grid.is_open(arm));
    }

    #[test]
    fn test_roadblock_off_grid_is_ignored() {
        let grid = plus();
        let mut terrain = Terrain::new(&grid);
        assert!(!terrain.add_roadblock(Coord::new(7, 7)));
        assert!(terrain.roadblocks().as_slice().is_empty());
    }

    #[test]
    fn test_open_exits_in_scan_order() {
        let grid = plus();
        let terrain = Terrain::new(&grid);
        assert_eq!(
            terrain.open_exits(Coord::new(1, 1)),
            vec![Direction::Left, Direction::Up, Direction::Down, Direction::Right]
        );
        assert_eq!(terrain.open_exits(Coord::new(0, 1)), vec![Direction::Right]);
    }

    #[test]
    fn test_clear_line() {
        let grid = Grid::from_art("....\n.#..\n....").unwrap();
        let terrain = Terrain::new(&grid);
        assert!(terrain.clear_line(Coord::new(0, 0), Coord::new(3, 0)));
        assert!(!terrain.clear_line(Coord::new(0, 1), Coord::new(3, 1)));
        assert!(!terrain.clear_line(Coord::new(1, 0), Coord::new(1, 2)));
        assert!(!terrain.clear_line(Coord::new(0, 0), Coord::new(2, 2)));
    }
}
