//! Dead-end scout
//!
//! A scout is dropped on a dead end and walks back out along the single-width
//! corridor until the corridor opens into a junction. The cell just before
//! the junction is the corridor's entrance; sealing it makes the whole branch
//! invisible to the search.
//!
//! A scout finds nothing to seal when:
//! - it was dropped on the maze start or end,
//! - the corridor leads onto the maze start or end (those must stay reachable),
//! - the corridor ends in a second dead end (an isolated pocket).

use crate::direction::Direction;
use crate::grid::Coord;
use crate::terrain::Terrain;
use crate::trail::Trail;

/// Walker that locates the entrance of one dead-end corridor
pub struct Scout<'a> {
    terrain: &'a Terrain<'a>,
    position: Coord,
    maze_start: Coord,
    maze_end: Coord,
    trail: Trail,
}

impl<'a> Scout<'a> {
    /// Drop a scout on `dead_end`. It sees every roadblock already in
    /// `terrain`.
    pub fn new(
        terrain: &'a Terrain<'a>,
        dead_end: Coord,
        maze_start: Coord,
        maze_end: Coord,
    ) -> Self {
        Self {
            terrain,
            position: dead_end,
            maze_start,
            maze_end,
            trail: Trail::starting_at(dead_end),
        }
    }

    /// Walk the corridor and return the cell to seal, if any.
    pub fn find_entrance(mut self) -> Option<Coord> {
        let origin = self.position;
        if self.is_start_or_end(origin) || self.terrain.wall_count(origin) != 3 {
            return None;
        }

        let mut dir = *self.terrain.open_exits(origin).first()?;

        while self.terrain.wall_count(self.position) >= 2 {
            let mut entrance_reached = false;

            while !self.terrain.collision(self.position, dir) {
                let Some(next) = self.position.step(dir) else {
                    break;
                };
                self.position = next;
                self.trail.record(next);

                if self.is_start_or_end(next) {
                    tracing::trace!("scout from {} reached start/end at {}", origin, next);
                    return None;
                }

                if self.terrain.wall_count(next) < 2 {
                    entrance_reached = true;
                    break;
                }
            }

            if entrance_reached {
                break;
            }

            if self.terrain.wall_count(self.position) == 3 {
                tracing::trace!("scout from {} found isolated pocket at {}", origin, self.position);
                return None;
            }

            dir = self.next_turn()?;
        }

        self.trail.second_to_last()
    }

    /// First neighbour, in scan order, that is open and not yet walked.
    fn next_turn(&self) -> Option<Direction> {
        Direction::SCAN_ORDER.into_iter().find(|&dir| {
            self.position
                .step(dir)
                .is_some_and(|next| !self.trail.visited(next) && !self.terrain.blocked(next))
        })
    }

    fn is_start_or_end(&self, at: Coord) -> bool {
        at == self.maze_start || at == self.maze_end
    }
}
