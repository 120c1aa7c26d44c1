//! Ordered log of the cells a walker has stood on

use std::collections::HashSet;

use crate::grid::Coord;

/// Append-only visit log with constant-time membership
#[derive(Clone, Debug, Default)]
pub struct Trail {
    order: Vec<Coord>,
    seen: HashSet<Coord>,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    /// A trail whose first entry is `origin`.
    pub fn starting_at(origin: Coord) -> Self {
        let mut trail = Self::new();
        trail.record(origin);
        trail
    }

    /// Append `at`. Returns `true` if this is the first visit.
    pub fn record(&mut self, at: Coord) -> bool {
        self.order.push(at);
        self.seen.insert(at)
    }

    pub fn visited(&self, at: Coord) -> bool {
        self.seen.contains(&at)
    }

    pub fn second_to_last(&self) -> Option<Coord> {
        self.order.len().checked_sub(2).map(|i| self.order[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_to_last() {
        let mut trail = Trail::starting_at(Coord::new(0, 0));
        assert_eq!(trail.second_to_last(), None);
        trail.record(Coord::new(1, 0));
        trail.record(Coord::new(2, 0));
        assert_eq!(trail.second_to_last(), Some(Coord::new(1, 0)));
        assert!(trail.visited(Coord::new(0, 0)));
    }

    #[test]
    fn test_record_reports_first_visit() {
        let mut trail = Trail::new();
        assert!(trail.record(Coord::new(4, 4)));
        assert!(!trail.record(Coord::new(4, 4)));
        assert!(trail.visited(Coord::new(4, 4)));
        assert!(!trail.visited(Coord::new(4, 5)));
    }
}
