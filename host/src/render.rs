//! ASCII rendering and step-by-step animation
//!
//! Legend: `X` wall, `R` roadblock, `.` path, `S` start, `E` end, `H` walker,
//! blank for open floor.

use std::collections::HashSet;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use wallfollow_core::{Coord, Direction, Grid, Solution, SolveObserver};

/// Everything needed to draw one picture of a maze
#[derive(Debug, Clone)]
pub struct MazeView<'a> {
    pub grid: &'a Grid,
    pub start: Coord,
    pub end: Coord,
    pub roadblocks: &'a [Coord],
    pub path: &'a [Coord],
    pub walker: Option<Coord>,
}

impl<'a> MazeView<'a> {
    pub fn new(grid: &'a Grid, start: Coord, end: Coord) -> Self {
        Self {
            grid,
            start,
            end,
            roadblocks: &[],
            path: &[],
            walker: None,
        }
    }
}

pub fn render(view: &MazeView<'_>) -> String {
    let roadblocks: HashSet<Coord> = view.roadblocks.iter().copied().collect();
    let path: HashSet<Coord> = view.path.iter().copied().collect();

    let mut out = String::with_capacity((view.grid.cols() + 1) * view.grid.rows());
    for y in 0..view.grid.rows() {
        for x in 0..view.grid.cols() {
            let at = Coord::new(x, y);
            let c = if !view.grid.is_open(at) {
                'X'
            } else if view.walker == Some(at) {
                'H'
            } else if at == view.start {
                'S'
            } else if at == view.end {
                'E'
            } else if roadblocks.contains(&at) {
                'R'
            } else if path.contains(&at) {
                '.'
            } else {
                ' '
            };
            out.push(c);
        }
        out.push('\n');
    }
    out
}

/// Observer that draws a frame after every step of the walker.
///
/// Write errors stop further output; the first one is returned by
/// [`FrameRecorder::finish`].
pub struct FrameRecorder<'g, W: Write> {
    out: W,
    grid: &'g Grid,
    start: Coord,
    end: Coord,
    roadblocks: Vec<Coord>,
    path: Vec<Coord>,
    delay: Duration,
    frames: usize,
    error: Option<io::Error>,
}

impl<'g, W: Write> FrameRecorder<'g, W> {
    pub fn new(out: W, grid: &'g Grid, start: Coord, end: Coord) -> Self {
        Self {
            out,
            grid,
            start,
            end,
            roadblocks: Vec::new(),
            path: vec![start],
            delay: Duration::ZERO,
            frames: 0,
            error: None,
        }
    }

    /// Pause this long after each frame.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Hand back the writer, or the first write error.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn draw(&mut self) {
        if self.error.is_some() {
            return;
        }

        let view = MazeView {
            grid: self.grid,
            start: self.start,
            end: self.end,
            roadblocks: &self.roadblocks,
            path: &self.path,
            walker: self.path.last().copied(),
        };
        let frame = render(&view);

        match writeln!(self.out, "{frame}") {
            Ok(()) => self.frames += 1,
            Err(e) => {
                tracing::warn!("Animation output failed: {}", e);
                self.error = Some(e);
                return;
            }
        }

        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }
}

impl<W: Write> SolveObserver for FrameRecorder<'_, W> {
    fn on_seal(&mut self, entrance: Coord) {
        self.roadblocks.push(entrance);
    }

    fn on_step(&mut self, position: Coord, _direction: Direction) {
        // Stepping back onto the previous cell is a retreat.
        let retreat = self.path.len() >= 2 && self.path[self.path.len() - 2] == position;
        if retreat {
            self.path.pop();
        } else {
            self.path.push(position);
        }
        self.draw();
    }

    fn on_finish(&mut self, _solution: &Solution) {
        self.draw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wallfollow_core::Solver;

    #[test]
    fn test_render_legend() {
        let grid = Grid::from_art("....\n.#..").unwrap();
        let view = MazeView {
            roadblocks: &[Coord::new(3, 1)],
            path: &[Coord::new(1, 0), Coord::new(2, 0)],
            walker: Some(Coord::new(2, 0)),
            ..MazeView::new(&grid, Coord::new(0, 0), Coord::new(3, 0))
        };
        assert_eq!(render(&view), "S.HE\n X R\n");
    }

    #[test]
    fn test_recorder_draws_every_step() {
        let grid = Grid::from_art("#.###.#\n#.###.#\n#.....#\n#.###.#\n#.###.#").unwrap();
        let (start, end) = (Coord::new(1, 0), Coord::new(5, 4));

        let mut recorder = FrameRecorder::new(Vec::new(), &grid, start, end);
        let solution = Solver::new(&grid, start, end)
            .unwrap()
            .run_with(&mut recorder)
            .unwrap();

        assert_eq!(recorder.frames(), solution.moves_walked + 1);
        assert_eq!(recorder.roadblocks, solution.roadblocks);

        let output = String::from_utf8(recorder.finish().unwrap()).unwrap();
        let last = output.trim_end().rsplit("\n\n").next().unwrap();
        assert!(last.contains('R'));
        assert!(last.lines().last().unwrap().contains('H'));
    }
}
