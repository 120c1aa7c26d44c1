//! Maze files
//!
//! Two on-disk formats are understood:
//!
//! - **Text**: a `cols rows` header counted in maze cells, followed by
//!   `2*rows + 1` lines of `2*cols + 1` characters. `' '` is open, `'*'` the
//!   start, `'O'` the end, anything else a wall. Short lines and missing rows
//!   are padded with walls.
//! - **JSON**: `{ "name": .., "grid": [[0|1, ..], ..], "start": {x, y},
//!   "end": {x, y} }` with `0` = wall and `1` = path.
//!
//! Files ending in `.json` are read as JSON, everything else as text.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wallfollow_core::{Coord, GeneratedMaze, Grid, GridError};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read maze file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid maze JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid grid: {0}")]
    Grid(#[from] GridError),
    #[error("bad header {0:?}: expected `<cols> <rows>`")]
    Header(String),
    #[error("line {line} has {found} characters, expected at most {expected}")]
    LineTooLong {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("maze has more than {expected} rows")]
    TooManyRows { expected: usize },
    #[error("no {0} marker in maze")]
    MissingMarker(&'static str),
    #[error("second {marker} marker at {at}")]
    DuplicateMarker { marker: &'static str, at: Coord },
    #[error("a {cols}x{rows} grid has no text form; both sides must be odd")]
    NotTextShaped { cols: usize, rows: usize },
}

/// A maze with its endpoints, as read from a file or generated
#[derive(Debug, Clone)]
pub struct Maze {
    pub name: String,
    pub grid: Grid,
    pub start: Coord,
    pub end: Coord,
}

#[derive(Serialize, Deserialize)]
struct MazeFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    grid: Vec<Vec<u8>>,
    start: Coord,
    end: Coord,
}

impl Maze {
    pub fn from_generated(name: impl Into<String>, maze: GeneratedMaze) -> Self {
        Self {
            name: name.into(),
            grid: maze.grid,
            start: maze.start,
            end: maze.end,
        }
    }

    /// Parse the text format.
    pub fn parse_text(name: impl Into<String>, text: &str) -> Result<Self, LoadError> {
        let mut lines = text.lines();
        let header = lines.next().unwrap_or_default();
        let (cols, rows) = parse_header(header)?;
        let (width, height) = Grid::walled_size(cols, rows)?;

        let mut cells = vec![vec![false; width]; height];
        let mut start = None;
        let mut end = None;

        for (y, line) in lines.enumerate() {
            let line = line.trim_end_matches('\r');
            if y >= height {
                if line.trim().is_empty() {
                    continue;
                }
                return Err(LoadError::TooManyRows { expected: height });
            }

            let found = line.chars().count();
            if found > width {
                return Err(LoadError::LineTooLong {
                    line: y + 2,
                    expected: width,
                    found,
                });
            }

            for (x, c) in line.chars().enumerate() {
                let at = Coord::new(x, y);
                match c {
                    '*' => place_marker(&mut start, "start", at)?,
                    'O' => place_marker(&mut end, "end", at)?,
                    _ => {}
                }
                cells[y][x] = matches!(c, ' ' | '*' | 'O');
            }
        }

        let maze = Self {
            name: name.into(),
            grid: Grid::from_rows(&cells)?,
            start: start.ok_or(LoadError::MissingMarker("start"))?,
            end: end.ok_or(LoadError::MissingMarker("end"))?,
        };

        tracing::debug!(
            "Parsed text maze {} ({}x{} grid)",
            maze.name,
            maze.grid.cols(),
            maze.grid.rows()
        );
        Ok(maze)
    }

    /// Render back to the text format. Only grids with odd sides have one.
    pub fn to_text(&self) -> Result<String, LoadError> {
        let (cols, rows) = (self.grid.cols(), self.grid.rows());
        if cols % 2 == 0 || rows % 2 == 0 {
            return Err(LoadError::NotTextShaped { cols, rows });
        }

        let mut out = format!("{} {}\n", self.grid.cols() / 2, self.grid.rows() / 2);
        for y in 0..self.grid.rows() {
            for x in 0..self.grid.cols() {
                let at = Coord::new(x, y);
                let c = if at == self.start {
                    '*'
                } else if at == self.end {
                    'O'
                } else if self.grid.is_open(at) {
                    ' '
                } else {
                    '#'
                };
                out.push(c);
            }
            out.push('\n');
        }
        Ok(out)
    }

    /// Parse the JSON format. A missing name falls back to `default_name`.
    pub fn parse_json(default_name: impl Into<String>, json: &str) -> Result<Self, LoadError> {
        let file: MazeFile = serde_json::from_str(json)?;
        Ok(Self {
            name: file.name.unwrap_or_else(|| default_name.into()),
            grid: Grid::from_binary_rows(&file.grid)?,
            start: file.start,
            end: file.end,
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let file = MazeFile {
            name: Some(self.name.clone()),
            grid: self.grid.to_binary_rows(),
            start: self.start,
            end: self.end,
        };
        serde_json::to_string_pretty(&file)
    }
}

/// Load a maze file, choosing the format by extension.
pub fn load_maze(path: impl AsRef<Path>) -> Result<Maze, LoadError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        Maze::parse_json(name, &contents)
    } else {
        Maze::parse_text(name, &contents)
    }
}

fn parse_header(header: &str) -> Result<(usize, usize), LoadError> {
    let bad = || LoadError::Header(header.to_string());
    let mut fields = header.split_whitespace();
    let cols = fields.next().and_then(|f| f.parse().ok()).ok_or_else(bad)?;
    let rows = fields.next().and_then(|f| f.parse().ok()).ok_or_else(bad)?;
    if fields.next().is_some() {
        return Err(bad());
    }
    Ok((cols, rows))
}

fn place_marker(
    slot: &mut Option<Coord>,
    marker: &'static str,
    at: Coord,
) -> Result<(), LoadError> {
    if slot.is_some() {
        return Err(LoadError::DuplicateMarker { marker, at });
    }
    *slot = Some(at);
    Ok(())
}
