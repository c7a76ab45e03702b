//! The user-editable [`Scene`]: a [`Board`] plus start and goal cells.
//!
//! Scenes can be written as ASCII layouts, one line per row:
//!
//! ```text
//! .....
//! ..#..
//! S.#.G
//! ..#..
//! .....
//! ```
//!
//! `.` is open, `#` is a wall, `S` is the start and `G` the goal (both open).

use std::fmt;

use rand::Rng;

use crate::board::{Board, Tile};
use crate::geom::Point;
use crate::mapgen::MapGen;

/// A board together with the start and goal cells of the next search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scene {
    pub board: Board,
    start: Point,
    goal: Point,
}

impl Scene {
    /// Create an open `width` × `height` scene with the default endpoints:
    /// start at (h/2, w/4) and goal at (h/2, 3w/4).
    pub fn new(width: i32, height: i32) -> Self {
        let board = Board::new(width, height);
        let (start, goal) = Self::default_endpoints(width.max(0), height.max(0));
        Self { board, start, goal }
    }

    fn default_endpoints(width: i32, height: i32) -> (Point, Point) {
        let row = height / 2;
        (Point::at(row, width / 4), Point::at(row, width * 3 / 4))
    }

    /// Build a scene from an ASCII layout. See the module documentation
    /// for the format.
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let lines: Vec<&str> = text
            .trim()
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let Some(first) = lines.first() else {
            return Err(LayoutError::Empty);
        };
        let width = first.chars().count();
        let mut board = Board::new(width as i32, lines.len() as i32);
        let mut start = None;
        let mut goal = None;

        for (y, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(LayoutError::Ragged {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in line.chars().enumerate() {
                let p = Point::new(x as i32, y as i32);
                let tile = match ch {
                    '.' => Tile::Open,
                    '#' => Tile::Wall,
                    'S' | 's' => {
                        if start.replace(p).is_some() {
                            return Err(LayoutError::DuplicateStart(p));
                        }
                        Tile::Open
                    }
                    'G' | 'g' => {
                        if goal.replace(p).is_some() {
                            return Err(LayoutError::DuplicateGoal(p));
                        }
                        Tile::Open
                    }
                    other => return Err(LayoutError::UnknownGlyph { ch: other, pos: p }),
                };
                board.set_tile(p, tile);
            }
        }

        Ok(Self {
            board,
            start: start.ok_or(LayoutError::MissingStart)?,
            goal: goal.ok_or(LayoutError::MissingGoal)?,
        })
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Point {
        self.goal
    }

    /// Move the start cell. Out-of-bounds points are rejected; a wall under
    /// the new start is removed.
    pub fn set_start(&mut self, p: Point) -> bool {
        if !self.board.contains(p) {
            return false;
        }
        self.board.set_tile(p, Tile::Open);
        self.start = p;
        true
    }

    /// Move the goal cell. Same rules as [`set_start`](Self::set_start).
    pub fn set_goal(&mut self, p: Point) -> bool {
        if !self.board.contains(p) {
            return false;
        }
        self.board.set_tile(p, Tile::Open);
        self.goal = p;
        true
    }

    /// Replace the board with an open one of a new size and reset the
    /// endpoints to their defaults.
    pub fn resize(&mut self, width: i32, height: i32) {
        *self = Self::new(width, height);
    }

    /// Randomly turn cells into walls with probability `density`, replacing
    /// the current layout. Start and goal stay open.
    pub fn scatter_walls<R: Rng>(&mut self, rng: R, density: f64) -> usize {
        let mut mg = MapGen::new(rng);
        mg.scatter(&mut self.board, density);
        self.board.set_tile(self.start, Tile::Open);
        self.board.set_tile(self.goal, Tile::Open);
        self.board.count(Tile::Wall)
    }
}

impl fmt::Display for Scene {
    /// Writes the scene in the same ASCII format [`Scene::parse`] reads.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.board.height() {
            for x in 0..self.board.width() {
                let p = Point::new(x, y);
                let ch = if p == self.start {
                    'S'
                } else if p == self.goal {
                    'G'
                } else if self.board.is_passable(p) {
                    '.'
                } else {
                    '#'
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Errors that can occur when parsing an ASCII layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The layout has no rows.
    Empty,
    /// A row is wider or narrower than the first one.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A character other than `.`, `#`, `S` or `G` was found.
    UnknownGlyph { ch: char, pos: Point },
    MissingStart,
    MissingGoal,
    DuplicateStart(Point),
    DuplicateGoal(Point),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "layout is empty"),
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "layout row {row} has {found} cells, expected {expected}"
            ),
            Self::UnknownGlyph { ch, pos } => {
                write!(f, "layout contains unknown glyph \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::MissingStart => write!(f, "layout has no start cell (S)"),
            Self::MissingGoal => write!(f, "layout has no goal cell (G)"),
            Self::DuplicateStart(p) => write!(f, "layout has a second start cell at {p}"),
            Self::DuplicateGoal(p) => write!(f, "layout has a second goal cell at {p}"),
        }
    }
}

impl std::error::Error for LayoutError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const WALLED: &str = "
        ..#..
        ..#..
        S.#.G
        ..#..
        .....";

    #[test]
    fn default_endpoints_follow_grid_size() {
        let s = Scene::new(30, 30);
        assert_eq!(s.start(), Point::at(15, 7));
        assert_eq!(s.goal(), Point::at(15, 22));
        assert!(s.board.is_passable(s.start()));
    }

    #[test]
    fn parse_layout() {
        let s = Scene::parse(WALLED).unwrap();
        assert_eq!(s.board.size(), Point::new(5, 5));
        assert_eq!(s.start(), Point::at(2, 0));
        assert_eq!(s.goal(), Point::at(2, 4));
        assert_eq!(s.board.count(Tile::Wall), 4);
        assert_eq!(s.board.tile(Point::at(4, 2)), Some(Tile::Open));
    }

    #[test]
    fn display_round_trips_through_parse() {
        let s = Scene::parse(WALLED).unwrap();
        let again = Scene::parse(&s.to_string()).unwrap();
        assert_eq!(s, again);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(Scene::parse("  \n "), Err(LayoutError::Empty));
        assert_eq!(
            Scene::parse("S..\n..G."),
            Err(LayoutError::Ragged {
                row: 1,
                expected: 3,
                found: 4
            })
        );
        assert_eq!(
            Scene::parse("S.x\n..G"),
            Err(LayoutError::UnknownGlyph {
                ch: 'x',
                pos: Point::new(2, 0)
            })
        );
        assert_eq!(Scene::parse("...\n..G"), Err(LayoutError::MissingStart));
        assert_eq!(Scene::parse("S..\n..."), Err(LayoutError::MissingGoal));
        assert_eq!(
            Scene::parse("S.S\n..G"),
            Err(LayoutError::DuplicateStart(Point::new(2, 0)))
        );
    }

    #[test]
    fn moving_endpoints_clears_walls() {
        let mut s = Scene::parse(WALLED).unwrap();
        assert!(s.set_goal(Point::at(0, 2)));
        assert_eq!(s.goal(), Point::at(0, 2));
        assert!(s.board.is_passable(Point::at(0, 2)));
        assert!(!s.set_start(Point::at(9, 9)));
        assert_eq!(s.start(), Point::at(2, 0));
    }

    #[test]
    fn scatter_keeps_endpoints_open() {
        let mut s = Scene::new(20, 20);
        let walls = s.scatter_walls(StdRng::seed_from_u64(7), 1.0);
        assert_eq!(walls, 400 - 2);
        assert!(s.board.is_passable(s.start()));
        assert!(s.board.is_passable(s.goal()));
    }

    #[test]
    fn resize_resets_layout() {
        let mut s = Scene::parse(WALLED).unwrap();
        s.resize(10, 6);
        assert_eq!(s.board.size(), Point::new(10, 6));
        assert_eq!(s.board.count(Tile::Wall), 0);
        assert_eq!(s.start(), Point::at(3, 2));
        assert_eq!(s.goal(), Point::at(3, 7));
    }
}
