use pathviz_core::{Board, Point, Range};

use crate::error::{Endpoint, SearchError};

/// Neighbor offsets in expansion order: down, up, right, left.
///
/// The order decides tie-breaking in every frontier and therefore the shape
/// of the path among equal-cost alternatives.
pub const DIRECTIONS: [Point; 4] = [
    Point::new(0, 1),
    Point::new(0, -1),
    Point::new(1, 0),
    Point::new(-1, 0),
];

/// The grid model of one search run: a private copy of the board plus the
/// start and goal cells.
///
/// Edits made to the caller's board after construction do not affect the
/// problem.
#[derive(Debug, Clone)]
pub struct Problem {
    board: Board,
    start: Point,
    goal: Point,
}

impl Problem {
    /// Create a problem, failing if either endpoint lies outside the board.
    pub fn new(board: Board, start: Point, goal: Point) -> Result<Self, SearchError> {
        for (endpoint, pos) in [(Endpoint::Start, start), (Endpoint::Goal, goal)] {
            if !board.contains(pos) {
                return Err(SearchError::OutOfBounds {
                    endpoint,
                    pos,
                    bounds: board.bounds(),
                });
            }
        }
        Ok(Self { board, start, goal })
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Point {
        self.goal
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.board.bounds()
    }

    /// Whether a search may step onto `p`.
    ///
    /// The start and goal count as passable even if the board has a wall
    /// there.
    #[inline]
    pub fn is_passable(&self, p: Point) -> bool {
        p == self.start || p == self.goal || self.board.is_passable(p)
    }

    /// Append the passable cardinal neighbors of `p` to `buf`, in
    /// [`DIRECTIONS`] order. The caller clears `buf` before calling.
    pub fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        for d in DIRECTIONS {
            let n = p + d;
            if self.is_passable(n) {
                buf.push(n);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathviz_core::{Scene, Tile};

    fn neighbors_of(problem: &Problem, p: Point) -> Vec<Point> {
        let mut buf = Vec::new();
        problem.neighbors(p, &mut buf);
        buf
    }

    #[test]
    fn rejects_out_of_bounds_endpoints() {
        let board = Board::new(5, 5);
        let err = Problem::new(board.clone(), Point::new(5, 0), Point::new(1, 1)).unwrap_err();
        assert_eq!(
            err,
            SearchError::OutOfBounds {
                endpoint: Endpoint::Start,
                pos: Point::new(5, 0),
                bounds: board.bounds(),
            }
        );
        let err = Problem::new(board, Point::new(0, 0), Point::new(-1, 2)).unwrap_err();
        assert!(matches!(
            err,
            SearchError::OutOfBounds {
                endpoint: Endpoint::Goal,
                ..
            }
        ));
    }

    #[test]
    fn neighbors_follow_canonical_order() {
        let problem = Problem::new(Board::new(5, 5), Point::at(0, 0), Point::at(4, 4)).unwrap();
        let p = Point::at(2, 2);
        assert_eq!(
            neighbors_of(&problem, p),
            vec![Point::at(3, 2), Point::at(1, 2), Point::at(2, 3), Point::at(2, 1)]
        );
    }

    #[test]
    fn neighbors_skip_walls_and_edges() {
        let scene = Scene::parse(
            "
            S#.
            ...
            ..G",
        )
        .unwrap();
        let problem = Problem::new(scene.board.clone(), scene.start(), scene.goal()).unwrap();
        assert_eq!(neighbors_of(&problem, Point::at(0, 0)), vec![Point::at(1, 0)]);
        assert_eq!(
            neighbors_of(&problem, Point::at(2, 2)),
            vec![Point::at(1, 2), Point::at(2, 1)]
        );
    }

    #[test]
    fn walled_goal_is_still_reachable() {
        let mut board = Board::new(3, 1);
        board.set_tile(Point::at(0, 2), Tile::Wall);
        let problem = Problem::new(board, Point::at(0, 0), Point::at(0, 2)).unwrap();
        assert!(problem.is_passable(Point::at(0, 2)));
        assert_eq!(neighbors_of(&problem, Point::at(0, 1)), vec![Point::at(0, 2), Point::at(0, 0)]);
    }

    #[test]
    fn owns_its_board() {
        let mut board = Board::new(3, 3);
        let problem = Problem::new(board.clone(), Point::at(0, 0), Point::at(2, 2)).unwrap();
        board.set_tile(Point::at(1, 1), Tile::Wall);
        assert!(problem.is_passable(Point::at(1, 1)));
    }
}
