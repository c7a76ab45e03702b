use std::fmt;

use pathviz_core::{Point, Range};

/// Which end of a search a [`SearchError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::Goal => "goal",
        })
    }
}

/// Errors that can occur when setting up a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The start or goal lies outside the board.
    OutOfBounds {
        endpoint: Endpoint,
        pos: Point,
        bounds: Range,
    },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                endpoint,
                pos,
                bounds,
            } => write!(f, "{endpoint} {pos} lies outside the board ({bounds})"),
        }
    }
}

impl std::error::Error for SearchError {}

/// Error returned when an algorithm name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKindError(pub String);

impl fmt::Display for ParseKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown algorithm \u{201c}{}\u{201d} (expected bfs, dfs, greedy or astar)",
            self.0
        )
    }
}

impl std::error::Error for ParseKindError {}
