//! [`AlgorithmKind`] and the [`Search`] enum that gives the four strategies a
//! common `advance()` interface.

use std::fmt;
use std::str::FromStr;

use crate::astar::Astar;
use crate::bfs::Bfs;
use crate::dfs::Dfs;
use crate::error::ParseKindError;
use crate::greedy::Greedy;
use crate::problem::Problem;
use crate::snapshot::{Advance, Snapshot};

/// The available search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlgorithmKind {
    #[default]
    Bfs,
    Dfs,
    Greedy,
    Astar,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 4] = [Self::Bfs, Self::Dfs, Self::Greedy, Self::Astar];

    pub fn label(self) -> &'static str {
        match self {
            Self::Bfs => "BFS",
            Self::Dfs => "DFS",
            Self::Greedy => "Greedy",
            Self::Astar => "A*",
        }
    }

    /// The next kind in [`ALL`](Self::ALL) order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::Bfs => Self::Dfs,
            Self::Dfs => Self::Greedy,
            Self::Greedy => Self::Astar,
            Self::Astar => Self::Bfs,
        }
    }

    /// Whether the strategy always returns a shortest path.
    pub fn is_optimal(self) -> bool {
        matches!(self, Self::Bfs | Self::Astar)
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AlgorithmKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(Self::Bfs),
            "dfs" => Ok(Self::Dfs),
            "greedy" | "best-first" => Ok(Self::Greedy),
            "astar" | "a*" => Ok(Self::Astar),
            _ => Err(ParseKindError(s.to_string())),
        }
    }
}

/// One resumable search of any kind.
#[derive(Debug, Clone)]
pub enum Search {
    Bfs(Bfs),
    Dfs(Dfs),
    Greedy(Greedy),
    Astar(Astar),
}

impl Search {
    pub fn new(kind: AlgorithmKind, problem: Problem) -> Self {
        match kind {
            AlgorithmKind::Bfs => Self::Bfs(Bfs::new(problem)),
            AlgorithmKind::Dfs => Self::Dfs(Dfs::new(problem)),
            AlgorithmKind::Greedy => Self::Greedy(Greedy::new(problem)),
            AlgorithmKind::Astar => Self::Astar(Astar::new(problem)),
        }
    }

    pub fn kind(&self) -> AlgorithmKind {
        match self {
            Self::Bfs(_) => AlgorithmKind::Bfs,
            Self::Dfs(_) => AlgorithmKind::Dfs,
            Self::Greedy(_) => AlgorithmKind::Greedy,
            Self::Astar(_) => AlgorithmKind::Astar,
        }
    }

    /// Perform exactly one step of the underlying strategy.
    pub fn advance(&mut self) -> Advance {
        match self {
            Self::Bfs(s) => s.advance(),
            Self::Dfs(s) => s.advance(),
            Self::Greedy(s) => s.advance(),
            Self::Astar(s) => s.advance(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        match self {
            Self::Bfs(s) => s.snapshot(),
            Self::Dfs(s) => s.snapshot(),
            Self::Greedy(s) => s.snapshot(),
            Self::Astar(s) => s.snapshot(),
        }
    }

    pub fn problem(&self) -> &Problem {
        match self {
            Self::Bfs(s) => s.problem(),
            Self::Dfs(s) => s.problem(),
            Self::Greedy(s) => s.problem(),
            Self::Astar(s) => s.problem(),
        }
    }
}
