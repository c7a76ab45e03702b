use pathviz_core::Point;

use crate::visit::PredecessorMap;

/// The externally visible state of a search after one step.
///
/// Snapshots are owned copies: later steps never change a snapshot that has
/// already been handed out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    /// Frontier contents. See [`Frontier::positions`](crate::Frontier::positions)
    /// for the order.
    pub frontier: Vec<Point>,
    /// Seen cells in marking order: enqueued cells for BFS, DFS and greedy,
    /// expanded cells for A*.
    pub visited: Vec<Point>,
    pub came_from: PredecessorMap,
}

/// Result of advancing a search by one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// A cell was popped and expanded; the search continues.
    Expanded(Snapshot),
    /// An outdated A* entry was popped and discarded; nothing was expanded.
    Stale(Snapshot),
    /// The goal was popped. Terminal.
    Found(Snapshot),
    /// The frontier ran empty without reaching the goal. Terminal.
    Exhausted(Snapshot),
}

impl Advance {
    /// Whether the search has finished.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Found(_) | Self::Exhausted(_))
    }

    #[inline]
    pub fn snapshot(&self) -> &Snapshot {
        match self {
            Self::Expanded(s) | Self::Stale(s) | Self::Found(s) | Self::Exhausted(s) => s,
        }
    }

    #[inline]
    pub fn into_snapshot(self) -> Snapshot {
        match self {
            Self::Expanded(s) | Self::Stale(s) | Self::Found(s) | Self::Exhausted(s) => s,
        }
    }
}

/// How a finished search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Finish {
    Found,
    Exhausted,
}

impl Finish {
    pub(crate) fn wrap(self, snapshot: Snapshot) -> Advance {
        match self {
            Self::Found => Advance::Found(snapshot),
            Self::Exhausted => Advance::Exhausted(snapshot),
        }
    }
}
