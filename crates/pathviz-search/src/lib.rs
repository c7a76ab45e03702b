//! Steppable graph search on grids.
//!
//! This crate runs the classic grid searches one expansion at a time so that
//! a front-end can animate them:
//!
//! - **BFS** ([`Bfs`]): FIFO frontier, shortest paths
//! - **DFS** ([`Dfs`]): LIFO frontier, some path
//! - **Greedy best-first** ([`Greedy`]): Manhattan-ordered frontier
//! - **A\*** ([`Astar`]): cost-plus-heuristic ordering with lazy deletion,
//!   shortest paths
//!
//! Every strategy exposes `advance()`, which performs exactly one step and
//! returns an [`Advance`] tag carrying a [`Snapshot`] of the frontier, the
//! visited set and the predecessor map. [`Runner`] wraps a [`Search`] of any
//! kind, keeps the latest snapshot and statistics, and reconstructs the path
//! when the search ends.
//!
//! Movement is 4-directional with unit cost; neighbors are generated in the
//! fixed [`DIRECTIONS`] order.

mod astar;
mod bfs;
mod dfs;
mod distance;
mod eager;
mod error;
mod frontier;
mod greedy;
mod problem;
mod reconstruct;
mod runner;
mod search;
mod snapshot;
mod visit;

pub use astar::Astar;
pub use bfs::Bfs;
pub use dfs::Dfs;
pub use distance::manhattan;
pub use eager::{EagerSearch, PriorityFn};
pub use error::{Endpoint, ParseKindError, SearchError};
pub use frontier::{Frontier, PriorityQueue, Queue, Stack};
pub use greedy::Greedy;
pub use problem::{DIRECTIONS, Problem};
pub use reconstruct::{path_len, reconstruct};
pub use runner::{Runner, Stats, Status};
pub use search::{AlgorithmKind, Search};
pub use snapshot::{Advance, Snapshot};
pub use visit::{CostMap, PredecessorMap, UNREACHABLE, Visited};
