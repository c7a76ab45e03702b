//! The [`Runner`]: drives one search a step at a time and keeps the
//! statistics and state a renderer needs.
//!
//! A runner is created per run and dropped on reset; "idle" is simply the
//! absence of a runner. Pacing (how often [`Runner::step`] is called) is up
//! to the caller.

use std::time::{Duration, Instant};

use pathviz_core::{Board, Point, Scene};

use crate::problem::Problem;
use crate::reconstruct::{path_len, reconstruct};
use crate::search::{AlgorithmKind, Search};
use crate::snapshot::{Advance, Snapshot};
use crate::error::SearchError;

/// Where a run stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    Running,
    /// Terminated with a path to the goal.
    Found,
    /// Terminated with the frontier exhausted.
    NoPath,
}

impl Status {
    #[inline]
    pub fn is_done(self) -> bool {
        self != Self::Running
    }
}

/// Summary of a run, as shown in a status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    pub algorithm: AlgorithmKind,
    pub status: Status,
    /// Size of the visited set.
    pub expanded: usize,
    pub frontier: usize,
    /// Number of `step` calls that advanced the search, stale pops included.
    pub steps: usize,
    pub stale_pops: usize,
    /// Steps along the path; 0 if there is none.
    pub path_len: usize,
    pub elapsed: Duration,
}

impl Stats {
    #[inline]
    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }
}

/// Owns one search and advances it on demand.
#[derive(Debug, Clone)]
pub struct Runner {
    search: Search,
    snapshot: Snapshot,
    status: Status,
    path: Option<Vec<Point>>,
    started: Instant,
    elapsed: Option<Duration>,
    steps: usize,
    stale_pops: usize,
}

impl Runner {
    /// Start a run on a private copy of `board`.
    ///
    /// Fails if `start` or `goal` lies outside the board.
    pub fn new(
        kind: AlgorithmKind,
        board: &Board,
        start: Point,
        goal: Point,
    ) -> Result<Self, SearchError> {
        let problem = Problem::new(board.clone(), start, goal)?;
        log::debug!(
            "starting {} on {}x{} board, {} -> {}",
            kind,
            board.width(),
            board.height(),
            start,
            goal
        );
        Ok(Self {
            search: Search::new(kind, problem),
            snapshot: Snapshot::default(),
            status: Status::Running,
            path: None,
            started: Instant::now(),
            elapsed: None,
            steps: 0,
            stale_pops: 0,
        })
    }

    /// Start a run on the scene's board, start and goal.
    pub fn from_scene(kind: AlgorithmKind, scene: &Scene) -> Result<Self, SearchError> {
        Self::new(kind, &scene.board, scene.start(), scene.goal())
    }

    /// Advance the search by one step.
    ///
    /// Does nothing once the run is done. Returns the status after the step.
    pub fn step(&mut self) -> Status {
        if self.status.is_done() {
            return self.status;
        }
        self.steps += 1;
        match self.search.advance() {
            Advance::Expanded(snap) => self.snapshot = snap,
            Advance::Stale(snap) => {
                self.stale_pops += 1;
                self.snapshot = snap;
            }
            Advance::Found(snap) => {
                self.snapshot = snap;
                self.finish(true);
            }
            Advance::Exhausted(snap) => {
                self.snapshot = snap;
                self.finish(false);
            }
        }
        log::trace!(
            "{} step {}: {} visited, {} in frontier",
            self.kind(),
            self.steps,
            self.snapshot.visited.len(),
            self.snapshot.frontier.len()
        );
        self.status
    }

    /// Step until the run is done.
    pub fn run_to_end(&mut self) -> Status {
        while !self.status.is_done() {
            self.step();
        }
        self.status
    }

    fn finish(&mut self, reached_goal: bool) {
        self.elapsed = Some(self.started.elapsed());
        let problem = self.search.problem();
        self.path = if reached_goal {
            reconstruct(&self.snapshot.came_from, problem.start(), problem.goal())
        } else {
            None
        };
        if reached_goal && self.path.is_none() {
            log::warn!("{}: goal popped but no predecessor chain reaches it", self.kind());
        }
        self.status = if self.path.is_some() {
            Status::Found
        } else {
            Status::NoPath
        };
        log::debug!(
            "{} done after {} steps: {:?}, {} visited, path length {}",
            self.kind(),
            self.steps,
            self.status,
            self.snapshot.visited.len(),
            self.path_len()
        );
    }

    #[inline]
    pub fn kind(&self) -> AlgorithmKind {
        self.search.kind()
    }

    #[inline]
    pub fn problem(&self) -> &Problem {
        self.search.problem()
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.status.is_done()
    }

    /// The most recent snapshot. Empty before the first step.
    #[inline]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Expansion count: the size of the current visited set.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.snapshot.visited.len()
    }

    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    #[inline]
    pub fn stale_pops(&self) -> usize {
        self.stale_pops
    }

    /// The path from start to goal. `None` while running and when no path
    /// exists.
    #[inline]
    pub fn path(&self) -> Option<&[Point]> {
        self.path.as_deref()
    }

    /// Steps along the path; 0 while running or if there is none.
    #[inline]
    pub fn path_len(&self) -> usize {
        self.path.as_deref().map_or(0, path_len)
    }

    /// Time since the run started, frozen once it is done.
    pub fn elapsed(&self) -> Duration {
        self.elapsed.unwrap_or_else(|| self.started.elapsed())
    }

    pub fn stats(&self) -> Stats {
        Stats {
            algorithm: self.kind(),
            status: self.status,
            expanded: self.expanded(),
            frontier: self.snapshot.frontier.len(),
            steps: self.steps,
            stale_pops: self.stale_pops,
            path_len: self.path_len(),
            elapsed: self.elapsed(),
        }
    }
}
