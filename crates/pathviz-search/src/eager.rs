//! The search loop shared by BFS, DFS and greedy best-first search.
//!
//! All three mark a cell as seen the moment it is enqueued and never enqueue
//! it again; they differ only in their frontier and in the priority they
//! give each new cell.

use pathviz_core::Point;

use crate::frontier::Frontier;
use crate::problem::Problem;
use crate::snapshot::{Advance, Finish, Snapshot};
use crate::visit::{PredecessorMap, Visited};

/// Priority of a newly discovered cell, given the cell and the goal.
pub type PriorityFn = fn(Point, Point) -> i32;

/// A resumable search that marks cells as seen at enqueue time.
///
/// Use the [`Bfs`](crate::Bfs), [`Dfs`](crate::Dfs) and
/// [`Greedy`](crate::Greedy) aliases to construct one.
#[derive(Debug, Clone)]
pub struct EagerSearch<F: Frontier> {
    problem: Problem,
    frontier: F,
    seen: Visited,
    came_from: PredecessorMap,
    priority: PriorityFn,
    finished: Option<Finish>,
    nbuf: Vec<Point>,
}

impl<F: Frontier> EagerSearch<F> {
    /// Seed `frontier` with the start cell.
    pub(crate) fn with_frontier(problem: Problem, mut frontier: F, priority: PriorityFn) -> Self {
        let bounds = problem.bounds();
        let start = problem.start();
        let mut seen = Visited::new(bounds);
        seen.insert(start);
        frontier.push(start, priority(start, problem.goal()));
        Self {
            problem,
            frontier,
            seen,
            came_from: PredecessorMap::new(bounds),
            priority,
            finished: None,
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Pop one cell and expand it.
    ///
    /// Once a terminal result has been returned, every further call returns
    /// the same terminal result again.
    pub fn advance(&mut self) -> Advance {
        if let Some(finish) = self.finished {
            return finish.wrap(self.snapshot());
        }

        let Some(current) = self.frontier.pop() else {
            self.finished = Some(Finish::Exhausted);
            return Advance::Exhausted(self.snapshot());
        };

        let goal = self.problem.goal();
        if current == goal {
            self.finished = Some(Finish::Found);
            return Advance::Found(self.snapshot());
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        self.problem.neighbors(current, &mut nbuf);

        for &np in nbuf.iter() {
            if !self.seen.insert(np) {
                continue;
            }
            self.came_from.insert(np, current);
            self.frontier.push(np, (self.priority)(np, goal));
        }

        self.nbuf = nbuf;
        Advance::Expanded(self.snapshot())
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            frontier: self.frontier.positions(),
            visited: self.seen.as_slice().to_vec(),
            came_from: self.came_from.clone(),
        }
    }

    #[inline]
    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished.is_some()
    }

    #[inline]
    pub fn came_from(&self) -> &PredecessorMap {
        &self.came_from
    }
}
