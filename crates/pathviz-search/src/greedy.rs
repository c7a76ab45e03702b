use crate::distance::manhattan;
use crate::eager::EagerSearch;
use crate::frontier::PriorityQueue;
use crate::problem::Problem;

/// Greedy best-first search: cells are expanded in order of their Manhattan
/// distance to the goal, seen at enqueue time.
///
/// Usually fast, but the path found is not guaranteed to be shortest.
pub type Greedy = EagerSearch<PriorityQueue>;

impl EagerSearch<PriorityQueue> {
    pub fn new(problem: Problem) -> Self {
        Self::with_frontier(problem, PriorityQueue::new(), manhattan)
    }
}
