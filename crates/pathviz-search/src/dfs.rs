use crate::eager::EagerSearch;
use crate::frontier::Stack;
use crate::problem::Problem;

/// Depth-first search: LIFO frontier, seen at enqueue time.
///
/// Finds some path, not necessarily a short one.
pub type Dfs = EagerSearch<Stack>;

impl EagerSearch<Stack> {
    pub fn new(problem: Problem) -> Self {
        Self::with_frontier(problem, Stack::new(), |_, _| 0)
    }
}
