use pathviz_core::Point;

use crate::visit::PredecessorMap;

/// Walk the predecessor chain back from `goal` to `start` and return the
/// path in start → goal order, both endpoints included.
///
/// Returns `None` if the chain breaks before reaching `start` (the goal was
/// never reached) or loops back on itself.
pub fn reconstruct(came_from: &PredecessorMap, start: Point, goal: Point) -> Option<Vec<Point>> {
    let mut path = vec![goal];
    let mut cur = goal;
    while cur != start {
        cur = came_from.get(cur)?;
        path.push(cur);
        // An acyclic chain visits each linked cell at most once.
        if path.len() > came_from.len() + 1 {
            return None;
        }
    }
    path.reverse();
    Some(path)
}

/// Number of steps along `path` (cells minus one).
#[inline]
pub fn path_len(path: &[Point]) -> usize {
    path.len().saturating_sub(1)
}
