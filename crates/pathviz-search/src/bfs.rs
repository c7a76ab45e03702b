use crate::eager::EagerSearch;
use crate::frontier::Queue;
use crate::problem::Problem;

/// Breadth-first search: FIFO frontier, seen at enqueue time.
///
/// Finds a path with the fewest steps.
pub type Bfs = EagerSearch<Queue>;

impl EagerSearch<Queue> {
    pub fn new(problem: Problem) -> Self {
        Self::with_frontier(problem, Queue::new(), |_, _| 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Advance;
    use pathviz_core::{Point, Scene};

    fn bfs(layout: &str) -> Bfs {
        let scene = Scene::parse(layout).unwrap();
        Bfs::new(Problem::new(scene.board.clone(), scene.start(), scene.goal()).unwrap())
    }

    #[test]
    fn first_step_enqueues_neighbors_in_direction_order() {
        let mut search = bfs(
            "
            ...
            .S.
            ..G",
        );
        let Advance::Expanded(snap) = search.advance() else {
            panic!("expected an expansion");
        };
        assert_eq!(
            snap.frontier,
            vec![Point::at(2, 1), Point::at(0, 1), Point::at(1, 2), Point::at(1, 0)]
        );
        assert_eq!(snap.visited.len(), 5);
        assert_eq!(snap.came_from.get(Point::at(2, 1)), Some(Point::at(1, 1)));
    }

    #[test]
    fn expands_in_layers() {
        let mut search = bfs("S....G");
        let mut steps = 0;
        loop {
            let adv = search.advance();
            if adv.is_terminal() {
                assert!(matches!(adv, Advance::Found(_)));
                break;
            }
            steps += 1;
        }
        // One expansion per cell before the goal.
        assert_eq!(steps, 5);
    }

    #[test]
    fn start_equal_to_goal_is_found_immediately() {
        let scene = Scene::parse("SG").unwrap();
        let problem = Problem::new(scene.board.clone(), scene.start(), scene.start()).unwrap();
        let mut search = Bfs::new(problem);
        assert!(matches!(search.advance(), Advance::Found(_)));
        assert!(search.came_from().is_empty());
    }

    #[test]
    fn terminal_result_repeats() {
        let mut search = bfs("S#G");
        assert!(matches!(search.advance(), Advance::Expanded(_)));
        let first = search.advance();
        assert!(matches!(first, Advance::Exhausted(_)));
        assert_eq!(search.advance(), first);
        assert!(search.is_finished());
    }
}
