use pathviz_core::Point;

use crate::distance::manhattan;
use crate::frontier::{Frontier, PriorityQueue};
use crate::problem::Problem;
use crate::snapshot::{Advance, Finish, Snapshot};
use crate::visit::{CostMap, PredecessorMap, UNREACHABLE, Visited};

/// A* search with unit step cost and the Manhattan heuristic.
///
/// Cells are marked as expanded when popped, not when pushed. A cell may sit
/// in the open list several times; whenever a strictly cheaper route to it
/// is found its cost and predecessor are updated and it is pushed again.
/// Popping a cell that was already expanded is a stale pop: it is discarded
/// and reported as [`Advance::Stale`].
#[derive(Debug, Clone)]
pub struct Astar {
    problem: Problem,
    open: PriorityQueue,
    closed: Visited,
    cost: CostMap,
    came_from: PredecessorMap,
    finished: Option<Finish>,
    nbuf: Vec<Point>,
}

impl Astar {
    pub fn new(problem: Problem) -> Self {
        let bounds = problem.bounds();
        let (start, goal) = (problem.start(), problem.goal());
        let mut cost = CostMap::new(bounds);
        cost.improve(start, 0);
        let mut open = PriorityQueue::new();
        open.push(start, manhattan(start, goal));
        Self {
            problem,
            open,
            closed: Visited::new(bounds),
            cost,
            came_from: PredecessorMap::new(bounds),
            finished: None,
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Pop one entry from the open list and expand it unless it is stale.
    ///
    /// Once a terminal result has been returned, every further call returns
    /// the same terminal result again.
    pub fn advance(&mut self) -> Advance {
        if let Some(finish) = self.finished {
            return finish.wrap(self.snapshot());
        }

        let Some(current) = self.open.pop() else {
            self.finished = Some(Finish::Exhausted);
            return Advance::Exhausted(self.snapshot());
        };

        // Skip stale entries.
        if !self.closed.insert(current) {
            return Advance::Stale(self.snapshot());
        }

        let goal = self.problem.goal();
        if current == goal {
            self.finished = Some(Finish::Found);
            return Advance::Found(self.snapshot());
        }

        let current_g = self.cost.get(current);
        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        self.problem.neighbors(current, &mut nbuf);

        for &np in nbuf.iter() {
            let tentative_g = current_g + 1;
            if !self.cost.improve(np, tentative_g) {
                continue;
            }
            self.came_from.insert(np, current);
            self.open.push(np, tentative_g + manhattan(np, goal));
        }

        self.nbuf = nbuf;
        Advance::Expanded(self.snapshot())
    }

    /// Copy of the current state. `visited` holds the expanded cells.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            frontier: self.open.positions(),
            visited: self.closed.as_slice().to_vec(),
            came_from: self.came_from.clone(),
        }
    }

    /// Best known cost from the start to `p`, if `p` has been reached.
    pub fn cost_at(&self, p: Point) -> Option<i32> {
        match self.cost.get(p) {
            UNREACHABLE => None,
            g => Some(g),
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

#[cfg(test)]
mod tests {
    use super::*;
    use pathviz_core::Scene;

    fn astar(layout: &str) -> Astar {
        let scene = Scene::parse(layout).unwrap();
        Astar::new(Problem::new(scene.board.clone(), scene.start(), scene.goal()).unwrap())
    }

    fn finish(search: &mut Astar) -> (usize, usize, Advance) {
        let (mut expanded, mut stale) = (0, 0);
        loop {
            match search.advance() {
                Advance::Expanded(_) => expanded += 1,
                Advance::Stale(_) => stale += 1,
                terminal => return (expanded, stale, terminal),
            }
        }
    }

    #[test]
    fn start_is_expanded_on_first_pop() {
        let mut search = astar("S...G");
        assert!(search.snapshot().visited.is_empty());
        let Advance::Expanded(snap) = search.advance() else {
            panic!("expected an expansion");
        };
        assert_eq!(snap.visited, vec![Point::at(0, 0)]);
        assert_eq!(snap.frontier, vec![Point::at(0, 1)]);
        assert_eq!(search.cost_at(Point::at(0, 1)), Some(1));
        assert_eq!(search.cost_at(Point::at(0, 3)), None);
    }

    #[test]
    fn open_corridor_expands_only_the_corridor() {
        let mut search = astar("S...G");
        let (expanded, stale, adv) = finish(&mut search);
        assert!(matches!(adv, Advance::Found(_)));
        assert_eq!((expanded, stale), (4, 0));
        assert_eq!(search.cost_at(Point::at(0, 4)), Some(4));
    }

    #[test]
    fn costs_match_shortest_distances_around_a_wall() {
        let mut search = astar(
            "
            .....
            ..#..
            S.#.G
            ..#..
            ..#..",
        );
        let (_, _, adv) = finish(&mut search);
        assert!(matches!(adv, Advance::Found(_)));
        // Up to row 0, across, and back down to row 2.
        assert_eq!(search.cost_at(Point::at(2, 4)), Some(8));
    }

    #[test]
    fn exhausts_when_walled_off() {
        let mut search = astar(
            "
            S.#..
            ..#.G",
        );
        let (expanded, _, adv) = finish(&mut search);
        let Advance::Exhausted(snap) = adv else {
            panic!("goal must be unreachable");
        };
        assert_eq!(expanded, 4);
        assert_eq!(snap.visited.len(), 4);
        assert!(snap.frontier.is_empty());
        assert!(search.is_finished());
        assert_eq!(search.advance(), Advance::Exhausted(snap));
    }
}
