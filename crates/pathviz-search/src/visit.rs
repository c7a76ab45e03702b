//! Per-run bookkeeping keyed by flat cell index: the visited set, the
//! predecessor map and the A* cost map.

use pathviz_core::{Point, Range};

/// Sentinel value meaning "no known cost" in a [`CostMap`].
pub const UNREACHABLE: i32 = i32::MAX;

/// Empty link slot. No cell index reaches it.
const NO_LINK: usize = usize::MAX;

// ---------------------------------------------------------------------------
// Visited
// ---------------------------------------------------------------------------

/// Set of cells marked as seen, remembering the order they were marked in.
///
/// Membership only ever grows during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visited {
    bounds: Range,
    marks: Vec<bool>,
    order: Vec<Point>,
}

impl Visited {
    pub fn new(bounds: Range) -> Self {
        Self {
            bounds,
            marks: vec![false; bounds.len()],
            order: Vec::new(),
        }
    }

    /// Mark `p` as seen. Returns `true` if it was not seen before; points
    /// outside the bounds are never inserted.
    pub fn insert(&mut self, p: Point) -> bool {
        let Some(i) = self.bounds.index(p) else {
            return false;
        };
        if self.marks[i] {
            return false;
        }
        self.marks[i] = true;
        self.order.push(p);
        true
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.index(p).is_some_and(|i| self.marks[i])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Seen cells in marking order.
    #[inline]
    pub fn as_slice(&self) -> &[Point] {
        &self.order
    }
}

// ---------------------------------------------------------------------------
// PredecessorMap
// ---------------------------------------------------------------------------

/// Maps a cell to the cell it was reached from.
///
/// The start cell never has an entry; that is what terminates a walk back
/// from the goal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PredecessorMap {
    bounds: Range,
    links: Vec<usize>,
    len: usize,
}

impl PredecessorMap {
    pub fn new(bounds: Range) -> Self {
        Self {
            bounds,
            links: vec![NO_LINK; bounds.len()],
            len: 0,
        }
    }

    /// Record that `p` was reached from `from`, returning the previous
    /// predecessor if there was one. Out-of-bounds points are ignored.
    pub fn insert(&mut self, p: Point, from: Point) -> Option<Point> {
        let (i, link) = (self.bounds.index(p)?, self.bounds.index(from)?);
        let old = std::mem::replace(&mut self.links[i], link);
        if old == NO_LINK {
            self.len += 1;
            None
        } else {
            Some(self.bounds.point(old))
        }
    }

    /// The cell `p` was reached from, if any.
    #[inline]
    pub fn get(&self, p: Point) -> Option<Point> {
        let i = self.bounds.index(p)?;
        match self.links[i] {
            NO_LINK => None,
            link => Some(self.bounds.point(link)),
        }
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.get(p).is_some()
    }

    /// Number of cells with a predecessor.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate over `(cell, predecessor)` pairs in row-major cell order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.links
            .iter()
            .enumerate()
            .filter(|&(_, &link)| link != NO_LINK)
            .map(|(i, &link)| (self.bounds.point(i), self.bounds.point(link)))
    }
}

// ---------------------------------------------------------------------------
// CostMap
// ---------------------------------------------------------------------------

/// Best known accumulated cost from the start, per cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostMap {
    bounds: Range,
    costs: Vec<i32>,
}

impl CostMap {
    pub fn new(bounds: Range) -> Self {
        Self {
            bounds,
            costs: vec![UNREACHABLE; bounds.len()],
        }
    }

    /// Cost at `p`, or [`UNREACHABLE`] if unknown or out of bounds.
    #[inline]
    pub fn get(&self, p: Point) -> i32 {
        self.bounds.index(p).map_or(UNREACHABLE, |i| self.costs[i])
    }

    /// Lower the cost at `p` to `cost`. Returns `false` and leaves the map
    /// unchanged unless `cost` is strictly better than the current entry.
    pub fn improve(&mut self, p: Point, cost: i32) -> bool {
        match self.bounds.index(p) {
            Some(i) if cost < self.costs[i] => {
                self.costs[i] = cost;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Range {
        Range::new(0, 0, 4, 3)
    }

    #[test]
    fn visited_keeps_marking_order() {
        let mut v = Visited::new(bounds());
        assert!(v.insert(Point::new(2, 1)));
        assert!(v.insert(Point::new(0, 0)));
        assert!(!v.insert(Point::new(2, 1)));
        assert!(!v.insert(Point::new(9, 9)));
        assert_eq!(v.as_slice(), &[Point::new(2, 1), Point::new(0, 0)]);
        assert!(v.contains(Point::new(0, 0)));
        assert!(!v.contains(Point::new(1, 0)));
    }

    #[test]
    fn predecessor_insert_and_overwrite() {
        let mut m = PredecessorMap::new(bounds());
        let p = Point::new(1, 1);
        assert_eq!(m.insert(p, Point::new(0, 1)), None);
        assert_eq!(m.get(p), Some(Point::new(0, 1)));
        assert_eq!(m.insert(p, Point::new(1, 0)), Some(Point::new(0, 1)));
        assert_eq!(m.get(p), Some(Point::new(1, 0)));
        assert_eq!(m.len(), 1);
        assert_eq!(m.get(Point::new(3, 2)), None);
    }

    #[test]
    fn predecessor_links_reach_the_last_cell_of_a_large_board() {
        let big = Range::new(0, 0, 1000, 1000);
        let mut m = PredecessorMap::new(big);
        let (last, near) = (Point::new(999, 999), Point::new(998, 999));
        assert_eq!(m.insert(near, last), None);
        assert_eq!(m.get(near), Some(last));
        assert_eq!(m.insert(near, Point::new(0, 0)), Some(last));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn predecessor_iter_lists_entries() {
        let mut m = PredecessorMap::new(bounds());
        m.insert(Point::new(3, 2), Point::new(3, 1));
        m.insert(Point::new(0, 1), Point::new(0, 0));
        let pairs: Vec<_> = m.iter().collect();
        assert_eq!(
            pairs,
            vec![
                (Point::new(0, 1), Point::new(0, 0)),
                (Point::new(3, 2), Point::new(3, 1)),
            ]
        );
    }

    #[test]
    fn cost_only_decreases() {
        let mut c = CostMap::new(bounds());
        let p = Point::new(2, 2);
        assert_eq!(c.get(p), UNREACHABLE);
        assert!(c.improve(p, 5));
        assert!(!c.improve(p, 5));
        assert!(!c.improve(p, 7));
        assert!(c.improve(p, 3));
        assert_eq!(c.get(p), 3);
        assert!(!c.improve(Point::new(-1, 0), 0));
    }
}
