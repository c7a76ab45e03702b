//! Frontier structures: FIFO [`Queue`], LIFO [`Stack`] and min-first
//! [`PriorityQueue`].

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use pathviz_core::Point;

/// Discovered-but-not-yet-expanded cells, in some pop order.
pub trait Frontier {
    /// Add `pos`. [`Queue`] and [`Stack`] order by insertion only and ignore
    /// `priority`.
    fn push(&mut self, pos: Point, priority: i32);

    /// Remove the next cell to expand.
    fn pop(&mut self) -> Option<Point>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current contents, for display. Ordered front to back for [`Queue`],
    /// bottom to top for [`Stack`], heap order for [`PriorityQueue`].
    fn positions(&self) -> Vec<Point>;
}

// ---------------------------------------------------------------------------
// Queue
// ---------------------------------------------------------------------------

/// First in, first out.
#[derive(Debug, Clone, Default)]
pub struct Queue {
    items: VecDeque<Point>,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for Queue {
    fn push(&mut self, pos: Point, _priority: i32) {
        self.items.push_back(pos);
    }

    fn pop(&mut self) -> Option<Point> {
        self.items.pop_front()
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn positions(&self) -> Vec<Point> {
        self.items.iter().copied().collect()
    }
}

// ---------------------------------------------------------------------------
// Stack
// ---------------------------------------------------------------------------

/// Last in, first out.
#[derive(Debug, Clone, Default)]
pub struct Stack {
    items: Vec<Point>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for Stack {
    fn push(&mut self, pos: Point, _priority: i32) {
        self.items.push(pos);
    }

    fn pop(&mut self) -> Option<Point> {
        self.items.pop()
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn positions(&self) -> Vec<Point> {
        self.items.clone()
    }
}

// ---------------------------------------------------------------------------
// PriorityQueue
// ---------------------------------------------------------------------------

/// Heap entry ordered by priority, then by insertion sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    priority: i32,
    seq: u64,
    pos: Point,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops the smallest priority first,
        // and the oldest entry among equal priorities.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Binary min-heap keyed by `priority`.
///
/// Equal priorities pop in insertion order, which keeps greedy and A* runs
/// reproducible. There is no decrease-key: callers push the same cell again
/// with a better priority and discard the stale entry when it surfaces.
#[derive(Debug, Clone, Default)]
pub struct PriorityQueue {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl PriorityQueue {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for PriorityQueue {
    fn push(&mut self, pos: Point, priority: i32) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { priority, seq, pos });
    }

    fn pop(&mut self) -> Option<Point> {
        self.heap.pop().map(|e| e.pos)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn positions(&self) -> Vec<Point> {
        self.heap.iter().map(|e| e.pos).collect()
    }
}
