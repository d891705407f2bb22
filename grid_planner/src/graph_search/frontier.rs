use std::collections::VecDeque;

use crate::Cell;

/// Ordering policy for the discovered-but-unexpanded cells of a search.
///
/// Every push carries the cell's current cost from the start so a
/// cost-ordered policy can rank cells; policies that ignore cost may drop it.
pub trait Frontier {
    fn push(&mut self, cell: Cell, g_cost: f64);

    /// Next cell to expand, `None` once the frontier is exhausted.
    fn pop(&mut self) -> Option<Cell>;

    fn is_empty(&self) -> bool;

    fn clear(&mut self);
}

/// First in, first out. Expanding cells in discovery order gives a
/// breadth-first search.
#[derive(Clone, Debug, Default)]
pub struct FifoFrontier {
    queue: VecDeque<Cell>,
}

impl FifoFrontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

impl Frontier for FifoFrontier {
    fn push(&mut self, cell: Cell, _g_cost: f64) {
        self.queue.push_back(cell);
    }

    fn pop(&mut self) -> Option<Cell> {
        self.queue.pop_front()
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn clear(&mut self) {
        self.queue.clear();
    }
}
