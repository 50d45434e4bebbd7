//! Buffered directional input
//!
//! Commands are filtered when queued: a direction that repeats or reverses the
//! last queued heading (or the current heading, if nothing is queued) is dropped.

use std::collections::VecDeque;

use super::grid::Direction;

/// FIFO of pending turns, drained at most once per tick
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    pending: VecDeque<Direction>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a turn. Returns false when the turn was filtered out.
    pub fn enqueue(&mut self, direction: Direction, current: Direction) -> bool {
        let last = self.pending.back().copied().unwrap_or(current);
        if direction == last || direction.is_opposite(last) {
            return false;
        }
        self.pending.push_back(direction);
        true
    }

    /// Pop the oldest queued turn
    pub fn drain(&mut self) -> Option<Direction> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Direction> {
        self.pending.iter()
    }
}
