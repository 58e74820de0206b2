//! Pending-direction queue for the discrete movement modes
//!
//! Players often tap two turns faster than the slime steps. The buffer keeps
//! them in order and refuses any turn that would fold the head back onto the
//! segment right behind it.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Bounded FIFO of unit directions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectionBuffer {
    pending: VecDeque<Vec2>,
    capacity: usize,
}

impl DirectionBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            pending: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Queue `direction` if it does not reverse the reference direction.
    ///
    /// The reference is the newest queued direction, or `head_direction` when
    /// nothing is queued. Full buffers and reversals drop the input silently;
    /// returns whether it was accepted.
    pub fn try_enqueue(&mut self, direction: Vec2, head_direction: Vec2) -> bool {
        if self.pending.len() >= self.capacity {
            return false;
        }

        let reference = self.last().unwrap_or(head_direction);
        if direction.dot(reference) < 0.0 {
            return false;
        }

        self.pending.push_back(direction);
        true
    }

    /// Remove and return the oldest queued direction
    pub fn dequeue(&mut self) -> Option<Vec2> {
        self.pending.pop_front()
    }

    /// Newest queued direction
    pub fn last(&self) -> Option<Vec2> {
        self.pending.back().copied()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop everything queued (run reset)
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Queued directions, oldest first
    pub fn iter(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.pending.iter().copied()
    }
}
