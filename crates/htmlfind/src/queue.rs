//! FIFO queue of node references used by the breadth-first searches
//!
//! A thin wrapper over `VecDeque`: O(1) push at the tail, O(1) pop at the
//! head, no pre-sized capacity. An empty queue answers `None`, never an
//! error.

use crate::types::NodeId;
use std::collections::VecDeque;

#[derive(Debug, Clone, Default)]
pub struct NodeQueue {
    items: VecDeque<NodeId>,
}

impl NodeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put an item on the end of the queue
    pub fn enqueue(&mut self, node_id: NodeId) {
        self.items.push_back(node_id);
    }

    /// Enqueue a whole slice, preserving its order
    pub fn enqueue_slice(&mut self, node_ids: &[NodeId]) {
        self.items.extend(node_ids.iter().copied());
    }

    /// Take the next item off the front of the queue
    pub fn dequeue(&mut self) -> Option<NodeId> {
        self.items.pop_front()
    }

    /// First item in the queue, without removing it
    pub fn peek(&self) -> Option<NodeId> {
        self.items.front().copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove every remaining item, returned in FIFO order
    pub fn drain(&mut self) -> Vec<NodeId> {
        self.items.drain(..).collect()
    }
}
