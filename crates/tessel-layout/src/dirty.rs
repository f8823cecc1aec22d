//! Dirty Queue
//!
//! Worklist of nodes needing layout. Insertion-ordered and deduplicated by a
//! position column indexed by handle, so marking and removal are O(1) and a
//! drain visits only what changed rather than walking the tree checking bits.
//! Removal leaves a tombstone in the order list; tombstones are compacted
//! away when the list fills up.

use crate::error::Result;
use crate::store::{column, reserve};
use crate::NodeId;

const NOT_QUEUED: u32 = u32::MAX;

/// Deduplicated, insertion-ordered set of dirty handles
#[derive(Debug)]
pub struct DirtyQueue {
    /// Handles in marking order; removed entries are left as tombstones
    order: Vec<NodeId>,
    /// Index into `order` of each queued handle
    position: Vec<u32>,
    /// Queued handles, tombstones excluded
    len: usize,
}

impl DirtyQueue {
    /// Queue able to hold every handle below `capacity`
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Ok(Self {
            order: reserve(capacity)?,
            position: column(capacity, || NOT_QUEUED)?,
            len: 0,
        })
    }

    /// Queue `node` unless it is already queued. Returns whether it was added.
    pub fn mark(&mut self, node: NodeId) -> bool {
        if self.position.get(node.index()) != Some(&NOT_QUEUED) {
            return false;
        }
        if self.order.len() == self.position.len() {
            self.compact();
        }
        self.position[node.index()] = self.order.len() as u32;
        self.order.push(node);
        self.len += 1;
        true
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        self.position.get(node.index()).is_some_and(|&p| p != NOT_QUEUED)
    }

    /// Drop `node` from the queue, keeping the order of the rest
    pub fn remove(&mut self, node: NodeId) {
        if !self.contains(node) {
            return;
        }
        let i = node.index();
        self.order[self.position[i] as usize] = NodeId::NONE;
        self.position[i] = NOT_QUEUED;
        self.len -= 1;
    }

    /// Squeeze tombstones out of the order list in place
    fn compact(&mut self) {
        let mut write = 0;
        for read in 0..self.order.len() {
            let node = self.order[read];
            if node.is_none() {
                continue;
            }
            self.order[write] = node;
            self.position[node.index()] = write as u32;
            write += 1;
        }
        self.order.truncate(write);
    }

    /// Visit every queued handle once in marking order, then empty the queue
    pub fn drain(&mut self, mut visit: impl FnMut(NodeId)) {
        for &node in &self.order {
            if !node.is_none() {
                visit(node);
            }
        }
        for &node in &self.order {
            if !node.is_none() {
                self.position[node.index()] = NOT_QUEUED;
            }
        }
        self.order.clear();
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes reserved
    pub fn footprint(&self) -> usize {
        use std::mem::size_of;

        self.order.capacity() * size_of::<NodeId>() + self.position.capacity() * size_of::<u32>()
    }
}
