//! Layout Engine
//!
//! Public facade tying the node store, dirty queue, layout cache and flex
//! solver together. Mutations mark what they touch; `compute` solves
//! exactly that and clears the queue.

use std::time::Instant;

use crate::cache::{CacheStats, LayoutCache};
use crate::config::LayoutConfig;
use crate::dirty::DirtyQueue;
use crate::error::{LayoutError, Result};
use crate::flex::{Scratch, Solver};
use crate::geometry::{Rect, Size};
use crate::store::{Children, MeasureFn, NodeStore};
use crate::style::Style;
use crate::NodeId;

/// Counters since the last [`LayoutEngine::reset_stats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutStats {
    /// Cache lookups made while placing nodes
    pub cache: CacheStats,
    /// `compute` calls
    pub computes: u64,
    /// Dirty handles drained
    pub nodes_visited: u64,
    /// Nodes solved from scratch
    pub nodes_solved: u64,
    /// Cached subtrees moved to a new position
    pub subtrees_translated: u64,
}

/// Incremental flexbox layout engine
pub struct LayoutEngine {
    config: LayoutConfig,
    store: NodeStore,
    queue: DirtyQueue,
    cache: LayoutCache,
    scratch: Scratch,
    epoch: u32,
    stats: LayoutStats,
}

impl LayoutEngine {
    /// Create an engine, reserving storage for `config.capacity` nodes
    pub fn new(config: LayoutConfig) -> Result<Self> {
        let capacity = config.capacity;
        let engine = Self {
            store: NodeStore::with_capacity(capacity)?,
            queue: DirtyQueue::with_capacity(capacity)?,
            cache: LayoutCache::with_capacity(capacity)?,
            scratch: Scratch::with_capacity(capacity)?,
            config,
            epoch: 0,
            stats: LayoutStats::default(),
        };

        tracing::info!(
            capacity,
            footprint = engine.footprint(),
            "Layout engine created"
        );
        Ok(engine)
    }

    /// Engine with default settings and the given capacity
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::new(LayoutConfig::default().with_capacity(capacity))
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    // === Mutation ===

    /// Add a node as the last child of `parent`, or as a new root
    pub fn add(&mut self, parent: Option<NodeId>, style: Style) -> Result<NodeId> {
        let node = self.store.create(parent, style)?;
        self.cache.reset(node);
        self.mark(node);
        self.propagate_content_change(parent);
        Ok(node)
    }

    /// Remove `node` and its subtree. Dead handles are ignored.
    pub fn remove(&mut self, node: NodeId) {
        let parent = self.store.parent(node);

        let queue = &mut self.queue;
        let cache = &mut self.cache;
        let removed = self.store.destroy(node, |freed| {
            queue.remove(freed);
            cache.reset(freed);
        });
        if !removed {
            return;
        }

        if let Some(parent) = parent {
            self.mark(parent);
            self.propagate_content_change(Some(parent));
        }
    }

    /// Replace the style of `node`
    pub fn set_style(&mut self, node: NodeId, style: Style) -> Result<()> {
        self.store.set_style(node, style)?;
        self.mark(node);
        self.propagate_content_change(self.store.parent(node));
        Ok(())
    }

    /// Move `node` under `new_parent`, or make it a root.
    ///
    /// Fails with [`LayoutError::CycleDetected`] when `new_parent` is `node`
    /// or one of its descendants; the tree is left untouched.
    pub fn reparent(&mut self, node: NodeId, new_parent: Option<NodeId>) -> Result<()> {
        let old_parent = match self.store.reparent(node, new_parent) {
            Ok(old_parent) => old_parent,
            Err(err) => {
                if let LayoutError::CycleDetected { node, new_parent } = err {
                    tracing::warn!(node = node.index(), new_parent = new_parent.index(), "Rejected reparent: cycle");
                }
                return Err(err);
            }
        };

        if let Some(old_parent) = old_parent {
            self.mark(old_parent);
            self.propagate_content_change(Some(old_parent));
        }
        if let Some(new_parent) = new_parent {
            self.mark(new_parent);
            self.propagate_content_change(Some(new_parent));
        }
        self.mark(node);
        Ok(())
    }

    /// Attach (or detach, with `None`) the content measurement source of
    /// an auto-sized leaf
    pub fn set_measure(&mut self, node: NodeId, measure: Option<MeasureFn>) -> Result<()> {
        self.store.set_measure(node, measure)?;
        self.mark(node);
        self.propagate_content_change(self.store.parent(node));
        Ok(())
    }

    /// The content behind `node`'s measurement source changed
    pub fn mark_content_dirty(&mut self, node: NodeId) -> Result<()> {
        self.store.touch(node)?;
        self.mark(node);
        self.propagate_content_change(self.store.parent(node));
        Ok(())
    }

    fn mark(&mut self, node: NodeId) {
        self.queue.mark(node);
        self.cache.invalidate(node);
    }

    /// Mark every consecutive auto-sized ancestor starting at `start`; their
    /// size may follow the content that just changed.
    fn propagate_content_change(&mut self, start: Option<NodeId>) {
        let mut current = start;
        while let Some(node) = current {
            if !self.store.style(node).is_some_and(Style::is_auto_sized) {
                break;
            }
            self.mark(node);
            current = self.store.parent(node);
        }
    }

    // === Computation ===

    /// Solve the dirty set against a viewport and clear it
    pub fn compute(&mut self, available_width: f32, available_height: f32) {
        let started = Instant::now();
        self.advance_epoch();

        let viewport = Size::new(available_width.max(0.0), available_height.max(0.0));
        let before = self.cache.stats();
        let dirty = self.queue.len();

        let mut solver = Solver::new(
            &mut self.store,
            &mut self.cache,
            &mut self.scratch,
            viewport,
            self.epoch,
            self.config.parallel_clamp_threshold,
        );
        solver.place_roots();
        self.queue.drain(|node| solver.visit(node));
        let (solved, translated) = (solver.solved, solver.translated);

        let after = self.cache.stats();
        self.stats.cache = after;
        self.stats.computes += 1;
        self.stats.nodes_visited += dirty as u64;
        self.stats.nodes_solved += solved;
        self.stats.subtrees_translated += translated;

        tracing::debug!(
            visited = dirty,
            hits = after.hits - before.hits,
            misses = after.misses - before.misses,
            translated,
            elapsed_us = started.elapsed().as_micros() as u64,
            "Layout complete: {} nodes",
            self.store.len()
        );
    }

    fn advance_epoch(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        if self.epoch == 0 {
            self.scratch.reset_epochs();
            self.epoch = 1;
        }
    }

    // === Queries ===

    /// Last computed rect of `node`, zero for a dead handle or a node not
    /// yet computed
    pub fn rect(&self, node: NodeId) -> Rect {
        self.store.rect(node)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.store.parent(node)
    }

    pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.store.first_child(node)
    }

    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.store.next_sibling(node)
    }

    /// Children of `node` in order (empty for a dead handle)
    pub fn children(&self, node: NodeId) -> Children<'_> {
        self.store.children(node)
    }

    /// Parentless nodes in the order they became roots
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.store.roots().iter().copied()
    }

    pub fn style(&self, node: NodeId) -> Option<&Style> {
        self.store.style(node)
    }

    pub fn is_live(&self, node: NodeId) -> bool {
        self.store.is_live(node)
    }

    /// Live nodes
    pub fn node_count(&self) -> usize {
        self.store.len()
    }

    /// Nodes waiting for the next `compute`
    pub fn dirty_count(&self) -> usize {
        self.queue.len()
    }

    pub fn is_dirty(&self, node: NodeId) -> bool {
        self.queue.contains(node)
    }

    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Bytes reserved at creation; constant for the engine's lifetime
    pub fn footprint(&self) -> usize {
        self.store.footprint() + self.queue.footprint() + self.cache.footprint() + self.scratch.footprint()
    }

    /// Share of cache lookups that hit since the last reset; 0 when there
    /// were none
    pub fn cache_hit_rate(&self) -> f64 {
        self.stats.cache.hit_rate()
    }

    pub fn stats(&self) -> LayoutStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.cache.reset_stats();
        self.stats = LayoutStats::default();
    }
}

impl std::fmt::Debug for LayoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutEngine")
            .field("capacity", &self.capacity())
            .field("nodes", &self.node_count())
            .field("dirty", &self.dirty_count())
            .field("epoch", &self.epoch)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MAX_CAPACITY;

    #[test]
    fn test_create_errors() {
        assert_eq!(
            LayoutEngine::with_capacity(0).unwrap_err(),
            LayoutError::OutOfMemory { capacity: 0 }
        );
        assert_eq!(
            LayoutEngine::with_capacity(MAX_CAPACITY + 1).unwrap_err(),
            LayoutError::CapacityExceeded { requested: MAX_CAPACITY + 1, limit: MAX_CAPACITY }
        );
    }

    #[test]
    fn test_add_marks_dirty() {
        let mut engine = LayoutEngine::with_capacity(8).unwrap();
        let root = engine.add(None, Style::row().with_size(100.0, 100.0)).unwrap();
        let child = engine.add(Some(root), Style::default()).unwrap();

        assert!(engine.is_dirty(root));
        assert!(engine.is_dirty(child));
        assert_eq!(engine.dirty_count(), 2);

        engine.compute(100.0, 100.0);
        assert_eq!(engine.dirty_count(), 0);
    }

    #[test]
    fn test_auto_ancestors_marked() {
        let mut engine = LayoutEngine::with_capacity(8).unwrap();
        let root = engine.add(None, Style::column().with_size(100.0, 100.0)).unwrap();
        let auto = engine.add(Some(root), Style::row()).unwrap();
        let leaf = engine.add(Some(auto), Style::default().with_size(10.0, 10.0)).unwrap();
        engine.compute(100.0, 100.0);

        engine.set_style(leaf, Style::default().with_size(20.0, 10.0)).unwrap();

        assert!(engine.is_dirty(leaf));
        assert!(engine.is_dirty(auto));
        // Fixed-size root stops the walk
        assert!(!engine.is_dirty(root));

        engine.compute(100.0, 100.0);
        assert_eq!(engine.rect(auto).width, 20.0);
    }

    #[test]
    fn test_remove_unqueues_subtree() {
        let mut engine = LayoutEngine::with_capacity(8).unwrap();
        let root = engine.add(None, Style::row().with_size(100.0, 100.0)).unwrap();
        let branch = engine.add(Some(root), Style::row()).unwrap();
        let leaf = engine.add(Some(branch), Style::default()).unwrap();

        engine.remove(branch);

        assert!(!engine.is_dirty(branch));
        assert!(!engine.is_dirty(leaf));
        assert!(engine.is_dirty(root));
        assert_eq!(engine.node_count(), 1);
    }

    #[test]
    fn test_epoch_wrap() {
        let mut engine = LayoutEngine::with_capacity(4).unwrap();
        let root = engine.add(None, Style::default().with_size(10.0, 10.0)).unwrap();
        engine.epoch = u32::MAX;

        engine.compute(50.0, 50.0);
        assert_eq!(engine.epoch, 1);
        assert_eq!(engine.rect(root), Rect::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_debug_output() {
        let engine = LayoutEngine::with_capacity(4).unwrap();
        let text = format!("{engine:?}");
        assert!(text.contains("capacity: 4"));
    }
}
