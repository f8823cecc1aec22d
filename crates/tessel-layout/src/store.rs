//! Node Store
//!
//! Arena of layout nodes kept as parallel columns indexed by [`NodeId`].
//! Every column is reserved at creation; freed slots go on a LIFO free list
//! and are handed out again before the high-water mark grows.
//!
//! Child lists are singly linked (first child / next sibling) with a
//! last-child column for O(1) append. Unlinking at an arbitrary position
//! walks the sibling list.

use crate::error::{LayoutError, Result};
use crate::geometry::{Rect, Size};
use crate::style::Style;
use crate::NodeId;

/// Content measurement source for an auto-sized leaf.
///
/// Receives the available content width and height and returns the size of
/// the content, excluding padding.
pub type MeasureFn = Box<dyn FnMut(f32, f32) -> Size>;

/// Largest capacity addressable by a `u32` handle (the top value is the
/// "none" sentinel)
pub(crate) const MAX_CAPACITY: usize = u32::MAX as usize;

/// Empty vector with room for `capacity` items, without aborting on failure
pub(crate) fn reserve<T>(capacity: usize) -> Result<Vec<T>> {
    let mut values = Vec::new();
    values
        .try_reserve_exact(capacity)
        .map_err(|_| LayoutError::OutOfMemory { capacity })?;
    Ok(values)
}

/// Column of `capacity` slots filled by `fill`
pub(crate) fn column<T>(capacity: usize, fill: impl FnMut() -> T) -> Result<Vec<T>> {
    let mut values = reserve(capacity)?;
    values.resize_with(capacity, fill);
    Ok(values)
}

pub(crate) struct NodeStore {
    parent: Vec<NodeId>,
    first_child: Vec<NodeId>,
    last_child: Vec<NodeId>,
    next_sibling: Vec<NodeId>,
    style: Vec<Style>,
    /// Version of `style` (and of the measure source)
    version: Vec<u64>,
    /// Last computed rect
    rect: Vec<Rect>,
    /// Position inside the parent's content box from the last arrangement
    offset: Vec<(f32, f32)>,
    measure: Vec<Option<MeasureFn>>,
    live: Vec<bool>,
    /// Recycled slots, most recently freed last
    free: Vec<NodeId>,
    /// Parentless nodes in creation order
    roots: Vec<NodeId>,
    /// Slots ever handed out
    high_water: usize,
    live_count: usize,
    next_version: u64,
}

impl NodeStore {
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(LayoutError::OutOfMemory { capacity });
        }
        if capacity > MAX_CAPACITY {
            return Err(LayoutError::CapacityExceeded { requested: capacity, limit: MAX_CAPACITY });
        }

        Ok(Self {
            parent: column(capacity, || NodeId::NONE)?,
            first_child: column(capacity, || NodeId::NONE)?,
            last_child: column(capacity, || NodeId::NONE)?,
            next_sibling: column(capacity, || NodeId::NONE)?,
            style: column(capacity, Style::default)?,
            version: column(capacity, || 0)?,
            rect: column(capacity, || Rect::ZERO)?,
            offset: column(capacity, || (0.0, 0.0))?,
            measure: column(capacity, || None)?,
            live: column(capacity, || false)?,
            free: reserve(capacity)?,
            roots: reserve(capacity)?,
            high_water: 0,
            live_count: 0,
            next_version: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.live.len()
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.live_count
    }

    #[inline]
    pub fn is_live(&self, node: NodeId) -> bool {
        self.live.get(node.index()).copied().unwrap_or(false)
    }

    fn check(&self, node: NodeId) -> Result<usize> {
        if self.is_live(node) {
            Ok(node.index())
        } else {
            Err(LayoutError::InvalidNode(node))
        }
    }

    /// Create a node as the last child of `parent`, or as a new root
    pub fn create(&mut self, parent: Option<NodeId>, style: Style) -> Result<NodeId> {
        if let Some(parent) = parent {
            self.check(parent)?;
        }

        let node = match self.free.pop() {
            Some(node) => node,
            None if self.high_water < self.capacity() => {
                let node = NodeId::new(self.high_water as u32);
                self.high_water += 1;
                node
            }
            None => {
                tracing::warn!(capacity = self.capacity(), "Node store exhausted");
                return Err(LayoutError::OutOfMemory { capacity: self.capacity() });
            }
        };

        let i = node.index();
        self.parent[i] = NodeId::NONE;
        self.first_child[i] = NodeId::NONE;
        self.last_child[i] = NodeId::NONE;
        self.next_sibling[i] = NodeId::NONE;
        self.style[i] = style;
        self.rect[i] = Rect::ZERO;
        self.offset[i] = (0.0, 0.0);
        self.measure[i] = None;
        self.live[i] = true;
        self.live_count += 1;
        self.bump_version(i);
        self.attach(node, parent);

        Ok(node)
    }

    /// Free `node` and its whole subtree, children before parents, so that
    /// `node` itself ends on top of the free list. `on_free` sees every
    /// freed handle. Returns `false` for a dead handle.
    pub fn destroy(&mut self, node: NodeId, mut on_free: impl FnMut(NodeId)) -> bool {
        if !self.is_live(node) {
            return false;
        }
        self.detach(node);

        // Always free the first child of the current node, so the walk needs
        // no stack: after a leaf goes, continue at its sibling or its parent.
        let mut current = node;
        loop {
            while let Some(child) = self.first_child[current.index()].get() {
                current = child;
            }

            let next = if current == node {
                None
            } else {
                let parent = self.parent[current.index()];
                let sibling = self.next_sibling[current.index()];
                self.first_child[parent.index()] = sibling;
                if sibling.is_none() {
                    self.last_child[parent.index()] = NodeId::NONE;
                }
                Some(sibling.get().unwrap_or(parent))
            };

            self.release(current);
            on_free(current);

            match next {
                Some(n) => current = n,
                None => break,
            }
        }
        true
    }

    fn release(&mut self, node: NodeId) {
        let i = node.index();
        self.parent[i] = NodeId::NONE;
        self.first_child[i] = NodeId::NONE;
        self.last_child[i] = NodeId::NONE;
        self.next_sibling[i] = NodeId::NONE;
        self.rect[i] = Rect::ZERO;
        self.offset[i] = (0.0, 0.0);
        self.measure[i] = None;
        self.live[i] = false;
        self.live_count -= 1;
        self.free.push(node);
    }

    /// Move `node` under `new_parent` (or make it a root).
    ///
    /// Validation runs before any link changes; on error the tree is
    /// untouched. Returns the previous parent.
    pub fn reparent(&mut self, node: NodeId, new_parent: Option<NodeId>) -> Result<Option<NodeId>> {
        self.check(node)?;
        if let Some(new_parent) = new_parent {
            self.check(new_parent)?;
            if self.is_ancestor_or_self(node, new_parent) {
                return Err(LayoutError::CycleDetected { node, new_parent });
            }
        }

        let old_parent = self.parent(node);
        self.detach(node);
        self.attach(node, new_parent);
        Ok(old_parent)
    }

    /// Whether `ancestor` is `node` or lies on its parent chain
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = node;
        while !current.is_none() {
            if current == ancestor {
                return true;
            }
            current = self.parent[current.index()];
        }
        false
    }

    /// Append `node` to `parent`'s child list, or to the roots
    fn attach(&mut self, node: NodeId, parent: Option<NodeId>) {
        let i = node.index();
        self.next_sibling[i] = NodeId::NONE;

        let Some(parent) = parent else {
            self.parent[i] = NodeId::NONE;
            self.roots.push(node);
            return;
        };

        let p = parent.index();
        self.parent[i] = parent;
        match self.last_child[p].get() {
            Some(last) => self.next_sibling[last.index()] = node,
            None => self.first_child[p] = node,
        }
        self.last_child[p] = node;
    }

    /// Unlink `node` from its parent's child list, or from the roots
    fn detach(&mut self, node: NodeId) {
        let i = node.index();
        let Some(parent) = self.parent[i].get() else {
            if let Some(pos) = self.roots.iter().position(|&r| r == node) {
                self.roots.remove(pos);
            }
            return;
        };

        let p = parent.index();
        let next = self.next_sibling[i];
        if self.first_child[p] == node {
            self.first_child[p] = next;
            if next.is_none() {
                self.last_child[p] = NodeId::NONE;
            }
        } else {
            let mut prev = self.first_child[p];
            while !prev.is_none() && self.next_sibling[prev.index()] != node {
                prev = self.next_sibling[prev.index()];
            }
            if !prev.is_none() {
                self.next_sibling[prev.index()] = next;
                if self.last_child[p] == node {
                    self.last_child[p] = prev;
                }
            }
        }

        self.parent[i] = NodeId::NONE;
        self.next_sibling[i] = NodeId::NONE;
    }

    fn bump_version(&mut self, i: usize) {
        self.next_version += 1;
        self.version[i] = self.next_version;
    }

    /// Replace the style and bump its version
    pub fn set_style(&mut self, node: NodeId, style: Style) -> Result<()> {
        let i = self.check(node)?;
        self.style[i] = style;
        self.bump_version(i);
        Ok(())
    }

    /// Attach or detach the measurement source and bump the version
    pub fn set_measure(&mut self, node: NodeId, measure: Option<MeasureFn>) -> Result<()> {
        let i = self.check(node)?;
        self.measure[i] = measure;
        self.bump_version(i);
        Ok(())
    }

    /// Force a new version without changing the style
    pub fn touch(&mut self, node: NodeId) -> Result<()> {
        let i = self.check(node)?;
        self.bump_version(i);
        Ok(())
    }

    // === Links ===

    #[inline]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        if !self.is_live(node) {
            return None;
        }
        self.parent[node.index()].get()
    }

    #[inline]
    pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
        if !self.is_live(node) {
            return None;
        }
        self.first_child[node.index()].get()
    }

    #[inline]
    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        if !self.is_live(node) {
            return None;
        }
        self.next_sibling[node.index()].get()
    }

    pub fn children(&self, node: NodeId) -> Children<'_> {
        Children { store: self, current: self.first_child(node) }
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    // === Columns ===

    pub fn style(&self, node: NodeId) -> Option<&Style> {
        if !self.is_live(node) {
            return None;
        }
        Some(&self.style[node.index()])
    }

    #[inline]
    pub fn version(&self, node: NodeId) -> u64 {
        self.version.get(node.index()).copied().unwrap_or(0)
    }

    /// Last computed rect, zero for a dead handle
    #[inline]
    pub fn rect(&self, node: NodeId) -> Rect {
        if !self.is_live(node) {
            return Rect::ZERO;
        }
        self.rect[node.index()]
    }

    #[inline]
    pub(crate) fn set_rect(&mut self, node: NodeId, rect: Rect) {
        self.rect[node.index()] = rect;
    }

    /// Offset of `node` from its parent's content origin
    #[inline]
    pub(crate) fn offset(&self, node: NodeId) -> (f32, f32) {
        self.offset[node.index()]
    }

    #[inline]
    pub(crate) fn set_offset(&mut self, node: NodeId, x: f32, y: f32) {
        self.offset[node.index()] = (x, y);
    }

    /// Run the measurement source, if any
    pub(crate) fn measure(&mut self, node: NodeId, width: f32, height: f32) -> Option<Size> {
        let measure = self.measure.get_mut(node.index())?.as_mut()?;
        Some(measure(width, height))
    }

    /// Bytes reserved by all columns
    pub fn footprint(&self) -> usize {
        use std::mem::size_of;

        let links = 4 * self.parent.capacity() * size_of::<NodeId>();
        links
            + self.style.capacity() * size_of::<Style>()
            + self.version.capacity() * size_of::<u64>()
            + self.rect.capacity() * size_of::<Rect>()
            + self.offset.capacity() * size_of::<(f32, f32)>()
            + self.measure.capacity() * size_of::<Option<MeasureFn>>()
            + self.live.capacity() * size_of::<bool>()
            + (self.free.capacity() + self.roots.capacity()) * size_of::<NodeId>()
    }
}

/// Iterator over the children of a node
pub struct Children<'a> {
    store: &'a NodeStore,
    current: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.current?;
        self.current = self.store.next_sibling(node);
        Some(node)
    }
}
