//! Flexbox Solver
//!
//! Single-line flexbox: one main axis per container, no wrapping.
//!
//! A node is solved against the slot its parent grants it (roots against
//! the viewport). Solving a container arranges its children: basis sizes,
//! grow/shrink distribution with min/max freezing, justification along the
//! main axis and alignment along the cross axis. Each child is then placed,
//! which either reuses its cached result or solves it in turn.
//!
//! A cache hit whose slot only moved keeps its sizes; its subtree is
//! re-placed from the parent-relative offsets recorded by the last
//! arrangement, with the same additions a fresh solve performs.
//!
//! Per-container working data lives in [`Scratch`], a set of columns sized
//! to the node capacity and used as a stack: a nested arrangement takes the
//! region above its parent's, so the whole solve runs without allocating.

use crate::cache::LayoutCache;
use crate::clamp::clamp_batch_with_threshold;
use crate::error::Result;
use crate::geometry::{Rect, Size};
use crate::store::{column, NodeStore};
use crate::style::{Align, Justify, Style};
use crate::NodeId;

/// Solver working memory
pub(crate) struct Scratch {
    child: Vec<NodeId>,
    basis: Vec<f32>,
    target: Vec<f32>,
    main: Vec<f32>,
    min: Vec<f32>,
    max: Vec<f32>,
    factor: Vec<f32>,
    cross: Vec<f32>,
    frozen: Vec<bool>,
    /// First unused index of the batch columns
    top: usize,
    /// Epoch in which each node was last placed
    placed: Vec<u32>,
    /// Epoch in which each node last arranged its children
    arranged: Vec<u32>,
}

impl Scratch {
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Ok(Self {
            child: column(capacity, || NodeId::NONE)?,
            basis: column(capacity, || 0.0)?,
            target: column(capacity, || 0.0)?,
            main: column(capacity, || 0.0)?,
            min: column(capacity, || 0.0)?,
            max: column(capacity, || 0.0)?,
            factor: column(capacity, || 0.0)?,
            cross: column(capacity, || 0.0)?,
            frozen: column(capacity, || false)?,
            top: 0,
            placed: column(capacity, || 0)?,
            arranged: column(capacity, || 0)?,
        })
    }

    /// Forget every epoch stamp
    pub fn reset_epochs(&mut self) {
        self.placed.fill(0);
        self.arranged.fill(0);
    }

    pub fn footprint(&self) -> usize {
        use std::mem::size_of;

        self.child.capacity() * size_of::<NodeId>()
            + 7 * self.basis.capacity() * size_of::<f32>()
            + self.frozen.capacity() * size_of::<bool>()
            + 2 * self.placed.capacity() * size_of::<u32>()
    }
}

/// One `compute()` pass over the tree
pub(crate) struct Solver<'a> {
    store: &'a mut NodeStore,
    cache: &'a mut LayoutCache,
    scratch: &'a mut Scratch,
    viewport: Size,
    epoch: u32,
    clamp_threshold: usize,
    /// Nodes solved (cache misses)
    pub solved: u64,
    /// Cached subtrees moved without re-solving
    pub translated: u64,
}

impl<'a> Solver<'a> {
    pub fn new(
        store: &'a mut NodeStore,
        cache: &'a mut LayoutCache,
        scratch: &'a mut Scratch,
        viewport: Size,
        epoch: u32,
        clamp_threshold: usize,
    ) -> Self {
        Self { store, cache, scratch, viewport, epoch, clamp_threshold, solved: 0, translated: 0 }
    }

    fn viewport_slot(&self) -> Rect {
        Rect::new(0.0, 0.0, self.viewport.width, self.viewport.height)
    }

    /// Place every root against the viewport
    pub fn place_roots(&mut self) {
        for i in 0..self.store.roots().len() {
            let root = self.store.roots()[i];
            let slot = self.viewport_slot();
            self.place(root, slot);
        }
    }

    /// Bring a dirty node up to date.
    ///
    /// A root is placed against the viewport. Any other node has its
    /// parent's children re-arranged from the parent's last-known rect.
    pub fn visit(&mut self, node: NodeId) {
        if !self.store.is_live(node) || self.scratch.placed[node.index()] == self.epoch {
            return;
        }

        match self.store.parent(node) {
            None => {
                let slot = self.viewport_slot();
                self.place(node, slot);
            }
            Some(parent) => {
                if self.scratch.arranged[parent.index()] != self.epoch {
                    self.arrange(parent);
                }
            }
        }
    }

    /// Give `node` the box `slot`, solving it only on a cache miss
    fn place(&mut self, node: NodeId, slot: Rect) {
        self.scratch.placed[node.index()] = self.epoch;

        let version = self.store.version(node);
        if self.cache.lookup(node, slot.width, slot.height, version) {
            let current = self.store.rect(node);
            let moved = current.x != slot.x || current.y != slot.y;
            if moved {
                self.reposition(node, slot.x, slot.y);
                self.translated += 1;
            }
            tracing::trace!(node = node.index(), moved, "Layout cache hit");
            return;
        }

        self.solve(node, slot);
    }

    fn solve(&mut self, node: NodeId, slot: Rect) {
        let Some(&style) = self.store.style(node) else {
            return;
        };

        let rect = if self.store.parent(node).is_none() {
            let size = self.resolve_root(node, &style, slot.width, slot.height);
            Rect::new(slot.x, slot.y, size.width, size.height)
        } else {
            slot
        };

        self.store.set_rect(node, rect);
        self.cache.store(node, slot.width, slot.height, self.store.version(node));
        self.solved += 1;
        tracing::trace!(
            node = node.index(),
            x = rect.x,
            y = rect.y,
            width = rect.width,
            height = rect.height,
            "Solved node"
        );

        if self.store.first_child(node).is_some() {
            self.arrange(node);
        }
    }

    /// Root box: fixed size, else content for a leaf, else the whole
    /// available extent; clamped per axis
    fn resolve_root(&mut self, node: NodeId, style: &Style, available_width: f32, available_height: f32) -> Size {
        let horizontal = style.horizontal();
        let vertical = style.vertical();

        let content = if horizontal.fixed().is_some() && vertical.fixed().is_some() {
            Size::ZERO
        } else if self.store.first_child(node).is_none() {
            self.content_size(node, available_width, available_height)
        } else {
            Size::new(available_width, available_height)
        };

        Size::new(
            horizontal.clamp(horizontal.fixed().unwrap_or(content.width)),
            vertical.clamp(vertical.fixed().unwrap_or(content.height)),
        )
    }

    /// Size `node` would take from its content alone, padding included.
    ///
    /// A leaf reports its measured content (zero without a measurement
    /// source); a container sums its children along its main axis with gaps
    /// and takes the largest child across it.
    fn content_size(&mut self, node: NodeId, available_width: f32, available_height: f32) -> Size {
        let Some(&style) = self.store.style(node) else {
            return Size::ZERO;
        };
        let pad_h = style.padding.horizontal();
        let pad_v = style.padding.vertical();
        let inner_width = (available_width - pad_h).max(0.0);
        let inner_height = (available_height - pad_v).max(0.0);

        let Some(first) = self.store.first_child(node) else {
            let measured = self.store.measure(node, inner_width, inner_height).unwrap_or(Size::ZERO);
            return Size::new(measured.width.max(0.0) + pad_h, measured.height.max(0.0) + pad_v);
        };

        let is_row = style.direction.is_row();
        let mut main = 0.0f32;
        let mut cross = 0.0f32;
        let mut count = 0usize;

        let mut child = Some(first);
        while let Some(c) = child {
            let outer = self.preferred_size(c, inner_width, inner_height);
            let (m, x) = if is_row { (outer.width, outer.height) } else { (outer.height, outer.width) };
            main += m;
            cross = cross.max(x);
            count += 1;
            child = self.store.next_sibling(c);
        }
        main += style.gap * count.saturating_sub(1) as f32;

        let (width, height) = if is_row { (main, cross) } else { (cross, main) };
        Size::new(width + pad_h, height + pad_v)
    }

    /// Fixed size where given, content size otherwise; clamped
    fn preferred_size(&mut self, node: NodeId, available_width: f32, available_height: f32) -> Size {
        let Some(&style) = self.store.style(node) else {
            return Size::ZERO;
        };
        let horizontal = style.horizontal();
        let vertical = style.vertical();

        let content = if horizontal.fixed().is_some() && vertical.fixed().is_some() {
            Size::ZERO
        } else {
            self.content_size(node, available_width, available_height)
        };

        Size::new(
            horizontal.clamp(horizontal.fixed().unwrap_or(content.width)),
            vertical.clamp(vertical.fixed().unwrap_or(content.height)),
        )
    }

    /// Lay out the children of `parent` inside its current rect and place
    /// each one
    fn arrange(&mut self, parent: NodeId) {
        self.scratch.arranged[parent.index()] = self.epoch;

        let Some(&style) = self.store.style(parent) else {
            return;
        };
        let content = self.store.rect(parent).inset(&style.padding);
        let is_row = style.direction.is_row();
        let stretch = style.align == Align::Stretch;
        let (main_available, cross_available) = if is_row {
            (content.width, content.height)
        } else {
            (content.height, content.width)
        };

        // Push this container's children onto the scratch stack
        let base = self.scratch.top;
        let mut end = base;
        let mut child = self.store.first_child(parent);
        while let Some(c) = child {
            self.scratch.child[end] = c;
            end += 1;
            child = self.store.next_sibling(c);
        }
        if end == base {
            return;
        }
        self.scratch.top = end;

        for i in base..end {
            let c = self.scratch.child[i];
            let child_style = self.store.style(c).copied().unwrap_or_default();
            let (main_axis, cross_axis) = child_style.axes(style.direction);

            let needs_content = main_axis.fixed().is_none() || (!stretch && cross_axis.fixed().is_none());
            let measured = if needs_content {
                self.content_size(c, content.width, content.height)
            } else {
                Size::ZERO
            };
            let (content_main, content_cross) = if is_row {
                (measured.width, measured.height)
            } else {
                (measured.height, measured.width)
            };

            let cross = if stretch {
                cross_available
            } else {
                cross_axis.fixed().unwrap_or(content_cross)
            };

            self.scratch.basis[i] = main_axis.fixed().unwrap_or(content_main);
            self.scratch.min[i] = main_axis.min;
            self.scratch.max[i] = main_axis.max;
            self.scratch.cross[i] = cross_axis.clamp(cross);
        }

        let count = end - base;
        let gaps = style.gap * (count - 1) as f32;
        self.resolve_flexible_lengths(base, end, main_available - gaps);

        let used: f32 = self.scratch.main[base..end].iter().sum::<f32>() + gaps;
        let free_space = main_available - used;
        let mut offset = main_start(style.justify, free_space, count);
        let spacing = style.gap + spacing(style.justify, free_space, count);

        for i in base..end {
            let c = self.scratch.child[i];
            let main = self.scratch.main[i];
            let cross = self.scratch.cross[i];
            let cross_offset = align_cross(style.align, cross_available, cross);

            let (x, y, width, height) = if is_row {
                (offset, cross_offset, main, cross)
            } else {
                (cross_offset, offset, cross, main)
            };
            offset += main + spacing;

            self.store.set_offset(c, x, y);
            self.place(c, Rect::new(content.x + x, content.y + y, width, height));
        }

        self.scratch.top = base;
    }

    /// Grow or shrink the batch `base..end` to fill `available`.
    ///
    /// Items with no factor in the active direction keep their clamped
    /// basis. Every round hands the remaining free space to the unfrozen
    /// items by factor, clamps the whole batch and freezes whatever the
    /// clamp moved; it stops once a round clamps nothing.
    fn resolve_flexible_lengths(&mut self, base: usize, end: usize, available: f32) {
        let range = base..end;
        let threshold = self.clamp_threshold;

        let total_basis: f32 = self.scratch.basis[range.clone()].iter().sum();
        let growing = available > total_basis;
        let exact = available == total_basis;

        for i in range.clone() {
            let c = self.scratch.child[i];
            let style = self.store.style(c).copied().unwrap_or_default();
            let factor = if growing { style.flex_grow } else { style.flex_shrink };
            let flexible = factor > 0.0 && !exact;

            self.scratch.factor[i] = if flexible { factor } else { 0.0 };
            self.scratch.frozen[i] = !flexible;
            self.scratch.main[i] = self.scratch.basis[i];
        }

        let s = &mut *self.scratch;
        clamp_batch_with_threshold(&mut s.main[range.clone()], &s.min[range.clone()], &s.max[range.clone()], threshold);

        for _ in range.clone() {
            let mut frozen_size = 0.0f32;
            let mut open_basis = 0.0f32;
            let mut total_factor = 0.0f32;
            for i in range.clone() {
                if s.frozen[i] {
                    frozen_size += s.main[i];
                } else {
                    open_basis += s.basis[i];
                    total_factor += s.factor[i];
                }
            }
            if total_factor <= 0.0 {
                break;
            }

            let free_space = available - frozen_size - open_basis;
            for i in range.clone() {
                s.target[i] = if s.frozen[i] {
                    s.main[i]
                } else {
                    s.basis[i] + free_space * s.factor[i] / total_factor
                };
            }

            s.main[range.clone()].copy_from_slice(&s.target[range.clone()]);
            clamp_batch_with_threshold(&mut s.main[range.clone()], &s.min[range.clone()], &s.max[range.clone()], threshold);

            let mut clamped = false;
            for i in range.clone() {
                if !s.frozen[i] && s.main[i] != s.target[i] {
                    s.frozen[i] = true;
                    clamped = true;
                }
            }
            if !clamped {
                break;
            }
        }
    }

    /// Move a cached subtree so `node` starts at (x, y), keeping every size.
    ///
    /// Descendants are re-placed top-down from their parent's content box
    /// and recorded offset, so the result is bit-identical to a fresh solve.
    fn reposition(&mut self, node: NodeId, x: f32, y: f32) {
        let rect = self.store.rect(node);
        self.store.set_rect(node, Rect::new(x, y, rect.width, rect.height));

        let mut current = node;
        loop {
            current = match self.store.first_child(current) {
                Some(child) => child,
                None => loop {
                    if current == node {
                        return;
                    }
                    if let Some(sibling) = self.store.next_sibling(current) {
                        break sibling;
                    }
                    match self.store.parent(current) {
                        Some(parent) => current = parent,
                        None => return,
                    }
                },
            };

            let Some(parent) = self.store.parent(current) else {
                return;
            };
            let padding = self.store.style(parent).map(|s| s.padding).unwrap_or_default();
            let content = self.store.rect(parent).inset(&padding);
            let (dx, dy) = self.store.offset(current);
            let rect = self.store.rect(current);
            self.store.set_rect(current, Rect::new(content.x + dx, content.y + dy, rect.width, rect.height));
        }
    }
}

/// Offset of the first child along the main axis
fn main_start(justify: Justify, free_space: f32, count: usize) -> f32 {
    let n = count as f32;
    match justify {
        Justify::Start | Justify::SpaceBetween => 0.0,
        Justify::End => free_space,
        Justify::Center => free_space / 2.0,
        Justify::SpaceAround if free_space > 0.0 => free_space / (2.0 * n),
        Justify::SpaceEvenly if free_space > 0.0 => free_space / (n + 1.0),
        // Overflowing: center instead of spreading negative space
        Justify::SpaceAround | Justify::SpaceEvenly => free_space / 2.0,
    }
}

/// Extra space between adjacent children, on top of the gap
fn spacing(justify: Justify, free_space: f32, count: usize) -> f32 {
    if free_space <= 0.0 {
        return 0.0;
    }
    let n = count as f32;
    match justify {
        Justify::SpaceBetween if count > 1 => free_space / (n - 1.0),
        Justify::SpaceAround => free_space / n,
        Justify::SpaceEvenly => free_space / (n + 1.0),
        _ => 0.0,
    }
}

/// Offset of a child along the cross axis
fn align_cross(align: Align, line_cross: f32, item_cross: f32) -> f32 {
    let free = line_cross - item_cross;
    match align {
        Align::Start | Align::Stretch => 0.0,
        Align::Center => free / 2.0,
        Align::End => free,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::EdgeSizes;
    use crate::style::{AUTO, NO_LIMIT};

    struct Fixture {
        store: NodeStore,
        cache: LayoutCache,
        scratch: Scratch,
        epoch: u32,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                store: NodeStore::with_capacity(32).unwrap(),
                cache: LayoutCache::with_capacity(32).unwrap(),
                scratch: Scratch::with_capacity(32).unwrap(),
                epoch: 0,
            }
        }

        fn add(&mut self, parent: Option<NodeId>, style: Style) -> NodeId {
            self.store.create(parent, style).unwrap()
        }

        fn run(&mut self, width: f32, height: f32) -> (u64, u64) {
            self.epoch += 1;
            let mut solver = Solver::new(
                &mut self.store,
                &mut self.cache,
                &mut self.scratch,
                Size::new(width, height),
                self.epoch,
                usize::MAX,
            );
            solver.place_roots();
            (solver.solved, solver.translated)
        }

        fn rect(&self, node: NodeId) -> Rect {
            self.store.rect(node)
        }
    }

    #[test]
    fn test_main_start() {
        assert_eq!(main_start(Justify::Start, 90.0, 3), 0.0);
        assert_eq!(main_start(Justify::End, 90.0, 3), 90.0);
        assert_eq!(main_start(Justify::Center, 90.0, 3), 45.0);
        assert_eq!(main_start(Justify::SpaceAround, 90.0, 3), 15.0);
        assert_eq!(main_start(Justify::SpaceEvenly, 90.0, 2), 30.0);
        assert_eq!(main_start(Justify::SpaceEvenly, -20.0, 2), -10.0);
    }

    #[test]
    fn test_spacing() {
        assert_eq!(spacing(Justify::SpaceBetween, 90.0, 4), 30.0);
        assert_eq!(spacing(Justify::SpaceBetween, 90.0, 1), 0.0);
        assert_eq!(spacing(Justify::SpaceAround, 90.0, 3), 30.0);
        assert_eq!(spacing(Justify::SpaceEvenly, 90.0, 2), 30.0);
        assert_eq!(spacing(Justify::SpaceBetween, -10.0, 3), 0.0);
        assert_eq!(spacing(Justify::Center, 90.0, 3), 0.0);
    }

    #[test]
    fn test_align_cross() {
        assert_eq!(align_cross(Align::Start, 100.0, 40.0), 0.0);
        assert_eq!(align_cross(Align::Center, 100.0, 40.0), 30.0);
        assert_eq!(align_cross(Align::End, 100.0, 40.0), 60.0);
        assert_eq!(align_cross(Align::Stretch, 100.0, 100.0), 0.0);
    }

    #[test]
    fn test_row_with_gap() {
        let mut f = Fixture::new();
        let root = f.add(None, Style::row().with_size(200.0, 50.0).with_gap(10.0));
        let items: Vec<_> = (0..3)
            .map(|_| f.add(Some(root), Style::default().with_size(30.0, 20.0)))
            .collect();

        f.run(800.0, 600.0);

        let xs: Vec<f32> = items.iter().map(|&n| f.rect(n).x).collect();
        assert_eq!(xs, vec![0.0, 40.0, 80.0]);
        assert!(items.iter().all(|&n| f.rect(n).y == 0.0));
    }

    #[test]
    fn test_column_with_padding() {
        let mut f = Fixture::new();
        let root = f.add(
            None,
            Style::column().with_size(100.0, 100.0).with_padding(EdgeSizes::new(5.0, 10.0, 5.0, 10.0)),
        );
        let a = f.add(Some(root), Style::default().with_height(20.0).with_grow(0.0));
        let b = f.add(Some(root), Style::default().with_height(30.0));

        f.run(100.0, 100.0);

        assert_eq!(f.rect(a), Rect::new(10.0, 5.0, 0.0, 20.0));
        assert_eq!(f.rect(b), Rect::new(10.0, 25.0, 0.0, 30.0));
    }

    #[test]
    fn test_stretch_respects_max() {
        let mut f = Fixture::new();
        let root = f.add(None, Style::row().with_size(100.0, 80.0).with_align(Align::Stretch));
        let free = f.add(Some(root), Style::default().with_width(10.0));
        let capped = f.add(Some(root), Style::default().with_width(10.0).with_max_size(NO_LIMIT, 30.0));

        f.run(100.0, 100.0);

        assert_eq!(f.rect(free).height, 80.0);
        assert_eq!(f.rect(capped).height, 30.0);
    }

    #[test]
    fn test_grow_redistributes_after_clamp() {
        let mut f = Fixture::new();
        let root = f.add(None, Style::row().with_size(300.0, 10.0));
        let capped = f.add(Some(root), Style::default().with_grow(1.0).with_max_size(50.0, NO_LIMIT));
        let open = f.add(Some(root), Style::default().with_grow(1.0));

        f.run(300.0, 10.0);

        assert_eq!(f.rect(capped).width, 50.0);
        assert_eq!(f.rect(open).width, 250.0);
        assert_eq!(f.rect(open).x, 50.0);
    }

    #[test]
    fn test_shrink_never_negative() {
        let mut f = Fixture::new();
        let root = f.add(None, Style::row().with_size(50.0, 10.0));
        let big = f.add(Some(root), Style::default().with_width(100.0));
        let small = f.add(Some(root), Style::default().with_width(10.0));

        f.run(50.0, 10.0);

        // Overflow 60 split evenly: small would go to -20
        assert_eq!(f.rect(small).width, 0.0);
        assert_eq!(f.rect(big).width, 50.0);
    }

    #[test]
    fn test_auto_container_wraps_children() {
        let mut f = Fixture::new();
        let root = f.add(None, Style::column().with_size(400.0, 400.0));
        let row = f.add(Some(root), Style::row().with_gap(4.0).with_padding(EdgeSizes::all(2.0)));
        f.add(Some(row), Style::default().with_size(10.0, 8.0));
        f.add(Some(row), Style::default().with_size(20.0, 12.0));

        f.run(400.0, 400.0);

        // Main axis of the column is height: 12 + padding
        assert_eq!(f.rect(row).height, 16.0);
        // Cross axis: align start, content width 10 + 4 + 20 + padding
        assert_eq!(f.rect(row).width, 38.0);
    }

    #[test]
    fn test_measured_leaf() {
        let mut f = Fixture::new();
        let root = f.add(None, Style::row().with_size(200.0, 100.0));
        let text = f.add(Some(root), Style::default());
        f.store
            .set_measure(text, Some(Box::new(|_, _| Size::new(42.0, 14.0))))
            .unwrap();

        f.run(200.0, 100.0);
        assert_eq!(f.rect(text).size(), Size::new(42.0, 14.0));
    }

    #[test]
    fn test_root_sizes() {
        let mut f = Fixture::new();
        let leaf = f.add(None, Style::default());
        let container = f.add(None, Style::default().with_max_size(300.0, NO_LIMIT));
        f.add(Some(container), Style::default());
        let fixed = f.add(None, Style::default().with_size(AUTO, 10.0).with_min_size(0.0, 20.0));

        f.run(640.0, 480.0);

        assert_eq!(f.rect(leaf).size(), Size::ZERO);
        assert_eq!(f.rect(container).size(), Size::new(300.0, 480.0));
        assert_eq!(f.rect(fixed).height, 20.0);
    }

    #[test]
    fn test_second_run_hits() {
        let mut f = Fixture::new();
        let root = f.add(None, Style::row().with_size(100.0, 100.0));
        f.add(Some(root), Style::default().with_grow(1.0));

        assert_eq!(f.run(100.0, 100.0), (2, 0));
        assert_eq!(f.run(100.0, 100.0), (0, 0));
        assert_eq!(f.cache.stats().hits, 1);
    }

    #[test]
    fn test_reposition_subtree() {
        let mut f = Fixture::new();
        let root = f.add(None, Style::row().with_size(100.0, 100.0));
        let a = f.add(Some(root), Style::row().with_size(20.0, 10.0).with_padding(EdgeSizes::all(1.0)));
        let b = f.add(Some(a), Style::default().with_size(5.0, 5.0));
        let d = f.add(Some(b), Style::default().with_size(2.0, 2.0));
        let c = f.add(Some(a), Style::default().with_size(5.0, 5.0));

        f.run(100.0, 100.0);
        assert_eq!(f.store.rect(c), Rect::new(6.0, 1.0, 5.0, 5.0));
        assert_eq!(f.store.offset(c), (5.0, 0.0));

        let mut solver = Solver::new(
            &mut f.store,
            &mut f.cache,
            &mut f.scratch,
            Size::new(100.0, 100.0),
            f.epoch,
            usize::MAX,
        );
        solver.reposition(a, 3.0, 4.0);

        assert_eq!(f.store.rect(a), Rect::new(3.0, 4.0, 20.0, 10.0));
        assert_eq!(f.store.rect(b), Rect::new(4.0, 5.0, 5.0, 5.0));
        assert_eq!(f.store.rect(d), Rect::new(4.0, 5.0, 2.0, 2.0));
        assert_eq!(f.store.rect(c), Rect::new(9.0, 5.0, 5.0, 5.0));
        assert_eq!(f.store.rect(root), Rect::new(0.0, 0.0, 100.0, 100.0));
    }
}
