//! Tessel Layout Engine
//!
//! Incremental flexbox layout over a fixed-capacity node arena.
//!
//! The engine turns a mutable tree of styled boxes into rectangles and, on
//! every frame after the first, recomputes only what changed:
//! - Node store: parallel columns indexed by a recycled [`NodeId`]
//! - Dirty queue: deduplicated worklist of handles needing layout
//! - Layout cache: per-node memo keyed by (available box, style version)
//! - Flex solver: direction, justification, alignment, grow/shrink, gaps,
//!   padding and min/max clamps
//!
//! All storage is reserved when the engine is created; marking, solving and
//! clamping never touch the heap afterwards.
//!
//! # Example
//! ```
//! use tessel_layout::{LayoutEngine, Style};
//!
//! let mut engine = LayoutEngine::with_capacity(16)?;
//! let root = engine.add(None, Style::row().with_size(200.0, 50.0).with_gap(10.0))?;
//! let a = engine.add(Some(root), Style::default().with_size(30.0, 20.0))?;
//! let b = engine.add(Some(root), Style::default().with_size(30.0, 20.0))?;
//!
//! engine.compute(800.0, 600.0);
//! assert_eq!(engine.rect(a).x, 0.0);
//! assert_eq!(engine.rect(b).x, 40.0);
//! # Ok::<(), tessel_layout::LayoutError>(())
//! ```

mod config;
mod engine;
mod error;
mod flex;
mod geometry;
mod store;
mod style;
pub mod cache;
pub mod clamp;
pub mod dirty;

pub use cache::{CacheEntry, CacheStats};
pub use clamp::{clamp_batch, clamp_size};
pub use config::LayoutConfig;
pub use dirty::DirtyQueue;
pub use engine::{LayoutEngine, LayoutStats};
pub use error::{LayoutError, Result};
pub use geometry::{EdgeSizes, Rect, Size};
pub use store::{Children, MeasureFn};
pub use style::{Align, AxisConstraint, Direction, Justify, Style, AUTO, NO_LIMIT, STYLE_SIZE};

// Identifier helpers for callers mapping their own ids onto handles
pub use tessel_id as id;

/// Node handle (dense index into the node store)
///
/// Handles are recycled: after `remove`, the same value may name a new node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// "No node" marker stored in link columns
    pub(crate) const NONE: NodeId = NodeId(u32::MAX);

    /// Wrap a raw index
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Raw index
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub(crate) fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// `None` for the sentinel
    #[inline]
    pub(crate) fn get(self) -> Option<NodeId> {
        if self.is_none() { None } else { Some(self) }
    }

    #[inline]
    pub(crate) fn from_option(node: Option<NodeId>) -> NodeId {
        node.unwrap_or(Self::NONE)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
