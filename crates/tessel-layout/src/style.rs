//! Node style
//!
//! A flat, fixed-layout record: three one-byte enums followed by plain
//! `f32` fields. Sizes use [`AUTO`] for "derive from content or from the
//! parent" and [`NO_LIMIT`] for an open maximum.

use crate::clamp::clamp_size;
use crate::geometry::EdgeSizes;

/// Size sentinel: resolve from content or from the parent
pub const AUTO: f32 = -1.0;

/// Maximum sentinel: no upper bound
pub const NO_LIMIT: f32 = f32::MAX;

/// Size of [`Style`] in bytes
pub const STYLE_SIZE: usize = 56;

const _: () = assert!(std::mem::size_of::<Style>() == STYLE_SIZE);

/// Main axis of a container
#[repr(u8)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[default]
    Row = 0,
    Column = 1,
}

impl Direction {
    pub fn is_row(&self) -> bool {
        matches!(self, Self::Row)
    }
}

/// Main axis distribution of leftover space
#[repr(u8)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Justify {
    #[default]
    Start = 0,
    Center = 1,
    End = 2,
    SpaceBetween = 3,
    SpaceAround = 4,
    SpaceEvenly = 5,
}

/// Cross axis placement of children
#[repr(u8)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    #[default]
    Start = 0,
    Center = 1,
    End = 2,
    Stretch = 3,
}

/// Layout style of one node
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    /// Main axis of this node's children
    pub direction: Direction,
    /// Main axis alignment of children
    pub justify: Justify,
    /// Cross axis alignment of children
    pub align: Align,
    /// Share of positive free space taken by this node
    pub flex_grow: f32,
    /// Share of negative free space absorbed by this node
    pub flex_shrink: f32,
    /// Width, or [`AUTO`]
    pub width: f32,
    /// Height, or [`AUTO`]
    pub height: f32,
    pub min_width: f32,
    pub min_height: f32,
    pub max_width: f32,
    pub max_height: f32,
    /// Space between adjacent children on the main axis
    pub gap: f32,
    /// Inner spacing around the children
    pub padding: EdgeSizes,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            direction: Direction::Row,
            justify: Justify::Start,
            align: Align::Start,
            flex_grow: 0.0,
            flex_shrink: 1.0,
            width: AUTO,
            height: AUTO,
            min_width: 0.0,
            min_height: 0.0,
            max_width: NO_LIMIT,
            max_height: NO_LIMIT,
            gap: 0.0,
            padding: EdgeSizes::ZERO,
        }
    }
}

impl Style {
    /// Container laying children out left to right
    pub fn row() -> Self {
        Self { direction: Direction::Row, ..Self::default() }
    }

    /// Container laying children out top to bottom
    pub fn column() -> Self {
        Self { direction: Direction::Column, ..Self::default() }
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    pub fn with_size(self, width: f32, height: f32) -> Self {
        self.with_width(width).with_height(height)
    }

    pub fn with_min_size(mut self, width: f32, height: f32) -> Self {
        self.min_width = width;
        self.min_height = height;
        self
    }

    pub fn with_max_size(mut self, width: f32, height: f32) -> Self {
        self.max_width = width;
        self.max_height = height;
        self
    }

    pub fn with_grow(mut self, grow: f32) -> Self {
        self.flex_grow = grow;
        self
    }

    pub fn with_shrink(mut self, shrink: f32) -> Self {
        self.flex_shrink = shrink;
        self
    }

    pub fn with_gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_padding(mut self, padding: EdgeSizes) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_justify(mut self, justify: Justify) -> Self {
        self.justify = justify;
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Width constraints
    pub fn horizontal(&self) -> AxisConstraint {
        AxisConstraint { size: self.width, min: self.min_width, max: self.max_width }
    }

    /// Height constraints
    pub fn vertical(&self) -> AxisConstraint {
        AxisConstraint { size: self.height, min: self.min_height, max: self.max_height }
    }

    /// (main, cross) constraints for a child of a container laid out in
    /// `direction`
    pub fn axes(&self, direction: Direction) -> (AxisConstraint, AxisConstraint) {
        if direction.is_row() {
            (self.horizontal(), self.vertical())
        } else {
            (self.vertical(), self.horizontal())
        }
    }

    /// Whether either dimension depends on content
    pub fn is_auto_sized(&self) -> bool {
        self.horizontal().fixed().is_none() || self.vertical().fixed().is_none()
    }
}

/// Size and bounds along one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisConstraint {
    pub size: f32,
    pub min: f32,
    pub max: f32,
}

impl AxisConstraint {
    /// Explicit size, `None` when auto
    #[inline]
    pub fn fixed(&self) -> Option<f32> {
        (self.size >= 0.0).then_some(self.size)
    }

    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        clamp_size(value, self.min, self.max)
    }
}
