//! Geometry primitives used across bower.
//!
//! All coordinates are in device-independent pixels (`f32`), matching the
//! units the layout engine and draw context operate in.

/// Axis-aligned rectangle operations.
mod bounds;
/// Alignment within an allotted cell.
mod gravity;
/// Per-edge spacing around a view.
mod margins;
/// Point helpers.
mod point;

pub use bounds::Bounds;
pub use gravity::{Gravity, HAlign, VAlign, apply_gravity};
pub use margins::Margins;
pub use point::Point;

/// Layout axis for containers that stack or scroll along one dimension.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Orientation {
    /// Main axis runs left to right.
    Horizontal,
    /// Main axis runs top to bottom.
    Vertical,
}

impl Orientation {
    /// The other axis.
    pub fn opposite(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// Directions a focus move can be requested in.
///
/// The four spatial directions drive the direction-score search; `Prev` and
/// `Next` are plain cyclic sibling moves.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum FocusDirection {
    /// Upward spatial move.
    Up,
    /// Downward spatial move.
    Down,
    /// Leftward spatial move.
    Left,
    /// Rightward spatial move.
    Right,
    /// Previous sibling in traversal order, wrapping.
    Prev,
    /// Next sibling in traversal order, wrapping.
    Next,
}

impl FocusDirection {
    /// The opposite direction, used to pick the candidate's anchor edge.
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Prev => Self::Next,
            Self::Next => Self::Prev,
        }
    }
}
