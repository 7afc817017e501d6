//! Container views implementing the second half of the Measure/Layout
//! protocol: linear rows and columns, edge-anchored overlays, wrapping
//! grids, and the plain stacking frame.

mod anchor;
mod frame;
mod grid;
mod linear;

pub use anchor::AnchorLayout;
pub use frame::FrameLayout;
pub use grid::{GridLayout, GridSettings};
pub use linear::LinearLayout;

use geom::{Gravity, Margins};

use crate::view::LayoutParams;

/// Margins a linear parent applies to a child: the child's own when it
/// carries linear params with margins, otherwise the parent's default.
fn linear_margins(params: &LayoutParams, default: Margins) -> Margins {
    match params {
        LayoutParams::Linear {
            margins: Some(margins),
            ..
        } => *margins,
        _ => default,
    }
}

/// A child's weight, zero unless it carries linear params.
fn linear_weight(params: &LayoutParams) -> f32 {
    match params {
        LayoutParams::Linear { weight, .. } => *weight,
        _ => 0.0,
    }
}

/// A child's in-cell gravity, top-left unless it carries linear params.
fn linear_gravity(params: &LayoutParams) -> Gravity {
    match params {
        LayoutParams::Linear { gravity, .. } => *gravity,
        _ => Gravity::TOP_LEFT,
    }
}
