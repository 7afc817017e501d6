//! Bower: a retained-mode UI toolkit core.
//!
//! Bower provides an owned view tree with two-phase Measure/Layout,
//! directional focus navigation driven by dpad-style input, kinetic
//! scrolling, and a stack of screens managed by [`ScreenManager`].
//!
//! # Quick Start
//!
//! The main entry points are:
//! - [`View`] - the trait every UI node implements
//! - [`ViewHost`] - owns one tree plus its focus and event state
//! - [`ScreenManager`] - the stack of full-screen states
//!
//! # Module Organization
//!
//! - [`layout`] - linear, anchor, grid, and frame containers
//! - [`scroll`] - the single-child scroll container
//! - [`screen`] - screens, dialogs, and the stack manager

#![warn(missing_docs)]

pub mod draw;
pub mod error;
pub mod event;
pub mod focus;
pub mod group;
pub mod hierarchy;
pub mod host;
pub mod layout;
pub mod screen;
pub mod scroll;
pub mod view;

/// Test doubles, exported for dependent crates' tests.
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use draw::{DrawContext, Drawable, Theme, UiContext};
pub use error::{Error, Result};
pub use event::{
    Axis, AxisInput, EventCx, EventKind, EventQueue, InputState, Key, KeyInput, TouchFlags,
    TouchInput, UiEvent,
};
pub use focus::{FocusState, move_focus};
pub use group::{NeighborResult, ViewGroup};
pub use hierarchy::{axis_event, key_event, layout_view_hierarchy, touch_event, update_view_hierarchy};
pub use host::ViewHost;
pub use screen::{DialogResult, LayerFlags, Screen, ScreenCx, ScreenManager, ScreenRequest};
pub use scroll::ScrollView;
pub use view::{
    LayoutParams, MeasureMode, MeasureSpec, SizePair, SizeReq, View, ViewId, ViewState, Visibility,
    measure_by_spec,
};
