//! Stock widgets and dialogs built on [`bower_core`].
//!
//! The core crate stops at containers, focus, and screens; this crate adds
//! the pieces applications actually assemble:
//!
//! - [`base`] - labels, buttons, and clickable choice rows
//! - [`strip`] - a latching segmented selector
//! - [`tabs`] - a tab bar with swappable content panes
//! - [`list`] - adaptor-driven scrolling lists
//! - [`popup`] - modal message and choice dialogs

#![warn(missing_docs)]

pub mod base;
pub mod list;
pub mod popup;
pub mod strip;
pub mod tabs;

pub use base::{Button, Choice, Label, PopupHeader, Spacer, StickyChoice, ellipsize};
pub use list::{ListAdaptor, ListView, StringVectorAdaptor};
pub use popup::{ListPopup, MessagePopup};
pub use strip::ChoiceStrip;
pub use tabs::TabHolder;
