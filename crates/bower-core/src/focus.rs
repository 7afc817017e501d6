//! Explicit focus state and the directional focus-movement operation.
//!
//! Focus is ordinary data owned by whoever owns the view tree, not a
//! process-wide global: two hosts can hold independent focus without
//! trampling each other.

use geom::FocusDirection;
use tracing::trace;

use crate::{
    group::NeighborResult,
    view::{View, ViewId},
};

/// Which view currently has focus, plus the queued movement requests that
/// accumulate between frames.
#[derive(Debug, Default)]
pub struct FocusState {
    focused: Option<ViewId>,
    /// Directional moves queued by key events, drained once per frame.
    queued: Vec<FocusDirection>,
    /// Pointer activity hides focus; a dpad press brings it back.
    movement_enabled: bool,
}

impl FocusState {
    /// A fresh focus state with nothing focused and movement enabled.
    pub fn new() -> Self {
        Self {
            focused: None,
            queued: Vec::new(),
            movement_enabled: true,
        }
    }

    /// The focused view, if any.
    pub fn focused(&self) -> Option<ViewId> {
        self.focused
    }

    /// True if `id` is the focused view.
    pub fn is_focused(&self, id: ViewId) -> bool {
        self.focused == Some(id)
    }

    /// Move focus to `id`.
    pub fn set_focused(&mut self, id: ViewId) {
        self.focused = Some(id);
    }

    /// Drop focus entirely.
    pub fn clear(&mut self) {
        self.focused = None;
    }

    /// Whether focus movement (and the focus highlight) is active.
    pub fn movement_enabled(&self) -> bool {
        self.movement_enabled
    }

    /// Enable or disable focus movement. Pointer input disables it; dpad
    /// input re-enables it.
    pub fn set_movement_enabled(&mut self, enabled: bool) {
        self.movement_enabled = enabled;
    }

    /// Queue a directional move to be applied at the next frame boundary.
    pub fn queue_move(&mut self, dir: FocusDirection) {
        self.queued.push(dir);
    }

    /// Take the pending moves, leaving the queue empty.
    pub fn take_queued(&mut self) -> Vec<FocusDirection> {
        std::mem::take(&mut self.queued)
    }
}

/// Move focus one step in `dir` within the tree rooted at `root`.
///
/// When nothing is focused, or the focused view no longer exists in the
/// tree, focus is cleared and nothing moves; the next move request lands
/// on the tree's first focusable view instead.
pub fn move_focus(root: &mut dyn View, dir: FocusDirection, focus: &mut FocusState) {
    let Some(group) = root.as_container() else {
        return;
    };
    let Some(origin) = focus.focused() else {
        if let Some(group) = root.as_container_mut() {
            group.focus_first(focus);
        }
        return;
    };
    let Some(origin_bounds) = group.bounds_of(origin) else {
        trace!(?origin, "focused view vanished, clearing focus");
        focus.clear();
        return;
    };

    let result = group.find_neighbor(origin, origin_bounds, dir, NeighborResult::default());
    let Some(target) = result.view else {
        return;
    };
    if target == origin {
        return;
    }
    trace!(?origin, ?target, score = result.score, ?dir, "focus moved");
    if let Some(group) = root.as_container_mut()
        && group.focus_descendant(target, focus)
        && let Some(focused) = focus.focused()
    {
        // Give enclosing containers (scroll views in particular) a chance
        // to react to the new focus.
        group.notify_subview_focused(focused);
    }
}
