//! Frame-level entry points a host drives the view tree with: the two-phase
//! layout pass, input routing, and the per-frame update that applies any
//! queued focus movement.

use geom::{Bounds, FocusDirection};

use crate::{
    draw::DrawContext,
    event::{AxisInput, EventCx, InputState, Key, KeyInput, TouchInput},
    focus::{FocusState, move_focus},
    view::{MeasureSpec, View},
};

/// Run Measure then Layout over the whole tree, sizing the root exactly to
/// `bounds`.
pub fn layout_view_hierarchy(dc: &dyn DrawContext, root: &mut dyn View, bounds: Bounds) {
    let horiz = MeasureSpec::exactly(bounds.w);
    let vert = MeasureSpec::exactly(bounds.h);

    root.measure(dc, horiz, vert);
    root.state_mut().bounds = bounds;
    root.layout();
}

/// Route a key event into the tree. Dpad presses additionally queue a focus
/// move, applied at the head of the next update so handlers never observe a
/// tree that mutates mid-dispatch.
pub fn key_event(key: &KeyInput, root: &mut dyn View, cx: &mut EventCx) {
    if key.down {
        let dir = match key.key {
            Key::DpadUp => Some(FocusDirection::Up),
            Key::DpadDown => Some(FocusDirection::Down),
            Key::DpadLeft => Some(FocusDirection::Left),
            Key::DpadRight => Some(FocusDirection::Right),
            _ => None,
        };
        if let Some(dir) = dir {
            cx.focus.queue_move(dir);
        }
    }
    root.key(key, cx);
}

/// Route a touch event into the tree. Any pointer activity hides the focus
/// highlight until the next dpad press.
pub fn touch_event(touch: &TouchInput, root: &mut dyn View, cx: &mut EventCx) {
    cx.focus.set_movement_enabled(false);
    root.touch(touch, cx);
}

/// Route a joystick axis event into the tree.
pub fn axis_event(axis: &AxisInput, root: &mut dyn View, cx: &mut EventCx) {
    root.axis(axis, cx);
}

/// Per-frame tick: apply queued focus moves, then update every view.
///
/// The first dpad press after focus was lost (or hidden by pointer use)
/// re-establishes focus on the tree's first focusable view rather than
/// moving.
pub fn update_view_hierarchy(input: &InputState, root: &mut dyn View, focus: &mut FocusState) {
    let moves = focus.take_queued();
    if !moves.is_empty() {
        focus.set_movement_enabled(true);
        if focus.focused().is_none() {
            if root.focus_first(focus)
                && let Some(focused) = focus.focused()
            {
                root.subview_focused(focused);
            }
        } else {
            for dir in moves {
                move_focus(root, dir, focus);
            }
        }
    }

    root.update(input);
}
