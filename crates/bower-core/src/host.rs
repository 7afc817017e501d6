//! `ViewHost`: the reusable core of a screen that shows a view tree. Owns
//! the root view, the focus state, and the event queue, and adapts raw
//! shell input into tree dispatch.

use geom::Bounds;
use tracing::debug;

use crate::{
    draw::{DrawContext, UiContext},
    event::{Axis, AxisInput, EventCx, InputState, Key, KeyInput, TouchInput, UiEvent},
    focus::FocusState,
    hierarchy::{axis_event, key_event, layout_view_hierarchy, touch_event, update_view_hierarchy},
    view::View,
};

/// Hat deflection treated as a press.
const HAT_THRESHOLD: f32 = 0.7;

const HAT_LEFT: u8 = 1;
const HAT_RIGHT: u8 = 2;
const HAT_UP: u8 = 4;
const HAT_DOWN: u8 = 8;

/// Hosts a view tree for one screen: runs layout before every frame,
/// routes input, applies focus movement, and hands back the UI events the
/// tree emitted during each dispatch.
///
/// The root is rebuilt lazily: [`ViewHost::request_recreate`] marks it
/// stale and the next [`ViewHost::ensure_views`] call builds a fresh tree.
pub struct ViewHost {
    root: Option<Box<dyn View>>,
    focus: FocusState,
    events: crate::event::EventQueue,
    recreate: bool,
    /// Bitset of hat directions currently held, for edge-triggered dpad
    /// synthesis.
    hat_down: u8,
}

impl Default for ViewHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewHost {
    /// A host with no root; the first `ensure_views` builds one.
    pub fn new() -> Self {
        Self {
            root: None,
            focus: FocusState::new(),
            events: crate::event::EventQueue::new(),
            recreate: true,
            hat_down: 0,
        }
    }

    /// Rebuild the root via `build` if it is stale or missing.
    pub fn ensure_views(&mut self, build: impl FnOnce() -> Box<dyn View>) {
        if self.recreate || self.root.is_none() {
            debug!("rebuilding view hierarchy");
            self.root = Some(build());
            self.focus.clear();
            self.recreate = false;
        }
    }

    /// Mark the root stale; it is dropped and rebuilt on the next
    /// `ensure_views`.
    pub fn request_recreate(&mut self) {
        self.recreate = true;
    }

    /// The focus state for this tree.
    pub fn focus(&self) -> &FocusState {
        &self.focus
    }

    /// The focus state, mutably.
    pub fn focus_mut(&mut self) -> &mut FocusState {
        &mut self.focus
    }

    /// The root view, if built.
    pub fn root_mut(&mut self) -> Option<&mut (dyn View + 'static)> {
        self.root.as_deref_mut()
    }

    /// Per-frame tick: drop a focus pointer whose view no longer exists,
    /// apply queued focus moves, update the tree, and return the events
    /// emitted by update handlers.
    pub fn update(&mut self, input: &InputState) -> Vec<UiEvent> {
        if let Some(root) = self.root.as_deref_mut() {
            if let Some(id) = self.focus.focused()
                && root.state().id != id
                && !root
                    .as_container()
                    .is_some_and(|group| group.contains_descendant(id))
            {
                debug!(?id, "focused view is gone, clearing focus");
                self.focus.clear();
            }
            update_view_hierarchy(input, root, &mut self.focus);
        }
        self.events.drain()
    }

    /// Lay out and paint one frame.
    pub fn render(&mut self, dc: &mut dyn DrawContext, bounds: Bounds, enabled: bool) {
        let Some(root) = self.root.as_deref_mut() else {
            return;
        };
        layout_view_hierarchy(dc, root, bounds);

        dc.begin();
        let mut ui = UiContext {
            dc: &mut *dc,
            focus: &self.focus,
            enabled,
        };
        root.draw(&mut ui);
        dc.end();
        dc.flush();
    }

    /// Route a pointer event; returns the events the tree emitted.
    pub fn touch(&mut self, touch: &TouchInput) -> Vec<UiEvent> {
        if let Some(root) = self.root.as_deref_mut() {
            let mut cx = EventCx {
                focus: &mut self.focus,
                events: &mut self.events,
            };
            touch_event(touch, root, &mut cx);
        }
        self.events.drain()
    }

    /// Route a key event; returns the events the tree emitted.
    pub fn key(&mut self, key: &KeyInput) -> Vec<UiEvent> {
        if let Some(root) = self.root.as_deref_mut() {
            let mut cx = EventCx {
                focus: &mut self.focus,
                events: &mut self.events,
            };
            key_event(key, root, &mut cx);
        }
        self.events.drain()
    }

    /// Route an axis event, synthesizing edge-triggered dpad presses from
    /// the hat axes; returns the events the tree emitted.
    pub fn axis(&mut self, axis: &AxisInput) -> Vec<UiEvent> {
        let mut flags = self.hat_down;
        match axis.axis {
            Axis::HatX => {
                flags &= !(HAT_LEFT | HAT_RIGHT);
                if axis.value < -HAT_THRESHOLD {
                    flags |= HAT_LEFT;
                }
                if axis.value > HAT_THRESHOLD {
                    flags |= HAT_RIGHT;
                }
            }
            Axis::HatY => {
                flags &= !(HAT_UP | HAT_DOWN);
                if axis.value < -HAT_THRESHOLD {
                    flags |= HAT_UP;
                }
                if axis.value > HAT_THRESHOLD {
                    flags |= HAT_DOWN;
                }
            }
            Axis::Other(_) => {}
        }

        let pressed = flags & !self.hat_down;
        let released = !flags & self.hat_down;
        self.hat_down = flags;

        let mut emitted = Vec::new();
        for (bit, key) in [
            (HAT_LEFT, Key::DpadLeft),
            (HAT_RIGHT, Key::DpadRight),
            (HAT_UP, Key::DpadUp),
            (HAT_DOWN, Key::DpadDown),
        ] {
            if pressed & bit != 0 {
                emitted.extend(self.key(&KeyInput::down(key)));
            }
            if released & bit != 0 {
                emitted.extend(self.key(&KeyInput::up(key)));
            }
        }

        if let Some(root) = self.root.as_deref_mut() {
            let mut cx = EventCx {
                focus: &mut self.focus,
                events: &mut self.events,
            };
            axis_event(axis, root, &mut cx);
        }
        emitted.extend(self.events.drain());
        emitted
    }
}
