//! Input event types consumed from the platform shell, and the deferred
//! event queue UI handlers emit into during dispatch.

use geom::Point;

use crate::{focus::FocusState, view::ViewId};

/// Phase flags for a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchFlags {
    /// Pointer went down.
    Down,
    /// Pointer moved while down.
    Move,
    /// Pointer was released.
    Up,
}

/// A single pointer event from the platform shell.
#[derive(Debug, Clone, Copy)]
pub struct TouchInput {
    /// Pointer id; 0 is the primary pointer.
    pub id: u32,
    /// Position in device-independent pixels.
    pub x: f32,
    /// Position in device-independent pixels.
    pub y: f32,
    /// Event phase.
    pub flags: TouchFlags,
}

impl TouchInput {
    /// Construct a primary-pointer touch event.
    pub fn primary(x: f32, y: f32, flags: TouchFlags) -> Self {
        Self { id: 0, x, y, flags }
    }
}

/// Key codes the UI core reacts to. Anything else from the shell passes
/// through to views unchanged as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Directional pad up.
    DpadUp,
    /// Directional pad down.
    DpadDown,
    /// Directional pad left.
    DpadLeft,
    /// Directional pad right.
    DpadRight,
    /// Activate the focused view.
    Enter,
    /// Dismiss / cancel.
    Escape,
    /// Scroll a page up.
    PageUp,
    /// Scroll a page down.
    PageDown,
    /// Jump to the start.
    Home,
    /// Jump to the end.
    End,
    /// Mouse wheel scrolled up.
    MouseWheelUp,
    /// Mouse wheel scrolled down.
    MouseWheelDown,
    /// Left shoulder button.
    ShoulderLeft,
    /// Right shoulder button.
    ShoulderRight,
    /// Any other platform key code.
    Other(u32),
}

/// A key event from the platform shell.
#[derive(Debug, Clone, Copy)]
pub struct KeyInput {
    /// Originating device.
    pub device_id: u32,
    /// Decoded key.
    pub key: Key,
    /// True on press, false on release.
    pub down: bool,
}

impl KeyInput {
    /// Construct a key-down event.
    pub fn down(key: Key) -> Self {
        Self {
            device_id: 0,
            key,
            down: true,
        }
    }

    /// Construct a key-up event.
    pub fn up(key: Key) -> Self {
        Self {
            device_id: 0,
            key,
            down: false,
        }
    }
}

/// Joystick axes the core cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal hat axis.
    HatX,
    /// Vertical hat axis.
    HatY,
    /// Any other axis, passed through to views.
    Other(u8),
}

/// A joystick axis event.
#[derive(Debug, Clone, Copy)]
pub struct AxisInput {
    /// Originating device.
    pub device_id: u32,
    /// Which axis moved.
    pub axis: Axis,
    /// Axis value, nominally in [-1, 1].
    pub value: f32,
}

/// Per-frame input snapshot forwarded to `update`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    /// Is the primary pointer currently down?
    pub pointer_down: bool,
    /// Last primary pointer position.
    pub pointer: Point,
}

/// What a view announced when it fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// The view was activated (tap or Enter on focus).
    Click,
    /// A selection-style widget settled on the given index.
    Choice(usize),
}

/// An event emitted by a view during dispatch.
#[derive(Debug, Clone, Copy)]
pub struct UiEvent {
    /// The emitting view.
    pub source: ViewId,
    /// What happened.
    pub kind: EventKind,
}

/// Ordered queue of events emitted during a dispatch pass.
///
/// Handlers never mutate the tree mid-traversal; they push here and owners
/// react after the child scan returns. Composite widgets consume their
/// children's events via [`EventQueue::take_since`]; whatever remains bubbles
/// to the hosting screen.
#[derive(Debug, Default)]
pub struct EventQueue {
    /// Pending events in emission order.
    items: Vec<UiEvent>,
}

impl EventQueue {
    /// Construct an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit an event.
    pub fn push(&mut self, source: ViewId, kind: EventKind) {
        self.items.push(UiEvent { source, kind });
    }

    /// A position marker for [`EventQueue::take_since`].
    pub fn mark(&self) -> usize {
        self.items.len()
    }

    /// Remove and return every event emitted at or after `mark` that matches
    /// the predicate, preserving order. Non-matching events stay queued.
    pub fn take_since(
        &mut self,
        mark: usize,
        mut pred: impl FnMut(&UiEvent) -> bool,
    ) -> Vec<UiEvent> {
        let mut taken = Vec::new();
        let mut idx = mark.min(self.items.len());
        while idx < self.items.len() {
            if pred(&self.items[idx]) {
                taken.push(self.items.remove(idx));
            } else {
                idx += 1;
            }
        }
        taken
    }

    /// Drain the whole queue in emission order.
    pub fn drain(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.items)
    }

    /// True if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of queued events.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Mutable context threaded through input dispatch.
pub struct EventCx<'a> {
    /// Focus state owned by the hosting controller.
    pub focus: &'a mut FocusState,
    /// Deferred event queue.
    pub events: &'a mut EventQueue,
}
