//! The screen abstraction and the stack manager that owns every live
//! screen, routes input to the top one, and sequences transitions.

use std::any::Any;

use tracing::{debug, error, warn};

use crate::{
    draw::DrawContext,
    event::{AxisInput, InputState, KeyInput, TouchInput},
};

/// How a dialog screen was dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogResult {
    /// Confirmed.
    Ok,
    /// Dismissed without choosing.
    Cancel,
    /// Affirmative choice in a yes/no dialog.
    Yes,
    /// Negative choice in a yes/no dialog.
    No,
    /// Backed out.
    Back,
}

/// Compositing behavior of one stack layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayerFlags {
    /// The layer beneath stays visible (dimmed, input disabled).
    pub transparent: bool,
    /// Side-menu overlay; also keeps the layer beneath visible.
    pub side_menu: bool,
}

impl LayerFlags {
    /// Fully opaque, the default.
    pub const OPAQUE: Self = Self {
        transparent: false,
        side_menu: false,
    };

    /// A transparent dialog layer.
    pub const TRANSPARENT: Self = Self {
        transparent: true,
        side_menu: false,
    };

    fn draws_behind(self) -> bool {
        self.transparent || self.side_menu
    }
}

/// Stable identity of one stack layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenId(u64);

/// A stack transition requested by a screen during dispatch.
///
/// Screens never hold a reference back to the manager; they queue requests
/// into [`ScreenCx`] and the manager applies them once dispatch returns.
pub enum ScreenRequest {
    /// Replace the top screen at the next update.
    Switch(Box<dyn Screen>),
    /// Push a new layer on top.
    Push(Box<dyn Screen>, LayerFlags),
    /// Pop the top layer.
    Pop,
    /// Finish the issuing screen as a dialog with the given result.
    FinishDialog(DialogResult),
}

/// Request queue handed to a screen for the duration of one dispatch call.
#[derive(Default)]
pub struct ScreenCx {
    requests: Vec<ScreenRequest>,
}

impl ScreenCx {
    /// Replace the current top screen at the next update boundary.
    pub fn switch_screen(&mut self, screen: Box<dyn Screen>) {
        self.requests.push(ScreenRequest::Switch(screen));
    }

    /// Push an opaque screen.
    pub fn push(&mut self, screen: Box<dyn Screen>) {
        self.push_layer(screen, LayerFlags::OPAQUE);
    }

    /// Push a screen with explicit layer flags.
    pub fn push_layer(&mut self, screen: Box<dyn Screen>, flags: LayerFlags) {
        self.requests.push(ScreenRequest::Push(screen, flags));
    }

    /// Pop the top layer.
    pub fn pop(&mut self) {
        self.requests.push(ScreenRequest::Pop);
    }

    /// Finish the issuing screen as a dialog. The layer is removed after
    /// the next render, and the caller beneath is notified.
    pub fn finish_dialog(&mut self, result: DialogResult) {
        self.requests.push(ScreenRequest::FinishDialog(result));
    }

    /// Remove and return the queued requests, for hosts that drive screens
    /// without a [`ScreenManager`].
    pub fn drain_requests(&mut self) -> Vec<ScreenRequest> {
        std::mem::take(&mut self.requests)
    }
}

/// One full-screen state of the application. Owned by the
/// [`ScreenManager`]; only the top screen receives input and updates.
pub trait Screen: Any {
    /// Per-frame tick while this screen is on top.
    fn update(&mut self, input: &InputState, cx: &mut ScreenCx);

    /// Paint one frame. `enabled` is false when rendering as the backdrop
    /// beneath a transparent layer; interactive chrome must not paint.
    fn render(&mut self, dc: &mut dyn DrawContext, enabled: bool);

    /// Pointer input while on top.
    fn touch(&mut self, _touch: &TouchInput, _cx: &mut ScreenCx) {}

    /// Key input while on top.
    fn key(&mut self, _key: &KeyInput, _cx: &mut ScreenCx) {}

    /// Axis input while on top.
    fn axis(&mut self, _axis: &AxisInput, _cx: &mut ScreenCx) {}

    /// Does this screen expect the layer beneath it to stay visible?
    /// Folded into the layer flags when the screen is pushed.
    fn is_transparent(&self) -> bool {
        false
    }

    /// Out-of-band string message from the shell.
    fn send_message(&mut self, _message: &str, _value: &str) {}

    /// The rendering device was lost; drop GPU resources.
    fn device_lost(&mut self) {}

    /// Rebuild the view hierarchy (after a resize or language change).
    fn recreate_views(&mut self) {}

    /// A dialog this screen opened has finished.
    fn dialog_finished(&mut self, _dialog: &dyn Screen, _result: DialogResult) {}

    /// Downcasting support.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

struct Layer {
    screen: Box<dyn Screen>,
    id: ScreenId,
    flags: LayerFlags,
}

/// Owns the screen stack and sequences every transition.
///
/// Transitions requested mid-frame are deferred: a switch waits in a single
/// pending slot until the head of the next update, and a finished dialog is
/// removed only after the frame that saw it finish has rendered. Handlers
/// therefore never observe the stack changing under them.
#[derive(Default)]
pub struct ScreenManager {
    stack: Vec<Layer>,
    next_screen: Option<Box<dyn Screen>>,
    finished_dialog: Option<(ScreenId, DialogResult)>,
    next_id: u64,
}

impl ScreenManager {
    /// An empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live layers.
    pub fn stack_size(&self) -> usize {
        self.stack.len()
    }

    /// The top screen, if any.
    pub fn top_mut(&mut self) -> Option<&mut (dyn Screen + 'static)> {
        self.stack.last_mut().map(|l| &mut *l.screen)
    }

    /// Stage `screen` to replace the current top at the next update. With an
    /// empty stack this bootstraps the first layer. A screen already staged
    /// is dropped and replaced.
    pub fn switch_screen(&mut self, screen: Box<dyn Screen>) {
        if self.next_screen.is_some() {
            error!("switch_screen: overwriting a pending screen that was never shown");
        }
        self.next_screen = Some(screen);
    }

    /// Push an opaque screen immediately.
    pub fn push(&mut self, screen: Box<dyn Screen>) {
        self.push_layer(screen, LayerFlags::OPAQUE);
    }

    /// Push a screen with explicit layer flags immediately. A pending switch
    /// against an empty stack is resolved first, so the pushed screen lands
    /// on top of it. A screen declaring itself transparent gets that folded
    /// into its flags.
    pub fn push_layer(&mut self, screen: Box<dyn Screen>, mut flags: LayerFlags) {
        if self.next_screen.is_some() && self.stack.is_empty() {
            self.switch_to_next();
        }
        flags.transparent |= screen.is_transparent();
        let id = self.alloc_id();
        debug!(?id, "push screen");
        self.stack.push(Layer { screen, id, flags });
    }

    /// Pop and drop the top layer.
    pub fn pop(&mut self) {
        if self.stack.pop().is_none() {
            warn!("pop: screen stack is empty");
        }
    }

    /// Per-frame tick: apply any staged switch, then update the top screen.
    pub fn update(&mut self, input: &InputState) {
        if self.next_screen.is_some() {
            self.switch_to_next();
        }
        self.dispatch_top(|screen, cx| screen.update(input, cx));
    }

    /// Paint one frame. A transparent or side-menu top layer gets the layer
    /// beneath rendered first, with interactivity disabled. Dialogs that
    /// finished during this frame are resolved after painting.
    pub fn render(&mut self, dc: &mut dyn DrawContext) {
        let n = self.stack.len();
        let Some(top_index) = n.checked_sub(1) else {
            error!("render: screen stack is empty");
            return;
        };
        if self.stack[top_index].flags.draws_behind() {
            if let Some(below) = top_index.checked_sub(1) {
                self.stack[below].screen.render(dc, false);
            } else {
                error!("transparent layer with nothing beneath it");
            }
        }
        self.stack[top_index].screen.render(dc, true);

        self.process_finished_dialog();
    }

    /// Route a pointer event to the top screen.
    pub fn touch(&mut self, touch: &TouchInput) {
        self.dispatch_top(|screen, cx| screen.touch(touch, cx));
    }

    /// Route a key event to the top screen.
    pub fn key(&mut self, key: &KeyInput) {
        self.dispatch_top(|screen, cx| screen.key(key, cx));
    }

    /// Route an axis event to the top screen.
    pub fn axis(&mut self, axis: &AxisInput) {
        self.dispatch_top(|screen, cx| screen.axis(axis, cx));
    }

    /// Deliver a shell message to the top screen.
    pub fn send_message(&mut self, message: &str, value: &str) {
        if let Some(layer) = self.stack.last_mut() {
            layer.screen.send_message(message, value);
        }
    }

    /// Notify every screen that the rendering device was lost.
    pub fn device_lost(&mut self) {
        for layer in &mut self.stack {
            layer.screen.device_lost();
        }
    }

    /// Ask every screen to rebuild its views.
    pub fn recreate_views(&mut self) {
        for layer in &mut self.stack {
            layer.screen.recreate_views();
        }
    }

    /// Drop every screen and any staged switch.
    pub fn shutdown(&mut self) {
        self.stack.clear();
        self.next_screen = None;
        self.finished_dialog = None;
    }

    fn alloc_id(&mut self) -> ScreenId {
        self.next_id += 1;
        ScreenId(self.next_id)
    }

    fn switch_to_next(&mut self) {
        let Some(screen) = self.next_screen.take() else {
            return;
        };
        // The old top is dropped, not stacked.
        self.stack.pop();
        self.push_layer(screen, LayerFlags::OPAQUE);
    }

    /// Run `f` against the top screen and apply whatever it requested.
    fn dispatch_top(&mut self, f: impl FnOnce(&mut dyn Screen, &mut ScreenCx)) {
        let Some(layer) = self.stack.last_mut() else {
            return;
        };
        let issuer = layer.id;
        let mut cx = ScreenCx::default();
        f(&mut *layer.screen, &mut cx);
        self.apply_requests(cx, issuer);
    }

    fn apply_requests(&mut self, cx: ScreenCx, issuer: ScreenId) {
        for request in cx.requests {
            match request {
                ScreenRequest::Switch(screen) => self.switch_screen(screen),
                ScreenRequest::Push(screen, flags) => self.push_layer(screen, flags),
                ScreenRequest::Pop => self.pop(),
                ScreenRequest::FinishDialog(result) => self.finish_dialog(issuer, result),
            }
        }
    }

    /// Record that the layer `id` finished as a dialog. Only the top screen
    /// may finish; removal and the caller notification wait until after the
    /// next render.
    fn finish_dialog(&mut self, id: ScreenId, result: DialogResult) {
        if self.stack.last().map(|l| l.id) != Some(id) {
            warn!(?id, "finish_dialog: issuer is not the top screen, ignoring");
            return;
        }
        if let Some((pending, _)) = self.finished_dialog {
            warn!(?pending, "finish_dialog: a dialog is already finishing; ignoring");
            return;
        }
        self.finished_dialog = Some((id, result));
    }

    fn process_finished_dialog(&mut self) {
        let Some((id, result)) = self.finished_dialog.take() else {
            return;
        };
        // The stack may have shifted since the dialog finished; locate it
        // by identity rather than assuming it is still on top.
        let Some(pos) = self.stack.iter().position(|l| l.id == id) else {
            warn!(?id, "finished dialog vanished from the stack");
            return;
        };
        let layer = self.stack.remove(pos);
        debug!(?id, ?result, "dialog finished");

        // Notify the caller beneath, but only when it is now the top;
        // otherwise the result would arrive at a screen that cannot react.
        if pos == self.stack.len()
            && let Some(top) = self.stack.last_mut()
        {
            top.screen.dialog_finished(layer.screen.as_ref(), result);
        }
    }
}
