//! Test doubles: a recording draw context and an instrumented leaf view.
//!
//! Compiled into unit tests and, behind the `testing` feature, exported for
//! dependent crates' tests.

use std::{cell::Cell, rc::Rc};

use geom::Bounds;

use crate::{
    draw::{DrawContext, Drawable, Theme, UiContext},
    event::{AxisInput, EventCx, InputState, KeyInput, TouchInput},
    group::{ViewGroup, container_delegates},
    view::{LayoutParams, MeasureSpec, SizePair, View, ViewState, measure_by_spec},
};

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// A rectangle fill.
    Fill(Drawable, Bounds),
    /// A text run.
    Text(String, Bounds),
    /// Drop-shadow chrome.
    Shadow(Bounds),
    /// A scissor push.
    PushScissor(Bounds),
    /// A scissor pop.
    PopScissor,
}

/// A [`DrawContext`] that records every call instead of rasterizing.
pub struct TestDraw {
    ops: Vec<DrawOp>,
    scissors: Vec<Bounds>,
    screen: (f32, f32),
    theme: Theme,
}

impl TestDraw {
    /// A recorder with a 1280x720 screen and the default theme.
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            scissors: Vec::new(),
            screen: (1280.0, 720.0),
            theme: Theme::default(),
        }
    }

    /// Everything drawn so far, in call order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Forget recorded calls.
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }
}

impl Default for TestDraw {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawContext for TestDraw {
    fn begin(&mut self) {}

    fn end(&mut self) {}

    fn flush(&mut self) {}

    fn fill_rect(&mut self, drawable: Drawable, bounds: Bounds) {
        self.ops.push(DrawOp::Fill(drawable, bounds));
    }

    fn draw_drop_shadow(&mut self, bounds: Bounds) {
        self.ops.push(DrawOp::Shadow(bounds));
    }

    fn draw_text(&mut self, text: &str, bounds: Bounds, _color: u32) {
        self.ops.push(DrawOp::Text(text.to_owned(), bounds));
    }

    fn push_scissor(&mut self, bounds: Bounds) {
        self.scissors.push(bounds);
        self.ops.push(DrawOp::PushScissor(bounds));
    }

    fn pop_scissor(&mut self) {
        self.scissors.pop();
        self.ops.push(DrawOp::PopScissor);
    }

    fn scissor_bounds(&self) -> Bounds {
        self.scissors
            .last()
            .copied()
            .unwrap_or(Bounds::new(0.0, 0.0, self.screen.0, self.screen.1))
    }

    fn measure_text(&self, text: &str) -> (f32, f32) {
        // Fixed-pitch stand-in metrics.
        (text.chars().count() as f32 * 10.0, 20.0)
    }

    fn screen_size(&self) -> (f32, f32) {
        self.screen
    }

    fn theme(&self) -> &Theme {
        &self.theme
    }
}

/// Shared drop counter handed out by [`Block::drop_counter`].
#[derive(Debug, Clone, Default)]
pub struct DropCounter(Rc<Cell<usize>>);

impl DropCounter {
    /// How many owners have been dropped.
    pub fn get(&self) -> usize {
        self.0.get()
    }
}

/// Instrumented leaf view: reports a fixed preferred size and counts every
/// call it receives.
pub struct Block {
    state: ViewState,
    preferred: (f32, f32),
    focusable: bool,
    updates: Cell<u32>,
    touches: Cell<u32>,
    keys: Cell<u32>,
    axes: Cell<u32>,
    draws: Cell<u32>,
    drops: DropCounter,
}

impl Block {
    fn build(params: LayoutParams, preferred: (f32, f32), focusable: bool) -> Self {
        Self {
            state: ViewState::new(params),
            preferred,
            focusable,
            updates: Cell::new(0),
            touches: Cell::new(0),
            keys: Cell::new(0),
            axes: Cell::new(0),
            draws: Cell::new(0),
            drops: DropCounter::default(),
        }
    }

    /// A non-focusable block with the given preferred size.
    pub fn sized(w: f32, h: f32) -> Self {
        Self::build(LayoutParams::default(), (w, h), false)
    }

    /// A focusable block with the given preferred size.
    pub fn focusable(w: f32, h: f32) -> Self {
        Self::build(LayoutParams::default(), (w, h), true)
    }

    /// A focusable block with its bounds pre-assigned, for tests that skip
    /// the layout pass.
    pub fn focusable_at(bounds: Bounds) -> Self {
        let mut block = Self::focusable(bounds.w, bounds.h);
        block.state.bounds = bounds;
        block
    }

    /// A zero-sized block carrying specific layout params.
    pub fn with_params(params: LayoutParams) -> Self {
        Self::build(params, (0.0, 0.0), false)
    }

    /// A handle that observes this block's drop.
    pub fn drop_counter(&self) -> DropCounter {
        self.drops.clone()
    }

    /// Update calls received.
    pub fn updates(&self) -> u32 {
        self.updates.get()
    }

    /// Touch events received.
    pub fn touches(&self) -> u32 {
        self.touches.get()
    }

    /// Key events received.
    pub fn keys(&self) -> u32 {
        self.keys.get()
    }

    /// Axis events received.
    pub fn axes(&self) -> u32 {
        self.axes.get()
    }

    /// Draw calls received.
    pub fn draws(&self) -> u32 {
        self.draws.get()
    }
}

impl Drop for Block {
    fn drop(&mut self) {
        self.drops.0.set(self.drops.0.get() + 1);
    }
}

impl View for Block {
    fn state(&self) -> &ViewState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ViewState {
        &mut self.state
    }

    fn measure(&mut self, _dc: &dyn DrawContext, horiz: MeasureSpec, vert: MeasureSpec) {
        let SizePair { w, h } = self.state.params.size();
        self.state.measured_w = measure_by_spec(w, self.preferred.0, horiz);
        self.state.measured_h = measure_by_spec(h, self.preferred.1, vert);
    }

    fn update(&mut self, _input: &InputState) {
        self.updates.set(self.updates.get() + 1);
    }

    fn draw(&mut self, _ui: &mut UiContext) {
        self.draws.set(self.draws.get() + 1);
    }

    fn touch(&mut self, _touch: &TouchInput, _cx: &mut EventCx) {
        self.touches.set(self.touches.get() + 1);
    }

    fn key(&mut self, _key: &KeyInput, _cx: &mut EventCx) {
        self.keys.set(self.keys.get() + 1);
    }

    fn axis(&mut self, _axis: &AxisInput, _cx: &mut EventCx) {
        self.axes.set(self.axes.get() + 1);
    }

    fn can_be_focused(&self) -> bool {
        self.focusable
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

/// Bare container for tests that need a view-typed root around a
/// [`ViewGroup`]. Measures like a frame; never positions children.
pub struct Holder {
    group: ViewGroup,
}

impl Holder {
    /// Wrap an existing group.
    pub fn new(group: ViewGroup) -> Self {
        Self { group }
    }

    /// The wrapped group.
    pub fn group_mut(&mut self) -> &mut ViewGroup {
        &mut self.group
    }
}

impl View for Holder {
    fn measure(&mut self, dc: &dyn DrawContext, horiz: MeasureSpec, vert: MeasureSpec) {
        for view in self.group.views_mut() {
            view.measure(dc, horiz, vert);
        }
        let size = self.group.state().params.size();
        let state = self.group.state_mut();
        state.measured_w = measure_by_spec(size.w, 0.0, horiz);
        state.measured_h = measure_by_spec(size.h, 0.0, vert);
    }

    container_delegates!();
}
