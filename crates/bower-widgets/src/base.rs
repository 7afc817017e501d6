//! Leaf widgets: text, spacers, and the clickable items everything else is
//! assembled from.

use bower_core::{
    DrawContext, EventCx, EventKind, Key, KeyInput, LayoutParams, MeasureSpec, SizeReq,
    TouchFlags, TouchInput, UiContext, View, ViewState, measure_by_spec,
};
use geom::Bounds;
use unicode_width::UnicodeWidthStr;

/// Horizontal padding inside clickable items.
const ITEM_PAD_X: f32 = 16.0;
/// Vertical padding inside clickable items.
const ITEM_PAD_Y: f32 = 8.0;

/// Truncate `text` to at most `max_cells` terminal-style display cells,
/// appending an ellipsis when anything was cut.
pub fn ellipsize(text: &str, max_cells: usize) -> String {
    if text.width() <= max_cells {
        return text.to_owned();
    }
    let keep = max_cells.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > keep {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

/// Tracks the pressed state of a clickable item across a touch sequence.
/// Reports a click only when the pointer both lands and lifts inside the
/// item's bounds.
#[derive(Debug, Default)]
struct ClickTracker {
    down: bool,
}

impl ClickTracker {
    fn touch(&mut self, bounds: Bounds, touch: &TouchInput) -> bool {
        let inside = bounds.contains(touch.x, touch.y);
        match touch.flags {
            TouchFlags::Down => {
                self.down = inside;
                false
            }
            TouchFlags::Move => {
                if !inside {
                    self.down = false;
                }
                false
            }
            TouchFlags::Up => {
                let clicked = self.down && inside;
                self.down = false;
                clicked
            }
        }
    }
}

/// Static text. Never focusable.
pub struct Label {
    state: ViewState,
    text: String,
}

impl Label {
    /// A label with default layout params.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_params(text, LayoutParams::default())
    }

    /// A label with explicit layout params.
    pub fn with_params(text: impl Into<String>, params: LayoutParams) -> Self {
        Self {
            state: ViewState::new(params),
            text: text.into(),
        }
    }

    /// The displayed text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the displayed text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl View for Label {
    fn state(&self) -> &ViewState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ViewState {
        &mut self.state
    }

    fn measure(&mut self, dc: &dyn DrawContext, horiz: MeasureSpec, vert: MeasureSpec) {
        let (w, h) = dc.measure_text(&self.text);
        let size = self.state.params.size();
        self.state.measured_w = measure_by_spec(size.w, w, horiz);
        self.state.measured_h = measure_by_spec(size.h, h, vert);
    }

    fn draw(&mut self, ui: &mut UiContext) {
        let color = ui.dc.theme().text;
        ui.dc.draw_text(&self.text, self.state.bounds, color);
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

/// Empty space of a fixed size.
pub struct Spacer {
    state: ViewState,
    size: f32,
}

impl Spacer {
    /// A square spacer.
    pub fn new(size: f32) -> Self {
        Self {
            state: ViewState::new(LayoutParams::default()),
            size,
        }
    }
}

impl View for Spacer {
    fn state(&self) -> &ViewState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ViewState {
        &mut self.state
    }

    fn measure(&mut self, _dc: &dyn DrawContext, horiz: MeasureSpec, vert: MeasureSpec) {
        let size = self.state.params.size();
        self.state.measured_w = measure_by_spec(size.w, self.size, horiz);
        self.state.measured_h = measure_by_spec(size.h, self.size, vert);
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

/// A focusable push button. Emits [`EventKind::Click`] when tapped or when
/// Enter is pressed while focused.
pub struct Button {
    state: ViewState,
    text: String,
    click: ClickTracker,
}

impl Button {
    /// A button with default layout params.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_params(text, LayoutParams::default())
    }

    /// A button with explicit layout params.
    pub fn with_params(text: impl Into<String>, params: LayoutParams) -> Self {
        Self {
            state: ViewState::new(params),
            text: text.into(),
            click: ClickTracker::default(),
        }
    }

    /// The button label.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl View for Button {
    fn state(&self) -> &ViewState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ViewState {
        &mut self.state
    }

    fn measure(&mut self, dc: &dyn DrawContext, horiz: MeasureSpec, vert: MeasureSpec) {
        let (w, h) = dc.measure_text(&self.text);
        let size = self.state.params.size();
        self.state.measured_w = measure_by_spec(size.w, w + ITEM_PAD_X * 2.0, horiz);
        self.state.measured_h = measure_by_spec(size.h, h + ITEM_PAD_Y * 2.0, vert);
    }

    fn draw(&mut self, ui: &mut UiContext) {
        let theme = *ui.dc.theme();
        let focused =
            ui.enabled && ui.focus.movement_enabled() && ui.focus.is_focused(self.state.id);
        let bg = if !self.state.enabled {
            theme.item_disabled
        } else if self.click.down && ui.enabled {
            theme.item_down
        } else if focused {
            theme.item_focus
        } else {
            theme.item
        };
        ui.dc.fill_rect(bg, self.state.bounds);
        ui.dc.draw_text(&self.text, self.state.bounds, theme.text);
    }

    fn touch(&mut self, touch: &TouchInput, cx: &mut EventCx) {
        if !self.state.enabled {
            return;
        }
        if self.click.touch(self.state.bounds, touch) {
            cx.events.push(self.state.id, EventKind::Click);
        }
    }

    fn key(&mut self, key: &KeyInput, cx: &mut EventCx) {
        if self.state.enabled
            && key.down
            && key.key == Key::Enter
            && cx.focus.is_focused(self.state.id)
        {
            cx.events.push(self.state.id, EventKind::Click);
        }
    }

    fn can_be_focused(&self) -> bool {
        true
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

/// A full-width clickable row, as used in lists and menus. An optional
/// `highlighted` flag draws it in the pressed style, marking the current
/// selection.
pub struct Choice {
    state: ViewState,
    text: String,
    highlighted: bool,
    click: ClickTracker,
}

impl Choice {
    /// An unhighlighted row with fill-parent width.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_params(
            text,
            LayoutParams::plain(
                SizeReq::FillParent,
                SizeReq::WrapContent,
            ),
        )
    }

    /// A row with explicit layout params.
    pub fn with_params(text: impl Into<String>, params: LayoutParams) -> Self {
        Self {
            state: ViewState::new(params),
            text: text.into(),
            highlighted: false,
            click: ClickTracker::default(),
        }
    }

    /// Draw this row in the selected style.
    pub fn set_highlighted(&mut self, on: bool) -> &mut Self {
        self.highlighted = on;
        self
    }

    /// The row text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl View for Choice {
    fn state(&self) -> &ViewState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ViewState {
        &mut self.state
    }

    fn measure(&mut self, dc: &dyn DrawContext, horiz: MeasureSpec, vert: MeasureSpec) {
        let (w, _) = dc.measure_text(&self.text);
        let size = self.state.params.size();
        let item_height = dc.theme().item_height;
        self.state.measured_w = measure_by_spec(size.w, w + ITEM_PAD_X * 2.0, horiz);
        self.state.measured_h = measure_by_spec(size.h, item_height, vert);
    }

    fn draw(&mut self, ui: &mut UiContext) {
        let theme = *ui.dc.theme();
        let focused =
            ui.enabled && ui.focus.movement_enabled() && ui.focus.is_focused(self.state.id);
        let bg = if !self.state.enabled {
            theme.item_disabled
        } else if (self.click.down && ui.enabled) || self.highlighted {
            theme.item_down
        } else if focused {
            theme.item_focus
        } else {
            theme.item
        };
        ui.dc.fill_rect(bg, self.state.bounds);
        // Keep long entries inside the row.
        let max_cells = ((self.state.bounds.w - ITEM_PAD_X * 2.0) / 10.0).max(0.0) as usize;
        let text = ellipsize(&self.text, max_cells);
        ui.dc.draw_text(&text, self.state.bounds, theme.text);
    }

    fn touch(&mut self, touch: &TouchInput, cx: &mut EventCx) {
        if !self.state.enabled {
            return;
        }
        if self.click.touch(self.state.bounds, touch) {
            cx.events.push(self.state.id, EventKind::Click);
        }
    }

    fn key(&mut self, key: &KeyInput, cx: &mut EventCx) {
        if self.state.enabled
            && key.down
            && key.key == Key::Enter
            && cx.focus.is_focused(self.state.id)
        {
            cx.events.push(self.state.id, EventKind::Click);
        }
    }

    fn can_be_focused(&self) -> bool {
        true
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

/// A latching choice: pressing it sticks until something releases it.
/// Emits [`EventKind::Click`] on every press attempt, already-pressed or
/// not; the owning strip uses the event to move its selection.
pub struct StickyChoice {
    state: ViewState,
    text: String,
    pressed: bool,
}

impl StickyChoice {
    /// An unpressed choice with wrap-content linear params.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            state: ViewState::new(LayoutParams::linear(
                SizeReq::WrapContent,
                SizeReq::WrapContent,
                0.0,
            )),
            text: text.into(),
            pressed: false,
        }
    }

    /// Latch this choice.
    pub fn press(&mut self) {
        self.pressed = true;
    }

    /// Unlatch this choice.
    pub fn release(&mut self) {
        self.pressed = false;
    }

    /// Is this choice latched?
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}

impl View for StickyChoice {
    fn state(&self) -> &ViewState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ViewState {
        &mut self.state
    }

    fn measure(&mut self, dc: &dyn DrawContext, horiz: MeasureSpec, vert: MeasureSpec) {
        let (w, h) = dc.measure_text(&self.text);
        let size = self.state.params.size();
        self.state.measured_w = measure_by_spec(size.w, w + ITEM_PAD_X * 2.0, horiz);
        self.state.measured_h = measure_by_spec(size.h, h + ITEM_PAD_Y * 2.0, vert);
    }

    fn draw(&mut self, ui: &mut UiContext) {
        let theme = *ui.dc.theme();
        let focused =
            ui.enabled && ui.focus.movement_enabled() && ui.focus.is_focused(self.state.id);
        let bg = if !self.state.enabled {
            theme.item_disabled
        } else if self.pressed {
            theme.item_down
        } else if focused {
            theme.item_focus
        } else {
            theme.item
        };
        ui.dc.fill_rect(bg, self.state.bounds);
        ui.dc.draw_text(&self.text, self.state.bounds, theme.text);
    }

    fn touch(&mut self, touch: &TouchInput, cx: &mut EventCx) {
        if !self.state.enabled {
            return;
        }
        if touch.flags == TouchFlags::Down && self.state.bounds.contains(touch.x, touch.y) {
            self.pressed = true;
            cx.events.push(self.state.id, EventKind::Click);
        }
    }

    fn key(&mut self, key: &KeyInput, cx: &mut EventCx) {
        if self.state.enabled
            && key.down
            && key.key == Key::Enter
            && cx.focus.is_focused(self.state.id)
        {
            self.pressed = true;
            cx.events.push(self.state.id, EventKind::Click);
        }
    }

    fn can_be_focused(&self) -> bool {
        true
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

/// Popup title bar: a label with an underline.
pub struct PopupHeader {
    state: ViewState,
    text: String,
}

impl PopupHeader {
    /// A header for the given title.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            state: ViewState::new(LayoutParams::plain(
                SizeReq::FillParent,
                SizeReq::WrapContent,
            )),
            text: text.into(),
        }
    }
}

impl View for PopupHeader {
    fn state(&self) -> &ViewState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ViewState {
        &mut self.state
    }

    fn measure(&mut self, dc: &dyn DrawContext, horiz: MeasureSpec, vert: MeasureSpec) {
        let (w, h) = dc.measure_text(&self.text);
        let size = self.state.params.size();
        self.state.measured_w = measure_by_spec(size.w, w + ITEM_PAD_X * 2.0, horiz);
        self.state.measured_h = measure_by_spec(size.h, h + ITEM_PAD_Y * 2.0, vert);
    }

    fn draw(&mut self, ui: &mut UiContext) {
        let theme = *ui.dc.theme();
        let bounds = self.state.bounds;
        ui.dc.draw_text(&self.text, bounds, theme.text);
        let underline = Bounds::new(bounds.x, bounds.y2() - 2.0, bounds.w, 2.0);
        ui.dc.fill_rect(theme.item_down, underline);
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
