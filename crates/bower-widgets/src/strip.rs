//! A row (or column) of mutually-exclusive latching choices, used standalone
//! as a segmented selector and by [`crate::tabs::TabHolder`] as its tab bar.

use bower_core::layout::LinearLayout;
use bower_core::{
    AxisInput, DrawContext, EventCx, EventKind, FocusState, InputState, Key, KeyInput,
    LayoutParams, MeasureSpec, TouchInput, UiContext, View, ViewGroup, ViewId, ViewState,
};
use geom::{Bounds, Orientation};

use crate::base::StickyChoice;

/// Height of the tab underline bar.
const UNDERLINE: f32 = 4.0;

/// A strip of [`StickyChoice`] items where exactly one is latched at a time.
/// Emits [`EventKind::Choice`] under the strip's own id whenever the
/// selection moves, by tap, Enter, or, on tab bars, the shoulder buttons.
pub struct ChoiceStrip {
    strip: LinearLayout,
    selection: usize,
    top_tabs: bool,
}

impl ChoiceStrip {
    /// An empty strip laid out along `orientation`.
    pub fn new(orientation: Orientation, params: LayoutParams) -> Self {
        let mut strip = LinearLayout::new(orientation, params);
        strip.set_spacing(0.0);
        Self {
            strip,
            selection: 0,
            top_tabs: false,
        }
    }

    /// Draw the strip as a tab bar, with an underline marker.
    pub fn set_top_tabs(&mut self, on: bool) {
        self.top_tabs = on;
    }

    /// Append a choice. The first choice added starts latched.
    pub fn add_choice(&mut self, text: impl Into<String>) -> usize {
        let index = self.strip.group().len();
        let mut choice = StickyChoice::new(text);
        if index == self.selection {
            choice.press();
        }
        self.strip.add_view(choice);
        index
    }

    /// The latched index.
    pub fn selection(&self) -> usize {
        self.selection
    }

    /// Number of choices.
    pub fn len(&self) -> usize {
        self.strip.group().len()
    }

    /// True when the strip has no choices.
    pub fn is_empty(&self) -> bool {
        self.strip.group().is_empty()
    }

    /// Latch `index`, releasing whatever was latched before. Out-of-range
    /// indices are ignored.
    pub fn set_selection(&mut self, index: usize) {
        if index >= self.strip.group().len() {
            return;
        }
        self.selection = index;
        for (i, view) in self.strip.group_mut().views_mut().iter_mut().enumerate() {
            if let Some(choice) = view.as_any_mut().downcast_mut::<StickyChoice>() {
                if i == index {
                    choice.press();
                } else {
                    choice.release();
                }
            }
        }
    }

    /// Consume child clicks emitted since `mark`, re-latching and publishing
    /// the new selection under the strip's id.
    fn consume_clicks(&mut self, mark: usize, cx: &mut EventCx) {
        let child_ids = self.strip.group().child_ids();
        let clicks = cx.events.take_since(mark, |e| {
            e.kind == EventKind::Click && child_ids.contains(&e.source)
        });
        for click in clicks {
            if let Some(index) = child_ids.iter().position(|id| *id == click.source) {
                self.set_selection(index);
                cx.events
                    .push(self.strip.state().id, EventKind::Choice(index));
            }
        }
    }

    /// Move the selection by `delta` choices, clamped to the ends.
    fn step_selection(&mut self, delta: isize, cx: &mut EventCx) {
        let len = self.strip.group().len();
        if len == 0 {
            return;
        }
        let next = self
            .selection
            .saturating_add_signed(delta)
            .min(len - 1);
        if next != self.selection {
            self.set_selection(next);
            cx.events
                .push(self.strip.state().id, EventKind::Choice(next));
        }
    }
}

impl View for ChoiceStrip {
    fn state(&self) -> &ViewState {
        self.strip.state()
    }

    fn state_mut(&mut self) -> &mut ViewState {
        self.strip.state_mut()
    }

    fn measure(&mut self, dc: &dyn DrawContext, horiz: MeasureSpec, vert: MeasureSpec) {
        self.strip.measure(dc, horiz, vert);
    }

    fn layout(&mut self) {
        self.strip.layout();
    }

    fn update(&mut self, input: &InputState) {
        self.strip.update(input);
    }

    fn draw(&mut self, ui: &mut UiContext) {
        self.strip.draw(ui);
        if self.top_tabs {
            let color = ui.dc.theme().item_down;
            let bounds = self.strip.state().bounds;
            let bar = Bounds::new(bounds.x, bounds.y2() - UNDERLINE, bounds.w, UNDERLINE);
            ui.dc.fill_rect(color, bar);
        }
    }

    fn touch(&mut self, touch: &TouchInput, cx: &mut EventCx) {
        let mark = cx.events.mark();
        self.strip.touch(touch, cx);
        self.consume_clicks(mark, cx);
    }

    fn key(&mut self, key: &KeyInput, cx: &mut EventCx) {
        // The shoulder buttons steer tab bars only.
        if key.down && self.top_tabs {
            match key.key {
                Key::ShoulderLeft => {
                    self.step_selection(-1, cx);
                    return;
                }
                Key::ShoulderRight => {
                    self.step_selection(1, cx);
                    return;
                }
                _ => {}
            }
        }
        let mark = cx.events.mark();
        self.strip.key(key, cx);
        self.consume_clicks(mark, cx);
    }

    fn axis(&mut self, axis: &AxisInput, cx: &mut EventCx) {
        self.strip.axis(axis, cx);
    }

    fn focus_first(&mut self, focus: &mut FocusState) -> bool {
        self.strip.focus_first(focus)
    }

    fn subview_focused(&mut self, id: ViewId) -> bool {
        self.strip.subview_focused(id)
    }

    fn as_container(&self) -> Option<&ViewGroup> {
        self.strip.as_container()
    }

    fn as_container_mut(&mut self) -> Option<&mut ViewGroup> {
        self.strip.as_container_mut()
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use bower_core::{EventQueue, TouchFlags, testing::TestDraw};

    use super::*;

    fn strip_with(n: usize) -> ChoiceStrip {
        let mut strip = ChoiceStrip::new(Orientation::Horizontal, LayoutParams::default());
        for i in 0..n {
            strip.add_choice(format!("tab {i}"));
        }
        strip
    }

    fn lay_out(strip: &mut ChoiceStrip, w: f32, h: f32) {
        let dc = TestDraw::new();
        strip.measure(&dc, MeasureSpec::exactly(w), MeasureSpec::exactly(h));
        strip.state_mut().bounds = Bounds::new(0.0, 0.0, w, h);
        strip.layout();
    }

    fn pressed_flags(strip: &ChoiceStrip) -> Vec<bool> {
        strip
            .strip
            .group()
            .views()
            .iter()
            .map(|v| {
                v.as_any()
                    .downcast_ref::<StickyChoice>()
                    .is_some_and(StickyChoice::is_pressed)
            })
            .collect()
    }

    #[test]
    fn exactly_one_choice_is_latched() {
        let mut strip = strip_with(3);
        assert_eq!(pressed_flags(&strip), [true, false, false]);

        strip.set_selection(2);
        assert_eq!(pressed_flags(&strip), [false, false, true]);
        assert_eq!(strip.selection(), 2);
    }

    #[test]
    fn tapping_a_choice_emits_its_index() {
        let mut strip = strip_with(3);
        lay_out(&mut strip, 300.0, 60.0);
        let mut focus = FocusState::new();
        let mut events = EventQueue::new();

        // Each child wraps its own text; the second starts past the first.
        let second = strip.strip.group().views()[1].state().bounds;
        let mut cx = EventCx {
            focus: &mut focus,
            events: &mut events,
        };
        strip.touch(
            &TouchInput::primary(second.center_x(), second.center_y(), TouchFlags::Down),
            &mut cx,
        );

        let fired = events.drain();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].source, strip.state().id);
        assert_eq!(fired[0].kind, EventKind::Choice(1));
        assert_eq!(pressed_flags(&strip), [false, true, false]);
    }

    #[test]
    fn shoulder_keys_step_a_tab_bar_selection() {
        let mut strip = strip_with(3);
        strip.set_top_tabs(true);
        let mut focus = FocusState::new();
        let mut events = EventQueue::new();

        let mut cx = EventCx {
            focus: &mut focus,
            events: &mut events,
        };
        strip.key(&KeyInput::down(Key::ShoulderRight), &mut cx);
        assert_eq!(strip.selection(), 1);

        let mut cx = EventCx {
            focus: &mut focus,
            events: &mut events,
        };
        strip.key(&KeyInput::down(Key::ShoulderLeft), &mut cx);
        assert_eq!(strip.selection(), 0);

        // At the left end the selection stays put and nothing fires.
        let before = events.drain().len();
        assert_eq!(before, 2);
        let mut cx = EventCx {
            focus: &mut focus,
            events: &mut events,
        };
        strip.key(&KeyInput::down(Key::ShoulderLeft), &mut cx);
        assert_eq!(strip.selection(), 0);
        assert!(events.is_empty());
    }

    #[test]
    fn shoulder_keys_ignore_plain_strips() {
        let mut strip = strip_with(3);
        let mut focus = FocusState::new();
        let mut events = EventQueue::new();

        let mut cx = EventCx {
            focus: &mut focus,
            events: &mut events,
        };
        strip.key(&KeyInput::down(Key::ShoulderRight), &mut cx);
        assert_eq!(strip.selection(), 0);
        assert!(events.is_empty());
    }
}
