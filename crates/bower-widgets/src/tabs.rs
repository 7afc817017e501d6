//! Tabbed container: a [`ChoiceStrip`] tab bar plus one content view per
//! tab, with only the current tab's content visible.

use bower_core::layout::LinearLayout;
use bower_core::{
    AxisInput, DrawContext, Error, EventCx, EventKind, FocusState, InputState, KeyInput,
    LayoutParams, MeasureSpec, Result, SizeReq, TouchInput, UiContext, View, ViewGroup, ViewId,
    ViewState, Visibility,
};
use geom::Orientation;
use tracing::trace;

use crate::strip::ChoiceStrip;

/// A tab bar with swappable content panes. `orientation` is the tab bar's
/// axis; the bar and the content stack along the opposite axis.
pub struct TabHolder {
    holder: LinearLayout,
    strip_id: ViewId,
    tab_ids: Vec<ViewId>,
    current: usize,
}

impl TabHolder {
    /// An empty holder. `strip_size` is the tab bar's width when the bar is
    /// vertical; horizontal bars fill the holder and mark tabs with an
    /// underline.
    pub fn new(orientation: Orientation, strip_size: f32, params: LayoutParams) -> Self {
        let mut holder = LinearLayout::new(orientation.opposite(), params);
        holder.set_spacing(0.0);
        let strip = match orientation {
            Orientation::Horizontal => {
                let mut strip = ChoiceStrip::new(
                    orientation,
                    LayoutParams::linear(SizeReq::FillParent, SizeReq::WrapContent, 0.0),
                );
                strip.set_top_tabs(true);
                strip
            }
            Orientation::Vertical => ChoiceStrip::new(
                orientation,
                LayoutParams::linear(SizeReq::Exact(strip_size), SizeReq::WrapContent, 0.0),
            ),
        };
        let strip_id = holder.add_view(strip);
        Self {
            holder,
            strip_id,
            tab_ids: Vec::new(),
            current: 0,
        }
    }

    /// Append a tab. The content takes the space left by the tab bar; every
    /// tab but the first starts hidden.
    pub fn add_tab(&mut self, title: impl Into<String>, mut content: Box<dyn View>) {
        content.replace_params(LayoutParams::linear(
            SizeReq::FillParent,
            SizeReq::FillParent,
            1.0,
        ));
        if !self.tab_ids.is_empty() {
            content.state_mut().visibility = Visibility::Gone;
        }
        let id = self.holder.add(content);
        self.tab_ids.push(id);
        if let Some(strip) = self.strip_mut() {
            strip.add_choice(title);
        }
    }

    /// The shown tab's index.
    pub fn current_tab(&self) -> usize {
        self.current
    }

    /// Number of tabs.
    pub fn num_tabs(&self) -> usize {
        self.tab_ids.len()
    }

    /// Show tab `index` and hide the rest.
    pub fn set_current_tab(&mut self, index: usize) -> Result<()> {
        if index >= self.tab_ids.len() {
            return Err(Error::Invalid(format!(
                "tab index {index} out of range ({} tabs)",
                self.tab_ids.len()
            )));
        }
        for (i, id) in self.tab_ids.iter().enumerate() {
            if let Some(view) = self
                .holder
                .group_mut()
                .views_mut()
                .iter_mut()
                .find(|v| v.state().id == *id)
            {
                view.state_mut().visibility = if i == index {
                    Visibility::Visible
                } else {
                    Visibility::Gone
                };
            }
        }
        self.current = index;
        if let Some(strip) = self.strip_mut() {
            strip.set_selection(index);
        }
        trace!(index, "switched tab");
        Ok(())
    }

    fn strip_mut(&mut self) -> Option<&mut ChoiceStrip> {
        let strip_id = self.strip_id;
        self.holder
            .group_mut()
            .views_mut()
            .iter_mut()
            .find(|v| v.state().id == strip_id)
            .and_then(|v| v.as_any_mut().downcast_mut::<ChoiceStrip>())
    }

    /// React to tab-bar selections emitted since `mark`.
    fn consume_choices(&mut self, mark: usize, cx: &mut EventCx) {
        let strip_id = self.strip_id;
        let choices = cx
            .events
            .take_since(mark, |e| {
                e.source == strip_id && matches!(e.kind, EventKind::Choice(_))
            });
        for choice in choices {
            if let EventKind::Choice(index) = choice.kind {
                // The index came from the strip, so it is always in range.
                let _ = self.set_current_tab(index);
            }
        }
    }
}

impl View for TabHolder {
    fn state(&self) -> &ViewState {
        self.holder.state()
    }

    fn state_mut(&mut self) -> &mut ViewState {
        self.holder.state_mut()
    }

    fn measure(&mut self, dc: &dyn DrawContext, horiz: MeasureSpec, vert: MeasureSpec) {
        self.holder.measure(dc, horiz, vert);
    }

    fn layout(&mut self) {
        self.holder.layout();
    }

    fn update(&mut self, input: &InputState) {
        self.holder.update(input);
    }

    fn draw(&mut self, ui: &mut UiContext) {
        self.holder.draw(ui);
    }

    fn touch(&mut self, touch: &TouchInput, cx: &mut EventCx) {
        let mark = cx.events.mark();
        self.holder.touch(touch, cx);
        self.consume_choices(mark, cx);
    }

    fn key(&mut self, key: &KeyInput, cx: &mut EventCx) {
        let mark = cx.events.mark();
        self.holder.key(key, cx);
        self.consume_choices(mark, cx);
    }

    fn axis(&mut self, axis: &AxisInput, cx: &mut EventCx) {
        self.holder.axis(axis, cx);
    }

    fn focus_first(&mut self, focus: &mut FocusState) -> bool {
        self.holder.focus_first(focus)
    }

    fn subview_focused(&mut self, id: ViewId) -> bool {
        self.holder.subview_focused(id)
    }

    fn as_container(&self) -> Option<&ViewGroup> {
        self.holder.as_container()
    }

    fn as_container_mut(&mut self) -> Option<&mut ViewGroup> {
        self.holder.as_container_mut()
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
