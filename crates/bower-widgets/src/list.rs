//! Scrollable item lists driven by an adaptor, in the classic
//! adapter-view style: the adaptor owns the data and the selection, the
//! list view builds one row per item and rebuilds them when the selection
//! moves.

use bower_core::layout::LinearLayout;
use bower_core::{
    AxisInput, DrawContext, EventCx, EventKind, FocusState, InputState, KeyInput, LayoutParams,
    MeasureSpec, ScrollView, SizeReq, TouchInput, UiContext, View, ViewGroup, ViewId, ViewState,
};
use geom::Orientation;
use tracing::trace;

use crate::base::Choice;

/// Data source for a [`ListView`]. Creates one row view per item and tracks
/// which item, if any, is the current selection.
pub trait ListAdaptor {
    /// Number of items.
    fn num_items(&self) -> usize;
    /// Build the row view for `index`.
    fn create_item_view(&self, index: usize) -> Box<dyn View>;
    /// Display title for `index`.
    fn title(&self, index: usize) -> String;
    /// Record `index` as the selection. Adaptors without a selection ignore
    /// this.
    fn set_selected(&mut self, _index: usize) {}
    /// The selected index, if the adaptor tracks one.
    fn selected(&self) -> Option<usize> {
        None
    }
}

/// The simplest adaptor: a vector of strings, rendered as [`Choice`] rows,
/// with the selected row highlighted.
pub struct StringVectorAdaptor {
    items: Vec<String>,
    selected: Option<usize>,
}

impl StringVectorAdaptor {
    /// An adaptor over `items` with an optional initial selection.
    pub fn new(items: Vec<String>, selected: Option<usize>) -> Self {
        Self { items, selected }
    }
}

impl ListAdaptor for StringVectorAdaptor {
    fn num_items(&self) -> usize {
        self.items.len()
    }

    fn create_item_view(&self, index: usize) -> Box<dyn View> {
        let mut choice = Choice::new(self.items[index].clone());
        choice.set_highlighted(self.selected == Some(index));
        Box::new(choice)
    }

    fn title(&self, index: usize) -> String {
        self.items[index].clone()
    }

    fn set_selected(&mut self, index: usize) {
        if index < self.items.len() {
            self.selected = Some(index);
        }
    }

    fn selected(&self) -> Option<usize> {
        self.selected
    }
}

/// A vertical scrolling list of adaptor-built rows. Clicking a row updates
/// the adaptor's selection, rebuilds the rows, and emits
/// [`EventKind::Choice`] with the row's index under the list's own id.
pub struct ListView {
    scroll: ScrollView,
    adaptor: Box<dyn ListAdaptor>,
    item_ids: Vec<ViewId>,
}

impl ListView {
    /// A list over `adaptor`.
    pub fn new(adaptor: Box<dyn ListAdaptor>, params: LayoutParams) -> Self {
        let mut list = Self {
            scroll: ScrollView::new(Orientation::Vertical, params),
            adaptor,
            item_ids: Vec::new(),
        };
        list.create_all_items(None);
        list
    }

    /// The adaptor's selection.
    pub fn selected(&self) -> Option<usize> {
        self.adaptor.selected()
    }

    /// Number of rows.
    pub fn num_items(&self) -> usize {
        self.adaptor.num_items()
    }

    /// Throw away every row and rebuild from the adaptor. Call after
    /// mutating the underlying data.
    pub fn regenerate(&mut self) {
        self.create_all_items(None);
    }

    /// Rebuild all rows. When `focus` is given and focus sat on one of the
    /// old rows, it is restored to the replacement row at the same index.
    fn create_all_items(&mut self, focus: Option<&mut FocusState>) {
        let focused_index = focus
            .as_ref()
            .and_then(|f| f.focused())
            .and_then(|id| self.item_ids.iter().position(|item| *item == id));

        let mut column = LinearLayout::vertical(LayoutParams::linear(
            SizeReq::FillParent,
            SizeReq::WrapContent,
            0.0,
        ));
        column.set_spacing(0.0);
        self.item_ids.clear();
        for index in 0..self.adaptor.num_items() {
            let id = column.add(self.adaptor.create_item_view(index));
            self.item_ids.push(id);
        }
        self.scroll.set_content(Box::new(column));

        if let Some(focus) = focus
            && let Some(index) = focused_index
            && let Some(id) = self.item_ids.get(index)
        {
            focus.set_focused(*id);
        }
    }

    /// Consume row clicks emitted since `mark`: move the adaptor's
    /// selection, rebuild, and publish the index under the list's id.
    fn consume_clicks(&mut self, mark: usize, cx: &mut EventCx) {
        let item_ids = self.item_ids.clone();
        let clicks = cx.events.take_since(mark, |e| {
            e.kind == EventKind::Click && item_ids.contains(&e.source)
        });
        for click in clicks {
            if let Some(index) = item_ids.iter().position(|id| *id == click.source) {
                self.adaptor.set_selected(index);
                self.create_all_items(Some(&mut *cx.focus));
                trace!(index, "list item chosen");
                cx.events
                    .push(self.scroll.state().id, EventKind::Choice(index));
            }
        }
    }
}

impl View for ListView {
    fn state(&self) -> &ViewState {
        self.scroll.state()
    }

    fn state_mut(&mut self) -> &mut ViewState {
        self.scroll.state_mut()
    }

    fn measure(&mut self, dc: &dyn DrawContext, horiz: MeasureSpec, vert: MeasureSpec) {
        self.scroll.measure(dc, horiz, vert);
    }

    fn layout(&mut self) {
        self.scroll.layout();
    }

    fn update(&mut self, input: &InputState) {
        self.scroll.update(input);
    }

    fn draw(&mut self, ui: &mut UiContext) {
        self.scroll.draw(ui);
    }

    fn touch(&mut self, touch: &TouchInput, cx: &mut EventCx) {
        let mark = cx.events.mark();
        self.scroll.touch(touch, cx);
        self.consume_clicks(mark, cx);
    }

    fn key(&mut self, key: &KeyInput, cx: &mut EventCx) {
        let mark = cx.events.mark();
        self.scroll.key(key, cx);
        self.consume_clicks(mark, cx);
    }

    fn axis(&mut self, axis: &AxisInput, cx: &mut EventCx) {
        self.scroll.axis(axis, cx);
    }

    fn focus_first(&mut self, focus: &mut FocusState) -> bool {
        self.scroll.focus_first(focus)
    }

    fn subview_focused(&mut self, id: ViewId) -> bool {
        self.scroll.subview_focused(id)
    }

    fn as_container(&self) -> Option<&ViewGroup> {
        self.scroll.as_container()
    }

    fn as_container_mut(&mut self) -> Option<&mut ViewGroup> {
        self.scroll.as_container_mut()
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
    use geom::Bounds;

    use super::*;

    fn string_list(items: &[&str]) -> ListView {
        let adaptor = StringVectorAdaptor::new(
            items.iter().map(|s| (*s).to_owned()).collect(),
            None,
        );
        ListView::new(Box::new(adaptor), LayoutParams::default())
    }

    fn lay_out(list: &mut ListView, w: f32, h: f32) {
        let dc = TestDraw::new();
        list.measure(&dc, MeasureSpec::exactly(w), MeasureSpec::exactly(h));
        list.state_mut().bounds = Bounds::new(0.0, 0.0, w, h);
        list.layout();
    }

    fn row_bounds(list: &ListView, index: usize) -> Bounds {
        let id = list.item_ids[index];
        list.scroll
            .group()
            .views()
            .first()
            .and_then(|column| column.as_container())
            .and_then(|column| column.bounds_of(id))
            .unwrap()
    }

    fn tap(list: &mut ListView, focus: &mut FocusState, events: &mut EventQueue, x: f32, y: f32) {
        for flags in [TouchFlags::Down, TouchFlags::Up] {
            let mut cx = EventCx { focus, events };
            list.touch(&TouchInput::primary(x, y, flags), &mut cx);
        }
    }

    #[test]
    fn clicking_a_row_selects_it_and_fires_its_index() {
        let mut list = string_list(&["alpha", "beta", "gamma"]);
        lay_out(&mut list, 400.0, 400.0);
        let mut focus = FocusState::new();
        let mut events = EventQueue::new();

        let row = row_bounds(&list, 1);
        tap(&mut list, &mut focus, &mut events, row.center_x(), row.center_y());

        assert_eq!(list.selected(), Some(1));
        let fired = events.drain();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].source, list.state().id);
        assert_eq!(fired[0].kind, EventKind::Choice(1));
    }

    #[test]
    fn rows_are_rebuilt_after_a_click() {
        let mut list = string_list(&["alpha", "beta"]);
        lay_out(&mut list, 400.0, 400.0);
        let old_ids = list.item_ids.clone();
        let mut focus = FocusState::new();
        let mut events = EventQueue::new();

        let row = row_bounds(&list, 0);
        tap(&mut list, &mut focus, &mut events, row.center_x(), row.center_y());

        assert_eq!(list.item_ids.len(), old_ids.len());
        assert!(list.item_ids.iter().all(|id| !old_ids.contains(id)));
    }

    #[test]
    fn focus_survives_regeneration_at_the_same_index() {
        let mut list = string_list(&["alpha", "beta", "gamma"]);
        lay_out(&mut list, 400.0, 400.0);
        let mut focus = FocusState::new();
        focus.set_focused(list.item_ids[2]);
        let mut events = EventQueue::new();

        let row = row_bounds(&list, 2);
        tap(&mut list, &mut focus, &mut events, row.center_x(), row.center_y());

        assert_eq!(focus.focused(), Some(list.item_ids[2]));
    }

    #[test]
    fn selection_is_capped_to_the_item_count() {
        let mut adaptor = StringVectorAdaptor::new(vec!["only".to_owned()], None);
        adaptor.set_selected(5);
        assert_eq!(adaptor.selected(), None);
        adaptor.set_selected(0);
        assert_eq!(adaptor.selected(), Some(0));
    }
}
