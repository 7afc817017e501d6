//! Single-child scroll container: 1:1 dragging, inertial flings, and eased
//! programmatic scrolling, one axis at a time.

use geom::{Bounds, Orientation};
use tracing::trace;

use crate::{
    draw::{DrawContext, UiContext},
    event::{AxisInput, EventCx, InputState, Key, KeyInput, TouchFlags, TouchInput},
    focus::FocusState,
    group::ViewGroup,
    view::{LayoutParams, MeasureSpec, View, ViewId, ViewState, Visibility, measure_by_spec},
};

/// Per-tick decay applied to fling velocity.
const FRICTION: f32 = 0.92;
/// Flings slower than this stop outright.
const STOP_THRESHOLD: f32 = 0.1;
/// Scroll distance of one mouse-wheel notch.
const WHEEL_STEP: f32 = 250.0;
/// Overlap kept when paging, so context carries across the jump.
const PAGE_OVERLAP: f32 = 50.0;

/// Tracks one pointer drag along a single axis, estimating a per-frame
/// release velocity from the movement seen between update ticks.
#[derive(Debug, Default)]
struct DragTracker {
    active: bool,
    down_at: f32,
    last: f32,
    prev_frame: f32,
    velocity: f32,
}

impl DragTracker {
    fn begin(&mut self, pos: f32) {
        self.active = true;
        self.down_at = pos;
        self.last = pos;
        self.prev_frame = pos;
        self.velocity = 0.0;
    }

    fn moved(&mut self, pos: f32) {
        if self.active {
            self.last = pos;
        }
    }

    /// End the drag, yielding the velocity of the final frame.
    fn end(&mut self) -> f32 {
        self.active = false;
        self.velocity
    }

    /// Total axis distance travelled since the drag began.
    fn distance(&self) -> f32 {
        self.last - self.down_at
    }

    /// Once per frame: fold the movement since the previous frame into the
    /// velocity estimate.
    fn update_frame(&mut self) {
        if self.active {
            self.velocity = self.last - self.prev_frame;
            self.prev_frame = self.last;
        }
    }
}

/// Scrolls a single content child along one axis. While a drag is active the
/// content tracks the pointer exactly; on release the drag's velocity
/// becomes a fling that decays by [`FRICTION`] per tick. Programmatic
/// scrolls ease toward their target instead. The two modes are mutually
/// exclusive: starting either one cancels the other.
pub struct ScrollView {
    group: ViewGroup,
    orientation: Orientation,
    scroll_pos: f32,
    scroll_start: f32,
    scroll_target: f32,
    scroll_to_target: bool,
    inertia: f32,
    drag: DragTracker,
    last_view_size: f32,
    scroll_to_top_on_size_change: bool,
}

impl ScrollView {
    /// An empty scroll view along `orientation`.
    pub fn new(orientation: Orientation, params: LayoutParams) -> Self {
        Self {
            group: ViewGroup::new(params),
            orientation,
            scroll_pos: 0.0,
            scroll_start: 0.0,
            scroll_target: 0.0,
            scroll_to_target: false,
            inertia: 0.0,
            drag: DragTracker::default(),
            last_view_size: 0.0,
            scroll_to_top_on_size_change: false,
        }
    }

    /// A vertical scroll view, the common case.
    pub fn vertical(params: LayoutParams) -> Self {
        Self::new(Orientation::Vertical, params)
    }

    /// Replace the content child.
    pub fn set_content(&mut self, view: Box<dyn View>) -> ViewId {
        self.group.clear();
        self.group.add(view)
    }

    /// Reset to the top whenever the content's size changes.
    pub fn set_scroll_to_top_on_size_change(&mut self, on: bool) {
        self.scroll_to_top_on_size_change = on;
    }

    /// The current scroll offset.
    pub fn scroll_pos(&self) -> f32 {
        self.scroll_pos
    }

    /// Ease toward an absolute offset, clamped to the scrollable range.
    pub fn scroll_to(&mut self, pos: f32) {
        self.scroll_target = self.clamped(pos);
        self.scroll_to_target = true;
    }

    /// Ease by a relative distance.
    pub fn scroll_relative(&mut self, distance: f32) {
        self.scroll_to(self.scroll_pos + distance);
    }

    /// The child collection (one content child at most).
    pub fn group(&self) -> &ViewGroup {
        &self.group
    }

    /// The child collection, mutably.
    pub fn group_mut(&mut self) -> &mut ViewGroup {
        &mut self.group
    }

    /// Main-axis extent of the content, from its measured size.
    fn content_extent(&self) -> f32 {
        self.group
            .view_by_index(0)
            .map(|v| match self.orientation {
                Orientation::Horizontal => v.state().measured_w,
                Orientation::Vertical => v.state().measured_h,
            })
            .unwrap_or(0.0)
    }

    /// Main-axis extent of the viewport.
    fn viewport_extent(&self) -> f32 {
        match self.orientation {
            Orientation::Horizontal => self.group.state().bounds.w,
            Orientation::Vertical => self.group.state().bounds.h,
        }
    }

    fn scroll_max(&self) -> f32 {
        (self.content_extent() - self.viewport_extent()).max(0.0)
    }

    fn clamped(&self, pos: f32) -> f32 {
        pos.clamp(0.0, self.scroll_max())
    }

    fn can_scroll(&self) -> bool {
        self.content_extent() > self.viewport_extent()
    }

    fn axis_coord(&self, touch: &TouchInput) -> f32 {
        match self.orientation {
            Orientation::Horizontal => touch.x,
            Orientation::Vertical => touch.y,
        }
    }
}

impl View for ScrollView {
    fn measure(&mut self, dc: &dyn DrawContext, horiz: MeasureSpec, vert: MeasureSpec) {
        let size = self.group.state().params.size();
        let state = self.group.state_mut();
        state.measured_w = measure_by_spec(size.w, 0.0, horiz);
        state.measured_h = measure_by_spec(size.h, 0.0, vert);
        let (measured_w, measured_h) = (state.measured_w, state.measured_h);

        let orientation = self.orientation;
        if let Some(view) = self.group.view_by_index_mut(0) {
            // Constrain the cross axis; leave the scroll axis unbounded so
            // the content reports its full extent.
            match orientation {
                Orientation::Horizontal => view.measure(
                    dc,
                    MeasureSpec::unspecified(),
                    MeasureSpec::at_most(measured_h),
                ),
                Orientation::Vertical => view.measure(
                    dc,
                    MeasureSpec::at_most(measured_w),
                    MeasureSpec::unspecified(),
                ),
            }
        }
    }

    fn layout(&mut self) {
        let bounds = self.group.state().bounds;
        let orientation = self.orientation;

        let (content_w, content_h) = match self.group.view_by_index(0) {
            Some(view) => (view.state().measured_w, view.state().measured_h),
            None => return,
        };

        // New content size invalidates the old offset.
        let main = match orientation {
            Orientation::Horizontal => content_w,
            Orientation::Vertical => content_h,
        };
        if main != self.last_view_size {
            if orientation == Orientation::Horizontal || self.scroll_to_top_on_size_change {
                self.scroll_pos = 0.0;
                self.scroll_target = 0.0;
                self.scroll_to_target = false;
            }
            self.last_view_size = main;
        }

        let scroll_pos = self.scroll_pos;
        if let Some(view) = self.group.view_by_index_mut(0) {
            view.state_mut().bounds = match orientation {
                Orientation::Horizontal => {
                    Bounds::new(bounds.x - scroll_pos, bounds.y, content_w, content_h)
                }
                Orientation::Vertical => {
                    Bounds::new(bounds.x, bounds.y - scroll_pos, content_w, content_h)
                }
            };
            view.layout();
        }
    }

    fn update(&mut self, input: &InputState) {
        if self.group.state().visibility != Visibility::Visible {
            self.inertia = 0.0;
        }
        self.group.dispatch_update(input);
        self.drag.update_frame();

        if self.scroll_to_target {
            self.inertia = 0.0;
            if (self.scroll_target - self.scroll_pos).abs() < 0.5 {
                self.scroll_pos = self.scroll_target;
                self.scroll_to_target = false;
            } else {
                self.scroll_pos += (self.scroll_target - self.scroll_pos) * 0.3;
            }
        } else if self.inertia != 0.0 && !self.drag.active {
            self.scroll_pos -= self.inertia;
            self.inertia *= FRICTION;
            if self.inertia.abs() < STOP_THRESHOLD {
                self.inertia = 0.0;
            }
            self.scroll_pos = self.clamped(self.scroll_pos);
        }
    }

    fn touch(&mut self, touch: &TouchInput, cx: &mut EventCx) {
        let bounds = self.group.state().bounds;

        if touch.flags == TouchFlags::Down && touch.id == 0 {
            self.scroll_start = self.scroll_pos;
            self.inertia = 0.0;
        }
        if touch.flags == TouchFlags::Up {
            self.inertia = self.drag.end();
        }

        if self.can_scroll() {
            match touch.flags {
                TouchFlags::Down if touch.id == 0 && bounds.contains(touch.x, touch.y) => {
                    self.drag.begin(self.axis_coord(touch));
                }
                TouchFlags::Move => {
                    self.drag.moved(self.axis_coord(touch));
                    if self.drag.active {
                        // The content tracks the pointer exactly; a drag
                        // cancels any programmatic scroll in flight.
                        let pos = self.clamped(self.scroll_start - self.drag.distance());
                        self.scroll_pos = pos;
                        self.scroll_target = pos;
                        self.scroll_to_target = false;
                    }
                }
                _ => {}
            }
        }

        // Don't deliver presses that start outside the viewport.
        if touch.flags != TouchFlags::Down || bounds.contains(touch.x, touch.y) {
            self.group.dispatch_touch(touch, cx);
        }
    }

    fn key(&mut self, key: &KeyInput, cx: &mut EventCx) {
        if key.down {
            match key.key {
                Key::MouseWheelUp => self.scroll_relative(-WHEEL_STEP),
                Key::MouseWheelDown => self.scroll_relative(WHEEL_STEP),
                Key::PageDown => self.scroll_relative(self.viewport_extent() - PAGE_OVERLAP),
                Key::PageUp => self.scroll_relative(-(self.viewport_extent() - PAGE_OVERLAP)),
                Key::Home => self.scroll_to(0.0),
                Key::End => self.scroll_to(self.content_extent()),
                _ => {}
            }
        }
        self.group.dispatch_key(key, cx);
    }

    fn draw(&mut self, ui: &mut UiContext) {
        if self.group.is_empty() {
            self.group.draw(ui);
            return;
        }
        let bounds = self.group.state().bounds;
        ui.dc.push_scissor(bounds);
        {
            let mut guard = scopeguard::guard(&mut *ui, |ui| ui.dc.pop_scissor());
            if let Some(view) = self.group.view_by_index_mut(0) {
                view.draw(&mut **guard);
            }
        }

        // Scrollbar bob, sized in proportion to the visible fraction.
        let scroll_max = self.scroll_max();
        let ratio = self.viewport_extent() / self.content_extent();
        if ratio < 1.0 && scroll_max > 0.0 && self.orientation == Orientation::Vertical {
            let bob_height = ratio * bounds.h;
            let bob_offset = (self.scroll_pos / scroll_max) * (bounds.h - bob_height);
            let bob = Bounds::new(bounds.x2() - 5.0, bounds.y + bob_offset, 5.0, bob_height);
            let thumb = ui.dc.theme().scrollbar;
            ui.dc.fill_rect(thumb, bob);
        }
    }

    fn subview_focused(&mut self, id: ViewId) -> bool {
        if !self.group.notify_subview_focused(id) {
            return false;
        }
        let Some(focused) = self.group.bounds_of(id) else {
            return true;
        };
        let bounds = self.group.state().bounds;

        // Bring the focused view flush with the nearer edge.
        match self.orientation {
            Orientation::Horizontal => {
                if focused.x2() > bounds.x2() {
                    self.scroll_to(self.scroll_pos + focused.x2() - bounds.x2());
                }
                if focused.x < bounds.x {
                    self.scroll_to(self.scroll_pos + focused.x - bounds.x);
                }
            }
            Orientation::Vertical => {
                if focused.y2() > bounds.y2() {
                    self.scroll_to(self.scroll_pos + focused.y2() - bounds.y2());
                }
                if focused.y < bounds.y {
                    self.scroll_to(self.scroll_pos + focused.y - bounds.y);
                }
            }
        }
        trace!(?id, pos = self.scroll_target, "scrolled focused view into sight");
        true
    }

    fn state(&self) -> &ViewState {
        self.group.state()
    }

    fn state_mut(&mut self) -> &mut ViewState {
        self.group.state_mut()
    }

    fn axis(&mut self, axis: &AxisInput, cx: &mut EventCx) {
        self.group.dispatch_axis(axis, cx);
    }

    fn focus_first(&mut self, focus: &mut FocusState) -> bool {
        self.group.focus_first(focus)
    }

    fn as_container(&self) -> Option<&ViewGroup> {
        Some(&self.group)
    }

    fn as_container_mut(&mut self) -> Option<&mut ViewGroup> {
        Some(&mut self.group)
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
    use proptest::prelude::*;

    use super::*;
    use crate::{
        event::{EventQueue, TouchFlags},
        focus::FocusState,
        testing::{Block, TestDraw},
        view::SizeReq,
    };

    /// A 100-tall viewport over 400-tall content: max offset 300.
    fn scroller() -> ScrollView {
        let dc = TestDraw::new();
        let mut sv = ScrollView::vertical(LayoutParams::plain(
            SizeReq::FillParent,
            SizeReq::FillParent,
        ));
        sv.set_content(Box::new(Block::sized(100.0, 400.0)));
        sv.measure(&dc, MeasureSpec::exactly(100.0), MeasureSpec::exactly(100.0));
        sv.state_mut().bounds = Bounds::new(0.0, 0.0, 100.0, 100.0);
        sv.layout();
        sv
    }

    fn send_touch(sv: &mut ScrollView, x: f32, y: f32, flags: TouchFlags) {
        let mut focus = FocusState::new();
        let mut events = EventQueue::new();
        let mut cx = EventCx {
            focus: &mut focus,
            events: &mut events,
        };
        sv.touch(&TouchInput::primary(x, y, flags), &mut cx);
    }

    #[test]
    fn drag_moves_one_to_one() {
        let mut sv = scroller();
        send_touch(&mut sv, 50.0, 80.0, TouchFlags::Down);
        send_touch(&mut sv, 50.0, 60.0, TouchFlags::Move);
        assert_eq!(sv.scroll_pos(), 20.0);
        send_touch(&mut sv, 50.0, 30.0, TouchFlags::Move);
        assert_eq!(sv.scroll_pos(), 50.0);
        // Dragging back past the start clamps at zero.
        send_touch(&mut sv, 50.0, 200.0, TouchFlags::Move);
        assert_eq!(sv.scroll_pos(), 0.0);
    }

    proptest! {
        /// However a drag wanders, the offset stays within the scrollable
        /// range and tracks the pointer 1:1 when unconstrained.
        #[test]
        fn drag_offsets_stay_clamped(moves in proptest::collection::vec(-500.0f32..500.0, 1..20)) {
            let mut sv = scroller();
            send_touch(&mut sv, 50.0, 50.0, TouchFlags::Down);
            for dy in moves {
                send_touch(&mut sv, 50.0, 50.0 + dy, TouchFlags::Move);
                prop_assert!(sv.scroll_pos() >= 0.0);
                prop_assert!(sv.scroll_pos() <= 300.0);
            }
        }
    }

    #[test]
    fn release_velocity_becomes_decaying_inertia() {
        let mut sv = scroller();
        send_touch(&mut sv, 50.0, 90.0, TouchFlags::Down);
        send_touch(&mut sv, 50.0, 70.0, TouchFlags::Move);
        // One frame passes while the pointer moved 20 up.
        sv.update(&InputState::default());
        send_touch(&mut sv, 50.0, 70.0, TouchFlags::Up);

        let before = sv.scroll_pos();
        sv.update(&InputState::default());
        let first_step = sv.scroll_pos() - before;
        assert!(first_step > 0.0);

        let before = sv.scroll_pos();
        sv.update(&InputState::default());
        let second_step = sv.scroll_pos() - before;
        // Friction shrinks each step.
        assert!(second_step < first_step);
        assert!((second_step - first_step * FRICTION).abs() < 1e-3);

        // Decay always reaches the stop threshold and halts.
        for _ in 0..200 {
            sv.update(&InputState::default());
        }
        let settled = sv.scroll_pos();
        sv.update(&InputState::default());
        assert_eq!(sv.scroll_pos(), settled);
    }

    #[test]
    fn programmatic_scroll_eases_and_snaps() {
        let mut sv = scroller();
        sv.scroll_to(100.0);
        sv.update(&InputState::default());
        assert_eq!(sv.scroll_pos(), 30.0);
        sv.update(&InputState::default());
        assert_eq!(sv.scroll_pos(), 51.0);
        // Within half a pixel the position snaps to the target.
        for _ in 0..50 {
            sv.update(&InputState::default());
        }
        assert_eq!(sv.scroll_pos(), 100.0);
    }

    #[test]
    fn drag_cancels_programmatic_scroll() {
        let mut sv = scroller();
        sv.scroll_to(200.0);
        sv.update(&InputState::default());
        send_touch(&mut sv, 50.0, 50.0, TouchFlags::Down);
        send_touch(&mut sv, 50.0, 40.0, TouchFlags::Move);
        let held = sv.scroll_pos();
        // The eased scroll no longer advances.
        sv.update(&InputState::default());
        sv.update(&InputState::default());
        assert_eq!(sv.scroll_pos(), held);
    }

    #[test]
    fn scroll_targets_clamp_to_range() {
        let mut sv = scroller();
        sv.scroll_to(10_000.0);
        for _ in 0..100 {
            sv.update(&InputState::default());
        }
        assert_eq!(sv.scroll_pos(), 300.0);

        sv.scroll_relative(-10_000.0);
        for _ in 0..100 {
            sv.update(&InputState::default());
        }
        assert_eq!(sv.scroll_pos(), 0.0);
    }

    #[test]
    fn keys_scroll_by_their_steps() {
        let mut focus = FocusState::new();
        let mut events = EventQueue::new();
        let mut cx = EventCx {
            focus: &mut focus,
            events: &mut events,
        };

        let mut sv = scroller();
        sv.key(&KeyInput::down(Key::MouseWheelDown), &mut cx);
        assert_eq!(sv.scroll_target, 250.0);
        sv.key(&KeyInput::down(Key::Home), &mut cx);
        assert_eq!(sv.scroll_target, 0.0);
        sv.key(&KeyInput::down(Key::PageDown), &mut cx);
        // Viewport height 100 minus the 50 overlap.
        assert_eq!(sv.scroll_target, 50.0);
        sv.key(&KeyInput::down(Key::End), &mut cx);
        assert_eq!(sv.scroll_target, 300.0);
    }

    #[test]
    fn focused_subview_scrolls_into_sight() {
        let dc = TestDraw::new();
        let mut sv = ScrollView::vertical(LayoutParams::plain(
            SizeReq::FillParent,
            SizeReq::FillParent,
        ));
        let mut col = crate::layout::LinearLayout::vertical(LayoutParams::default());
        col.set_spacing(0.0);
        let mut last = None;
        for _ in 0..8 {
            last = Some(col.add_view(Block::focusable(100.0, 50.0)));
        }
        sv.set_content(Box::new(col));
        sv.measure(&dc, MeasureSpec::exactly(100.0), MeasureSpec::exactly(100.0));
        sv.state_mut().bounds = Bounds::new(0.0, 0.0, 100.0, 100.0);
        sv.layout();

        // The last item sits at y 350..400, far below the viewport.
        let last = last.unwrap();
        assert!(sv.subview_focused(last));
        for _ in 0..100 {
            sv.update(&InputState::default());
        }
        // Flush with the bottom edge: item bottom 400 meets viewport bottom.
        assert_eq!(sv.scroll_pos(), 300.0);
    }
}
