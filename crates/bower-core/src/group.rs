//! `ViewGroup`: the owned, ordered child collection every container embeds,
//! plus the directional focus-search heuristic that runs over it.

use geom::{Bounds, FocusDirection};

use crate::{
    draw::{Drawable, UiContext},
    event::{AxisInput, EventCx, InputState, KeyInput, TouchInput},
    focus::FocusState,
    view::{View, ViewId, ViewState, Visibility},
};

/// Outcome of a directional focus search: the best candidate so far and its
/// score. The score starts at zero and only improves.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeighborResult {
    /// Best candidate found anywhere in the searched subtrees.
    pub view: Option<ViewId>,
    /// Its directional alignment score.
    pub score: f32,
}

/// Directional alignment score of `candidate` as seen from an origin with
/// the given bounds. Positive only for candidates that lie in the requested
/// direction; rewards candidates that are both well aligned and close.
fn direction_score(origin: Bounds, candidate: &dyn View, dir: FocusDirection) -> f32 {
    // Skip labels and the like.
    if !candidate.can_be_focused() {
        return 0.0;
    }
    let state = candidate.state();
    if !state.enabled || state.visibility != Visibility::Visible {
        return 0.0;
    }

    let origin_pos = origin.focus_anchor(dir);
    let dest_pos = candidate.focus_position(dir.opposite());

    let dx = dest_pos.x - origin_pos.x;
    let dy = dest_pos.y - origin_pos.y;
    let distance = (dx * dx + dy * dy).sqrt();
    if distance <= f32::EPSILON {
        return 0.0;
    }

    // Unit direction towards the candidate, then the axial component scaled
    // down by a soft distance penalty.
    let axial = match dir {
        FocusDirection::Left => -dx / distance,
        FocusDirection::Right => dx / distance,
        FocusDirection::Up => -dy / distance,
        FocusDirection::Down => dy / distance,
        FocusDirection::Prev | FocusDirection::Next => return 0.0,
    };
    axial / distance.sqrt()
}

/// Ordered, owned collection of views. Insertion order is z-order and the
/// default traversal/focus order. A view has exactly one owner; removal
/// drops the view.
pub struct ViewGroup {
    /// The container's own view state.
    state: ViewState,
    /// Owned children in insertion order.
    views: Vec<Box<dyn View>>,
    /// Background fill, if any.
    bg: Option<Drawable>,
    /// Darken everything behind and draw shadow chrome.
    has_drop_shadow: bool,
    /// Clip children to this container's bounds.
    clip: bool,
}

impl ViewGroup {
    /// Construct an empty container with the given layout params.
    pub fn new(params: crate::view::LayoutParams) -> Self {
        Self {
            state: ViewState::new(params),
            views: Vec::new(),
            bg: None,
            has_drop_shadow: false,
            clip: false,
        }
    }

    /// The container's view state.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// The container's view state, mutably.
    pub fn state_mut(&mut self) -> &mut ViewState {
        &mut self.state
    }

    /// Take ownership of a view, appending it to the child list. Returns the
    /// child's id for later identity-based access.
    pub fn add(&mut self, view: Box<dyn View>) -> ViewId {
        let id = view.state().id;
        self.views.push(view);
        id
    }

    /// Convenience for adding an unboxed view.
    pub fn add_view<V: View>(&mut self, view: V) -> ViewId {
        self.add(Box::new(view))
    }

    /// Remove (and drop) the child with the given id. Silently a no-op when
    /// no direct child matches.
    pub fn remove_subview(&mut self, id: ViewId) {
        if let Some(pos) = self.views.iter().position(|v| v.state().id == id) {
            self.views.remove(pos);
        }
    }

    /// Drop all children.
    pub fn clear(&mut self) {
        self.views.clear();
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// True when there are no children.
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// The child at `index`, if any.
    pub fn view_by_index(&self, index: usize) -> Option<&dyn View> {
        self.views.get(index).map(|v| v.as_ref())
    }

    /// The child at `index`, mutably.
    pub fn view_by_index_mut(&mut self, index: usize) -> Option<&mut Box<dyn View>> {
        self.views.get_mut(index)
    }

    /// Ids of the direct children, in order.
    pub fn child_ids(&self) -> Vec<ViewId> {
        self.views.iter().map(|v| v.state().id).collect()
    }

    /// Direct access to the child list for layout passes.
    pub fn views(&self) -> &[Box<dyn View>] {
        &self.views
    }

    /// Mutable access to the child list for layout passes.
    pub fn views_mut(&mut self) -> &mut [Box<dyn View>] {
        &mut self.views
    }

    /// Set the background fill.
    pub fn set_bg(&mut self, bg: Drawable) {
        self.bg = Some(bg);
    }

    /// Enable or disable drop-shadow chrome.
    pub fn set_drop_shadow(&mut self, on: bool) {
        self.has_drop_shadow = on;
    }

    /// Enable or disable scissor clipping around the children.
    pub fn set_clip(&mut self, clip: bool) {
        self.clip = clip;
    }

    /// Dispatch a touch event to every visible child.
    pub fn dispatch_touch(&mut self, touch: &TouchInput, cx: &mut EventCx) {
        for view in &mut self.views {
            if view.state().visibility == Visibility::Visible {
                view.touch(touch, cx);
            }
        }
    }

    /// Dispatch a key event to every visible child.
    pub fn dispatch_key(&mut self, key: &KeyInput, cx: &mut EventCx) {
        for view in &mut self.views {
            if view.state().visibility == Visibility::Visible {
                view.key(key, cx);
            }
        }
    }

    /// Dispatch an axis event to every visible child.
    pub fn dispatch_axis(&mut self, axis: &AxisInput, cx: &mut EventCx) {
        for view in &mut self.views {
            if view.state().visibility == Visibility::Visible {
                view.axis(axis, cx);
            }
        }
    }

    /// Tick every child that is not GONE. Invisible children still animate;
    /// they just don't paint or receive input.
    pub fn dispatch_update(&mut self, input: &InputState) {
        for view in &mut self.views {
            if view.state().visibility != Visibility::Gone {
                view.update(input);
            }
        }
    }

    /// Default container paint: drop shadow, optional scissor around the
    /// children, background, then visible children culled against the
    /// current scissor rectangle.
    pub fn draw(&mut self, ui: &mut UiContext) {
        if self.has_drop_shadow {
            let (sw, sh) = ui.dc.screen_size();
            ui.dc
                .fill_rect(Drawable::new(0x6000_0000), Bounds::new(0.0, 0.0, sw, sh));
            ui.dc.draw_drop_shadow(self.state.bounds);
        }

        let clip = self.clip;
        if clip {
            ui.dc.push_scissor(self.state.bounds);
        }
        let mut ui = scopeguard::guard(ui, move |ui| {
            if clip {
                ui.dc.pop_scissor();
            }
        });

        if let Some(bg) = self.bg
            && bg.is_visible()
        {
            ui.dc.fill_rect(bg, self.state.bounds);
        }

        let scissor = ui.dc.scissor_bounds();
        for view in &mut self.views {
            if view.state().visibility == Visibility::Visible
                && scissor.intersects(&view.state().bounds)
            {
                view.draw(&mut **ui);
            }
        }
    }

    /// Focus the first focusable descendant, pre-order. Returns true if
    /// focus was taken.
    pub fn focus_first(&mut self, focus: &mut FocusState) -> bool {
        for view in &mut self.views {
            let state = view.state();
            if state.visibility != Visibility::Visible || !state.enabled {
                continue;
            }
            if view.focus_first(focus) {
                return true;
            }
        }
        false
    }

    /// Give focus to the descendant with the given id. A leaf takes focus
    /// itself; a container forwards to its first focusable child. Returns
    /// false when `id` is absent or nothing under it can take focus.
    pub fn focus_descendant(&mut self, id: ViewId, focus: &mut FocusState) -> bool {
        for view in &mut self.views {
            if view.state().id == id {
                return view.focus_first(focus);
            }
            if let Some(group) = view.as_container_mut()
                && group.focus_descendant(id, focus)
            {
                return true;
            }
        }
        false
    }

    /// True if `id` names a view anywhere in this subtree.
    pub fn contains_descendant(&self, id: ViewId) -> bool {
        self.views.iter().any(|view| {
            view.state().id == id
                || view
                    .as_container()
                    .is_some_and(|group| group.contains_descendant(id))
        })
    }

    /// Bounds of the descendant with the given id, if present.
    pub fn bounds_of(&self, id: ViewId) -> Option<Bounds> {
        for view in &self.views {
            if view.state().id == id {
                return Some(view.state().bounds);
            }
            if let Some(group) = view.as_container()
                && let Some(bounds) = group.bounds_of(id)
            {
                return Some(bounds);
            }
        }
        None
    }

    /// Notify the subtree that `id` took focus, via each view's
    /// `subview_focused` hook so overrides (such as scroll-into-view) fire
    /// at every level that contains it. Returns true if `id` is in this
    /// subtree.
    pub fn notify_subview_focused(&mut self, id: ViewId) -> bool {
        for view in &mut self.views {
            if view.state().id == id {
                return true;
            }
            if view.subview_focused(id) {
                return true;
            }
        }
        false
    }

    /// Directional focus search. For `Prev`/`Next` the neighbor is simply
    /// the adjacent sibling, cyclic. For the spatial directions every
    /// focusable sibling is scored and every child container is searched
    /// with the same running best, so the best candidate anywhere in the
    /// hierarchy wins regardless of nesting depth. Ties go to the earlier
    /// find (strict `>` comparison).
    pub fn find_neighbor(
        &self,
        origin: ViewId,
        origin_bounds: Bounds,
        dir: FocusDirection,
        mut result: NeighborResult,
    ) -> NeighborResult {
        if !self.state.enabled || self.state.visibility != Visibility::Visible {
            return result;
        }

        let num = self.views.iter().position(|v| v.state().id == origin);

        match dir {
            FocusDirection::Prev => {
                let Some(num) = num else {
                    return NeighborResult::default();
                };
                let idx = (num + self.views.len() - 1) % self.views.len();
                NeighborResult {
                    view: Some(self.views[idx].state().id),
                    score: 0.0,
                }
            }
            FocusDirection::Next => {
                let Some(num) = num else {
                    return NeighborResult::default();
                };
                let idx = (num + 1) % self.views.len();
                NeighborResult {
                    view: Some(self.views[idx].state().id),
                    score: 0.0,
                }
            }
            FocusDirection::Up
            | FocusDirection::Down
            | FocusDirection::Left
            | FocusDirection::Right => {
                // The direct children first.
                for view in &self.views {
                    if view.state().id == origin {
                        continue;
                    }
                    let score = direction_score(origin_bounds, view.as_ref(), dir);
                    if score > result.score {
                        result.score = score;
                        result.view = Some(view.state().id);
                    }
                }

                // Then any better candidates nested below.
                for view in &self.views {
                    if let Some(group) = view.as_container() {
                        result = group.find_neighbor(origin, origin_bounds, dir, result);
                    }
                }

                result
            }
        }
    }
}

/// Generates the `View` methods every plain container implements by
/// delegating to its embedded [`ViewGroup`] field named `group`. Containers
/// still write their own `measure`/`layout` (and any overrides) alongside.
macro_rules! container_delegates {
    () => {
        fn state(&self) -> &$crate::view::ViewState {
            self.group.state()
        }

        fn state_mut(&mut self) -> &mut $crate::view::ViewState {
            self.group.state_mut()
        }

        fn update(&mut self, input: &$crate::event::InputState) {
            self.group.dispatch_update(input);
        }

        fn draw(&mut self, ui: &mut $crate::draw::UiContext) {
            self.group.draw(ui);
        }

        fn touch(&mut self, touch: &$crate::event::TouchInput, cx: &mut $crate::event::EventCx) {
            self.group.dispatch_touch(touch, cx);
        }

        fn key(&mut self, key: &$crate::event::KeyInput, cx: &mut $crate::event::EventCx) {
            self.group.dispatch_key(key, cx);
        }

        fn axis(&mut self, axis: &$crate::event::AxisInput, cx: &mut $crate::event::EventCx) {
            self.group.dispatch_axis(axis, cx);
        }

        fn focus_first(&mut self, focus: &mut $crate::focus::FocusState) -> bool {
            self.group.focus_first(focus)
        }

        fn subview_focused(&mut self, id: $crate::view::ViewId) -> bool {
            self.group.notify_subview_focused(id)
        }

        fn as_container(&self) -> Option<&$crate::group::ViewGroup> {
            Some(&self.group)
        }

        fn as_container_mut(&mut self) -> Option<&mut $crate::group::ViewGroup> {
            Some(&mut self.group)
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
    };
}
pub(crate) use container_delegates;

/// Generates the inherent child-management API containers expose on top of
/// their embedded `group` field.
macro_rules! container_children {
    () => {
        /// Take ownership of a view, appending it to the child list.
        pub fn add(&mut self, view: Box<dyn $crate::view::View>) -> $crate::view::ViewId {
            self.group.add(view)
        }

        /// Convenience for adding an unboxed view.
        pub fn add_view<V: $crate::view::View>(&mut self, view: V) -> $crate::view::ViewId {
            self.group.add_view(view)
        }

        /// Remove (and drop) the direct child with the given id.
        pub fn remove_subview(&mut self, id: $crate::view::ViewId) {
            self.group.remove_subview(id);
        }

        /// Drop all children.
        pub fn clear(&mut self) {
            self.group.clear();
        }

        /// The embedded child collection.
        pub fn group(&self) -> &$crate::group::ViewGroup {
            &self.group
        }

        /// The embedded child collection, mutably.
        pub fn group_mut(&mut self) -> &mut $crate::group::ViewGroup {
            &mut self.group
        }
    };
}
pub(crate) use container_children;

#[cfg(test)]
mod tests {
    use geom::Bounds;

    use super::*;
    use crate::{
        event::{EventQueue, TouchFlags},
        testing::Block,
        view::LayoutParams,
    };

    /// Build a group holding three blocks, returning their ids.
    fn three_blocks() -> (ViewGroup, Vec<ViewId>) {
        let mut group = ViewGroup::new(LayoutParams::default());
        let ids = (0..3)
            .map(|_| group.add_view(Block::focusable(50.0, 50.0)))
            .collect();
        (group, ids)
    }

    #[test]
    fn add_then_remove_by_identity() {
        let (mut group, ids) = three_blocks();
        assert_eq!(group.len(), 3);
        group.remove_subview(ids[1]);
        assert_eq!(group.len(), 2);
        assert_eq!(group.child_ids(), vec![ids[0], ids[2]]);
        // Removing an id that is no longer present is silently a no-op.
        group.remove_subview(ids[1]);
        assert_eq!(group.len(), 2);
        group.clear();
        assert!(group.is_empty());
    }

    #[test]
    fn removal_drops_exactly_once() {
        let mut group = ViewGroup::new(LayoutParams::default());
        let block = Block::focusable(10.0, 10.0);
        let drops = block.drop_counter();
        let id = group.add_view(block);
        assert_eq!(drops.get(), 0);
        group.remove_subview(id);
        assert_eq!(drops.get(), 1);
        group.remove_subview(id);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn visibility_gates_dispatch() {
        let (mut group, ids) = three_blocks();
        group
            .view_by_index_mut(1)
            .unwrap()
            .state_mut()
            .visibility = Visibility::Invisible;
        group
            .view_by_index_mut(2)
            .unwrap()
            .state_mut()
            .visibility = Visibility::Gone;

        let mut focus = FocusState::new();
        let mut events = EventQueue::new();
        let mut cx = EventCx {
            focus: &mut focus,
            events: &mut events,
        };
        let touch = TouchInput::primary(1.0, 1.0, TouchFlags::Down);
        group.dispatch_touch(&touch, &mut cx);
        group.dispatch_key(&KeyInput::down(crate::event::Key::Enter), &mut cx);
        group.dispatch_update(&InputState::default());

        let counts = |idx: usize| {
            let view = group.view_by_index(idx).unwrap();
            let block = view.as_any().downcast_ref::<Block>().unwrap();
            (block.touches(), block.keys(), block.updates())
        };
        // Visible: everything.
        assert_eq!(counts(0), (1, 1, 1));
        // Invisible: updates only.
        assert_eq!(counts(1), (0, 0, 1));
        // Gone: nothing.
        assert_eq!(counts(2), (0, 0, 0));
        let _ = ids;
    }

    /// A candidate to the right scores positive for a rightward search
    /// and is never selected by a leftward one.
    #[test]
    fn neighbor_search_is_directional() {
        let mut group = ViewGroup::new(LayoutParams::default());
        let a = group.add_view(Block::focusable_at(Bounds::new(0.0, 0.0, 10.0, 10.0)));
        let b = group.add_view(Block::focusable_at(Bounds::new(100.0, 0.0, 10.0, 10.0)));

        let origin = group.bounds_of(a).unwrap();
        let right = group.find_neighbor(a, origin, FocusDirection::Right, NeighborResult::default());
        assert_eq!(right.view, Some(b));
        assert!(right.score > 0.0);

        let left = group.find_neighbor(a, origin, FocusDirection::Left, NeighborResult::default());
        assert_eq!(left.view, None);
    }

    /// A nested candidate with a better score beats a sibling of the origin.
    #[test]
    fn neighbor_search_recurses_with_global_best() {
        let mut group = ViewGroup::new(LayoutParams::default());
        let a = group.add_view(Block::focusable_at(Bounds::new(0.0, 0.0, 10.0, 10.0)));
        // A far sibling to the right.
        let far = group.add_view(Block::focusable_at(Bounds::new(500.0, 0.0, 10.0, 10.0)));
        // A nested container holding a much closer candidate.
        let mut inner = ViewGroup::new(LayoutParams::default());
        let near = inner.add_view(Block::focusable_at(Bounds::new(30.0, 0.0, 10.0, 10.0)));
        group.add_view(crate::testing::Holder::new(inner));

        let origin = group.bounds_of(a).unwrap();
        let result =
            group.find_neighbor(a, origin, FocusDirection::Right, NeighborResult::default());
        assert_eq!(result.view, Some(near));
        assert_ne!(result.view, Some(far));
    }

    #[test]
    fn prev_next_wrap() {
        let (group, ids) = three_blocks();
        let origin = Bounds::new(0.0, 0.0, 1.0, 1.0);
        let prev = group.find_neighbor(ids[0], origin, FocusDirection::Prev, NeighborResult::default());
        assert_eq!(prev.view, Some(ids[2]));
        let next = group.find_neighbor(ids[2], origin, FocusDirection::Next, NeighborResult::default());
        assert_eq!(next.view, Some(ids[0]));
    }

    #[test]
    fn disabled_candidates_never_score() {
        let mut group = ViewGroup::new(LayoutParams::default());
        let a = group.add_view(Block::focusable_at(Bounds::new(0.0, 0.0, 10.0, 10.0)));
        let b = group.add_view(Block::focusable_at(Bounds::new(100.0, 0.0, 10.0, 10.0)));
        group.view_by_index_mut(1).unwrap().state_mut().enabled = false;

        let origin = group.bounds_of(a).unwrap();
        let result =
            group.find_neighbor(a, origin, FocusDirection::Right, NeighborResult::default());
        assert_eq!(result.view, None);
        let _ = b;
    }
}
