//! The `View` trait and the sizing vocabulary of the two-phase layout
//! protocol: size requests, measure specs, and layout parameters.

use std::{
    any::Any,
    sync::atomic::{AtomicU64, Ordering},
};

use geom::{Bounds, FocusDirection, Gravity, Margins, Point};

use crate::{
    draw::{DrawContext, UiContext},
    event::{AxisInput, EventCx, InputState, KeyInput, TouchInput},
    focus::FocusState,
    group::ViewGroup,
};

/// Whether a view participates in layout, input, and painting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Laid out, painted, receives input.
    #[default]
    Visible,
    /// Laid out and updated, but not painted and receives no input.
    Invisible,
    /// Excluded entirely: no layout, no update, no input, no paint.
    Gone,
}

/// A view's requested size along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SizeReq {
    /// Size to the content.
    #[default]
    WrapContent,
    /// Take all the space the parent offers.
    FillParent,
    /// An explicit size in device-independent pixels.
    Exact(f32),
}

/// Constraint mode passed down during Measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureMode {
    /// The child must be exactly this size.
    Exactly,
    /// The child may be at most this size.
    AtMost,
    /// No constraint; the child sizes to content.
    Unspecified,
}

/// A (mode, size) constraint passed to a child during Measure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasureSpec {
    /// Constraint mode.
    pub mode: MeasureMode,
    /// Constraint size; meaningless when the mode is `Unspecified`.
    pub size: f32,
}

impl MeasureSpec {
    /// An exact constraint.
    pub fn exactly(size: f32) -> Self {
        Self {
            mode: MeasureMode::Exactly,
            size,
        }
    }

    /// An upper-bound constraint.
    pub fn at_most(size: f32) -> Self {
        Self {
            mode: MeasureMode::AtMost,
            size,
        }
    }

    /// No constraint.
    pub fn unspecified() -> Self {
        Self {
            mode: MeasureMode::Unspecified,
            size: 0.0,
        }
    }

    /// The same constraint with `amount` (margins, padding) subtracted from
    /// its size, floored at zero.
    pub fn shrink(self, amount: f32) -> Self {
        Self {
            mode: self.mode,
            size: (self.size - amount).max(0.0),
        }
    }
}

/// Resolve a size request against a content size and a parent constraint.
pub fn measure_by_spec(req: SizeReq, content: f32, spec: MeasureSpec) -> f32 {
    match req {
        SizeReq::WrapContent => match spec.mode {
            MeasureMode::Unspecified => content,
            MeasureMode::AtMost => content.min(spec.size),
            MeasureMode::Exactly => spec.size,
        },
        SizeReq::FillParent => match spec.mode {
            MeasureMode::Unspecified => content,
            _ => spec.size,
        },
        SizeReq::Exact(size) => match spec.mode {
            MeasureMode::Exactly => spec.size,
            _ => size,
        },
    }
}

/// Requested width and height.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizePair {
    /// Requested width.
    pub w: SizeReq,
    /// Requested height.
    pub h: SizeReq,
}

impl SizePair {
    /// Construct a size pair.
    pub fn new(w: SizeReq, h: SizeReq) -> Self {
        Self { w, h }
    }

    /// Fill the parent on both axes.
    pub fn fill() -> Self {
        Self::new(SizeReq::FillParent, SizeReq::FillParent)
    }

    /// Wrap content on both axes.
    pub fn wrap() -> Self {
        Self::default()
    }
}

/// Per-child sizing and positioning hints, tagged by the kind of parent that
/// understands them. A closed sum type; parents match exhaustively instead of
/// downcasting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutParams {
    /// No parent-specific hints.
    Plain {
        /// Requested size.
        size: SizePair,
    },
    /// Hints for a `LinearLayout` parent.
    Linear {
        /// Requested size.
        size: SizePair,
        /// Share of leftover main-axis space; 0 means fixed-size.
        weight: f32,
        /// Placement within the allotted cell.
        gravity: Gravity,
        /// Margins around the view, if any.
        margins: Option<Margins>,
    },
    /// Hints for an `AnchorLayout` parent. Offsets are distances from the
    /// container edges; `None` leaves that edge unattached.
    Anchor {
        /// Requested size.
        size: SizePair,
        /// Distance from the parent's left edge.
        left: Option<f32>,
        /// Distance from the parent's top edge.
        top: Option<f32>,
        /// Distance from the parent's right edge.
        right: Option<f32>,
        /// Distance from the parent's bottom edge.
        bottom: Option<f32>,
        /// If set, the offsets locate the view's center rather than its edge.
        center: bool,
    },
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self::Plain {
            size: SizePair::wrap(),
        }
    }
}

impl LayoutParams {
    /// Plain params with the given size.
    pub fn plain(w: SizeReq, h: SizeReq) -> Self {
        Self::Plain {
            size: SizePair::new(w, h),
        }
    }

    /// Linear params with a weight and no margins.
    pub fn linear(w: SizeReq, h: SizeReq, weight: f32) -> Self {
        Self::Linear {
            size: SizePair::new(w, h),
            weight,
            gravity: Gravity::TOP_LEFT,
            margins: None,
        }
    }

    /// The requested size, whatever the kind.
    pub fn size(&self) -> SizePair {
        match *self {
            Self::Plain { size }
            | Self::Linear { size, .. }
            | Self::Anchor { size, .. } => size,
        }
    }
}

/// Counter backing [`ViewId`].
static NEXT_VIEW_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity for a view, replacing pointer identity. Unique for the
/// lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(u64);

impl ViewId {
    /// Allocate a fresh id.
    pub fn next() -> Self {
        Self(NEXT_VIEW_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// State every view carries.
#[derive(Debug, Clone)]
pub struct ViewState {
    /// Stable identity.
    pub id: ViewId,
    /// Final bounds, assigned during Layout.
    pub bounds: Bounds,
    /// Measured width, set during Measure.
    pub measured_w: f32,
    /// Measured height, set during Measure.
    pub measured_h: f32,
    /// Participation in layout/input/paint.
    pub visibility: Visibility,
    /// Disabled views keep their size but ignore input and focus.
    pub enabled: bool,
    /// Sizing and positioning hints for the parent.
    pub params: LayoutParams,
}

impl ViewState {
    /// Construct view state with the given layout params.
    pub fn new(params: LayoutParams) -> Self {
        Self {
            id: ViewId::next(),
            bounds: Bounds::default(),
            measured_w: 0.0,
            measured_h: 0.0,
            visibility: Visibility::Visible,
            enabled: true,
            params,
        }
    }
}

/// Polymorphic UI node. Owned exclusively by its parent container (or by a
/// screen, for a root).
pub trait View: Any {
    /// Shared view state.
    fn state(&self) -> &ViewState;
    /// Shared view state, mutably.
    fn state_mut(&mut self) -> &mut ViewState;

    /// Phase one of layout: compute the desired size under the parent's
    /// constraints, storing it in `measured_w`/`measured_h`.
    fn measure(&mut self, dc: &dyn DrawContext, horiz: MeasureSpec, vert: MeasureSpec);

    /// Phase two of layout: `bounds` has been assigned by the parent;
    /// position any children.
    fn layout(&mut self) {}

    /// Per-frame tick.
    fn update(&mut self, _input: &InputState) {}

    /// Paint this view.
    fn draw(&mut self, _ui: &mut UiContext) {}

    /// Pointer event dispatch.
    fn touch(&mut self, _touch: &TouchInput, _cx: &mut EventCx) {}

    /// Key event dispatch.
    fn key(&mut self, _key: &KeyInput, _cx: &mut EventCx) {}

    /// Axis event dispatch.
    fn axis(&mut self, _axis: &AxisInput, _cx: &mut EventCx) {}

    /// Can this view hold focus? Containers and labels say no.
    fn can_be_focused(&self) -> bool {
        false
    }

    /// The anchor point used when this view is scored as a focus-search
    /// origin or candidate: the center of the edge facing `dir`.
    fn focus_position(&self, dir: FocusDirection) -> Point {
        self.state().bounds.focus_anchor(dir)
    }

    /// Focus the first focusable view in this subtree (pre-order). Returns
    /// true if focus was taken.
    fn focus_first(&mut self, focus: &mut FocusState) -> bool {
        if self.can_be_focused() {
            focus.set_focused(self.state().id);
            true
        } else {
            false
        }
    }

    /// Notification that a descendant took focus. Returns true if `id` is in
    /// this subtree. Containers override; `ScrollView` uses this to scroll
    /// the focused view into sight.
    fn subview_focused(&mut self, _id: ViewId) -> bool {
        false
    }

    /// The container interface, if this view owns children.
    fn as_container(&self) -> Option<&ViewGroup> {
        None
    }

    /// The container interface, mutably.
    fn as_container_mut(&mut self) -> Option<&mut ViewGroup> {
        None
    }

    /// Downcasting support for composite widgets.
    fn as_any(&self) -> &dyn Any;

    /// Downcasting support for composite widgets.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl dyn View {
    /// This view's id.
    pub fn id(&self) -> ViewId {
        self.state().id
    }

    /// This view's visibility.
    pub fn visibility(&self) -> Visibility {
        self.state().visibility
    }

    /// Current bounds.
    pub fn bounds(&self) -> Bounds {
        self.state().bounds
    }

    /// Replace the layout params. The only sanctioned way to change params
    /// after attach.
    pub fn replace_params(&mut self, params: LayoutParams) {
        self.state_mut().params = params;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_by_spec_table() {
        let exact = MeasureSpec::exactly(100.0);
        let at_most = MeasureSpec::at_most(100.0);
        let unspec = MeasureSpec::unspecified();

        // Wrap content obeys the constraint ladder.
        assert_eq!(measure_by_spec(SizeReq::WrapContent, 40.0, unspec), 40.0);
        assert_eq!(measure_by_spec(SizeReq::WrapContent, 40.0, at_most), 40.0);
        assert_eq!(measure_by_spec(SizeReq::WrapContent, 140.0, at_most), 100.0);
        assert_eq!(measure_by_spec(SizeReq::WrapContent, 40.0, exact), 100.0);

        // Fill parent takes whatever is offered.
        assert_eq!(measure_by_spec(SizeReq::FillParent, 40.0, exact), 100.0);
        assert_eq!(measure_by_spec(SizeReq::FillParent, 40.0, at_most), 100.0);
        assert_eq!(measure_by_spec(SizeReq::FillParent, 40.0, unspec), 40.0);

        // Explicit sizes yield only to an exact parent constraint.
        assert_eq!(measure_by_spec(SizeReq::Exact(60.0), 40.0, unspec), 60.0);
        assert_eq!(measure_by_spec(SizeReq::Exact(60.0), 40.0, at_most), 60.0);
        assert_eq!(measure_by_spec(SizeReq::Exact(60.0), 40.0, exact), 100.0);
    }

    #[test]
    fn shrink_floors_at_zero() {
        let spec = MeasureSpec::at_most(10.0).shrink(25.0);
        assert_eq!(spec.size, 0.0);
        assert_eq!(spec.mode, MeasureMode::AtMost);
    }

    #[test]
    fn view_ids_are_unique() {
        let a = ViewId::next();
        let b = ViewId::next();
        assert_ne!(a, b);
    }
}
