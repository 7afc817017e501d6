//! Row/column container with weight-based distribution of leftover space.

use geom::{Margins, Orientation, apply_gravity};

use crate::{
    draw::DrawContext,
    group::{ViewGroup, container_children, container_delegates},
    layout::{linear_gravity, linear_margins, linear_weight},
    view::{LayoutParams, MeasureMode, MeasureSpec, View, Visibility, measure_by_spec},
};

/// Default gap between adjacent children.
const DEFAULT_SPACING: f32 = 10.0;

/// Lays children out along one axis in insertion order, with `spacing`
/// between adjacent visible children. Children with a nonzero weight split
/// the main-axis space left over after the fixed-size children, in
/// proportion to their weights.
pub struct LinearLayout {
    group: ViewGroup,
    orientation: Orientation,
    spacing: f32,
    default_margins: Margins,
}

impl LinearLayout {
    /// A linear layout along `orientation` with default spacing.
    pub fn new(orientation: Orientation, params: LayoutParams) -> Self {
        Self {
            group: ViewGroup::new(params),
            orientation,
            spacing: DEFAULT_SPACING,
            default_margins: Margins::default(),
        }
    }

    /// A top-to-bottom column.
    pub fn vertical(params: LayoutParams) -> Self {
        Self::new(Orientation::Vertical, params)
    }

    /// A left-to-right row.
    pub fn horizontal(params: LayoutParams) -> Self {
        Self::new(Orientation::Horizontal, params)
    }

    /// Override the gap between adjacent children.
    pub fn set_spacing(&mut self, spacing: f32) {
        self.spacing = spacing;
    }

    /// Margins applied to children that don't bring their own.
    pub fn set_default_margins(&mut self, margins: Margins) {
        self.default_margins = margins;
    }

    /// Main axis of this layout.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    container_children!();
}

impl View for LinearLayout {
    fn measure(&mut self, dc: &dyn DrawContext, horiz: MeasureSpec, vert: MeasureSpec) {
        let size = self.group.state().params.size();
        let state = self.group.state_mut();
        state.measured_w = measure_by_spec(size.w, 0.0, horiz);
        state.measured_h = measure_by_spec(size.h, 0.0, vert);
        let (measured_w, measured_h) = (state.measured_w, state.measured_h);

        if self.group.is_empty() {
            return;
        }

        let default_margins = self.default_margins;
        let orientation = self.orientation;

        // First pass: size every non-GONE child to content, collecting the
        // fixed-size total, the largest cross-axis extent, and the weights.
        let mut max_other: f32 = 0.0;
        let mut weight_sum = 0.0;
        let mut weight_zero_sum = 0.0;
        let mut num_visible = 0u32;

        for view in self.group.views_mut() {
            if view.state().visibility == Visibility::Gone {
                continue;
            }
            num_visible += 1;

            let margins = linear_margins(&view.state().params, default_margins);
            let weight = linear_weight(&view.state().params);

            match orientation {
                Orientation::Horizontal => {
                    let mut v = vert;
                    if v.mode == MeasureMode::Unspecified {
                        v = MeasureSpec::at_most(measured_h);
                    }
                    view.measure(dc, MeasureSpec::unspecified(), v.shrink(margins.vert()));
                }
                Orientation::Vertical => {
                    let mut h = horiz;
                    if h.mode == MeasureMode::Unspecified {
                        h = MeasureSpec::at_most(measured_w);
                    }
                    view.measure(dc, h.shrink(margins.horiz()), MeasureSpec::unspecified());
                }
            }

            let state = view.state();
            let amount = match orientation {
                Orientation::Horizontal => {
                    max_other = max_other.max(state.measured_h + margins.vert());
                    state.measured_w + margins.horiz()
                }
                Orientation::Vertical => {
                    max_other = max_other.max(state.measured_w + margins.horiz());
                    state.measured_h + margins.vert()
                }
            };

            if weight == 0.0 {
                weight_zero_sum += amount;
            }
            weight_sum += weight;
        }

        weight_zero_sum += self.spacing * num_visible.saturating_sub(1) as f32;

        // Resolve our own size now that content extents are known, then
        // hand the leftover main-axis space to the weighted children and
        // re-measure them at their exact share.
        let size = self.group.state().params.size();
        let state = self.group.state_mut();
        match orientation {
            Orientation::Horizontal => {
                state.measured_w = measure_by_spec(size.w, weight_zero_sum, horiz);
                state.measured_h = measure_by_spec(size.h, max_other, vert);
            }
            Orientation::Vertical => {
                state.measured_h = measure_by_spec(size.h, weight_zero_sum, vert);
                state.measured_w = measure_by_spec(size.w, max_other, horiz);
            }
        }
        let (measured_w, measured_h) = (state.measured_w, state.measured_h);

        if weight_sum == 0.0 {
            return;
        }
        let main = match orientation {
            Orientation::Horizontal => measured_w,
            Orientation::Vertical => measured_h,
        };
        let unit = (main - weight_zero_sum) / weight_sum;

        for view in self.group.views_mut() {
            if view.state().visibility == Visibility::Gone {
                continue;
            }
            let margins = linear_margins(&view.state().params, default_margins);
            let weight = linear_weight(&view.state().params);
            if weight <= 0.0 {
                continue;
            }
            // The cross axis keeps its first-pass spec; only the main axis
            // is pinned to the child's share.
            match orientation {
                Orientation::Horizontal => {
                    let share = (unit * weight - margins.horiz()).max(0.0);
                    let mut v = vert;
                    if v.mode == MeasureMode::Unspecified {
                        v = MeasureSpec::at_most(measured_h);
                    }
                    view.measure(dc, MeasureSpec::exactly(share), v.shrink(margins.vert()));
                }
                Orientation::Vertical => {
                    let share = (unit * weight - margins.vert()).max(0.0);
                    let mut h = horiz;
                    if h.mode == MeasureMode::Unspecified {
                        h = MeasureSpec::at_most(measured_w);
                    }
                    view.measure(dc, h.shrink(margins.horiz()), MeasureSpec::exactly(share));
                }
            }
        }
    }

    fn layout(&mut self) {
        let state = self.group.state();
        let bounds = state.bounds;
        let (measured_w, measured_h) = (state.measured_w, state.measured_h);
        let orientation = self.orientation;
        let spacing = self.spacing;
        let default_margins = self.default_margins;

        let mut pos = match orientation {
            Orientation::Horizontal => bounds.x,
            Orientation::Vertical => bounds.y,
        };

        for view in self.group.views_mut() {
            if view.state().visibility == Visibility::Gone {
                continue;
            }

            let margins = linear_margins(&view.state().params, default_margins);
            let gravity = linear_gravity(&view.state().params);
            let (mw, mh) = (view.state().measured_w, view.state().measured_h);

            let item = match orientation {
                Orientation::Horizontal => geom::Bounds::new(
                    pos,
                    bounds.y,
                    mw + margins.horiz(),
                    measured_h,
                ),
                Orientation::Vertical => geom::Bounds::new(
                    bounds.x,
                    pos,
                    measured_w,
                    mh + margins.vert(),
                ),
            };

            view.state_mut().bounds = apply_gravity(item, margins, mw, mh, gravity);
            view.layout();

            pos += spacing
                + match orientation {
                    Orientation::Horizontal => item.w,
                    Orientation::Vertical => item.h,
                };
        }
    }

    container_delegates!();
}
