//! Overlay container positioning children by edge offsets.

use geom::Bounds;

use crate::{
    draw::DrawContext,
    group::{ViewGroup, container_children, container_delegates},
    view::{LayoutParams, MeasureSpec, SizeReq, View, measure_by_spec},
};

/// Positions each child independently by distances from the container's
/// edges. A child anchored to two opposing edges gets its size on that axis
/// derived from the gap between the offsets; `center` treats the offsets as
/// locating the child's center instead of its edge.
pub struct AnchorLayout {
    group: ViewGroup,
}

impl AnchorLayout {
    /// An empty anchor layout with the given layout params.
    pub fn new(params: LayoutParams) -> Self {
        Self {
            group: ViewGroup::new(params),
        }
    }

    container_children!();
}

/// The measure spec for one axis of an anchored child: an exact spec when
/// the size is pinned, otherwise unconstrained.
fn anchor_spec(req: SizeReq, derived: Option<f32>) -> MeasureSpec {
    if let Some(size) = derived {
        return MeasureSpec::exactly(size);
    }
    match req {
        SizeReq::Exact(size) => MeasureSpec::exactly(size),
        SizeReq::WrapContent | SizeReq::FillParent => MeasureSpec::unspecified(),
    }
}

impl View for AnchorLayout {
    fn measure(&mut self, dc: &dyn DrawContext, horiz: MeasureSpec, vert: MeasureSpec) {
        let size = self.group.state().params.size();
        let state = self.group.state_mut();
        state.measured_w = measure_by_spec(size.w, 0.0, horiz);
        state.measured_h = measure_by_spec(size.h, 0.0, vert);
        let (measured_w, measured_h) = (state.measured_w, state.measured_h);

        for view in self.group.views_mut() {
            let (spec_w, spec_h) = match view.state().params {
                LayoutParams::Anchor {
                    size,
                    left,
                    top,
                    right,
                    bottom,
                    center,
                } => {
                    // Opposing offsets pin the size on that axis.
                    let derived_w = match (center, left, right) {
                        (false, Some(l), Some(r)) => Some(measured_w - l - r),
                        _ => None,
                    };
                    let derived_h = match (center, top, bottom) {
                        (false, Some(t), Some(b)) => Some(measured_h - t - b),
                        _ => None,
                    };
                    (
                        anchor_spec(size.w, derived_w),
                        anchor_spec(size.h, derived_h),
                    )
                }
                _ => (MeasureSpec::unspecified(), MeasureSpec::unspecified()),
            };
            view.measure(dc, spec_w, spec_h);
        }
    }

    fn layout(&mut self) {
        let bounds = self.group.state().bounds;

        for view in self.group.views_mut() {
            let state = view.state();
            let w = state.measured_w.min(bounds.w);
            let h = state.measured_h.min(bounds.h);

            // Unanchored axes rest at the container origin.
            let mut x = bounds.x;
            let mut y = bounds.y;

            if let LayoutParams::Anchor {
                left,
                top,
                right,
                bottom,
                center,
                ..
            } = state.params
            {
                if let Some(left) = left {
                    x = bounds.x + left;
                    if center {
                        x -= w * 0.5;
                    }
                } else if let Some(right) = right {
                    x = bounds.x2() - right - w;
                    if center {
                        x += w * 0.5;
                    }
                }

                if let Some(top) = top {
                    y = bounds.y + top;
                    if center {
                        y -= h * 0.5;
                    }
                } else if let Some(bottom) = bottom {
                    y = bounds.y2() - bottom - h;
                    if center {
                        y += h * 0.5;
                    }
                }
            }

            view.state_mut().bounds = Bounds::new(x, y, w, h);
            view.layout();
        }
    }

    container_delegates!();
}
