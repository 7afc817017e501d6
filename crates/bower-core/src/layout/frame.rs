//! Stacking container: children overlap, each centered.

use crate::{
    draw::DrawContext,
    group::{ViewGroup, container_children, container_delegates},
    view::{LayoutParams, MeasureMode, MeasureSpec, View, measure_by_spec},
};

/// Stacks all children on top of each other, centering each within the
/// container on both axes. Later children paint over earlier ones.
pub struct FrameLayout {
    group: ViewGroup,
}

impl FrameLayout {
    /// An empty frame with the given layout params.
    pub fn new(params: LayoutParams) -> Self {
        Self {
            group: ViewGroup::new(params),
        }
    }

    container_children!();
}

impl View for FrameLayout {
    fn measure(&mut self, dc: &dyn DrawContext, horiz: MeasureSpec, vert: MeasureSpec) {
        // Children get an upper bound, never an exact size; a fixed-size
        // child keeps its own size and is centered in the leftover space.
        let child_h = match horiz.mode {
            MeasureMode::Exactly => MeasureSpec::at_most(horiz.size),
            _ => horiz,
        };
        let child_v = match vert.mode {
            MeasureMode::Exactly => MeasureSpec::at_most(vert.size),
            _ => vert,
        };
        let mut content_w: f32 = 0.0;
        let mut content_h: f32 = 0.0;
        for view in self.group.views_mut() {
            view.measure(dc, child_h, child_v);
            content_w = content_w.max(view.state().measured_w);
            content_h = content_h.max(view.state().measured_h);
        }

        let size = self.group.state().params.size();
        let state = self.group.state_mut();
        state.measured_w = measure_by_spec(size.w, content_w, horiz);
        state.measured_h = measure_by_spec(size.h, content_h, vert);
    }

    fn layout(&mut self) {
        let state = self.group.state();
        let bounds = state.bounds;
        let (measured_w, measured_h) = (state.measured_w, state.measured_h);
        for view in self.group.views_mut() {
            let (w, h) = (view.state().measured_w, view.state().measured_h);
            view.state_mut().bounds = geom::Bounds::new(
                bounds.x + (measured_w - w) * 0.5,
                bounds.y + (measured_h - h) * 0.5,
                w,
                h,
            );
            view.layout();
        }
    }

    container_delegates!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Block, TestDraw};

    #[test]
    fn children_are_centered_on_both_axes() {
        let dc = TestDraw::new();
        let mut frame = FrameLayout::new(LayoutParams::default());
        let small = frame.add_view(Block::sized(20.0, 10.0));
        let big = frame.add_view(Block::sized(100.0, 40.0));

        frame.measure(&dc, MeasureSpec::at_most(200.0), MeasureSpec::at_most(200.0));
        // Wrap-content frame sizes to the largest child.
        assert_eq!(frame.state().measured_w, 100.0);
        assert_eq!(frame.state().measured_h, 40.0);

        frame.state_mut().bounds = geom::Bounds::new(0.0, 0.0, 100.0, 40.0);
        frame.layout();
        assert_eq!(
            frame.group().bounds_of(small).unwrap(),
            geom::Bounds::new(40.0, 15.0, 20.0, 10.0)
        );
        assert_eq!(
            frame.group().bounds_of(big).unwrap(),
            geom::Bounds::new(0.0, 0.0, 100.0, 40.0)
        );
    }

    #[test]
    fn empty_frame_still_resolves_its_size() {
        let dc = TestDraw::new();
        let mut frame = FrameLayout::new(LayoutParams::plain(
            crate::view::SizeReq::FillParent,
            crate::view::SizeReq::FillParent,
        ));
        frame.measure(&dc, MeasureSpec::exactly(80.0), MeasureSpec::exactly(60.0));
        assert_eq!(frame.state().measured_w, 80.0);
        assert_eq!(frame.state().measured_h, 60.0);
    }
}
