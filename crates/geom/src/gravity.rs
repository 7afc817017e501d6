use super::{Bounds, Margins};

/// Horizontal alignment within a cell.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub enum HAlign {
    /// Flush against the left edge.
    #[default]
    Left,
    /// Centered horizontally.
    Center,
    /// Flush against the right edge.
    Right,
}

/// Vertical alignment within a cell.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub enum VAlign {
    /// Flush against the top edge.
    #[default]
    Top,
    /// Centered vertically.
    Center,
    /// Flush against the bottom edge.
    Bottom,
}

/// Alignment pair controlling a child's placement within its allotted cell.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Gravity {
    /// Horizontal alignment.
    pub horiz: HAlign,
    /// Vertical alignment.
    pub vert: VAlign,
}

impl Gravity {
    /// Top-left alignment, the default.
    pub const TOP_LEFT: Self = Self {
        horiz: HAlign::Left,
        vert: VAlign::Top,
    };

    /// Fully centered alignment.
    pub const CENTER: Self = Self {
        horiz: HAlign::Center,
        vert: VAlign::Center,
    };

    /// Construct a gravity from an alignment pair.
    pub fn new(horiz: HAlign, vert: VAlign) -> Self {
        Self { horiz, vert }
    }
}

/// Position a child of size `w`×`h` within the cell `outer`, honoring margins
/// and the alignment pair. Returns the child's final bounds.
pub fn apply_gravity(outer: Bounds, margins: Margins, w: f32, h: f32, gravity: Gravity) -> Bounds {
    let mut inner = Bounds {
        w: w - margins.horiz(),
        h: h - margins.vert(),
        ..Bounds::default()
    };

    inner.x = match gravity.horiz {
        HAlign::Left => outer.x + margins.left,
        HAlign::Right => outer.x + outer.w - w - margins.right,
        HAlign::Center => outer.x + (outer.w - w) * 0.5,
    };
    inner.y = match gravity.vert {
        VAlign::Top => outer.y + margins.top,
        VAlign::Bottom => outer.y + outer.h - h - margins.bottom,
        VAlign::Center => outer.y + (outer.h - h) * 0.5,
    };
    inner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_left_respects_margins() {
        let outer = Bounds::new(10.0, 10.0, 100.0, 50.0);
        let inner = apply_gravity(outer, Margins::uniform(5.0), 40.0, 20.0, Gravity::TOP_LEFT);
        assert_eq!(inner, Bounds::new(15.0, 15.0, 30.0, 10.0));
    }

    #[test]
    fn centered() {
        let outer = Bounds::new(0.0, 0.0, 100.0, 100.0);
        let inner = apply_gravity(outer, Margins::default(), 40.0, 20.0, Gravity::CENTER);
        assert_eq!(inner.x, 30.0);
        assert_eq!(inner.y, 40.0);
    }

    #[test]
    fn bottom_right() {
        let outer = Bounds::new(0.0, 0.0, 100.0, 100.0);
        let gravity = Gravity::new(HAlign::Right, VAlign::Bottom);
        let inner = apply_gravity(outer, Margins::default(), 40.0, 20.0, gravity);
        assert_eq!(inner.x, 60.0);
        assert_eq!(inner.y, 80.0);
    }
}
