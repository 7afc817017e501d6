use super::{FocusDirection, Point};

/// An axis-aligned rectangle: origin plus size, in device-independent pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

impl Bounds {
    /// Construct a rectangle from origin and size.
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge.
    pub fn x2(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge.
    pub fn y2(&self) -> f32 {
        self.y + self.h
    }

    /// Horizontal center.
    pub fn center_x(&self) -> f32 {
        self.x + self.w * 0.5
    }

    /// Vertical center.
    pub fn center_y(&self) -> f32 {
        self.y + self.h * 0.5
    }

    /// Center point.
    pub fn center(&self) -> Point {
        Point::new(self.center_x(), self.center_y())
    }

    /// Does the rectangle contain the given point?
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x2() && y >= self.y && y < self.y2()
    }

    /// Do two rectangles overlap?
    pub fn intersects(&self, other: &Self) -> bool {
        self.x < other.x2() && self.x2() > other.x && self.y < other.y2() && self.y2() > other.y
    }

    /// The overlapping region, if any.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let x2 = self.x2().min(other.x2());
        let y2 = self.y2().min(other.y2());
        if x2 <= x || y2 <= y {
            return None;
        }
        Some(Self::new(x, y, x2 - x, y2 - y))
    }

    /// Anchor point used by directional focus search: the center of the edge
    /// facing the given direction. `Prev`/`Next` fall back to the rectangle
    /// center since they are not spatial.
    pub fn focus_anchor(&self, dir: FocusDirection) -> Point {
        match dir {
            FocusDirection::Left => Point::new(self.x, self.center_y()),
            FocusDirection::Right => Point::new(self.x2(), self.center_y()),
            FocusDirection::Up => Point::new(self.center_x(), self.y),
            FocusDirection::Down => Point::new(self.center_x(), self.y2()),
            FocusDirection::Prev | FocusDirection::Next => self.center(),
        }
    }
}
