use std::ops::{Add, Sub};

/// A point in device-independent pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// Construct a point from coordinates.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: Self) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl From<(f32, f32)> for Point {
    #[inline]
    fn from(v: (f32, f32)) -> Self {
        Self { x: v.0, y: v.1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic() {
        assert_eq!(Point::zero() + (1.0, 2.0).into(), (1.0, 2.0).into());
        assert_eq!(
            Point::new(3.0, 4.0) - Point::new(1.0, 1.0),
            (2.0, 3.0).into()
        );
    }

    #[test]
    fn distance() {
        assert_eq!(Point::zero().distance(Point::new(3.0, 4.0)), 5.0);
    }
}
