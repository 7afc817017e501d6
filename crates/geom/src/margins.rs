/// Per-edge spacing applied around a view within its parent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Margins {
    /// Space to the left of the view.
    pub left: f32,
    /// Space above the view.
    pub top: f32,
    /// Space to the right of the view.
    pub right: f32,
    /// Space below the view.
    pub bottom: f32,
}

impl Margins {
    /// Construct margins from all four edges.
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The same spacing on every edge.
    pub fn uniform(v: f32) -> Self {
        Self::new(v, v, v, v)
    }

    /// Symmetric horizontal/vertical spacing.
    pub fn symmetric(horiz: f32, vert: f32) -> Self {
        Self::new(horiz, vert, horiz, vert)
    }

    /// Total horizontal spacing.
    pub fn horiz(&self) -> f32 {
        self.left + self.right
    }

    /// Total vertical spacing.
    pub fn vert(&self) -> f32 {
        self.top + self.bottom
    }
}
