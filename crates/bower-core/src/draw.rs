//! The draw-context capability the UI core consumes.
//!
//! The core never calls a concrete graphics API; everything it paints goes
//! through [`DrawContext`]. Backends (GL, D3D, test recorders) implement this
//! trait.

use geom::Bounds;

use crate::focus::FocusState;

/// A solid fill. Color is packed ABGR, matching the original engine's
/// convention; 0 alpha means "draw nothing".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Drawable {
    /// Packed color.
    pub color: u32,
}

impl Drawable {
    /// Construct a solid fill.
    pub fn new(color: u32) -> Self {
        Self { color }
    }

    /// Does this drawable paint anything?
    pub fn is_visible(&self) -> bool {
        self.color & 0xFF00_0000 != 0
    }
}

/// Colors and metrics for widget chrome.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Plain item background.
    pub item: Drawable,
    /// Pressed / active item background.
    pub item_down: Drawable,
    /// Focus highlight.
    pub item_focus: Drawable,
    /// Disabled item background.
    pub item_disabled: Drawable,
    /// Body text color.
    pub text: u32,
    /// Popup box background.
    pub popup_bg: Drawable,
    /// Scrollbar thumb fill.
    pub scrollbar: Drawable,
    /// Default height for list-style items.
    pub item_height: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            item: Drawable::new(0xFF80_4040),
            item_down: Drawable::new(0xFFA0_6060),
            item_focus: Drawable::new(0xFFC0_8080),
            item_disabled: Drawable::new(0x8060_6060),
            text: 0xFFFF_FFFF,
            popup_bg: Drawable::new(0xFF30_3030),
            scrollbar: Drawable::new(0x80FF_FFFF),
            item_height: 64.0,
        }
    }
}

/// Abstract draw surface for one frame.
pub trait DrawContext {
    /// Start a frame.
    fn begin(&mut self);
    /// Finish a frame.
    fn end(&mut self);
    /// Submit any batched drawing.
    fn flush(&mut self);

    /// Fill a rectangle.
    fn fill_rect(&mut self, drawable: Drawable, bounds: Bounds);
    /// Draw drop-shadow chrome around a box.
    fn draw_drop_shadow(&mut self, bounds: Bounds);
    /// Draw a text run inside `bounds`.
    fn draw_text(&mut self, text: &str, bounds: Bounds, color: u32);

    /// Push a scissor rectangle; subsequent drawing is clipped to it.
    fn push_scissor(&mut self, bounds: Bounds);
    /// Pop the top scissor rectangle.
    fn pop_scissor(&mut self);
    /// The current scissor rectangle (the full screen when none is pushed).
    fn scissor_bounds(&self) -> Bounds;

    /// Measure a text run, returning (width, height).
    fn measure_text(&self, text: &str) -> (f32, f32);
    /// Screen size in device-independent pixels.
    fn screen_size(&self) -> (f32, f32);
    /// Widget chrome colors and metrics.
    fn theme(&self) -> &Theme;
}

/// Everything a view needs during its draw call.
pub struct UiContext<'a> {
    /// The frame's draw surface.
    pub dc: &'a mut dyn DrawContext,
    /// Focus state, for highlight rendering.
    pub focus: &'a FocusState,
    /// False while rendering a layer beneath a transparent overlay; focus
    /// highlights and pressed states must not paint.
    pub enabled: bool,
}
