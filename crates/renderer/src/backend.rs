//! The drawing-surface seam.
//!
//! Whatever owns the window (or a test) implements [`RenderTarget`]. All
//! coordinates are viewport pixels: the caller has already subtracted the
//! scroll offset.

use crate::color::Rgba;
use crate::display_list::ImageHandle;
use serde::Serialize;

/// Inclusive pixel bounds of something that was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bounds {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Bounds {
    #[inline]
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Bounds of a `width` by `height` box at `(x, y)`.
    #[inline]
    pub const fn from_rect(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x.saturating_add(width), y.saturating_add(height))
    }

    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        self.x1 <= x && x <= self.x2 && self.y1 <= y && y <= self.y2
    }
}

pub trait RenderTarget {
    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Rgba);

    /// Draw `text` with its top-left corner at `(x, y)` and report where it
    /// landed, if the surface can tell.
    fn draw_text(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        font_size: i32,
        color: Rgba,
        underline: bool,
    ) -> Option<Bounds>;

    /// Draw a decoded image, or a placeholder when `image` is `None`.
    fn draw_image(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        image: Option<&ImageHandle>,
    ) -> Option<Bounds>;
}
