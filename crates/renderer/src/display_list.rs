//! Display list primitives.

use crate::backend::{Bounds, RenderTarget};
use crate::color::{LINK_BLUE, Rgba};
use core::{fmt, slice};
use image::RgbaImage;
use serde::Serialize;
use std::sync::Arc;

/// A decoded image shared between the cache and the display lists that
/// reference it.
#[derive(Clone)]
pub struct ImageHandle(Arc<RgbaImage>);

impl ImageHandle {
    pub fn new(image: RgbaImage) -> Self {
        Self(Arc::new(image))
    }

    pub fn image(&self) -> &RgbaImage {
        &self.0
    }

    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }
}

impl fmt::Debug for ImageHandle {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "ImageHandle({}x{})", self.width(), self.height())
    }
}

impl PartialEq for ImageHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// One drawing operation, in document coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayItem {
    Rect {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        fill: Rgba,
    },
    Text {
        x: i32,
        y: i32,
        text: String,
        font_size: i32,
        color: Rgba,
        href: Option<String>,
    },
    Image {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        src: String,
        href: Option<String>,
        #[serde(skip)]
        image: Option<ImageHandle>,
    },
}

impl DisplayItem {
    /// Link target carried by text and images.
    pub fn href(&self) -> Option<&str> {
        match self {
            Self::Rect { .. } => None,
            Self::Text { href, .. } | Self::Image { href, .. } => href.as_deref(),
        }
    }

    /// Draw onto `target` shifted up by `scroll_y`. Link text is drawn blue
    /// and underlined. Rectangles never report bounds.
    pub fn draw(&self, target: &mut dyn RenderTarget, scroll_y: i32) -> Option<Bounds> {
        match self {
            Self::Rect {
                x,
                y,
                width,
                height,
                fill,
            } => {
                target.fill_rect(*x, y.saturating_sub(scroll_y), *width, *height, *fill);
                None
            }
            Self::Text {
                x,
                y,
                text,
                font_size,
                color,
                href,
            } => {
                let (color, underline) = if href.is_some() {
                    (LINK_BLUE, true)
                } else {
                    (*color, false)
                };
                target.draw_text(*x, y.saturating_sub(scroll_y), text, *font_size, color, underline)
            }
            Self::Image {
                x,
                y,
                width,
                height,
                image,
                ..
            } => target.draw_image(*x, y.saturating_sub(scroll_y), *width, *height, image.as_ref()),
        }
    }
}

/// Paint output in document order; later items cover earlier ones.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DisplayList {
    pub items: Vec<DisplayItem>,
}

impl DisplayList {
    #[inline]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[inline]
    pub fn push(&mut self, item: DisplayItem) {
        self.items.push(item);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, DisplayItem> {
        self.items.iter()
    }
}

impl<'list> IntoIterator for &'list DisplayList {
    type Item = &'list DisplayItem;
    type IntoIter = slice::Iter<'list, DisplayItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A clickable region recorded while rendering, in viewport coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HitBox {
    #[serde(flatten)]
    pub bounds: Bounds,
    pub href: String,
}
