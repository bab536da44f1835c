//! Layout tree to display list.

use crate::color::{BLACK, parse_color, visible_color};
use crate::display_list::{DisplayItem, DisplayList, ImageHandle};
use html::{Document, NodeId};
use layouter::values::parse_length;
use layouter::{BoxKind, DEFAULT_FONT_SIZE, LayoutBox};
use log::debug;

/// Supplies decoded images by their `src` attribute, as written in the page.
pub trait ImageProvider {
    fn provide(&mut self, src: &str) -> Option<ImageHandle>;
}

impl<F> ImageProvider for F
where
    F: FnMut(&str) -> Option<ImageHandle>,
{
    fn provide(&mut self, src: &str) -> Option<ImageHandle> {
        self(src)
    }
}

/// Every image renders as a placeholder.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImages;

impl ImageProvider for NoImages {
    fn provide(&mut self, _src: &str) -> Option<ImageHandle> {
        None
    }
}

pub struct Painter<'doc, 'img> {
    doc: &'doc Document,
    images: &'img mut dyn ImageProvider,
}

impl<'doc, 'img> Painter<'doc, 'img> {
    pub fn new(doc: &'doc Document, images: &'img mut dyn ImageProvider) -> Self {
        Self { doc, images }
    }

    /// Walk the tree parent-first so backgrounds land beneath content.
    pub fn paint(&mut self, root: &LayoutBox) -> DisplayList {
        let mut list = DisplayList::new();
        for layout_box in root.walk() {
            self.paint_box(layout_box, &mut list);
        }
        debug!("Painted {} display items", list.len());
        list
    }

    fn paint_box(&mut self, layout_box: &LayoutBox, list: &mut DisplayList) {
        let rect = layout_box.rect;
        match &layout_box.kind {
            BoxKind::Text(text) => {
                if text.trim().is_empty() {
                    return;
                }
                let font_size = layout_box
                    .style
                    .get("font-size")
                    .and_then(parse_length)
                    .unwrap_or(DEFAULT_FONT_SIZE);
                let color = layout_box
                    .style
                    .get("color")
                    .and_then(parse_color)
                    .unwrap_or(BLACK);
                list.push(DisplayItem::Text {
                    x: rect.x,
                    y: rect.y,
                    text: text.clone(),
                    font_size,
                    color,
                    href: self.link_target(layout_box.node),
                });
            }
            BoxKind::Root | BoxKind::Block | BoxKind::InlineRun | BoxKind::Image => {
                if self.doc.element(layout_box.node).is_none() {
                    return;
                }
                if let Some(fill) = background(layout_box) {
                    list.push(DisplayItem::Rect {
                        x: rect.x,
                        y: rect.y,
                        width: rect.width,
                        height: rect.height,
                        fill,
                    });
                }
                if layout_box.kind == BoxKind::Image {
                    let src = self
                        .doc
                        .attr(layout_box.node, "src")
                        .unwrap_or_default()
                        .trim()
                        .to_owned();
                    let image = if src.is_empty() {
                        None
                    } else {
                        self.images.provide(&src)
                    };
                    list.push(DisplayItem::Image {
                        x: rect.x,
                        y: rect.y,
                        width: rect.width,
                        height: rect.height,
                        href: self.link_target(layout_box.node),
                        src,
                        image,
                    });
                }
            }
        }
    }

    /// `href` of the nearest enclosing anchor, walking the DOM rather than
    /// the layout tree. The first anchor found decides, even without `href`.
    fn link_target(&self, node: NodeId) -> Option<String> {
        let anchor = self.doc.closest_ancestor(node, "a")?;
        self.doc.attr(anchor, "href").map(str::to_owned)
    }
}

/// `background-color`, falling back to `background` when that is unset or
/// invisible.
fn background(layout_box: &LayoutBox) -> Option<[f32; 4]> {
    let style = &layout_box.style;
    style
        .get("background-color")
        .and_then(visible_color)
        .or_else(|| style.get("background").and_then(visible_color))
}
