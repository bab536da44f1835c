//! Block flow.
//!
//! Block children stack vertically at a cursor. A block with any
//! inline-level descendant hands its whole content to the inline pass instead
//! of recursing.

mod inline;

use crate::boxes::{BoxKind, LayoutBox, Viewport};
use crate::geometry::{Edges, LayoutRect};
use crate::metrics::TextMeasurer;
use crate::values::{length_or, parse_box_shorthand, parse_length};
use css::Origin;
use html::{Document, NodeId, NodeKind};
use log::debug;
use style_engine::{ComputedStyle, StyledNode};

pub const BLOCK_TAGS: [&str; 19] = [
    "html", "body", "div", "section", "article", "header", "footer", "nav", "main", "p", "h1",
    "h2", "h3", "h4", "h5", "h6", "ul", "ol", "li",
];

pub const INLINE_TAGS: [&str; 10] = [
    "span", "a", "b", "i", "em", "strong", "small", "code", "br", "img",
];

/// Elements that generate no boxes at all.
pub const HIDDEN_TAGS: [&str; 6] = ["head", "title", "script", "style", "meta", "link"];

pub const DEFAULT_FONT_SIZE: i32 = 16;
pub const PAGE_PADDING: i32 = 14;
pub const LIST_INDENT: i32 = 26;
pub const BULLET: &str = "•";
pub const BULLET_GAP: i32 = 10;

const MIN_BLOCK_WIDTH: i32 = 80;
const MIN_CONTENT_WIDTH: i32 = 50;

/// (top, bottom) margins used when the style leaves a side at zero.
const DEFAULT_MARGINS: [(&str, (i32, i32)); 7] = [
    ("p", (10, 10)),
    ("h1", (18, 12)),
    ("h2", (16, 10)),
    ("h3", (14, 8)),
    ("li", (2, 2)),
    ("ul", (6, 6)),
    ("ol", (6, 6)),
];

const DEFAULT_FONT_SIZES: [(&str, i32); 5] =
    [("h1", 32), ("h2", 26), ("h3", 22), ("p", 16), ("li", 16)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Display {
    Block,
    Inline,
    None,
}

/// Horizontal extent available to a run of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Column {
    x: i32,
    width: i32,
}

pub struct LayoutEngine<'doc> {
    doc: &'doc Document,
    measurer: &'doc dyn TextMeasurer,
    viewport: Viewport,
}

impl<'doc> LayoutEngine<'doc> {
    pub fn new(doc: &'doc Document, measurer: &'doc dyn TextMeasurer, viewport: Viewport) -> Self {
        Self {
            doc,
            measurer,
            viewport,
        }
    }

    /// Lay out a styled tree built from this engine's document.
    pub fn layout(&self, styled: &StyledNode) -> LayoutBox {
        let mut root = LayoutBox::new(
            BoxKind::Root,
            styled.node,
            styled.style.clone(),
            LayoutRect::new(0, 0, self.viewport.width, 0),
        );
        let column = Column {
            x: PAGE_PADDING,
            width: self.viewport.width - 2 * PAGE_PADDING,
        };
        let end = self.layout_block_children(&mut root, &styled.children, column, PAGE_PADDING, 0);
        root.rect.height = self.viewport.height.max(end.saturating_add(PAGE_PADDING));

        debug!(
            "Laid out {} boxes at {}x{}; document height {}",
            root.walk().count(),
            self.viewport.width,
            self.viewport.height,
            root.rect.height
        );
        root
    }

    /// Stack `children` starting at `y` and return the cursor below the last.
    fn layout_block_children(
        &self,
        parent: &mut LayoutBox,
        children: &[StyledNode],
        column: Column,
        y: i32,
        list_level: i32,
    ) -> i32 {
        let mut cursor_y = y;
        for child in children {
            match self.display(child.node) {
                Display::None => {}
                Display::Block => {
                    cursor_y = self.layout_block(parent, child, column, cursor_y, list_level);
                }
                Display::Inline => {
                    let mut run = LayoutBox::new(
                        BoxKind::InlineRun,
                        child.node,
                        child.style.clone(),
                        LayoutRect::new(column.x, cursor_y, column.width, 0),
                    );
                    let tag = self.tag(child.node);
                    run.rect.height = self.layout_inline(&mut run, child, column, cursor_y, tag);
                    cursor_y = cursor_y.saturating_add(run.rect.height);
                    parent.children.push(run);
                }
            }
        }
        cursor_y
    }

    fn layout_block(
        &self,
        parent: &mut LayoutBox,
        child: &StyledNode,
        column: Column,
        y: i32,
        list_level: i32,
    ) -> i32 {
        let tag = self.tag(child.node);
        let margin = margins(tag, &child.style);
        let padding = paddings(&child.style);

        let top = y.saturating_add(margin.top);
        let level = if matches!(tag, "ul" | "ol") {
            list_level + 1
        } else {
            list_level
        };
        let indent = LIST_INDENT.saturating_mul(list_level);
        let box_x = column.x.saturating_add(indent).saturating_add(margin.left);
        let box_width = column
            .width
            .saturating_sub(indent)
            .saturating_sub(margin.left)
            .saturating_sub(margin.right)
            .max(MIN_BLOCK_WIDTH);
        let mut block = LayoutBox::new(
            BoxKind::Block,
            child.node,
            child.style.clone(),
            LayoutRect::new(box_x, top, box_width, 0),
        );

        let content_y = top.saturating_add(padding.top);
        let mut content = Column {
            x: box_x.saturating_add(padding.left),
            width: box_width
                .saturating_sub(padding.left)
                .saturating_sub(padding.right)
                .max(MIN_CONTENT_WIDTH),
        };

        if tag == "li" {
            let font_size = self.font_size(tag, child);
            let bullet_width = self.measurer.measure(BULLET, font_size);
            block.children.push(LayoutBox::new(
                BoxKind::Text(BULLET.to_owned()),
                child.node,
                with_font_size(&child.style, font_size),
                LayoutRect::new(
                    content.x,
                    content_y,
                    bullet_width,
                    self.measurer.line_height(font_size),
                ),
            ));
            content = Column {
                x: content.x.saturating_add(bullet_width + BULLET_GAP),
                width: content
                    .width
                    .saturating_sub(bullet_width + BULLET_GAP)
                    .max(MIN_CONTENT_WIDTH),
            };
        }

        let inner_height = if self.contains_inline(child) {
            self.layout_inline(&mut block, child, content, content_y, tag)
        } else {
            let end = self.layout_block_children(&mut block, &child.children, content, content_y, level);
            end.saturating_sub(content_y).max(0)
        };

        block.rect.height = padding
            .top
            .saturating_add(inner_height)
            .saturating_add(padding.bottom);
        let next = top
            .saturating_add(block.rect.height)
            .saturating_add(margin.bottom);
        parent.children.push(block);
        next
    }

    fn tag(&self, node: NodeId) -> &'doc str {
        self.doc.tag(node).unwrap_or_default()
    }

    fn display(&self, node: NodeId) -> Display {
        match self.doc.kind(node) {
            Some(NodeKind::Text(_)) => Display::Inline,
            Some(NodeKind::Element(element)) => {
                let tag = element.tag.as_str();
                if HIDDEN_TAGS.contains(&tag) {
                    Display::None
                } else if INLINE_TAGS.contains(&tag) && !BLOCK_TAGS.contains(&tag) {
                    Display::Inline
                } else {
                    Display::Block
                }
            }
            None => Display::None,
        }
    }

    /// Whether anything rendered below `styled` is inline-level. Such a block
    /// flows all of its content inline, flattening nested blocks. Hidden
    /// subtrees are not searched.
    fn contains_inline(&self, styled: &StyledNode) -> bool {
        let mut stack: Vec<&StyledNode> = styled.children.iter().collect();
        while let Some(node) = stack.pop() {
            match self.display(node.node) {
                Display::Inline => return true,
                Display::Block => stack.extend(node.children.iter()),
                Display::None => {}
            }
        }
        false
    }

    /// An authored `font-size` wins; a bare user-agent default defers to the
    /// per-tag table.
    fn font_size(&self, tag: &str, styled: &StyledNode) -> i32 {
        let authored = styled
            .style
            .get("font-size")
            .filter(|_| styled.style.origin("font-size") == Some(Origin::Author))
            .and_then(parse_length);
        authored
            .unwrap_or_else(|| default_font_size(tag))
            .max(1)
    }
}

fn default_font_size(tag: &str) -> i32 {
    DEFAULT_FONT_SIZES
        .iter()
        .find(|(name, _)| *name == tag)
        .map_or(DEFAULT_FONT_SIZE, |(_, size)| *size)
}

/// Shorthand first; a zero vertical side falls back to the tag default;
/// longhands override either.
fn margins(tag: &str, style: &ComputedStyle) -> Edges {
    let (default_top, default_bottom) = DEFAULT_MARGINS
        .iter()
        .find(|(name, _)| *name == tag)
        .map_or((0, 0), |(_, margins)| *margins);
    let shorthand = parse_box_shorthand(style.get("margin"));
    let or_default = |side: i32, fallback: i32| if side == 0 { fallback } else { side };
    Edges {
        top: length_or(style.get("margin-top"), or_default(shorthand.top, default_top)),
        right: length_or(style.get("margin-right"), shorthand.right),
        bottom: length_or(style.get("margin-bottom"), or_default(shorthand.bottom, default_bottom)),
        left: length_or(style.get("margin-left"), shorthand.left),
    }
}

fn paddings(style: &ComputedStyle) -> Edges {
    let shorthand = parse_box_shorthand(style.get("padding"));
    Edges {
        top: length_or(style.get("padding-top"), shorthand.top),
        right: length_or(style.get("padding-right"), shorthand.right),
        bottom: length_or(style.get("padding-bottom"), shorthand.bottom),
        left: length_or(style.get("padding-left"), shorthand.left),
    }
}

/// `style` with `font-size` pinned to the size the text was measured at.
fn with_font_size(style: &ComputedStyle, font_size: i32) -> ComputedStyle {
    let mut sized = style.clone();
    let origin = style.origin("font-size").unwrap_or_default();
    sized.set("font-size", font_size.to_string(), origin);
    sized
}
