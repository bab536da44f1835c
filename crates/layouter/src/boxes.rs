use crate::geometry::LayoutRect;
use core::iter;
use html::NodeId;
use style_engine::ComputedStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoxKind {
    /// The page box; spans the viewport width.
    Root,
    /// An element in block flow.
    Block,
    /// Wrapper for an inline-level node sitting directly in block flow.
    InlineRun,
    /// A single word, inter-word space or list bullet.
    Text(String),
    /// An `img` element placed on a line.
    Image,
}

/// One node of the geometry tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutBox {
    pub kind: BoxKind,
    /// The DOM node this box was generated for. Words point at their text
    /// node and bullets at their `li`.
    pub node: NodeId,
    pub style: ComputedStyle,
    pub rect: LayoutRect,
    pub children: Vec<LayoutBox>,
}

impl LayoutBox {
    pub const fn new(kind: BoxKind, node: NodeId, style: ComputedStyle, rect: LayoutRect) -> Self {
        Self {
            kind,
            node,
            style,
            rect,
            children: Vec::new(),
        }
    }

    /// Text of a word or bullet box.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            BoxKind::Text(text) => Some(text),
            BoxKind::Root | BoxKind::Block | BoxKind::InlineRun | BoxKind::Image => None,
        }
    }

    /// This box and all of its descendants in paint order.
    pub fn walk(&self) -> impl Iterator<Item = &Self> {
        let mut stack = vec![self];
        iter::from_fn(move || {
            let current = stack.pop()?;
            stack.extend(current.children.iter().rev());
            Some(current)
        })
    }
}
