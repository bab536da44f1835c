//! Box layout: block stacking with margins and padding, list indentation and
//! bullets, and greedy line breaking of inline content.
//!
//! Text measurement is injected through [`TextMeasurer`] so the geometry does
//! not depend on any particular font stack.

pub mod boxes;
pub mod geometry;
pub mod layout;
pub mod metrics;
pub mod values;

pub use boxes::{BoxKind, LayoutBox, Viewport};
pub use geometry::{Edges, LayoutRect};
pub use layout::{
    BLOCK_TAGS, BULLET, BULLET_GAP, DEFAULT_FONT_SIZE, HIDDEN_TAGS, INLINE_TAGS, LIST_INDENT,
    LayoutEngine, PAGE_PADDING,
};
pub use metrics::{FixedWidthMetrics, TextMeasurer, line_height};
