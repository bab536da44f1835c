//! Markup parsing and the DOM tree it produces.

#![allow(
    clippy::min_ident_chars,
    reason = "Short variable names acceptable in parsing context"
)]

pub mod dom;
pub mod parser;

pub use dom::{Document, ElementData, NodeId, NodeKind};
pub use parser::{MAX_OPEN_ELEMENTS, RAW_TEXT_TAGS, VOID_TAGS, parse};
