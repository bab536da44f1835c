//! Stylesheet parsing: comment stripping, selector lists, declaration blocks
//! and inline `style` attributes.

pub mod parser;
pub mod selector;
pub mod types;

pub use parser::{parse_declarations, parse_inline_style, parse_stylesheet};
pub use selector::{Selector, SimpleSelector, Specificity};
pub use types::{Declaration, Declarations, Origin, Rule, Stylesheet};
