//! Rule extraction.
//!
//! The grammar is deliberately small: `selector-list { declarations }`
//! repeated, with no at-rules, nesting or escapes. Anything that does not fit
//! is dropped and parsing continues after the next `}`.

use crate::selector::Selector;
use crate::types::{Declarations, Rule, Stylesheet};
use log::{debug, warn};

/// Parse a whole stylesheet. Rules are numbered from zero in source order,
/// one number per selector that survives parsing.
pub fn parse_stylesheet(source: &str) -> Stylesheet {
    let stripped = strip_comments(source);
    let mut rest = stripped.as_str();
    let mut sheet = Stylesheet::default();
    let mut order: u32 = 0;

    loop {
        rest = rest.trim();
        let Some((selector_text, after_open)) = rest.split_once('{') else {
            break;
        };
        let Some((block, after_close)) = after_open.split_once('}') else {
            break;
        };
        rest = after_close;

        let declarations = parse_declarations(block);
        for text in selector_text.split(',').map(str::trim).filter(|text| !text.is_empty()) {
            let Some(selector) = Selector::parse(text) else {
                warn!("Skipping unsupported selector `{text}`");
                continue;
            };
            if declarations.is_empty() {
                continue;
            }
            sheet.rules.push(Rule {
                selector,
                declarations: declarations.clone(),
                source_order: order,
            });
            order = order.saturating_add(1);
        }
    }

    debug!("Parsed {} CSS rules", sheet.rules.len());
    sheet
}

/// Parse `name: value; name: value`. Names are lower-cased, values trimmed,
/// and pieces without a `:` are ignored.
pub fn parse_declarations(block: &str) -> Declarations {
    let mut out = Declarations::new();
    for part in block.split(';').map(str::trim) {
        if let Some((name, value)) = part.split_once(':') {
            out.set(name.trim().to_lowercase(), value.trim());
        }
    }
    out
}

/// The contents of a `style="..."` attribute.
#[inline]
pub fn parse_inline_style(style: &str) -> Declarations {
    parse_declarations(style)
}

/// Remove `/* ... */` comments. An unterminated comment swallows the rest of
/// the input.
fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::strip_comments;

    #[test]
    fn comments() {
        assert_eq!(strip_comments("a/* x */b/**/c"), "abc");
        assert_eq!(strip_comments("a /* never closed { }"), "a ");
        assert_eq!(strip_comments("/*/ still open */x"), "x");
    }
}
