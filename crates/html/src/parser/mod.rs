//! Tolerant markup parser.
//!
//! Tree construction is an explicit state machine over an open-element
//! stack: opening tags push, closing tags pop back to the nearest element
//! with the same name, and whatever is still open at end of input is simply
//! left in place. Nothing in here ever fails.

mod tokenizer;

use crate::dom::{Document, ElementData, NodeId};
use log::debug;
use tokenizer::{TagToken, Token, find_ascii_case_insensitive, next_token, parse_attributes};

/// Elements that never hold children.
pub const VOID_TAGS: [&str; 6] = ["br", "img", "meta", "link", "input", "hr"];

/// Elements whose content runs verbatim to the matching closing tag.
pub const RAW_TEXT_TAGS: [&str; 2] = ["script", "style"];

/// Deepest nesting the parser will open. Elements past this depth are still
/// added to the tree but are not opened, so their content lands beside them.
pub const MAX_OPEN_ELEMENTS: usize = 256;

/// Opening one of these implicitly closes an open element of the same name,
/// unless one of the listed boundary elements sits in between.
const IMPLIED_END: [(&str, &[&str]); 2] = [
    ("li", &["ul", "ol"]),
    ("p", &["div", "li", "body", "section", "article", "header", "footer", "nav", "main"]),
];

/// Parse `source` into a document rooted at a synthetic `html` element.
pub fn parse(source: &str) -> Document {
    let document = TreeBuilder::new(source).run();
    debug!("Parsed {} DOM nodes from {} bytes", document.len(), source.len());
    document
}

struct TreeBuilder<'src> {
    source: &'src str,
    pos: usize,
    document: Document,
    open: Vec<NodeId>,
}

impl<'src> TreeBuilder<'src> {
    fn new(source: &'src str) -> Self {
        let document = Document::new();
        let open = vec![document.root()];
        Self {
            source,
            pos: 0,
            document,
            open,
        }
    }

    fn run(mut self) -> Document {
        let source = self.source;
        while let Some(token) = next_token(source, self.pos) {
            let (start, end) = token.span();
            if start > self.pos {
                self.emit_text(&source[self.pos..start]);
            }
            self.pos = end;
            match token {
                Token::Skipped { .. } => {}
                Token::Tag(tag) if tag.closing => self.close(&tag.name),
                Token::Tag(tag) => self.open_element(&tag),
            }
        }
        if self.pos < source.len() {
            self.emit_text(&source[self.pos..]);
        }
        self.document
    }

    fn current(&self) -> NodeId {
        self.open
            .last()
            .copied()
            .unwrap_or_else(|| self.document.root())
    }

    fn emit_text(&mut self, text: &str) {
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if !collapsed.is_empty() {
            let parent = self.current();
            self.document.append_text(parent, collapsed);
        }
    }

    fn open_element(&mut self, tag: &TagToken<'_>) {
        self.close_implied(&tag.name);

        let mut data = ElementData::new(tag.name.clone());
        for (name, value) in parse_attributes(tag.attrs) {
            data.set_attr(name, value);
        }
        let parent = self.current();
        let node = self.document.append_element(parent, data);

        let name = tag.name.as_str();
        if VOID_TAGS.contains(&name) {
            return;
        }
        if RAW_TEXT_TAGS.contains(&name) {
            self.consume_raw_text(node, name);
            return;
        }
        if self.open.len() >= MAX_OPEN_ELEMENTS {
            debug!("Nesting limit reached; <{name}> left unopened");
            return;
        }
        self.open.push(node);
    }

    /// Swallow everything up to `</name>` (any case) as a single text child.
    fn consume_raw_text(&mut self, node: NodeId, name: &str) {
        let source = self.source;
        let close = format!("</{name}>");
        let (raw, next) = match find_ascii_case_insensitive(source, self.pos, &close) {
            Some(idx) => (&source[self.pos..idx], idx + close.len()),
            None => (&source[self.pos..], source.len()),
        };
        if !raw.is_empty() {
            self.document.append_text(node, raw);
        }
        self.pos = next;
    }

    /// Pop to the nearest open element named `name`, discarding anything
    /// opened after it. The root is never popped.
    fn close(&mut self, name: &str) {
        while self.open.len() > 1 && !self.top_is(name) {
            self.open.pop();
        }
        if self.open.len() > 1 {
            self.open.pop();
        }
    }

    fn top_is(&self, name: &str) -> bool {
        self.document.tag(self.current()) == Some(name)
    }

    fn close_implied(&mut self, name: &str) {
        let Some((_, boundaries)) = IMPLIED_END.iter().find(|(tag, _)| *tag == name) else {
            return;
        };
        for depth in (1..self.open.len()).rev() {
            let Some(open_tag) = self.document.tag(self.open[depth]) else {
                continue;
            };
            if open_tag == name {
                self.open.truncate(depth);
                return;
            }
            if boundaries.contains(&open_tag) {
                return;
            }
        }
    }
}
