//! Inline flow: flatten a subtree into tokens, then break greedily into
//! lines of uniform height.

use super::{Column, HIDDEN_TAGS, LayoutEngine, with_font_size};
use crate::boxes::{BoxKind, LayoutBox};
use crate::geometry::LayoutRect;
use crate::values::length_or;
use core::mem;
use html::NodeKind;
use style_engine::StyledNode;

const DEFAULT_IMAGE_SIZE: i32 = 180;

enum Token<'tree> {
    Word(String, &'tree StyledNode),
    Space(&'tree StyledNode),
    Break,
    Image(&'tree StyledNode),
}

struct LineCursor {
    start_x: i32,
    max_x: i32,
    x: i32,
    y: i32,
    line_height: i32,
}

impl LineCursor {
    fn advance(&mut self, width: i32) {
        self.x = self.x.saturating_add(width);
    }

    fn at_line_start(&self) -> bool {
        self.x == self.start_x
    }

    fn overflows(&self, width: i32) -> bool {
        self.x.saturating_add(width) > self.max_x
    }

    fn new_line(&mut self) {
        self.x = self.start_x;
        self.y = self.y.saturating_add(self.line_height);
    }

    /// Break before an item that does not fit, unless the line is empty.
    fn fit(&mut self, width: i32) {
        if self.overflows(width) && !self.at_line_start() {
            self.new_line();
        }
    }
}

impl LayoutEngine<'_> {
    /// Place the inline content of `styled` into `parent` and return the
    /// height it used.
    pub(super) fn layout_inline(
        &self,
        parent: &mut LayoutBox,
        styled: &StyledNode,
        column: Column,
        y: i32,
        tag: &str,
    ) -> i32 {
        let font_size = self.font_size(tag, styled);
        let line_height = self.measurer.line_height(font_size);
        let mut line = LineCursor {
            start_x: column.x,
            max_x: column.x.saturating_add(column.width),
            x: column.x,
            y,
            line_height,
        };

        for token in self.tokens(styled) {
            match token {
                Token::Break => line.new_line(),
                Token::Space(origin) => {
                    if line.at_line_start() {
                        continue;
                    }
                    let width = self.measurer.measure(" ", font_size);
                    parent.children.push(LayoutBox::new(
                        BoxKind::Text(String::from(" ")),
                        origin.node,
                        with_font_size(&origin.style, font_size),
                        LayoutRect::new(line.x, line.y, width, line_height),
                    ));
                    line.advance(width);
                }
                Token::Word(text, origin) => {
                    let width = self.measurer.measure(&text, font_size);
                    line.fit(width);
                    parent.children.push(LayoutBox::new(
                        BoxKind::Text(text),
                        origin.node,
                        with_font_size(&origin.style, font_size),
                        LayoutRect::new(line.x, line.y, width, line_height),
                    ));
                    line.advance(width);
                }
                Token::Image(image) => {
                    let width = length_or(self.doc.attr(image.node, "width"), DEFAULT_IMAGE_SIZE);
                    let height = length_or(self.doc.attr(image.node, "height"), DEFAULT_IMAGE_SIZE);
                    line.fit(width);
                    parent.children.push(LayoutBox::new(
                        BoxKind::Image,
                        image.node,
                        image.style.clone(),
                        LayoutRect::new(line.x, line.y, width, height.max(line_height)),
                    ));
                    line.advance(width);
                }
            }
        }

        line_height.max(line.y.saturating_sub(y).saturating_add(line_height))
    }

    /// Depth-first token stream of everything under `root`.
    fn tokens<'tree>(&self, root: &'tree StyledNode) -> Vec<Token<'tree>> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            match self.doc.kind(current.node) {
                Some(NodeKind::Text(text)) => split_words(text, current, &mut out),
                Some(NodeKind::Element(element)) => match element.tag.as_str() {
                    "br" => out.push(Token::Break),
                    "img" => out.push(Token::Image(current)),
                    tag if HIDDEN_TAGS.contains(&tag) => {}
                    _ => stack.extend(current.children.iter().rev()),
                },
                None => {}
            }
        }
        out
    }
}

/// Every whitespace character becomes its own space token.
fn split_words<'tree>(text: &str, origin: &'tree StyledNode, out: &mut Vec<Token<'tree>>) {
    let mut word = String::new();
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !word.is_empty() {
                out.push(Token::Word(mem::take(&mut word), origin));
            }
            out.push(Token::Space(origin));
        } else {
            word.push(ch);
        }
    }
    if !word.is_empty() {
        out.push(Token::Word(word, origin));
    }
}
