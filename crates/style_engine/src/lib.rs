//! The cascade: matches stylesheet rules against the DOM and produces a
//! styled tree that mirrors it node for node.

mod computed_style;
mod matching;

pub use computed_style::{ComputedStyle, INHERITED_PROPERTIES, PropertyValue, USER_AGENT_DEFAULTS};
pub use matching::{matches, matches_simple};

use css::{Origin, Rule, Stylesheet, parse_inline_style};
use html::{Document, NodeId, NodeKind};
use log::debug;

/// A DOM node paired with its resolved style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledNode {
    pub node: NodeId,
    pub style: ComputedStyle,
    pub children: Vec<StyledNode>,
}

impl StyledNode {
    /// Number of nodes in this subtree, itself included.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Self::count).sum::<usize>()
    }
}

pub struct StyleEngine<'sheet> {
    sheet: &'sheet Stylesheet,
}

impl<'sheet> StyleEngine<'sheet> {
    pub const fn new(sheet: &'sheet Stylesheet) -> Self {
        Self { sheet }
    }

    /// Style the whole document starting at its root.
    pub fn style(&self, doc: &Document) -> StyledNode {
        let styled = self.style_node(doc, doc.root(), None);
        debug!(
            "Styled {} nodes against {} rules",
            styled.count(),
            self.sheet.rules.len()
        );
        styled
    }

    fn style_node(&self, doc: &Document, node: NodeId, parent: Option<&ComputedStyle>) -> StyledNode {
        let mut style = ComputedStyle::inherited_from(parent);

        let Some(NodeKind::Element(element)) = doc.kind(node) else {
            return StyledNode {
                node,
                style,
                children: Vec::new(),
            };
        };

        for rule in self.matching_rules(doc, node) {
            style.apply(&rule.declarations, Origin::Author);
        }
        if let Some(inline) = element.attr("style") {
            style.apply(&parse_inline_style(inline), Origin::Author);
        }

        let children = doc
            .children(node)
            .map(|child| self.style_node(doc, child, Some(&style)))
            .collect();
        StyledNode {
            node,
            style,
            children,
        }
    }

    /// Matching rules in application order: ascending specificity, then
    /// ascending source order.
    fn matching_rules(&self, doc: &Document, node: NodeId) -> Vec<&'sheet Rule> {
        let mut matched: Vec<&Rule> = self
            .sheet
            .rules
            .iter()
            .filter(|rule| matches(doc, node, &rule.selector))
            .collect();
        matched.sort_by_key(|rule| (rule.selector.specificity(), rule.source_order));
        matched
    }
}
