use css::{Selector, SimpleSelector};
use html::{Document, ElementData, NodeId};

/// Whether `selector` matches the element at `node`. The ancestor part, when
/// present, may match any strict ancestor.
pub fn matches(doc: &Document, node: NodeId, selector: &Selector) -> bool {
    let Some(element) = doc.element(node) else {
        return false;
    };
    if !matches_simple(element, &selector.target) {
        return false;
    }
    let Some(ancestor) = &selector.ancestor else {
        return true;
    };
    doc.ancestors(node)
        .filter_map(|id| doc.element(id))
        .any(|data| matches_simple(data, ancestor))
}

pub fn matches_simple(element: &ElementData, simple: &SimpleSelector) -> bool {
    match simple {
        SimpleSelector::Type(tag) => element.tag.to_lowercase() == *tag,
        SimpleSelector::Id(id) => element.id() == Some(id.as_str()),
        SimpleSelector::Class(class) => element.has_class(class),
    }
}
