use css::{Declarations, Origin};
use std::collections::BTreeMap;

/// Values every element starts from before inheritance and rules apply.
pub const USER_AGENT_DEFAULTS: [(&str, &str); 5] = [
    ("font-size", "16"),
    ("color", "black"),
    ("background-color", "transparent"),
    ("margin", "0"),
    ("padding", "0"),
];

/// Properties copied from the parent's resolved style.
pub const INHERITED_PROPERTIES: [&str; 2] = ["font-size", "color"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyValue {
    pub value: String,
    pub origin: Origin,
}

/// The final property map of one styled node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComputedStyle {
    values: BTreeMap<String, PropertyValue>,
}

impl ComputedStyle {
    /// A style holding only the user-agent defaults.
    pub fn user_agent_defaults() -> Self {
        let mut style = Self::default();
        for (name, value) in USER_AGENT_DEFAULTS {
            style.set(name, value, Origin::UserAgent);
        }
        style
    }

    /// Defaults overlaid with the inheritable subset of `parent`. Inherited
    /// values keep the origin they had on the parent.
    pub fn inherited_from(parent: Option<&Self>) -> Self {
        let mut style = Self::user_agent_defaults();
        let Some(parent) = parent else {
            return style;
        };
        for name in INHERITED_PROPERTIES {
            if let Some(inherited) = parent.values.get(name) {
                style.values.insert(name.to_owned(), inherited.clone());
            }
        }
        style
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|prop| prop.value.as_str())
    }

    pub fn origin(&self, name: &str) -> Option<Origin> {
        self.values.get(name).map(|prop| prop.origin)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>, origin: Origin) {
        self.values.insert(
            name.into(),
            PropertyValue {
                value: value.into(),
                origin,
            },
        );
    }

    /// Overlay a declaration block; each declaration replaces any earlier value.
    pub fn apply(&mut self, declarations: &Declarations, origin: Origin) {
        for decl in declarations {
            self.set(decl.name.clone(), decl.value.clone(), origin);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(name, prop)| (name.as_str(), prop.value.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inheritance_keeps_origin_and_resets_the_rest() {
        let mut parent = ComputedStyle::user_agent_defaults();
        parent.set("font-size", "24px", Origin::Author);
        parent.set("background-color", "red", Origin::Author);

        let child = ComputedStyle::inherited_from(Some(&parent));
        assert_eq!(child.get("font-size"), Some("24px"));
        assert_eq!(child.origin("font-size"), Some(Origin::Author));
        assert_eq!(child.get("background-color"), Some("transparent"));
        assert_eq!(child.origin("color"), Some(Origin::UserAgent));
    }
}
