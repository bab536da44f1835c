//! Simple selectors and the single-hop descendant combinator.

use core::ops::Add;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum SimpleSelector {
    /// Lower-cased tag name.
    Type(String),
    Id(String),
    Class(String),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Specificity(pub u32);

impl Specificity {
    pub const ID: Self = Self(100);
    pub const CLASS: Self = Self(10);
    pub const TYPE: Self = Self(1);
}

impl Add for Specificity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl SimpleSelector {
    /// Parse `#id`, `.class` or a bare tag identifier.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if let Some(id) = token.strip_prefix('#').filter(|rest| !rest.is_empty()) {
            return Some(Self::Id(id.to_owned()));
        }
        if let Some(class) = token.strip_prefix('.').filter(|rest| !rest.is_empty()) {
            return Some(Self::Class(class.to_owned()));
        }
        let tag = token.to_lowercase();
        is_identifier(&tag).then_some(Self::Type(tag))
    }

    pub const fn specificity(&self) -> Specificity {
        match self {
            Self::Id(_) => Specificity::ID,
            Self::Class(_) => Specificity::CLASS,
            Self::Type(_) => Specificity::TYPE,
        }
    }
}

/// A target simple selector with an optional ancestor that must match some
/// strict ancestor of the element, at any distance.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Selector {
    pub target: SimpleSelector,
    pub ancestor: Option<SimpleSelector>,
}

impl Selector {
    /// Parse one or two whitespace-separated simple selectors. Longer chains
    /// and anything else are rejected.
    pub fn parse(text: &str) -> Option<Self> {
        let parts: Vec<&str> = text.split_whitespace().collect();
        match parts.as_slice() {
            [target] => Some(Self {
                target: SimpleSelector::parse(target)?,
                ancestor: None,
            }),
            [ancestor, target] => Some(Self {
                target: SimpleSelector::parse(target)?,
                ancestor: Some(SimpleSelector::parse(ancestor)?),
            }),
            _ => None,
        }
    }

    pub fn specificity(&self) -> Specificity {
        let ancestor = self
            .ancestor
            .as_ref()
            .map_or_else(Specificity::default, SimpleSelector::specificity);
        self.target.specificity() + ancestor
    }
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|first| first == '_' || first.is_alphabetic())
        && chars.all(|ch| ch == '_' || ch.is_alphanumeric())
}
