use crate::selector::Selector;
use core::{fmt, slice};

/// Where a resolved property value came from.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub enum Origin {
    /// Built-in defaults.
    #[default]
    UserAgent,
    /// Page stylesheets and inline `style` attributes.
    Author,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Declaration {
    /// Lower-cased property name.
    pub name: String,
    /// Trimmed value text.
    pub value: String,
}

impl fmt::Display for Declaration {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}: {}", self.name, self.value)
    }
}

/// An ordered declaration block in which every property name appears once.
#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct Declarations(Vec<Declaration>);

impl Declarations {
    #[inline]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert a declaration; a repeated name overwrites the earlier value but
    /// keeps its original position.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|decl| decl.name == name) {
            Some(existing) => existing.value = value,
            None => self.0.push(Declaration { name, value }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|decl| decl.name == name)
            .map(|decl| decl.value.as_str())
    }

    pub fn iter(&self) -> slice::Iter<'_, Declaration> {
        self.0.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'decls> IntoIterator for &'decls Declarations {
    type Item = &'decls Declaration;
    type IntoIter = slice::Iter<'decls, Declaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rule {
    pub selector: Selector,
    pub declarations: Declarations,
    /// Position in the stylesheet; later rules win specificity ties.
    pub source_order: u32,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
}

impl Stylesheet {
    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
