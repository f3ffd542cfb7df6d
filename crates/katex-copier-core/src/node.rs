//! DOM abstraction for formula extraction.
//!
//! The extractor never touches a concrete DOM. It works through
//! `FormulaElement`, which the browser crate implements over `web_sys::Element`
//! (overriding the tree walks with native selector queries) and which the
//! tests implement over an in-memory tree.

use std::fmt;

/// A structural element predicate that can also be rendered as a CSS selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher<'a> {
    /// `.class`
    Class(&'a str),
    /// `[attribute]`
    Attribute(&'a str),
    /// `tag[attribute="value"]`
    TagAttribute {
        tag: &'a str,
        attribute: &'a str,
        value: &'a str,
    },
    /// Selector list: matches if any member matches.
    AnyOf(Vec<Matcher<'a>>),
}

impl<'a> Matcher<'a> {
    /// Evaluate the predicate using only the primitive element accessors.
    pub fn matches<E: FormulaElement>(&self, element: &E) -> bool {
        match self {
            Matcher::Class(class) => element.has_class(class),
            Matcher::Attribute(name) => element.attribute(name).is_some(),
            Matcher::TagAttribute {
                tag,
                attribute,
                value,
            } => {
                element.tag_name().eq_ignore_ascii_case(tag)
                    && element.attribute(attribute).as_deref() == Some(*value)
            }
            Matcher::AnyOf(matchers) => matchers.iter().any(|m| m.matches(element)),
        }
    }

    /// Render as a CSS selector string for native `querySelector`/`closest`.
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Matcher<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Class(class) => write!(f, ".{class}"),
            Matcher::Attribute(name) => write!(f, "[{name}]"),
            Matcher::TagAttribute {
                tag,
                attribute,
                value,
            } => {
                write!(f, "{tag}[{attribute}=\"")?;
                for c in value.chars() {
                    if c == '"' || c == '\\' {
                        f.write_str("\\")?;
                    }
                    write!(f, "{c}")?;
                }
                f.write_str("\"]")
            }
            Matcher::AnyOf(matchers) => {
                for (i, m) in matchers.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{m}")?;
                }
                Ok(())
            }
        }
    }
}

/// Read-only view of one DOM element.
///
/// Implementors provide the primitive accessors; the tree queries have
/// default implementations in document (pre-order) order that platform
/// implementations may replace with native equivalents.
pub trait FormulaElement: Clone {
    fn attribute(&self, name: &str) -> Option<String>;

    fn has_class(&self, class: &str) -> bool;

    /// Tag name in whatever case the platform reports.
    fn tag_name(&self) -> String;

    fn parent_element(&self) -> Option<Self>;

    fn child_elements(&self) -> Vec<Self>;

    fn previous_element_sibling(&self) -> Option<Self>;

    /// Concatenated text of the element and all descendants.
    fn text_content(&self) -> String;

    /// Attribute value, treating an empty value as absent.
    fn non_empty_attribute(&self, name: &str) -> Option<String> {
        self.attribute(name).filter(|v| !v.is_empty())
    }

    fn matches(&self, matcher: &Matcher<'_>) -> bool {
        matcher.matches(self)
    }

    /// Nearest ancestor-or-self matching `matcher`.
    fn closest(&self, matcher: &Matcher<'_>) -> Option<Self> {
        let mut current = Some(self.clone());
        while let Some(element) = current {
            if element.matches(matcher) {
                return Some(element);
            }
            current = element.parent_element();
        }
        None
    }

    /// First strict descendant matching `matcher`, in document order.
    fn find_descendant(&self, matcher: &Matcher<'_>) -> Option<Self> {
        let mut stack: Vec<Self> = self.child_elements().into_iter().rev().collect();
        while let Some(element) = stack.pop() {
            if element.matches(matcher) {
                return Some(element);
            }
            stack.extend(element.child_elements().into_iter().rev());
        }
        None
    }

    /// All strict descendants matching `matcher`, in document order.
    fn find_descendants(&self, matcher: &Matcher<'_>) -> Vec<Self> {
        let mut found = Vec::new();
        let mut stack: Vec<Self> = self.child_elements().into_iter().rev().collect();
        while let Some(element) = stack.pop() {
            stack.extend(element.child_elements().into_iter().rev());
            if element.matches(matcher) {
                found.push(element);
            }
        }
        found
    }
}

/// A whole page (or any subtree standing in for one).
pub trait FormulaDocument {
    type Element: FormulaElement;

    /// The document element, if the document has one.
    fn root(&self) -> Option<Self::Element>;

    /// Every element matching `matcher`, root included, in document order.
    fn select_all(&self, matcher: &Matcher<'_>) -> Vec<Self::Element> {
        let Some(root) = self.root() else {
            return Vec::new();
        };
        let mut found = Vec::new();
        if root.matches(matcher) {
            found.push(root.clone());
        }
        found.extend(root.find_descendants(matcher));
        found
    }
}
