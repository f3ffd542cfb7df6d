//! Live DOM implementation of the extractor's element abstraction.
//!
//! Tree queries go through native `closest` / `querySelector(All)` using the
//! matcher's CSS rendering. `matches` falls back to the primitive predicate
//! if the browser rejects a selector; the other queries come back empty.

use katex_copier_core::{FormulaDocument, FormulaElement, Matcher};
use wasm_bindgen::JsCast;

/// A page element seen through `FormulaElement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageElement(web_sys::Element);

impl PageElement {
    pub fn new(element: web_sys::Element) -> Self {
        Self(element)
    }

    pub fn as_element(&self) -> &web_sys::Element {
        &self.0
    }

    pub fn into_inner(self) -> web_sys::Element {
        self.0
    }
}

impl From<web_sys::Element> for PageElement {
    fn from(element: web_sys::Element) -> Self {
        Self(element)
    }
}

impl FormulaElement for PageElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn tag_name(&self) -> String {
        self.0.tag_name()
    }

    fn parent_element(&self) -> Option<Self> {
        self.0.parent_element().map(Self)
    }

    fn child_elements(&self) -> Vec<Self> {
        let children = self.0.children();
        (0..children.length())
            .filter_map(|i| children.item(i))
            .map(Self)
            .collect()
    }

    fn previous_element_sibling(&self) -> Option<Self> {
        self.0.previous_element_sibling().map(Self)
    }

    fn text_content(&self) -> String {
        self.0.text_content().unwrap_or_default()
    }

    fn matches(&self, matcher: &Matcher<'_>) -> bool {
        match self.0.matches(&matcher.to_css()) {
            Ok(matched) => matched,
            Err(e) => {
                tracing::warn!(selector = %matcher, "matches() rejected selector: {:?}", e);
                matcher.matches(self)
            }
        }
    }

    fn closest(&self, matcher: &Matcher<'_>) -> Option<Self> {
        match self.0.closest(&matcher.to_css()) {
            Ok(found) => found.map(Self),
            Err(e) => {
                tracing::warn!(selector = %matcher, "closest() rejected selector: {:?}", e);
                None
            }
        }
    }

    fn find_descendant(&self, matcher: &Matcher<'_>) -> Option<Self> {
        match self.0.query_selector(&matcher.to_css()) {
            Ok(found) => found.map(Self),
            Err(e) => {
                tracing::warn!(selector = %matcher, "querySelector() rejected selector: {:?}", e);
                None
            }
        }
    }

    fn find_descendants(&self, matcher: &Matcher<'_>) -> Vec<Self> {
        match self.0.query_selector_all(&matcher.to_css()) {
            Ok(list) => node_list_elements(&list).into_iter().map(Self).collect(),
            Err(e) => {
                tracing::warn!(selector = %matcher, "querySelectorAll() rejected selector: {:?}", e);
                Vec::new()
            }
        }
    }
}

/// The whole page seen through `FormulaDocument`.
#[derive(Debug, Clone)]
pub struct PageDocument(web_sys::Document);

impl PageDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self(document)
    }

    /// The current window's document, if there is one.
    pub fn current() -> Option<Self> {
        web_sys::window()?.document().map(Self)
    }

    pub fn as_document(&self) -> &web_sys::Document {
        &self.0
    }
}

impl FormulaDocument for PageDocument {
    type Element = PageElement;

    fn root(&self) -> Option<PageElement> {
        self.0.document_element().map(PageElement)
    }

    fn select_all(&self, matcher: &Matcher<'_>) -> Vec<PageElement> {
        match self.0.query_selector_all(&matcher.to_css()) {
            Ok(list) => node_list_elements(&list)
                .into_iter()
                .map(PageElement)
                .collect(),
            Err(e) => {
                tracing::warn!(selector = %matcher, "querySelectorAll() rejected selector: {:?}", e);
                Vec::new()
            }
        }
    }
}

/// Element nodes of a `NodeList`, skipping text and comment nodes.
pub fn node_list_elements(list: &web_sys::NodeList) -> Vec<web_sys::Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .collect()
}
