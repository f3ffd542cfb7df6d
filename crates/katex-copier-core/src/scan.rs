//! Whole-page formula collection for the popup panel.

use std::collections::HashSet;

use crate::config::MarkerConfig;
use crate::node::{FormulaDocument, FormulaElement};
use crate::source::FormulaSource;

/// Separator between formulas in a copy-all payload.
pub const COPY_ALL_SEPARATOR: &str = "\n\n";

/// Formula sources in first-discovery order, without duplicates.
///
/// Duplicates are detected by exact string equality; visually identical
/// formulas whose source text differs are kept separately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormulaList {
    items: Vec<FormulaSource>,
    seen: HashSet<FormulaSource>,
}

impl FormulaList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw strings (e.g. a page response), applying the same
    /// empty/duplicate filtering as a local scan.
    pub fn from_strings<I, S>(strings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::new();
        for s in strings {
            list.push(s.into());
        }
        list
    }

    /// Append unless empty or already present. Returns whether it was added.
    pub fn push(&mut self, source: impl Into<FormulaSource>) -> bool {
        let source = source.into();
        if source.as_str().is_empty() || self.seen.contains(&source) {
            return false;
        }
        self.seen.insert(source.clone());
        self.items.push(source);
        true
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FormulaSource> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[FormulaSource] {
        &self.items
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.seen.clear();
    }

    /// All sources joined by a blank line.
    pub fn joined(&self) -> String {
        let parts: Vec<&str> = self.items.iter().map(FormulaSource::as_str).collect();
        parts.join(COPY_ALL_SEPARATOR)
    }

    pub fn into_strings(self) -> Vec<String> {
        self.items.into_iter().map(String::from).collect()
    }
}

impl<'a> IntoIterator for &'a FormulaList {
    type Item = &'a FormulaSource;
    type IntoIter = std::slice::Iter<'a, FormulaSource>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl FromIterator<FormulaSource> for FormulaList {
    fn from_iter<T: IntoIterator<Item = FormulaSource>>(iter: T) -> Self {
        let mut list = Self::new();
        for source in iter {
            list.push(source);
        }
        list
    }
}

/// Collect every distinct formula source on the page.
///
/// Three passes, each in document order:
/// 1. every element carrying the math attribute
/// 2. every formula element: its nearest math-attribute ancestor (or itself),
///    else its annotation text
/// 3. legacy renderer elements preceded by a source `script` element
///
/// Identical formulas rendered through different conventions are only
/// merged when their source text matches exactly.
pub fn scan_document<D: FormulaDocument>(document: &D, markers: &MarkerConfig) -> FormulaList {
    let mut list = FormulaList::new();

    let math_data = markers.math_data();
    for element in document.select_all(&math_data) {
        if let Some(math) = element.non_empty_attribute(&markers.math_attribute) {
            list.push(math);
        }
    }
    let after_data = list.len();

    let annotation = markers.annotation();
    for element in document.select_all(&markers.formula()) {
        let wrapper = element
            .closest(&math_data)
            .and_then(|w| w.non_empty_attribute(&markers.math_attribute));
        if let Some(math) = wrapper {
            list.push(math);
            continue;
        }
        if let Some(node) = element.find_descendant(&annotation) {
            list.push(node.text_content().trim());
        }
    }
    let after_formulas = list.len();

    let script = markers.legacy_script();
    for element in document.select_all(&markers.legacy()) {
        let Some(prev) = element.previous_element_sibling() else {
            continue;
        };
        if prev.matches(&script) {
            list.push(prev.text_content().trim());
        }
    }

    tracing::debug!(
        data_attributes = after_data,
        formula_elements = after_formulas - after_data,
        legacy = list.len() - after_formulas,
        total = list.len(),
        "scanned document for formulas"
    );
    list
}

/// Whether `element` is a formula element or contains one.
///
/// Used by mutation observation to decide whether added nodes need
/// behavior attached.
pub fn contains_formula<E: FormulaElement>(element: &E, markers: &MarkerConfig) -> bool {
    let formula = markers.formula();
    element.matches(&formula) || element.find_descendant(&formula).is_some()
}
