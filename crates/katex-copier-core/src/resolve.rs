//! Source lookup for a single rendered formula.
//!
//! Lookup order, first match wins:
//!
//! 1. Nearest ancestor wrapper (`.math-block`, `.math-inline`, `[data-math]`)
//!    carrying a non-empty `data-math`
//! 2. The element's own `data-math`
//! 3. A descendant `annotation[encoding="application/x-tex"]`, trimmed
//! 4. The element's own `data-latex`

use crate::config::MarkerConfig;
use crate::node::{FormulaElement, Matcher};
use crate::source::FormulaSource;

/// Which lookup step produced a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceOrigin {
    Wrapper,
    Element,
    Annotation,
    SourceAttribute,
}

/// Resolve the source markup of one formula element.
///
/// Returns `None` when nothing matched; never an empty source.
pub fn resolve_source<E: FormulaElement>(
    element: &E,
    markers: &MarkerConfig,
) -> Option<FormulaSource> {
    resolve_source_with_origin(element, markers).map(|(source, _)| source)
}

pub fn resolve_source_with_origin<E: FormulaElement>(
    element: &E,
    markers: &MarkerConfig,
) -> Option<(FormulaSource, SourceOrigin)> {
    // Only the nearest wrapper is consulted; an empty one does not send us
    // further up the tree.
    if let Some(math) = nearest_ancestor_attribute(
        element,
        &markers.math_wrapper(),
        &markers.math_attribute,
    ) {
        return Some(found(math, SourceOrigin::Wrapper));
    }

    if let Some(math) = element.non_empty_attribute(&markers.math_attribute) {
        return Some(found(math, SourceOrigin::Element));
    }

    if let Some(annotation) = element.find_descendant(&markers.annotation()) {
        let text = annotation.text_content();
        let text = text.trim();
        if text.is_empty() {
            tracing::trace!("annotation present but empty");
            return None;
        }
        return Some(found(text.to_string(), SourceOrigin::Annotation));
    }

    if let Some(latex) = element.non_empty_attribute(&markers.source_attribute) {
        return Some(found(latex, SourceOrigin::SourceAttribute));
    }

    tracing::trace!("no source found for formula element");
    None
}

/// Non-empty `attribute` of the nearest strict ancestor matching `wrapper`.
pub(crate) fn nearest_ancestor_attribute<E: FormulaElement>(
    element: &E,
    wrapper: &Matcher<'_>,
    attribute: &str,
) -> Option<String> {
    element
        .parent_element()?
        .closest(wrapper)?
        .non_empty_attribute(attribute)
}

fn found(source: String, origin: SourceOrigin) -> (FormulaSource, SourceOrigin) {
    tracing::trace!(?origin, len = source.len(), "resolved formula source");
    (FormulaSource::new(source), origin)
}
