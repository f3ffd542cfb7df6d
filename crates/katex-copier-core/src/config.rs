//! Extension configuration.
//!
//! Every field has a default matching the KaTeX conventions, so a JS caller
//! may pass a partial object (or nothing at all).

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::node::Matcher;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CopierConfig {
    pub markers: MarkerConfig,
    pub feedback: FeedbackConfig,
    pub messages: Messages,
    pub panel: PanelIds,
}

impl CopierConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.markers.validate()?;
        self.panel.validate()
    }
}

/// Class names, attribute names and encodings the extractor recognizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarkerConfig {
    /// Class on the rendered formula root.
    pub formula_class: String,
    /// Wrapper classes that may carry the explicit math attribute.
    pub wrapper_classes: Vec<String>,
    /// Attribute holding the page author's original source.
    pub math_attribute: String,
    /// Generic source attribute checked last.
    pub source_attribute: String,
    pub annotation_tag: String,
    pub annotation_encoding: String,
    /// Class on elements produced by the legacy (script-tag) renderer.
    pub legacy_class: String,
    pub legacy_script_type: String,
    /// Per-element attribute marking attached behavior.
    pub init_attribute: String,
    pub enabled_class: String,
    pub copied_class: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            formula_class: "katex".to_string(),
            wrapper_classes: vec!["math-block".to_string(), "math-inline".to_string()],
            math_attribute: "data-math".to_string(),
            source_attribute: "data-latex".to_string(),
            annotation_tag: "annotation".to_string(),
            annotation_encoding: "application/x-tex".to_string(),
            legacy_class: "MathJax".to_string(),
            legacy_script_type: "math/tex".to_string(),
            init_attribute: "data-katex-copier-init".to_string(),
            enabled_class: "katex-copier-enabled".to_string(),
            copied_class: "katex-copier-copied".to_string(),
        }
    }
}

impl MarkerConfig {
    pub fn formula(&self) -> Matcher<'_> {
        Matcher::Class(&self.formula_class)
    }

    pub fn math_data(&self) -> Matcher<'_> {
        Matcher::Attribute(&self.math_attribute)
    }

    /// Wrapper classes plus anything carrying the math attribute.
    pub fn math_wrapper(&self) -> Matcher<'_> {
        let mut any: Vec<_> = self
            .wrapper_classes
            .iter()
            .map(|c| Matcher::Class(c.as_str()))
            .collect();
        any.push(self.math_data());
        Matcher::AnyOf(any)
    }

    pub fn annotation(&self) -> Matcher<'_> {
        Matcher::TagAttribute {
            tag: &self.annotation_tag,
            attribute: "encoding",
            value: &self.annotation_encoding,
        }
    }

    pub fn legacy(&self) -> Matcher<'_> {
        Matcher::Class(&self.legacy_class)
    }

    pub fn legacy_script(&self) -> Matcher<'_> {
        Matcher::TagAttribute {
            tag: "script",
            attribute: "type",
            value: &self.legacy_script_type,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let identifiers = [
            ("formulaClass", &self.formula_class),
            ("mathAttribute", &self.math_attribute),
            ("sourceAttribute", &self.source_attribute),
            ("annotationTag", &self.annotation_tag),
            ("legacyClass", &self.legacy_class),
            ("initAttribute", &self.init_attribute),
            ("enabledClass", &self.enabled_class),
            ("copiedClass", &self.copied_class),
        ];
        for (field, value) in identifiers {
            check_identifier(field, value)?;
        }
        for class in &self.wrapper_classes {
            check_identifier("wrapperClasses", class)?;
        }
        // Attribute values are quoted and escaped when rendered.
        for (field, value) in [
            ("annotationEncoding", &self.annotation_encoding),
            ("legacyScriptType", &self.legacy_script_type),
        ] {
            if value.is_empty() {
                return Err(ConfigError::EmptyMarker { field });
            }
        }
        Ok(())
    }
}

/// Class, attribute and tag names are rendered into selectors unescaped, so
/// they must be plain CSS identifiers: letters, digits, `-` and `_`, not
/// starting with a digit.
fn check_identifier(field: &'static str, value: &str) -> Result<(), ConfigError> {
    let Some(first) = value.chars().next() else {
        return Err(ConfigError::EmptyMarker { field });
    };
    let valid = !first.is_ascii_digit()
        && value
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(ConfigError::InvalidMarker {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Timings (milliseconds) and tooltip geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedbackConfig {
    pub tooltip_offset: f64,
    pub viewport_margin: f64,
    pub notification_ms: u32,
    pub element_flash_ms: u32,
    pub row_feedback_ms: u32,
    pub copy_all_feedback_ms: u32,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            tooltip_offset: 15.0,
            viewport_margin: 10.0,
            notification_ms: 2000,
            element_flash_ms: 500,
            row_feedback_ms: 2000,
            copy_all_feedback_ms: 2000,
        }
    }
}

/// User-visible strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Messages {
    pub tooltip: String,
    pub copied: String,
    pub copy_failed: String,
    pub no_source: String,
    pub row_idle: String,
    pub row_copied: String,
    pub copy_all_idle: String,
    pub copy_all_done: String,
    pub copy_all_failed: String,
    pub scanning: String,
    /// Status after finding exactly one formula. `{count}` is substituted.
    pub found_one: String,
    /// Status after finding several formulas. `{count}` is substituted.
    pub found_many: String,
    pub none_found: String,
    pub no_result: String,
    pub scan_failed: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            tooltip: "Click to copy LaTeX".to_string(),
            copied: "✓ LaTeX copied!".to_string(),
            copy_failed: "✗ Failed to copy".to_string(),
            no_source: "✗ No LaTeX source found".to_string(),
            row_idle: "Click to copy".to_string(),
            row_copied: "Copied!".to_string(),
            copy_all_idle: "📋 Copy All".to_string(),
            copy_all_done: "✓ Copied!".to_string(),
            copy_all_failed: "✗ Copy failed".to_string(),
            scanning: "Scanning page...".to_string(),
            found_one: "Found {count} formula!".to_string(),
            found_many: "Found {count} formulas!".to_string(),
            none_found: "No KaTeX formulas found on this page".to_string(),
            no_result: "No KaTeX formulas found".to_string(),
            scan_failed: "Error scanning page".to_string(),
        }
    }
}

/// Element ids the popup panel binds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PanelIds {
    pub status: String,
    pub status_text: String,
    pub formula_count: String,
    pub formulas_list: String,
    pub scan_button: String,
    pub copy_all_button: String,
}

impl Default for PanelIds {
    fn default() -> Self {
        Self {
            status: "status".to_string(),
            status_text: "status-text".to_string(),
            formula_count: "formula-count".to_string(),
            formulas_list: "formulas-list".to_string(),
            scan_button: "scan-btn".to_string(),
            copy_all_button: "copy-all-btn".to_string(),
        }
    }
}

impl PanelIds {
    fn validate(&self) -> Result<(), ConfigError> {
        let ids = [
            ("status", &self.status),
            ("statusText", &self.status_text),
            ("formulaCount", &self.formula_count),
            ("formulasList", &self.formulas_list),
            ("scanButton", &self.scan_button),
            ("copyAllButton", &self.copy_all_button),
        ];
        for (field, value) in ids {
            if value.is_empty() {
                return Err(ConfigError::EmptyMarker { field });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: CopierConfig = serde_json::from_str(
            r#"{"markers": {"formulaClass": "mathjax-node"}, "feedback": {"notificationMs": 3000}}"#,
        )
        .unwrap();
        assert_eq!(config.markers.formula_class, "mathjax-node");
        assert_eq!(config.markers.math_attribute, "data-math");
        assert_eq!(config.feedback.notification_ms, 3000);
        assert_eq!(config.feedback.element_flash_ms, 500);
        assert_eq!(config.messages, Messages::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_marker_rejected() {
        let mut config = CopierConfig::default();
        config.markers.math_attribute.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyMarker {
                field: "mathAttribute"
            })
        ));
    }

    #[test]
    fn test_selector_breaking_marker_rejected() {
        let mut config = CopierConfig::default();
        config.markers.wrapper_classes.push("math block".to_string());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMarker { .. })
        ));
    }

    #[test]
    fn test_selector_metacharacters_rejected() {
        for bad in ["math.katex", "a#b", "x:hover", "a>b", "a+b", "a~b", "f(x)", "*", "1st"] {
            let mut config = CopierConfig::default();
            config.markers.formula_class = bad.to_string();
            assert!(
                matches!(
                    config.validate(),
                    Err(ConfigError::InvalidMarker {
                        field: "formulaClass",
                        ..
                    })
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_quoted_values_allow_punctuation() {
        let mut config = CopierConfig::default();
        config.markers.legacy_script_type = "math/tex; mode=display".to_string();
        config.markers.formula_class = "katex_display-2".to_string();
        assert!(config.validate().is_ok());

        config.markers.annotation_encoding.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyMarker {
                field: "annotationEncoding"
            })
        ));
    }

    #[test]
    fn test_scan_messages_configurable() {
        let config: CopierConfig =
            serde_json::from_str(r#"{"messages": {"foundMany": "{count} gefunden"}}"#).unwrap();
        assert_eq!(config.messages.found_many, "{count} gefunden");
        assert_eq!(config.messages.found_one, "Found {count} formula!");
    }

    #[test]
    fn test_default_matchers() {
        let markers = MarkerConfig::default();
        assert_eq!(
            markers.math_wrapper().to_css(),
            ".math-block, .math-inline, [data-math]"
        );
        assert_eq!(
            markers.legacy_script().to_css(),
            r#"script[type="math/tex"]"#
        );
    }
}
