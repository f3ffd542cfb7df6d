use std::fmt;

use serde::{Deserialize, Serialize};

/// One formula's source markup, exactly as found on the page.
///
/// Either a verbatim attribute value or the trimmed text of an annotation
/// node. Identity is value equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormulaSource(String);

impl FormulaSource {
    pub fn new(source: impl Into<String>) -> Self {
        Self(source.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for FormulaSource {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FormulaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for FormulaSource {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for FormulaSource {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<FormulaSource> for String {
    fn from(source: FormulaSource) -> Self {
        source.0
    }
}
