//! Error types for katex-copier.
//!
//! Every failure is handled at the boundary where it occurs and turned into
//! a short user-facing message; these types carry the detail for logging.

use miette::Diagnostic;

/// A single clipboard mechanism failed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ClipboardError {
    /// The async clipboard API is not exposed in this context.
    #[error("clipboard API unavailable: {0}")]
    #[diagnostic(code(katex_copier::clipboard::unavailable))]
    Unavailable(String),

    /// The async clipboard API rejected the write (permissions, focus).
    #[error("clipboard write rejected: {0}")]
    #[diagnostic(code(katex_copier::clipboard::rejected))]
    Rejected(String),

    /// The legacy select-and-copy command failed or returned false.
    #[error("legacy copy command failed: {0}")]
    #[diagnostic(code(katex_copier::clipboard::legacy))]
    Legacy(String),
}

/// Why a click-to-copy did not put anything on the clipboard.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum CopyError {
    #[error("no LaTeX source found for formula element")]
    #[diagnostic(code(katex_copier::copy::no_source))]
    NoSource,

    #[error("clipboard write failed")]
    #[diagnostic(code(katex_copier::copy::clipboard))]
    Clipboard,
}

/// The panel could not obtain a formula list from the page.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ScanError {
    #[error("no active tab to scan")]
    #[diagnostic(code(katex_copier::scan::no_active_tab))]
    NoActiveTab,

    #[error("page messaging failed: {0}")]
    #[diagnostic(
        code(katex_copier::scan::messaging),
        help("the page may not allow content scripts (browser pages, web store)")
    )]
    Messaging(String),

    #[error("malformed scan response: {0}")]
    #[diagnostic(code(katex_copier::scan::malformed))]
    Malformed(String),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ConfigError {
    #[error("config field `{field}` must not be empty")]
    #[diagnostic(code(katex_copier::config::empty))]
    EmptyMarker { field: &'static str },

    #[error("config field `{field}` has unusable value {value:?}")]
    #[diagnostic(
        code(katex_copier::config::invalid),
        help("class, attribute and tag markers must be plain CSS identifiers (letters, digits, `-`, `_`)")
    )]
    InvalidMarker { field: &'static str, value: String },

    #[error("invalid config: {0}")]
    #[diagnostic(code(katex_copier::config::deserialize))]
    Deserialize(String),
}
