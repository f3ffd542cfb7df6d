//! katex-copier-core: formula extraction logic without browser dependencies.
//!
//! This crate provides:
//! - `FormulaElement` / `FormulaDocument` traits for DOM abstraction
//! - `resolve_source` - prioritized source lookup for one formula element
//! - `scan_document` - de-duplicated, document-ordered formula list for a page
//! - `ClipboardBackend` + `write_text` - primary/fallback clipboard orchestration
//! - `PanelState` - scan result handling and copy-all payload for the popup
//! - `CopierConfig` - markers, timings and messages, all serde-configurable

pub mod clipboard;
pub mod config;
pub mod error;
pub mod feedback;
pub mod geometry;
pub mod node;
pub mod panel;
pub mod resolve;
pub mod scan;
pub mod source;

#[cfg(test)]
pub(crate) mod test_dom;

pub use clipboard::{ClipboardBackend, write_text};
pub use config::{CopierConfig, FeedbackConfig, MarkerConfig, Messages, PanelIds};
pub use error::{ClipboardError, ConfigError, CopyError, ScanError};
pub use feedback::{Notice, ScanStatus};
pub use geometry::{Point, Size, tooltip_position};
pub use node::{FormulaDocument, FormulaElement, Matcher};
pub use panel::PanelState;
pub use resolve::{SourceOrigin, resolve_source, resolve_source_with_origin};
pub use scan::{FormulaList, contains_formula, scan_document};
pub use source::FormulaSource;
