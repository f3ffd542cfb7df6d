//! Browser DOM layer for katex-copier.
//!
//! This crate provides the page-resident click-to-copy behavior, the popup
//! panel, and the clipboard backend, all over `web_sys`. It assumes a
//! `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `dom`: `FormulaElement`/`FormulaDocument` over live DOM nodes
//! - `clipboard`: async Clipboard API with `execCommand("copy")` fallback
//! - `overlay`: the shared tooltip and notification nodes
//! - `interactor`: per-element listeners and mutation observation
//! - `panel`: popup formula list, re-scan and copy-all
//! - `extension`: panel ⇄ page messaging through the extension APIs
//!
//! # Re-exports
//!
//! This crate re-exports `katex-copier-core` for convenience, so consumers
//! only need to depend on `katex-copier-browser`.

// Re-export core crate
pub use katex_copier_core;
pub use katex_copier_core::*;

pub mod clipboard;
pub mod dom;
pub mod error;
pub mod extension;
pub mod interactor;
pub mod overlay;
pub mod panel;

pub use clipboard::BrowserClipboard;
pub use dom::{PageDocument, PageElement};
pub use error::MountError;
pub use extension::{ActiveTabScanner, PageResponse, PanelRequest, listen_for_scan_requests};
pub use interactor::Interactor;
pub use overlay::{Notification, Tooltip};
pub use panel::{LocalScanner, PageScanner, Panel, PanelElements};
