//! Browser clipboard implementation.
//!
//! Implements `ClipboardBackend` with the async Clipboard API
//! (`navigator.clipboard.writeText`) as the primary path and the
//! off-screen textarea + `execCommand("copy")` technique as the fallback.

use js_sys::Reflect;
use katex_copier_core::{ClipboardBackend, ClipboardError};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlDocument, HtmlTextAreaElement};

use crate::error::describe_js_error;

/// Clipboard access bound to one window.
#[derive(Debug, Clone)]
pub struct BrowserClipboard {
    window: web_sys::Window,
    document: web_sys::Document,
}

impl BrowserClipboard {
    pub fn new(window: web_sys::Window) -> Option<Self> {
        let document = window.document()?;
        Some(Self { window, document })
    }

    /// Clipboard for the current global window.
    pub fn current() -> Option<Self> {
        Self::new(web_sys::window()?)
    }
}

impl ClipboardBackend for BrowserClipboard {
    async fn write_async(&self, text: &str) -> Result<(), ClipboardError> {
        // navigator.clipboard is undefined outside secure contexts; calling
        // through the web-sys getter would throw instead of erroring.
        let navigator = self.window.navigator();
        let clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard"))
            .map_err(|e| ClipboardError::Unavailable(describe_js_error(&e)))?;
        if clipboard.is_undefined() || clipboard.is_null() {
            return Err(ClipboardError::Unavailable(
                "navigator.clipboard is not available".to_string(),
            ));
        }
        let clipboard: web_sys::Clipboard = clipboard.unchecked_into();

        wasm_bindgen_futures::JsFuture::from(clipboard.write_text(text))
            .await
            .map_err(|e| ClipboardError::Rejected(describe_js_error(&e)))?;
        Ok(())
    }

    fn write_legacy(&self, text: &str) -> Result<(), ClipboardError> {
        let body = self
            .document
            .body()
            .ok_or_else(|| ClipboardError::Legacy("document has no body".to_string()))?;

        let textarea: HtmlTextAreaElement = self
            .document
            .create_element("textarea")
            .map_err(|e| ClipboardError::Legacy(describe_js_error(&e)))?
            .dyn_into()
            .map_err(|_| ClipboardError::Legacy("textarea cast failed".to_string()))?;
        textarea.set_value(text);

        let style = textarea.style();
        let _ = style.set_property("position", "fixed");
        let _ = style.set_property("left", "-999999px");
        let _ = style.set_property("top", "-999999px");

        body.append_child(&textarea)
            .map_err(|e| ClipboardError::Legacy(describe_js_error(&e)))?;

        let result = exec_copy(&self.document, &textarea);
        // Removed on every path, including a failed copy.
        textarea.remove();
        result
    }
}

fn exec_copy(
    document: &web_sys::Document,
    textarea: &HtmlTextAreaElement,
) -> Result<(), ClipboardError> {
    let _ = textarea.focus();
    textarea.select();

    let html_document = document
        .dyn_ref::<HtmlDocument>()
        .ok_or_else(|| ClipboardError::Legacy("not an HTML document".to_string()))?;

    match html_document.exec_command("copy") {
        Ok(true) => Ok(()),
        Ok(false) => Err(ClipboardError::Legacy(
            "execCommand(\"copy\") returned false".to_string(),
        )),
        Err(e) => Err(ClipboardError::Legacy(describe_js_error(&e))),
    }
}
