//! Content-script entry points.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Reflect;
use katex_copier_browser::{
    Interactor, PageDocument, PageElement, listen_for_scan_requests, resolve_source, scan_document,
};
use wasm_bindgen::prelude::*;

use crate::types::{ScanReport, load_config, window};

const INIT_FLAG: &str = "__katexCopierInitialized";

thread_local! {
    static INTERACTOR: RefCell<Option<Rc<Interactor>>> = const { RefCell::new(None) };
}

/// Start click-to-copy on the current page and answer popup scan requests.
///
/// A second call in the same page does nothing.
#[wasm_bindgen(js_name = startContentScript)]
pub fn start_content_script(config: Option<JsValue>) -> Result<(), JsError> {
    let window = window()?;
    let flag = JsValue::from_str(INIT_FLAG);
    if Reflect::get(&window, &flag)
        .ok()
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
    {
        tracing::debug!("content script already running");
        return Ok(());
    }
    let _ = Reflect::set(&window, &flag, &JsValue::TRUE);

    let config = load_config(config)?;
    let markers = config.markers.clone();

    let interactor = Interactor::new(&window, config)?;
    let attached = interactor.attach();
    interactor.observe()?;

    let document = window
        .document()
        .ok_or_else(|| JsError::new("window has no document"))?;
    if let Err(e) = listen_for_scan_requests(document, markers) {
        // Pages opened outside the extension have no runtime to listen on.
        tracing::warn!(error = %e, "scan requests will not be answered");
    }

    tracing::info!(attached, "KaTeX copier started");
    INTERACTOR.with(|slot| *slot.borrow_mut() = Some(interactor));
    Ok(())
}

/// Scan the current page for formula sources.
#[wasm_bindgen(js_name = scanPage)]
pub fn scan_page(config: Option<JsValue>) -> Result<ScanReport, JsError> {
    let config = load_config(config)?;
    let document = PageDocument::current().ok_or_else(|| JsError::new("no document"))?;
    Ok(scan_document(&document, &config.markers).into())
}

/// Resolve one element's LaTeX source, if it has one.
#[wasm_bindgen(js_name = resolveSource)]
pub fn resolve_source_js(
    element: web_sys::Element,
    config: Option<JsValue>,
) -> Result<Option<String>, JsError> {
    let config = load_config(config)?;
    Ok(resolve_source(&PageElement::new(element), &config.markers).map(String::from))
}
