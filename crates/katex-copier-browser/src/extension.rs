//! Panel ⇄ page messaging through the extension APIs.
//!
//! The panel runs in its own context. To scan the inspected page it sends a
//! one-shot `PanelRequest::ScanFormulas` to the active tab; the content
//! script there answers with `PageResponse::Formulas`. No streaming, no
//! retry.

use js_sys::{Object, Reflect};
use katex_copier_core::{MarkerConfig, ScanError, scan_document};
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::dom::PageDocument;
use crate::error::{MountError, describe_js_error};
use crate::panel::PageScanner;

// === Extension API bindings ===
//
// web-sys doesn't cover the WebExtension namespaces; these are the three
// calls the scan round-trip needs.

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = query)]
    fn tabs_query(query_info: &JsValue) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = sendMessage)]
    fn tabs_send_message(tab_id: f64, message: &JsValue) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "runtime", "onMessage"], js_name = addListener)]
    fn runtime_on_message_add_listener(listener: &js_sys::Function) -> Result<(), JsValue>;
}

/// Request from the panel to the page's content script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PanelRequest {
    ScanFormulas,
}

/// The content script's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PageResponse {
    Formulas { formulas: Vec<String> },
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}

/// Scans whichever tab is active in the current window.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActiveTabScanner;

impl ActiveTabScanner {
    async fn active_tab_id(&self) -> Result<f64, ScanError> {
        let query = Object::new();
        let _ = Reflect::set(&query, &"active".into(), &JsValue::TRUE);
        let _ = Reflect::set(&query, &"currentWindow".into(), &JsValue::TRUE);

        let promise =
            tabs_query(&query).map_err(|e| ScanError::Messaging(describe_js_error(&e)))?;
        let tabs = JsFuture::from(promise)
            .await
            .map_err(|e| ScanError::Messaging(describe_js_error(&e)))?;

        let tab = js_sys::Array::from(&tabs).get(0);
        if tab.is_undefined() {
            return Err(ScanError::NoActiveTab);
        }
        Reflect::get(&tab, &"id".into())
            .ok()
            .and_then(|id| id.as_f64())
            .ok_or(ScanError::NoActiveTab)
    }
}

impl PageScanner for ActiveTabScanner {
    async fn scan(&self) -> Result<Option<Vec<String>>, ScanError> {
        let tab_id = self.active_tab_id().await?;

        let message = to_js(&PanelRequest::ScanFormulas)
            .map_err(|e| ScanError::Malformed(e.to_string()))?;
        let promise = tabs_send_message(tab_id, &message)
            .map_err(|e| ScanError::Messaging(describe_js_error(&e)))?;
        let response = JsFuture::from(promise)
            .await
            .map_err(|e| ScanError::Messaging(describe_js_error(&e)))?;

        if response.is_undefined() || response.is_null() {
            tracing::debug!(tab_id, "page sent no scan response");
            return Ok(None);
        }
        match serde_wasm_bindgen::from_value::<PageResponse>(response) {
            Ok(PageResponse::Formulas { formulas }) => Ok(Some(formulas)),
            Err(e) => Err(ScanError::Malformed(e.to_string())),
        }
    }
}

/// Answer the panel's scan requests from this page's content script.
///
/// Messages that are not a `PanelRequest` are left for other listeners.
pub fn listen_for_scan_requests(
    document: web_sys::Document,
    markers: MarkerConfig,
) -> Result<(), MountError> {
    let document = PageDocument::new(document);
    let listener = Closure::<dyn FnMut(JsValue, JsValue, js_sys::Function) -> bool>::new(
        move |message: JsValue, _sender: JsValue, send_response: js_sys::Function| {
            let Ok(request) = serde_wasm_bindgen::from_value::<PanelRequest>(message) else {
                return false;
            };
            match request {
                PanelRequest::ScanFormulas => {
                    let formulas = scan_document(&document, &markers).into_strings();
                    tracing::debug!(count = formulas.len(), "answering panel scan request");
                    match to_js(&PageResponse::Formulas { formulas }) {
                        Ok(response) => {
                            if let Err(e) = send_response.call1(&JsValue::NULL, &response) {
                                tracing::warn!("sendResponse failed: {:?}", e);
                            }
                        }
                        Err(e) => tracing::error!(error = %e, "failed to encode scan response"),
                    }
                }
            }
            // Answered synchronously; the channel need not stay open.
            false
        },
    );
    runtime_on_message_add_listener(listener.as_ref().unchecked_ref())?;
    listener.forget();
    Ok(())
}

