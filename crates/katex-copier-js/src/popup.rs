//! Popup entry point.

use katex_copier_browser::{ActiveTabScanner, Panel};
use wasm_bindgen::prelude::*;

use crate::types::{load_config, window};

/// Mount the popup panel and scan the active tab straight away.
///
/// Call after the popup document has loaded.
#[wasm_bindgen(js_name = startPanel)]
pub fn start_panel(config: Option<JsValue>) -> Result<(), JsError> {
    let config = load_config(config)?;
    let panel = Panel::new(&window()?, config, ActiveTabScanner)?;
    panel.mount();

    wasm_bindgen_futures::spawn_local(async move {
        let status = panel.scan().await;
        tracing::debug!(?status, "initial scan done");
    });
    Ok(())
}
