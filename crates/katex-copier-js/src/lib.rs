//! WASM bindings for the KaTeX copier extension.
//!
//! The extension's two scripts are thin loaders around this module:
//!
//! - the content script calls `startContentScript()` on every page
//! - the popup calls `startPanel()` once its markup is loaded
//!
//! Both accept an optional config object (camelCase, partial) that is merged
//! over the defaults.

mod content;
mod popup;
mod types;

pub use content::*;
pub use popup::*;
pub use types::*;

use wasm_bindgen::prelude::*;

/// Install the panic hook and console logging.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use tracing::Level;
    use tracing::subscriber::set_global_default;
    use tracing_subscriber::Registry;
    use tracing_subscriber::layer::SubscriberExt;

    let console_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let wasm_layer = tracing_wasm::WASMLayer::new(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(console_level)
            .build(),
    );

    let _ = set_global_default(Registry::default().with(wasm_layer));
}
