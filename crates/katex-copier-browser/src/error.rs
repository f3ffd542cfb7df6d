use miette::Diagnostic;
use wasm_bindgen::{JsCast, JsValue};

/// Setting up browser-side components failed.
#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum MountError {
    #[error("no global window")]
    #[diagnostic(code(katex_copier::mount::no_window))]
    NoWindow,

    #[error("document is missing required element `{0}`")]
    #[diagnostic(
        code(katex_copier::mount::missing_element),
        help("check the panel ids in the config against the popup markup")
    )]
    MissingElement(String),

    #[error("DOM operation failed: {0}")]
    #[diagnostic(code(katex_copier::mount::dom))]
    Dom(String),
}

impl From<JsValue> for MountError {
    fn from(value: JsValue) -> Self {
        MountError::Dom(describe_js_error(&value))
    }
}

/// Best-effort human-readable rendering of a thrown JS value.
pub fn describe_js_error(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{value:?}")
}
