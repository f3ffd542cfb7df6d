//! Types exposed to JavaScript via wasm-bindgen.

use katex_copier_browser::{ConfigError, CopierConfig, FormulaList};
use serde::{Deserialize, Serialize};
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;

/// Formulas found by `scanPage`, in document order.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub formulas: Vec<String>,
    pub count: usize,
}

impl From<FormulaList> for ScanReport {
    fn from(list: FormulaList) -> Self {
        let formulas = list.into_strings();
        Self {
            count: formulas.len(),
            formulas,
        }
    }
}

/// Read an optional JS config object. `undefined`/`null` means defaults.
pub(crate) fn load_config(value: Option<JsValue>) -> Result<CopierConfig, JsError> {
    let config = match value {
        Some(v) if !v.is_undefined() && !v.is_null() => serde_wasm_bindgen::from_value(v)
            .map_err(|e| ConfigError::Deserialize(e.to_string()))?,
        _ => CopierConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

pub(crate) fn window() -> Result<web_sys::Window, JsError> {
    web_sys::window().ok_or_else(|| JsError::new("no global window"))
}
