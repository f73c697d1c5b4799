//! Error types for page startup.
//!
//! Missing elements and unsupported browser features are not errors: the
//! matching feature is skipped. Only failures at the JS boundary and a
//! malformed configuration document end up here.

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, Error)]
pub enum PageError {
    /// No global `window` (worker or non-browser host)
    #[error("no global window")]
    NoWindow,

    /// `window.document` is missing
    #[error("window has no document")]
    NoDocument,

    /// A DOM call threw
    #[error("javascript error: {0}")]
    Js(String),

    /// Configuration JSON could not be parsed
    #[error("invalid page configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<JsValue> for PageError {
    fn from(value: JsValue) -> Self {
        PageError::Js(describe(&value))
    }
}

impl From<PageError> for JsValue {
    fn from(err: PageError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

fn describe(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    match value.dyn_ref::<js_sys::Error>() {
        Some(err) => String::from(err.message()),
        None => format!("{value:?}"),
    }
}

pub type Result<T, E = PageError> = std::result::Result<T, E>;
