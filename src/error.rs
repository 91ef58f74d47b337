//! Widget error type. Everything fallible in the browser glue returns
//! `Result<T, WidgetError>`; exported entry points convert to `JsValue`.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("missing element '{0}'")]
    MissingElement(String),
    #[error("2d canvas context unavailable")]
    NoContext2d,
    #[error("invalid config: {0}")]
    Config(String),
    #[cfg(feature = "serde_json")]
    #[error("config json: {0}")]
    ConfigJson(#[from] serde_json::Error),
    #[error("js error: {0}")]
    Js(String),
}

impl From<JsValue> for WidgetError {
    fn from(value: JsValue) -> Self {
        WidgetError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<WidgetError> for JsValue {
    fn from(err: WidgetError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WidgetError>;
