//! Failures while mounting the board into the page.

use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum UiError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    #[error("2d canvas context unavailable")]
    NoCanvasContext,
    #[error("invalid config: {0}")]
    Config(String),
}

impl From<UiError> for JsValue {
    fn from(err: UiError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_readable() {
        assert_eq!(UiError::NoWindow.to_string(), "no window");
        let err = UiError::Config("bad".into());
        assert_eq!(err.to_string(), "invalid config: bad");
    }
}
