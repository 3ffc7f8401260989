//! Error types for the page bridge.

/// Errors that can occur while talking to the hosting page.
#[derive(Debug, thiserror::Error)]
pub enum PageBridgeError {
    #[error("no global window")]
    NoWindow,

    #[error("Failed to parse page message: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Failed to serialize scene message: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("DOM call failed: {0}")]
    Dom(String),
}

impl PageBridgeError {
    /// Wrap a JavaScript exception
    pub fn dom(value: wasm_bindgen::JsValue) -> Self {
        Self::Dom(format!("{:?}", value))
    }
}
