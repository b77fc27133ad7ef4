use thiserror::Error;

/// Why a play request did not start playback.
///
/// The controller treats both variants the same way; the split only shows up
/// in log output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The browser refused playback without a user gesture.
    #[error("autoplay blocked: {0}")]
    AutoplayBlocked(String),
    /// Anything else: decode errors, network errors, unsupported sources.
    #[error("playback failed: {0}")]
    PlaybackFailure(String),
}

impl PlaybackError {
    /// Classify a rejected `play()` promise by its DOMException name.
    pub fn from_dom_exception(name: &str, message: &str) -> Self {
        let detail = match (name.trim(), message.trim()) {
            ("", "") => "unknown error".to_string(),
            (name, "") => name.to_string(),
            (_, message) => message.to_string(),
        };
        match name.trim() {
            "NotAllowedError" => Self::AutoplayBlocked(detail),
            _ => Self::PlaybackFailure(detail),
        }
    }

    pub fn is_autoplay_block(&self) -> bool {
        matches!(self, Self::AutoplayBlocked(_))
    }

    #[cfg(target_arch = "wasm32")]
    pub fn from_js(value: &wasm_bindgen::JsValue) -> Self {
        let field = |key: &str| {
            js_sys::Reflect::get(value, &key.into())
                .ok()
                .and_then(|v| v.as_string())
                .unwrap_or_default()
        };
        Self::from_dom_exception(&field("name"), &field("message"))
    }
}
