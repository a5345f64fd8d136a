use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    #[error("storage key must not be empty")]
    EmptyKey,

    #[error("persistent storage is unavailable: {0}")]
    StorageUnavailable(String),

    #[error("failed to write highscore under '{key}': {message}")]
    Storage { key: String, message: String },

    #[error("application handle has no '{0}' port")]
    MissingPort(&'static str),

    #[error("port '{port}' rejected the call: {message}")]
    Port { port: &'static str, message: String },

    #[error("highscore bridge for '{app_name}' is already listening")]
    AlreadyListening { app_name: String },
}

#[cfg(target_arch = "wasm32")]
impl From<BridgeError> for wasm_bindgen::JsValue {
    fn from(err: BridgeError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn js_message(value: &wasm_bindgen::JsValue) -> String {
    use wasm_bindgen::JsCast;

    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }

    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_slot() {
        let err = BridgeError::Storage {
            key: "elm-snake-challenge".to_string(),
            message: "QuotaExceededError".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to write highscore under 'elm-snake-challenge': QuotaExceededError"
        );
        assert_eq!(
            BridgeError::MissingPort("saveHighscore").to_string(),
            "application handle has no 'saveHighscore' port"
        );
    }
}
