use crate::error::BridgeError;
use crate::record::StorageKey;

pub const DEFAULT_APP_NAME: &str = "elm-snake-challenge";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BridgeConfig {
    app_name: StorageKey,
}

impl BridgeConfig {
    pub fn new(app_name: impl Into<String>) -> Result<Self, BridgeError> {
        Ok(Self {
            app_name: StorageKey::new(app_name)?,
        })
    }

    pub fn app_name(&self) -> &StorageKey {
        &self.app_name
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            app_name: StorageKey(DEFAULT_APP_NAME.to_string()),
        }
    }
}
