use web_sys::Storage;

use crate::error::{js_message, BridgeError};
use crate::store::KeyValueStore;

#[derive(Clone, Debug)]
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    pub fn open() -> Result<Self, BridgeError> {
        let window = web_sys::window()
            .ok_or_else(|| BridgeError::StorageUnavailable("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|err| BridgeError::StorageUnavailable(js_message(&err)))?
            .ok_or_else(|| BridgeError::StorageUnavailable("localStorage disabled".to_string()))?;

        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, BridgeError> {
        self.storage
            .get_item(key)
            .map_err(|err| BridgeError::StorageUnavailable(js_message(&err)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BridgeError> {
        self.storage
            .set_item(key, value)
            .map_err(|err| BridgeError::Storage {
                key: key.to_string(),
                message: js_message(&err),
            })
    }
}
