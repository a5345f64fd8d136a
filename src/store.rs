use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::BridgeError;

/// Synchronous string key-value storage, as the browser offers it.
///
/// `get` yields `Ok(None)` for a key that was never written. `set`
/// overwrites unconditionally.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, BridgeError>;

    fn set(&self, key: &str, value: &str) -> Result<(), BridgeError>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, BridgeError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BridgeError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
