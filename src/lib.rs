pub mod bridge;
pub mod config;
pub mod error;
pub mod ports;
pub mod record;
pub mod store;

#[cfg(target_arch = "wasm32")]
mod elm;
#[cfg(target_arch = "wasm32")]
mod persistence;
#[cfg(target_arch = "wasm32")]
mod web;

pub use bridge::{restore, subscribe, BridgeState, HighscoreBridge};
pub use config::{BridgeConfig, DEFAULT_APP_NAME};
pub use error::BridgeError;
pub use ports::{HighscorePorts, LoopbackPorts, SaveHandler, INITIAL_PORT, SAVE_PORT};
pub use record::{Highscore, StorageKey};
pub use store::{KeyValueStore, MemoryStore};

#[cfg(target_arch = "wasm32")]
pub use elm::ElmPorts;
#[cfg(target_arch = "wasm32")]
pub use persistence::LocalStorage;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    web::start()
}

#[cfg(all(test, target_arch = "wasm32"))]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);
