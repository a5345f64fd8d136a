use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::bridge::{self, HighscoreBridge};
use crate::config::BridgeConfig;
use crate::elm::ElmPorts;
use crate::persistence::LocalStorage;
use crate::record::StorageKey;

pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    // A second init only fails because a logger is already installed.
    let _ = console_log::init_with_level(log::Level::Info);

    log::info!("highscore bridge loaded");
    Ok(())
}

#[wasm_bindgen(js_name = subscribeHighscore)]
pub fn subscribe_highscore(app: &JsValue, app_name: &str) -> Result<(), JsValue> {
    let key = StorageKey::new(app_name)?;
    let ports = ElmPorts::new(app)?;
    let store = LocalStorage::open()?;

    bridge::subscribe(&ports, store, &key)?;
    Ok(())
}

#[wasm_bindgen(js_name = restoreHighscore)]
pub fn restore_highscore(app: &JsValue, app_name: &str) -> Result<Option<String>, JsValue> {
    let key = StorageKey::new(app_name)?;
    let ports = ElmPorts::new(app)?;
    let store = match LocalStorage::open() {
        Ok(store) => store,
        Err(err) => {
            log::warn!("skipping highscore restore: {err}");
            return Ok(None);
        }
    };

    let restored = bridge::restore(&ports, &store, &key)?;
    Ok(restored.map(|highscore| highscore.into_string()))
}

thread_local! {
    static BRIDGE: RefCell<Option<HighscoreBridge>> = const { RefCell::new(None) };
}

#[wasm_bindgen(js_name = connectHighscore)]
pub fn connect_highscore(
    app: &JsValue,
    app_name: Option<String>,
) -> Result<Option<String>, JsValue> {
    let config = match app_name {
        Some(name) => BridgeConfig::new(name)?,
        None => BridgeConfig::default(),
    };
    let ports = ElmPorts::new(app)?;
    let store = LocalStorage::open()?;

    BRIDGE.with(|slot| -> Result<Option<String>, JsValue> {
        let mut slot = slot.borrow_mut();
        let highscore_bridge = slot.get_or_insert_with(|| HighscoreBridge::new(config));
        let restored = highscore_bridge.connect(&ports, store)?;
        Ok(restored.map(|highscore| highscore.into_string()))
    })
}
