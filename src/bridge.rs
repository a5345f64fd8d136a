use crate::config::BridgeConfig;
use crate::error::BridgeError;
use crate::ports::HighscorePorts;
use crate::record::{Highscore, StorageKey};
use crate::store::KeyValueStore;

pub fn subscribe<P, S>(ports: &P, store: S, key: &StorageKey) -> Result<(), BridgeError>
where
    P: HighscorePorts + ?Sized,
    S: KeyValueStore + 'static,
{
    let key = key.clone();
    ports.on_save(Box::new(move |value: Highscore| {
        store.set(key.as_str(), value.as_str())?;
        log::debug!("highscore '{}' saved under '{}'", value, key);
        Ok(())
    }))
}

/// Reads the stored highscore for `key` and, if there is one, hands it to
/// the application. Returns what was sent.
///
/// Nothing is sent when the slot is empty or the read fails; the
/// application falls back to its own default in that case.
pub fn restore<P, S>(
    ports: &P,
    store: &S,
    key: &StorageKey,
) -> Result<Option<Highscore>, BridgeError>
where
    P: HighscorePorts + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let stored = match store.get(key.as_str()) {
        Ok(stored) => stored,
        Err(err) => {
            log::warn!("could not read highscore for '{}': {}", key, err);
            None
        }
    };

    let Some(raw) = stored else {
        log::info!("no stored highscore for '{}'", key);
        return Ok(None);
    };

    let highscore = Highscore::from(raw);
    ports.emit_initial(&highscore)?;
    log::info!("restored highscore '{}' for '{}'", highscore, key);

    Ok(Some(highscore))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BridgeState {
    Uninitialized,
    Listening,
}

#[derive(Debug)]
pub struct HighscoreBridge {
    config: BridgeConfig,
    state: BridgeState,
}

impl HighscoreBridge {
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config,
            state: BridgeState::Uninitialized,
        }
    }

    pub fn state(&self) -> BridgeState {
        self.state
    }

    pub fn connect<P, S>(
        &mut self,
        ports: &P,
        store: S,
    ) -> Result<Option<Highscore>, BridgeError>
    where
        P: HighscorePorts + ?Sized,
        S: KeyValueStore + 'static,
    {
        if self.state == BridgeState::Listening {
            return Err(BridgeError::AlreadyListening {
                app_name: self.config.app_name().to_string(),
            });
        }

        let key = self.config.app_name();
        let restored = restore(ports, &store, key)?;
        subscribe(ports, store, key)?;
        self.state = BridgeState::Listening;

        Ok(restored)
    }
}

impl Default for HighscoreBridge {
    fn default() -> Self {
        Self::new(BridgeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::LoopbackPorts;
    use crate::store::MemoryStore;

    fn key(name: &str) -> StorageKey {
        StorageKey::new(name).expect("valid key")
    }

    #[derive(Clone)]
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, BridgeError> {
            Err(BridgeError::StorageUnavailable("disabled".to_string()))
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), BridgeError> {
            Err(BridgeError::Storage {
                key: key.to_string(),
                message: "QuotaExceededError".to_string(),
            })
        }
    }

    #[test]
    fn saved_value_comes_back_unchanged() {
        let ports = LoopbackPorts::new();
        let store = MemoryStore::new();
        let slot = key("snake");

        subscribe(&ports, store.clone(), &slot).expect("subscribe");
        ports.publish_save(" 0042 ").expect("publish");

        let restored = restore(&ports, &store, &slot).expect("restore");
        assert_eq!(restored, Some(Highscore::from(" 0042 ")));
        assert_eq!(ports.take_initial(), vec![Highscore::from(" 0042 ")]);
    }

    #[test]
    fn first_run_sends_nothing() {
        let ports = LoopbackPorts::new();
        let store = MemoryStore::new();

        assert_eq!(restore(&ports, &store, &key("snake")), Ok(None));
        assert!(ports.take_initial().is_empty());
    }

    #[test]
    fn later_save_wins() {
        let ports = LoopbackPorts::new();
        let store = MemoryStore::new();
        let slot = key("snake");

        subscribe(&ports, store.clone(), &slot).expect("subscribe");
        ports.publish_save(10_u32).expect("publish");
        ports.publish_save(3_u32).expect("publish");

        assert_eq!(restore(&ports, &store, &slot), Ok(Some(Highscore::from("3"))));
    }

    #[test]
    fn keys_do_not_leak_into_each_other() {
        let ports = LoopbackPorts::new();
        let store = MemoryStore::new();

        subscribe(&ports, store.clone(), &key("snake")).expect("subscribe");
        ports.publish_save("99").expect("publish");

        assert_eq!(restore(&ports, &store, &key("tetris")), Ok(None));
        assert!(ports.take_initial().is_empty());
    }

    #[test]
    fn repeated_restore_is_stable_and_read_only() {
        let ports = LoopbackPorts::new();
        let store = MemoryStore::new();
        let slot = key("snake");
        store.set("snake", "21").expect("seed");

        let first = restore(&ports, &store, &slot).expect("restore");
        let second = restore(&ports, &store, &slot).expect("restore");

        assert_eq!(first, second);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("snake"), Ok(Some("21".to_string())));
        assert_eq!(ports.take_initial().len(), 2);
    }

    #[test]
    fn empty_stored_value_is_still_sent() {
        let ports = LoopbackPorts::new();
        let store = MemoryStore::new();
        store.set("snake", "").expect("seed");

        assert_eq!(
            restore(&ports, &store, &key("snake")),
            Ok(Some(Highscore::from("")))
        );
        assert_eq!(ports.take_initial(), vec![Highscore::from("")]);
    }

    #[test]
    fn unreadable_store_looks_like_first_run() {
        let ports = LoopbackPorts::new();

        assert_eq!(restore(&ports, &BrokenStore, &key("snake")), Ok(None));
        assert!(ports.take_initial().is_empty());
    }

    #[test]
    fn failed_write_surfaces_to_publisher_and_listener_survives() {
        let ports = LoopbackPorts::new();
        subscribe(&ports, BrokenStore, &key("snake")).expect("subscribe");

        let expected = Err(BridgeError::Storage {
            key: "snake".to_string(),
            message: "QuotaExceededError".to_string(),
        });
        assert_eq!(ports.publish_save("1"), expected);
        assert_eq!(ports.publish_save("2"), expected);
        assert_eq!(ports.listener_count(), 1);
    }

    #[test]
    fn connect_restores_before_listening() {
        let ports = LoopbackPorts::new();
        let store = MemoryStore::new();
        store.set(crate::config::DEFAULT_APP_NAME, "8").expect("seed");

        let mut bridge = HighscoreBridge::default();
        assert_eq!(bridge.state(), BridgeState::Uninitialized);

        let restored = bridge.connect(&ports, store.clone()).expect("connect");
        assert_eq!(restored, Some(Highscore::from("8")));
        assert_eq!(bridge.state(), BridgeState::Listening);
        assert_eq!(ports.take_initial(), vec![Highscore::from("8")]);

        ports.publish_save(12_u32).expect("publish");
        assert_eq!(
            store.get(crate::config::DEFAULT_APP_NAME),
            Ok(Some("12".to_string()))
        );
        assert!(ports.take_initial().is_empty());
    }

    #[test]
    fn connect_only_once() {
        let ports = LoopbackPorts::new();
        let config = BridgeConfig::new("snake").expect("config");
        let mut bridge = HighscoreBridge::new(config);
        let store = MemoryStore::new();
        store.set("snake", "8").expect("seed");

        bridge.connect(&ports, store.clone()).expect("connect");
        assert_eq!(
            bridge.connect(&ports, store),
            Err(BridgeError::AlreadyListening {
                app_name: "snake".to_string()
            })
        );
        assert_eq!(ports.listener_count(), 1);
        assert_eq!(ports.take_initial(), vec![Highscore::from("8")]);
    }
}
