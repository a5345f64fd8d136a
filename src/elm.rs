use js_sys::{Function, Object, Reflect};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

use crate::error::{js_message, BridgeError};
use crate::ports::{HighscorePorts, SaveHandler, INITIAL_PORT, SAVE_PORT};
use crate::record::Highscore;

#[derive(Clone, Debug)]
pub struct ElmPorts {
    ports: JsValue,
}

impl ElmPorts {
    pub fn new(app: &JsValue) -> Result<Self, BridgeError> {
        let ports = Reflect::get(app, &JsValue::from_str("ports")).map_err(|err| {
            BridgeError::Port {
                port: "ports",
                message: js_message(&err),
            }
        })?;
        if ports.is_undefined() || ports.is_null() {
            return Err(BridgeError::MissingPort("ports"));
        }

        Ok(Self { ports })
    }

    fn port(&self, name: &'static str) -> Result<JsValue, BridgeError> {
        let port = Reflect::get(&self.ports, &JsValue::from_str(name)).map_err(|err| {
            BridgeError::Port {
                port: name,
                message: js_message(&err),
            }
        })?;
        if port.is_undefined() || port.is_null() {
            return Err(BridgeError::MissingPort(name));
        }

        Ok(port)
    }
}

fn port_method(port: &JsValue, name: &'static str, method: &str) -> Result<Function, BridgeError> {
    Reflect::get(port, &JsValue::from_str(method))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
        .ok_or_else(|| BridgeError::Port {
            port: name,
            message: format!("'{method}' is not a function"),
        })
}

pub(crate) fn coerce(value: &JsValue) -> Highscore {
    if let Some(text) = value.as_string() {
        return Highscore::from(text);
    }
    if let Some(number) = value.as_f64() {
        return Highscore::from(number);
    }
    if let Some(flag) = value.as_bool() {
        return Highscore::from(flag);
    }
    if value.is_null() {
        return Highscore::from("null");
    }
    if value.is_undefined() {
        return Highscore::from("undefined");
    }
    if value.is_object() {
        return Highscore::from(String::from(value.unchecked_ref::<Object>().to_string()));
    }

    Highscore::from(format!("{value:?}"))
}

impl HighscorePorts for ElmPorts {
    fn on_save(&self, mut handler: SaveHandler) -> Result<(), BridgeError> {
        let port = self.port(SAVE_PORT)?;
        let subscribe = port_method(&port, SAVE_PORT, "subscribe")?;

        let callback = Closure::wrap(Box::new(move |value: JsValue| -> Result<(), JsValue> {
            handler(coerce(&value)).map_err(JsValue::from)
        }) as Box<dyn FnMut(JsValue) -> Result<(), JsValue>>);

        subscribe
            .call1(&port, callback.as_ref().unchecked_ref())
            .map_err(|err| BridgeError::Port {
                port: SAVE_PORT,
                message: js_message(&err),
            })?;

        // Subscriptions live as long as the page.
        callback.forget();
        Ok(())
    }

    fn emit_initial(&self, value: &Highscore) -> Result<(), BridgeError> {
        let port = self.port(INITIAL_PORT)?;
        let send = port_method(&port, INITIAL_PORT, "send")?;

        send.call1(&port, &JsValue::from_str(value.as_str()))
            .map(|_| ())
            .map_err(|err| BridgeError::Port {
                port: INITIAL_PORT,
                message: js_message(&err),
            })
    }
}
