use std::cell::RefCell;
use std::collections::VecDeque;
use std::mem;
use std::rc::Rc;

use crate::error::BridgeError;
use crate::record::Highscore;

pub const SAVE_PORT: &str = "saveHighscore";
pub const INITIAL_PORT: &str = "initialHighscore";

/// Listener attached to the save port. An `Err` is handed back to the
/// host unchanged.
pub type SaveHandler = Box<dyn FnMut(Highscore) -> Result<(), BridgeError>>;

pub trait HighscorePorts {
    fn on_save(&self, handler: SaveHandler) -> Result<(), BridgeError>;

    fn emit_initial(&self, value: &Highscore) -> Result<(), BridgeError>;
}

#[derive(Clone, Default)]
pub struct LoopbackPorts {
    handlers: Rc<RefCell<Vec<SaveHandler>>>,
    initial: Rc<RefCell<VecDeque<Highscore>>>,
}

impl LoopbackPorts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plays the application's side of the save port. Handlers run one
    /// after another in registration order; the first failure stops the
    /// publish and is returned. Listeners added during a publish only see
    /// later publishes.
    pub fn publish_save(&self, value: impl Into<Highscore>) -> Result<(), BridgeError> {
        let value = value.into();
        // Nothing is borrowed while handlers run; they may call `on_save`.
        let mut handlers = mem::take(&mut *self.handlers.borrow_mut());
        let result = handlers
            .iter_mut()
            .try_for_each(|handler| handler(value.clone()));

        let mut slot = self.handlers.borrow_mut();
        let added = mem::replace(&mut *slot, handlers);
        slot.extend(added);

        result
    }

    pub fn take_initial(&self) -> Vec<Highscore> {
        self.initial.borrow_mut().drain(..).collect()
    }

    pub fn listener_count(&self) -> usize {
        self.handlers.borrow().len()
    }
}

impl HighscorePorts for LoopbackPorts {
    fn on_save(&self, handler: SaveHandler) -> Result<(), BridgeError> {
        self.handlers.borrow_mut().push(handler);
        Ok(())
    }

    fn emit_initial(&self, value: &Highscore) -> Result<(), BridgeError> {
        self.initial.borrow_mut().push_back(value.clone());
        Ok(())
    }
}
