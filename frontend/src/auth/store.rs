use std::{cell::RefCell, rc::Rc};

use super::{
    session::SessionSnapshot,
    subscription::{Listeners, Subscription},
};

/// Process-wide holder of the current [`SessionSnapshot`].
///
/// Any number of readers may clone the handle, read and subscribe. Writes go
/// through the crate-private [`SessionStore::replace`], used only by the
/// session bridge.
#[derive(Clone, Default)]
pub struct SessionStore {
    current: Rc<RefCell<SessionSnapshot>>,
    listeners: Listeners<SessionSnapshot>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.current.borrow().clone()
    }

    pub fn subscribe(&self, listener: impl Fn(&SessionSnapshot) + 'static) -> Subscription {
        self.listeners.add(listener)
    }

    pub fn reader_count(&self) -> usize {
        self.listeners.len()
    }

    /// Swaps the whole snapshot. Returns `false` (and notifies nobody) when
    /// the new value equals the current one.
    pub(crate) fn replace(&self, next: SessionSnapshot) -> bool {
        {
            let mut current = self.current.borrow_mut();
            if *current == next {
                return false;
            }
            *current = next.clone();
        }
        self.listeners.emit(&next);
        true
    }
}
