use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use super::{
    provider::{IdentityProvider, SessionChange},
    session::SessionSnapshot,
    store::SessionStore,
    subscription::Subscription,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    Idle,
    Resolving,
    Subscribed,
    Deactivated,
}

struct BridgeInner {
    state: BridgeState,
    subscription: Option<Subscription>,
}

/// The only writer of a [`SessionStore`]: resolves the initial session, then
/// mirrors every provider notification into the store.
#[derive(Clone)]
pub struct SessionBridge {
    store: SessionStore,
    inner: Rc<RefCell<BridgeInner>>,
}

impl SessionBridge {
    pub fn new(store: SessionStore) -> Self {
        Self {
            store,
            inner: Rc::new(RefCell::new(BridgeInner {
                state: BridgeState::Idle,
                subscription: None,
            })),
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn state(&self) -> BridgeState {
        self.inner.borrow().state
    }

    pub fn is_subscribed(&self) -> bool {
        self.inner.borrow().subscription.is_some()
    }

    /// Subscribes before the initial fetch so nothing emitted while it is in
    /// flight is lost. A notification that lands first supersedes the fetched
    /// session, which is then discarded as stale.
    pub async fn activate<P>(&self, provider: &P)
    where
        P: IdentityProvider + ?Sized,
    {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.state != BridgeState::Idle {
                log::debug!("session bridge activation skipped ({:?})", inner.state);
                return;
            }
            inner.state = BridgeState::Resolving;
        }

        let superseded = Rc::new(Cell::new(false));
        let store = self.store.clone();
        let seen = Rc::clone(&superseded);
        let subscription = provider.on_session_change(Box::new(move |change: &SessionChange| {
            log::debug!("session change: {:?}", change.event);
            seen.set(true);
            store.replace(SessionSnapshot::resolved(change.session.clone()));
        }));
        self.inner.borrow_mut().subscription = Some(subscription);

        let initial = match provider.current_session().await {
            Ok(session) => session,
            Err(err) => {
                log::warn!("initial session fetch failed, treating as signed out: {err}");
                None
            }
        };

        let mut inner = self.inner.borrow_mut();
        if inner.state == BridgeState::Deactivated {
            log::debug!("session bridge deactivated while resolving");
            return;
        }
        inner.state = BridgeState::Subscribed;
        drop(inner);

        if superseded.get() {
            log::debug!("initial session superseded by a change notification");
        } else {
            self.store.replace(SessionSnapshot::resolved(initial));
        }
    }

    /// Cancels the provider subscription. Safe to call more than once and
    /// while activation is still resolving.
    pub fn deactivate(&self) {
        let subscription = {
            let mut inner = self.inner.borrow_mut();
            inner.state = BridgeState::Deactivated;
            inner.subscription.take()
        };
        if let Some(subscription) = subscription {
            subscription.cancel();
        }
    }
}
