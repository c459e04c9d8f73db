#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::auth::{
        provider::{ChangeListener, IdentityProvider, SessionChange},
        subscription::{Listeners, Subscription},
        AuthError, Identity, Role, Session,
    };
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone, Utc};
    use futures::channel::oneshot;
    use std::cell::{Cell, RefCell};

    pub fn identity(id: &str, role: Role) -> Identity {
        Identity {
            id: id.into(),
            role,
            email: Some(format!("{id}@example.com")),
            full_name: None,
            phone: None,
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap(),
        }
    }

    /// Session valid for an hour from now, tokens derived from the id.
    pub fn session_for(id: &str, role: Role) -> Session {
        let now = Utc::now();
        Session {
            identity: identity(id, role),
            access_token: format!("access-{id}"),
            refresh_token: format!("refresh-{id}"),
            issued_at: now,
            expires_at: now + Duration::hours(1),
        }
    }

    /// Scriptable identity provider for bridge and component tests.
    pub struct FakeProvider {
        initial: Result<Option<Session>, AuthError>,
        gate: RefCell<Option<oneshot::Receiver<()>>>,
        listeners: Listeners<SessionChange>,
        sign_outs: Cell<usize>,
    }

    impl FakeProvider {
        fn build(initial: Result<Option<Session>, AuthError>) -> Self {
            Self {
                initial,
                gate: RefCell::new(None),
                listeners: Listeners::new(),
                sign_outs: Cell::new(0),
            }
        }

        pub fn with_session(session: Option<Session>) -> Self {
            Self::build(Ok(session))
        }

        pub fn failing() -> Self {
            Self::build(Err(AuthError::ProviderUnavailable("connection refused".into())))
        }

        /// `current_session` blocks until the returned sender fires.
        pub fn gated(session: Option<Session>) -> (Self, oneshot::Sender<()>) {
            let (tx, rx) = oneshot::channel();
            let provider = Self::build(Ok(session));
            *provider.gate.borrow_mut() = Some(rx);
            (provider, tx)
        }

        pub fn emit(&self, change: SessionChange) {
            self.listeners.emit(&change);
        }

        pub fn listener_count(&self) -> usize {
            self.listeners.len()
        }

        pub fn sign_out_count(&self) -> usize {
            self.sign_outs.get()
        }
    }

    #[async_trait(?Send)]
    impl IdentityProvider for FakeProvider {
        async fn current_session(&self) -> Result<Option<Session>, AuthError> {
            let gate = self.gate.borrow_mut().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            self.initial.clone()
        }

        fn on_session_change(&self, listener: ChangeListener) -> Subscription {
            self.listeners.add(listener)
        }

        async fn sign_out(&self) -> Result<(), AuthError> {
            self.sign_outs.set(self.sign_outs.get() + 1);
            self.emit(SessionChange::signed_out());
            Ok(())
        }
    }
}
