use async_trait::async_trait;

use super::{error::AuthError, session::Session, subscription::Subscription};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
}

/// Payload delivered to change listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionChange {
    pub event: AuthEvent,
    pub session: Option<Session>,
}

impl SessionChange {
    pub fn signed_in(session: Session) -> Self {
        Self {
            event: AuthEvent::SignedIn,
            session: Some(session),
        }
    }

    pub fn refreshed(session: Session) -> Self {
        Self {
            event: AuthEvent::TokenRefreshed,
            session: Some(session),
        }
    }

    pub fn signed_out() -> Self {
        Self {
            event: AuthEvent::SignedOut,
            session: None,
        }
    }
}

pub type ChangeListener = Box<dyn Fn(&SessionChange)>;

/// The identity provider SDK surface the session core depends on.
#[async_trait(?Send)]
pub trait IdentityProvider {
    /// One-shot read of the current session.
    async fn current_session(&self) -> Result<Option<Session>, AuthError>;

    /// Listener is called for every sign-in, sign-out and refresh, in the
    /// order the provider produces them.
    fn on_session_change(&self, listener: ChangeListener) -> Subscription;

    async fn sign_out(&self) -> Result<(), AuthError>;
}
