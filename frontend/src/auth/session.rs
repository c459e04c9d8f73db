use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::identity::Identity;

/// One authenticated browsing context, owned by exactly one identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub identity: Identity,
    pub access_token: String,
    pub refresh_token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    pub fn expires_within(&self, now: DateTime<Utc>, margin: Duration) -> bool {
        self.expires_at - now <= margin
    }
}

/// Locally cached, observable projection of the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub identity: Option<Identity>,
    pub session: Option<Session>,
    pub loading: bool,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self::initial()
    }
}

impl SessionSnapshot {
    pub fn initial() -> Self {
        Self {
            identity: None,
            session: None,
            loading: true,
        }
    }

    /// Identity and session always come from the same payload.
    pub fn resolved(session: Option<Session>) -> Self {
        Self {
            identity: session.as_ref().map(|s| s.identity.clone()),
            session,
            loading: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !self.loading && self.identity.is_some()
    }

    /// `loading == false && identity == None`
    pub fn is_unauthenticated(&self) -> bool {
        !self.loading && self.identity.is_none()
    }
}
