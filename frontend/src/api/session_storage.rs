use std::cell::RefCell;

use crate::{auth::{AuthError, Session}, utils::storage as storage_utils};

/// Where the GoTrue client keeps the persisted session between reloads.
pub trait SessionStorage {
    fn load(&self) -> Result<Option<Session>, AuthError>;
    fn save(&self, session: &Session) -> Result<(), AuthError>;
    fn clear(&self) -> Result<(), AuthError>;
}

/// Storage key GoTrue clients use: `sb-<project-ref>-auth-token`.
pub fn storage_key(supabase_url: &str) -> String {
    let host = supabase_url
        .split("://")
        .nth(1)
        .unwrap_or(supabase_url)
        .split(['/', ':'])
        .next()
        .unwrap_or_default();
    let project_ref = host.split('.').next().filter(|s| !s.is_empty()).unwrap_or("local");
    format!("sb-{}-auth-token", project_ref)
}

pub struct LocalSessionStorage {
    key: String,
}

impl LocalSessionStorage {
    pub fn for_project(supabase_url: &str) -> Self {
        Self {
            key: storage_key(supabase_url),
        }
    }
}

impl SessionStorage for LocalSessionStorage {
    fn load(&self) -> Result<Option<Session>, AuthError> {
        let Some(raw) = storage_utils::read_item(&self.key).map_err(AuthError::Storage)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(err) => {
                log::warn!("discarding unreadable stored session: {err}");
                storage_utils::remove_item(&self.key).map_err(AuthError::Storage)?;
                Ok(None)
            }
        }
    }

    fn save(&self, session: &Session) -> Result<(), AuthError> {
        let raw = serde_json::to_string(session)?;
        storage_utils::write_item(&self.key, &raw).map_err(AuthError::Storage)
    }

    fn clear(&self) -> Result<(), AuthError> {
        storage_utils::remove_item(&self.key).map_err(AuthError::Storage)
    }
}

#[derive(Default)]
pub struct MemorySessionStorage {
    slot: RefCell<Option<Session>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            slot: RefCell::new(Some(session)),
        }
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Result<Option<Session>, AuthError> {
        Ok(self.slot.borrow().clone())
    }

    fn save(&self, session: &Session) -> Result<(), AuthError> {
        *self.slot.borrow_mut() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        self.slot.borrow_mut().take();
        Ok(())
    }
}
