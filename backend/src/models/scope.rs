use serde::Serialize;
use thiserror::Error;

use super::identity::{AuthUser, Role};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    #[error("role {role} may not act on behalf of a provider")]
    NotAdmin { role: Role },
    #[error("impersonation target must not be empty")]
    EmptyTarget,
}

/// Whose data a request reads, and who is authorised to read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewScope {
    pub data_owner_id: String,
    pub authorized_id: String,
    pub authorized_role: Role,
    pub impersonating: bool,
}

impl ViewScope {
    pub fn own(caller: &AuthUser) -> Self {
        Self {
            data_owner_id: caller.id.clone(),
            authorized_id: caller.id.clone(),
            authorized_role: caller.role,
            impersonating: false,
        }
    }

    /// Scope for `caller` optionally acting as `target`. Only admins may
    /// name a target.
    pub fn resolve(caller: &AuthUser, target: Option<&str>) -> Result<Self, ScopeError> {
        let Some(target) = target else {
            return Ok(Self::own(caller));
        };
        if !caller.is_admin() {
            return Err(ScopeError::NotAdmin { role: caller.role });
        }
        let target = target.trim();
        if target.is_empty() {
            return Err(ScopeError::EmptyTarget);
        }
        Ok(Self {
            data_owner_id: target.to_string(),
            authorized_id: caller.id.clone(),
            authorized_role: caller.role,
            impersonating: true,
        })
    }
}
