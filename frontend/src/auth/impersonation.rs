use chrono::{DateTime, Utc};

use super::{error::AuthError, identity::Identity};

/// Admin-only scoping of displayed data to another identity.
///
/// The context only changes whose data is shown. Authorization keeps
/// resolving against [`ImpersonationContext::actor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImpersonationContext {
    actor: Identity,
    target_id: String,
    activated_at: DateTime<Utc>,
}

impl ImpersonationContext {
    pub fn begin(
        caller: &Identity,
        target_id: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, AuthError> {
        if !caller.is_admin() {
            log::warn!(
                "identity {} ({}) attempted to open an impersonation view",
                caller.id,
                caller.role
            );
            return Err(AuthError::ImpersonationDenied { role: caller.role });
        }
        let target_id = target_id.into();
        if target_id.trim().is_empty() {
            return Err(AuthError::InvalidImpersonationTarget);
        }
        log::info!("admin {} viewing as {}", caller.id, target_id);
        Ok(Self {
            actor: caller.clone(),
            target_id,
            activated_at: now,
        })
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn actor(&self) -> &Identity {
        &self.actor
    }

    pub fn activated_at(&self) -> DateTime<Utc> {
        self.activated_at
    }
}

/// Whose data a view subtree shows, and who is acting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewScope {
    Own(Identity),
    Impersonating(ImpersonationContext),
}

impl ViewScope {
    pub fn data_owner_id(&self) -> &str {
        match self {
            ViewScope::Own(identity) => &identity.id,
            ViewScope::Impersonating(ctx) => ctx.target_id(),
        }
    }

    pub fn authorized_identity(&self) -> &Identity {
        match self {
            ViewScope::Own(identity) => identity,
            ViewScope::Impersonating(ctx) => ctx.actor(),
        }
    }

    pub fn is_impersonating(&self) -> bool {
        matches!(self, ViewScope::Impersonating(_))
    }
}
