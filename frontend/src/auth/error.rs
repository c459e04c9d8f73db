use thiserror::Error;

use super::identity::Role;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("identity provider unavailable: {0}")]
    ProviderUnavailable(String),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("session expired or revoked")]
    SessionExpired,
    #[error("role {role} may not impersonate other identities")]
    ImpersonationDenied { role: Role },
    #[error("impersonation target must not be empty")]
    InvalidImpersonationTarget,
    #[error("session storage error: {0}")]
    Storage(String),
    #[error("unexpected provider response: {0}")]
    Decode(String),
}

impl AuthError {
    /// Message safe to show end users; never carries provider text.
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "Incorrect email or password.",
            AuthError::SessionExpired => "Your session has ended. Please sign in again.",
            AuthError::ImpersonationDenied { .. } | AuthError::InvalidImpersonationTarget => {
                "You do not have access to that page."
            }
            AuthError::ProviderUnavailable(_) | AuthError::Storage(_) | AuthError::Decode(_) => {
                "We could not reach the sign-in service. Please try again."
            }
        }
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AuthError::Decode(err.to_string())
        } else {
            AuthError::ProviderUnavailable(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(err: serde_json::Error) -> Self {
        AuthError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_hide_provider_details() {
        let err = AuthError::ProviderUnavailable("dns error: upstream.internal".into());
        assert!(!err.user_message().contains("upstream.internal"));
        let err = AuthError::Decode("missing field `access_token`".into());
        assert!(!err.user_message().contains("access_token"));
    }
}
