use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::auth::{Identity, Role, Session};

#[derive(Debug, Clone, Serialize)]
pub struct PasswordGrant<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshGrant<'a> {
    pub refresh_token: &'a str,
}

/// `/auth/v1/token` success body.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
    pub user: GoTrueUser,
}

impl TokenResponse {
    pub fn into_session(self, now: DateTime<Utc>) -> Session {
        let expires_at = self
            .expires_at
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
            .unwrap_or_else(|| now + Duration::seconds(self.expires_in));
        Session {
            identity: self.user.into_identity(),
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            issued_at: now,
            expires_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoTrueUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub app_metadata: Map<String, Value>,
    #[serde(default)]
    pub user_metadata: Map<String, Value>,
}

impl GoTrueUser {
    /// Role comes only from `app_metadata`, which users cannot edit.
    /// A missing or unknown role maps to the least privileged one.
    pub fn role(&self) -> Role {
        self.app_metadata
            .get("role")
            .and_then(Value::as_str)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(Role::Client)
    }

    pub fn into_identity(self) -> Identity {
        let role = self.role();
        let full_name = ["full_name", "name"]
            .into_iter()
            .find_map(|key| self.user_metadata.get(key).and_then(Value::as_str))
            .map(str::to_string);
        Identity {
            id: self.id,
            role,
            email: self.email.filter(|e| !e.is_empty()),
            full_name,
            phone: self.phone.filter(|p| !p.is_empty()),
            created_at: self.created_at,
        }
    }
}

/// GoTrue reports errors under a few different keys depending on endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoTrueError {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
}

impl GoTrueError {
    pub fn message(&self) -> &str {
        self.error_description
            .as_deref()
            .or(self.msg.as_deref())
            .or(self.error.as_deref())
            .unwrap_or("unknown error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(app_role: Option<&str>, user_role: Option<&str>) -> GoTrueUser {
        let mut body = json!({
            "id": "9f1c",
            "email": "pat@example.com",
            "phone": "",
            "created_at": "2025-11-02T10:00:00.123456Z",
            "app_metadata": {},
            "user_metadata": { "full_name": "Pat Doe" }
        });
        if let Some(role) = app_role {
            body["app_metadata"]["role"] = json!(role);
        }
        if let Some(role) = user_role {
            body["user_metadata"]["role"] = json!(role);
        }
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn role_is_read_from_app_metadata_only() {
        assert_eq!(user(Some("provider"), Some("admin")).role(), Role::Provider);
        assert_eq!(user(None, Some("admin")).role(), Role::Client);
        assert_eq!(user(None, None).role(), Role::Client);
        assert_eq!(user(Some("superuser"), None).role(), Role::Client);
    }

    #[test]
    fn identity_drops_empty_contact_fields() {
        let identity = user(Some("provider"), None).into_identity();
        assert_eq!(identity.full_name.as_deref(), Some("Pat Doe"));
        assert_eq!(identity.email.as_deref(), Some("pat@example.com"));
        assert!(identity.phone.is_none());
    }

    #[test]
    fn token_response_prefers_absolute_expiry() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let response = TokenResponse {
            access_token: "a".into(),
            refresh_token: "r".into(),
            expires_in: 3600,
            expires_at: None,
            token_type: Some("bearer".into()),
            user: user(None, None),
        };
        let session = response.clone().into_session(now);
        assert_eq!(session.expires_at, now + Duration::seconds(3600));

        let absolute = TokenResponse {
            expires_at: Some(now.timestamp() + 60),
            ..response
        };
        assert_eq!(
            absolute.into_session(now).expires_at,
            now + Duration::seconds(60)
        );
    }
}
