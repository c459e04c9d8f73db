use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identity::{AuthUser, Role};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

/// Claims carried by a Supabase (GoTrue) access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub aud: String,
    pub exp: i64,
    #[serde(default)]
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Postgres role, `authenticated` for signed-in users. Not the app role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub app_metadata: AppMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl Claims {
    pub fn new(user_id: String, email: Option<String>, role: Role, audience: &str, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            aud: audience.to_string(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            email,
            role: Some("authenticated".to_string()),
            app_metadata: AppMetadata {
                role: Some(role.as_str().to_string()),
                provider: Some("email".to_string()),
            },
            session_id: Some(Uuid::new_v4().to_string()),
        }
    }

    /// Application role. Only `app_metadata` is trusted here: users can
    /// edit their own `user_metadata`.
    pub fn app_role(&self) -> Role {
        Role::from_claim(self.app_metadata.role.as_deref())
    }

    pub fn to_user(&self) -> AuthUser {
        AuthUser {
            id: self.sub.clone(),
            email: self.email.clone(),
            role: self.app_role(),
        }
    }
}

pub fn create_access_token(claims: &Claims, secret: &str) -> anyhow::Result<String> {
    let token = encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?;
    Ok(token)
}

pub fn verify_access_token(token: &str, secret: &str, audience: &str) -> anyhow::Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[audience]);
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )?;

    Ok(token_data.claims)
}
