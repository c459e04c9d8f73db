use async_trait::async_trait;
use chrono::{Duration, Utc};
use reqwest::{Client, Response, StatusCode};

use super::{
    session_storage::SessionStorage,
    types::{GoTrueError, PasswordGrant, RefreshGrant, TokenResponse},
};
use crate::auth::{
    provider::{ChangeListener, IdentityProvider, SessionChange},
    subscription::{Listeners, Subscription},
    AuthError, Session,
};

/// Sessions this close to expiry are refreshed before being handed out.
pub const REFRESH_MARGIN_SECS: i64 = 60;

/// GoTrue (Supabase Auth) REST client acting as the app's identity provider.
pub struct SupabaseAuth<S> {
    http: Client,
    base_url: String,
    anon_key: String,
    storage: S,
    listeners: Listeners<SessionChange>,
}

impl<S: SessionStorage> SupabaseAuth<S> {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>, storage: S) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            storage,
            listeners: Listeners::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn emit(&self, change: SessionChange) {
        self.listeners.emit(&change);
    }

    async fn error_message(response: Response) -> String {
        let status = response.status();
        let body: GoTrueError = response.json().await.unwrap_or_default();
        format!("{} ({})", body.message(), status.as_u16())
    }

    async fn token_request<T: serde::Serialize + ?Sized>(
        &self,
        grant_type: &str,
        body: &T,
    ) -> Result<Response, AuthError> {
        let response = self
            .http
            .post(self.endpoint("token"))
            .query(&[("grant_type", grant_type)])
            .header("apikey", &self.anon_key)
            .json(body)
            .send()
            .await?;
        Ok(response)
    }

    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let response = self
            .token_request("password", &PasswordGrant { email, password })
            .await?;
        let status = response.status();
        if matches!(status, StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED) {
            log::debug!("sign-in rejected: {}", Self::error_message(response).await);
            return Err(AuthError::InvalidCredentials);
        }
        if !status.is_success() {
            return Err(AuthError::ProviderUnavailable(
                Self::error_message(response).await,
            ));
        }
        let session = response.json::<TokenResponse>().await?.into_session(Utc::now());
        self.storage.save(&session)?;
        self.emit(SessionChange::signed_in(session.clone()));
        Ok(session)
    }

    /// Exchanges the stored refresh token. A rejected token ends the session
    /// and yields `Ok(None)`; transport failures are returned as errors and
    /// leave the stored session untouched.
    pub async fn refresh_session(&self) -> Result<Option<Session>, AuthError> {
        let Some(current) = self.storage.load()? else {
            return Ok(None);
        };
        let response = self
            .token_request(
                "refresh_token",
                &RefreshGrant {
                    refresh_token: &current.refresh_token,
                },
            )
            .await?;
        let status = response.status();
        if status.is_client_error() {
            log::info!(
                "refresh token rejected, ending session: {}",
                Self::error_message(response).await
            );
            self.storage.clear()?;
            self.emit(SessionChange::signed_out());
            return Ok(None);
        }
        if !status.is_success() {
            return Err(AuthError::ProviderUnavailable(
                Self::error_message(response).await,
            ));
        }
        let session = response.json::<TokenResponse>().await?.into_session(Utc::now());
        self.storage.save(&session)?;
        self.emit(SessionChange::refreshed(session.clone()));
        Ok(Some(session))
    }

    /// Called on a timer so access tokens never lapse while the app is open.
    pub async fn refresh_if_expiring(&self) -> Result<(), AuthError> {
        let now = Utc::now();
        match self.storage.load()? {
            Some(session) if session.expires_within(now, Duration::seconds(REFRESH_MARGIN_SECS)) => {
                self.refresh_session().await.map(|_| ())
            }
            _ => Ok(()),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

#[async_trait(?Send)]
impl<S: SessionStorage> IdentityProvider for SupabaseAuth<S> {
    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        let Some(stored) = self.storage.load()? else {
            return Ok(None);
        };
        let now = Utc::now();
        if !stored.expires_within(now, Duration::seconds(REFRESH_MARGIN_SECS)) {
            return Ok(Some(stored));
        }
        match self.refresh_session().await {
            Ok(refreshed) => Ok(refreshed),
            Err(err) if stored.is_valid_at(now) => {
                log::warn!("early refresh failed, keeping current token: {err}");
                Ok(Some(stored))
            }
            Err(err) => Err(err),
        }
    }

    fn on_session_change(&self, listener: ChangeListener) -> Subscription {
        self.listeners.add(listener)
    }

    /// Local state is always cleared, even if the revoke call fails.
    async fn sign_out(&self) -> Result<(), AuthError> {
        if let Some(session) = self.storage.load()? {
            let revoke = self
                .http
                .post(self.endpoint("logout"))
                .header("apikey", &self.anon_key)
                .bearer_auth(&session.access_token)
                .send()
                .await;
            match revoke {
                Ok(response) if !response.status().is_success() => log::warn!(
                    "logout not acknowledged: {}",
                    Self::error_message(response).await
                ),
                Err(err) => log::warn!("logout request failed: {err}"),
                Ok(_) => {}
            }
        }
        self.storage.clear()?;
        self.emit(SessionChange::signed_out());
        Ok(())
    }
}
