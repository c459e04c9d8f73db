use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use std::{env, net::SocketAddr};

const DEFAULT_SUPABASE_URL: &str = "http://localhost:54321";
const DEFAULT_JWT_AUDIENCE: &str = "authenticated";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_FRONTEND_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
    /// Render and validate messages but never hand them to the relay.
    pub skip_send: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub supabase_url: String,
    pub jwt_secret: String,
    pub jwt_audience: String,
    pub bind_addr: SocketAddr,
    pub frontend_url: String,
    pub smtp: SmtpConfig,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `load` passes the process
    /// environment.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let jwt_secret = get("SUPABASE_JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow!("SUPABASE_JWT_SECRET must be set"))?;

        let bind_addr_raw = var("BIND_ADDR", DEFAULT_BIND_ADDR);
        let bind_addr = bind_addr_raw
            .parse()
            .with_context(|| format!("Invalid BIND_ADDR value: {}", bind_addr_raw))?;

        let smtp = SmtpConfig {
            host: var("SMTP_HOST", "localhost"),
            port: var("SMTP_PORT", "587").parse().unwrap_or(587),
            username: var("SMTP_USERNAME", ""),
            password: var("SMTP_PASSWORD", ""),
            from_address: var("SMTP_FROM_ADDRESS", "noreply@sheduleapp.local"),
            skip_send: var("SMTP_SKIP_SEND", "false").eq_ignore_ascii_case("true"),
        };

        Ok(Config {
            supabase_url: var("SUPABASE_URL", DEFAULT_SUPABASE_URL),
            jwt_secret,
            jwt_audience: var("SUPABASE_JWT_AUDIENCE", DEFAULT_JWT_AUDIENCE),
            bind_addr,
            frontend_url: var("FRONTEND_URL", DEFAULT_FRONTEND_URL),
            smtp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let config = Config::from_lookup(lookup(&[("SUPABASE_JWT_SECRET", "s3cret")])).unwrap();
        assert_eq!(config.supabase_url, DEFAULT_SUPABASE_URL);
        assert_eq!(config.jwt_audience, "authenticated");
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.smtp.port, 587);
        assert!(!config.smtp.skip_send);
    }

    #[test]
    fn missing_secret_is_an_error() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("SUPABASE_JWT_SECRET"));
        assert!(Config::from_lookup(lookup(&[("SUPABASE_JWT_SECRET", "")])).is_err());
    }

    #[test]
    fn invalid_bind_addr_is_rejected() {
        let result = Config::from_lookup(lookup(&[
            ("SUPABASE_JWT_SECRET", "s3cret"),
            ("BIND_ADDR", "not-an-addr"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn smtp_settings_are_read() {
        let config = Config::from_lookup(lookup(&[
            ("SUPABASE_JWT_SECRET", "s3cret"),
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_PORT", "2525"),
            ("SMTP_SKIP_SEND", "TRUE"),
        ]))
        .unwrap();
        assert_eq!(config.smtp.host, "smtp.example.com");
        assert_eq!(config.smtp.port, 2525);
        assert!(config.smtp.skip_send);
    }
}
