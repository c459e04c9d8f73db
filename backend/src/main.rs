use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sheduleapp_backend::{config::Config, state::AppState, utils::email::EmailService};

fn mask_secret(s: &str) -> String {
    if s.is_empty() {
        return "<empty>".into();
    }
    let prefix = s.chars().take(4).collect::<String>();
    format!("{}*** (len={})", prefix, s.len())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sheduleapp_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!(
        supabase_url = %config.supabase_url,
        jwt_secret = %mask_secret(&config.jwt_secret),
        jwt_audience = %config.jwt_audience,
        frontend_url = %config.frontend_url,
        smtp_host = %config.smtp.host,
        smtp_password = %mask_secret(&config.smtp.password),
        smtp_skip_send = config.smtp.skip_send,
        "Loaded configuration from environment/.env"
    );

    let email = EmailService::from_config(&config.smtp)?;
    let addr = config.bind_addr;
    let app = sheduleapp_backend::app(AppState::new(config, email));

    tracing::info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
