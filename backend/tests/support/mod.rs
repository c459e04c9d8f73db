#![allow(dead_code)]
use axum::{
    body::{to_bytes, Body},
    http::{Request, Response},
    Router,
};
use chrono::Duration;
use sheduleapp_backend::{
    config::{Config, SmtpConfig},
    models::identity::Role,
    state::AppState,
    utils::{
        email::EmailService,
        jwt::{create_access_token, Claims},
    },
};

pub const TEST_SECRET: &str = "test-jwt-secret-with-enough-length";

pub fn test_config() -> Config {
    Config {
        supabase_url: "http://localhost:54321".into(),
        jwt_secret: TEST_SECRET.into(),
        jwt_audience: "authenticated".into(),
        bind_addr: "127.0.0.1:0".parse().expect("addr"),
        frontend_url: "http://localhost:8000".into(),
        smtp: SmtpConfig {
            host: "localhost".into(),
            port: 2525,
            username: String::new(),
            password: String::new(),
            from_address: "noreply@sheduleapp.local".into(),
            skip_send: true,
        },
    }
}

pub fn test_app() -> Router {
    let config = test_config();
    let email = EmailService::from_config(&config.smtp).expect("email service");
    sheduleapp_backend::app(AppState::new(config, email))
}

pub fn claims_for(id: &str, role: Role) -> Claims {
    Claims::new(
        id.into(),
        Some(format!("{}@example.com", id)),
        role,
        "authenticated",
        Duration::hours(1),
    )
}

pub fn token_for(id: &str, role: Role) -> String {
    create_access_token(&claims_for(id, role), TEST_SECRET).expect("token")
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).expect("request")
}

pub fn post_json(uri: &str, token: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json")
}
