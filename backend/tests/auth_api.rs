use axum::{body::Body, http::{Request, StatusCode}};
use chrono::{Duration, Utc};
use sheduleapp_backend::{models::identity::Role, utils::jwt::create_access_token};
use tower::ServiceExt;

mod support;
use support::{claims_for, get, json_body, test_app, token_for, TEST_SECRET};

#[tokio::test]
async fn health_is_public() {
    let response = test_app().oneshot(get("/api/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ok");
}

#[tokio::test]
async fn me_requires_a_token() {
    let response = test_app().oneshot(get("/api/auth/me", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_returns_identity_and_landing_path() {
    let token = token_for("p1", Role::Provider);
    let response = test_app()
        .oneshot(get("/api/auth/me", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["id"], "p1");
    assert_eq!(json["role"], "provider");
    assert_eq!(json["landing_path"], "/provider/appointments");
    assert_eq!(json["scope"]["data_owner_id"], "p1");
    assert_eq!(json["scope"]["impersonating"], false);
}

#[tokio::test]
async fn me_accepts_the_access_token_cookie() {
    let token = token_for("c1", Role::Client);
    let request = Request::builder()
        .uri("/api/auth/me")
        .header("cookie", format!("theme=dark; sb-access-token={}", token))
        .body(Body::empty())
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["landing_path"], "/client/booking");
}

#[tokio::test]
async fn tokens_with_wrong_secret_audience_or_expiry_are_rejected() {
    let wrong_secret = create_access_token(&claims_for("u1", Role::Admin), "other-secret").unwrap();

    let mut anon = claims_for("u1", Role::Admin);
    anon.aud = "anon".into();
    let wrong_audience = create_access_token(&anon, TEST_SECRET).unwrap();

    let mut old = claims_for("u1", Role::Admin);
    old.exp = (Utc::now() - Duration::hours(2)).timestamp();
    let expired = create_access_token(&old, TEST_SECRET).unwrap();

    for token in [wrong_secret, wrong_audience, expired, "garbage".to_string()] {
        let response = test_app()
            .oneshot(get("/api/auth/me", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
