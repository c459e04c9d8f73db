use axum::{body::Body, http::{Request, StatusCode}};
use sheduleapp_backend::models::identity::Role;
use tower::ServiceExt;

mod support;
use support::{get, json_body, test_app, token_for};

fn me_as(token: &str, provider: &str) -> Request<Body> {
    Request::builder()
        .uri("/api/auth/me")
        .header("authorization", format!("Bearer {}", token))
        .header("x-impersonate-provider", provider)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn admin_can_scope_requests_to_a_provider() {
    let token = token_for("admin-1", Role::Admin);
    let response = test_app().oneshot(me_as(&token, "p7")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["id"], "admin-1");
    assert_eq!(json["scope"]["data_owner_id"], "p7");
    assert_eq!(json["scope"]["authorized_id"], "admin-1");
    assert_eq!(json["scope"]["impersonating"], true);
}

#[tokio::test]
async fn impersonation_header_from_non_admin_is_forbidden() {
    for role in [Role::Provider, Role::Client] {
        let token = token_for("u1", role);
        let response = test_app().oneshot(me_as(&token, "p7")).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}

#[tokio::test]
async fn blank_impersonation_target_is_a_bad_request() {
    let token = token_for("admin-1", Role::Admin);
    let response = test_app().oneshot(me_as(&token, " ")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn provider_scope_route_is_admin_only() {
    let admin = token_for("admin-1", Role::Admin);
    let response = test_app()
        .oneshot(get("/api/admin/providers/p7/scope", Some(&admin)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["data_owner_id"], "p7");
    assert_eq!(json["authorized_role"], "admin");

    let provider = token_for("p1", Role::Provider);
    let response = test_app()
        .oneshot(get("/api/admin/providers/p7/scope", Some(&provider)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = test_app()
        .oneshot(get("/api/admin/providers/p7/scope", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
