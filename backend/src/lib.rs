use axum::{
    http::{HeaderValue, Method},
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod state;
pub mod utils;

use state::AppState;

fn cors_layer(frontend_url: &str) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .max_age(std::time::Duration::from_secs(24 * 60 * 60));
    match HeaderValue::from_str(frontend_url.trim_end_matches('/')) {
        Ok(origin) => base
            .allow_origin(AllowOrigin::exact(origin))
            .allow_headers([
                axum::http::header::AUTHORIZATION,
                axum::http::header::CONTENT_TYPE,
                axum::http::HeaderName::from_static(middleware::IMPERSONATE_HEADER),
            ])
            .allow_credentials(true),
        Err(_) => {
            tracing::warn!(frontend_url, "FRONTEND_URL is not a valid origin, allowing any");
            base.allow_origin(Any).allow_headers(Any)
        }
    }
}

/// Full API router with shared layers applied.
pub fn app(state: AppState) -> Router {
    let public_routes = Router::new().route("/api/health", get(handlers::health));

    // `auth` is added last so it runs before `view_scope`.
    let user_routes = Router::new()
        .route("/api/auth/me", get(handlers::me))
        .route_layer(axum_middleware::from_fn(middleware::view_scope))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth,
        ));

    let admin_routes = Router::new()
        .route(
            "/api/admin/providers/{provider_id}/scope",
            get(handlers::provider_scope),
        )
        .route("/api/admin/emails/preview", post(handlers::preview_email))
        .route("/api/admin/emails/send", post(handlers::send_email))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth_admin,
        ));

    Router::new()
        .merge(public_routes)
        .merge(user_routes)
        .merge(admin_routes)
        .layer(
            ServiceBuilder::new()
                .layer(axum_middleware::from_fn(middleware::request_id))
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config.frontend_url)),
        )
        .with_state(state)
}
