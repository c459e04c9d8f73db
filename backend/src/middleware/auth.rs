use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::{
    config::Config,
    models::identity::AuthUser,
    state::AppState,
    utils::{
        cookies::{extract_cookie_value, parse_bearer_token, ACCESS_COOKIE_NAME},
        jwt::{verify_access_token, Claims},
    },
};

pub async fn auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let (claims, user) = authenticate_request(request.headers(), &state.config)?;
    request.extensions_mut().insert(claims);
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

// Auth + require admin role for admin-only routes
pub async fn auth_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let (claims, user) = authenticate_request(request.headers(), &state.config)?;
    if !user.is_admin() {
        tracing::debug!(user_id = %user.id, role = %user.role, "admin route refused");
        return Err(StatusCode::FORBIDDEN);
    }
    request.extensions_mut().insert(claims);
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

fn authenticate_request(headers: &HeaderMap, config: &Config) -> Result<(Claims, AuthUser), StatusCode> {
    let token = extract_token(headers).ok_or(StatusCode::UNAUTHORIZED)?;
    let claims = verify_access_token(&token, &config.jwt_secret, &config.jwt_audience).map_err(|err| {
        tracing::debug!("access token rejected: {err}");
        StatusCode::UNAUTHORIZED
    })?;
    let user = claims.to_user();
    Ok((claims, user))
}

/// Bearer header first, then the access-token cookie.
fn extract_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_bearer_token)
        .map(str::to_string)
        .or_else(|| {
            headers
                .get(header::COOKIE)
                .and_then(|value| value.to_str().ok())
                .and_then(|raw| extract_cookie_value(raw, ACCESS_COOKIE_NAME))
        })
}
