use axum::{
    extract::Request,
    http::{HeaderName, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::models::{
    identity::AuthUser,
    scope::{ScopeError, ViewScope},
};

pub const IMPERSONATE_HEADER: &str = "x-impersonate-provider";

/// Resolves the request's `ViewScope` from the authenticated user and the
/// optional impersonation header. Must run inside `auth`.
pub async fn view_scope(mut request: Request, next: Next) -> Result<Response, StatusCode> {
    let user = request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or(StatusCode::UNAUTHORIZED)?;
    let target = request
        .headers()
        .get(HeaderName::from_static(IMPERSONATE_HEADER))
        .map(|value| value.to_str().map_err(|_| StatusCode::BAD_REQUEST))
        .transpose()?;

    let scope = ViewScope::resolve(&user, target).map_err(|err| {
        tracing::warn!(user_id = %user.id, role = %user.role, "impersonation refused: {err}");
        match err {
            ScopeError::NotAdmin { .. } => StatusCode::FORBIDDEN,
            ScopeError::EmptyTarget => StatusCode::BAD_REQUEST,
        }
    })?;
    if scope.impersonating {
        tracing::info!(
            admin_id = %scope.authorized_id,
            provider_id = %scope.data_owner_id,
            "request scoped to impersonated provider"
        );
    }
    request.extensions_mut().insert(scope);
    Ok(next.run(request).await)
}
