use axum::{Extension, Json};
use serde::Serialize;

use crate::models::{
    identity::{AuthUser, Role},
    scope::ViewScope,
};

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: String,
    pub email: Option<String>,
    pub role: Role,
    pub landing_path: &'static str,
    pub scope: ViewScope,
}

/// The caller's identity, landing view and effective data scope.
pub async fn me(
    Extension(user): Extension<AuthUser>,
    Extension(scope): Extension<ViewScope>,
) -> Json<MeResponse> {
    Json(MeResponse {
        landing_path: user.role.landing_path(),
        id: user.id,
        email: user.email,
        role: user.role,
        scope,
    })
}
