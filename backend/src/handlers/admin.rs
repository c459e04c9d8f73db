use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

use crate::{
    error::AppError,
    models::{identity::AuthUser, scope::ViewScope},
    state::AppState,
    utils::{
        email::Delivery,
        template::{EmailTemplate, RenderedEmail},
    },
};

pub async fn provider_scope(
    Extension(user): Extension<AuthUser>,
    Path(provider_id): Path<String>,
) -> Result<Json<ViewScope>, AppError> {
    let scope = ViewScope::resolve(&user, Some(&provider_id))?;
    tracing::info!(
        admin_id = %scope.authorized_id,
        provider_id = %scope.data_owner_id,
        "admin opened provider scope"
    );
    Ok(Json(scope))
}

#[derive(Debug, Deserialize, Validate)]
pub struct EmailPreviewPayload {
    #[validate(length(min = 1, message = "Subject must not be empty"))]
    pub subject: String,
    #[validate(length(min = 1, message = "Body must not be empty"))]
    pub body: String,
    #[serde(default)]
    pub values: HashMap<String, String>,
}

impl EmailPreviewPayload {
    fn template(&self) -> EmailTemplate {
        EmailTemplate {
            subject: self.subject.clone(),
            body: self.body.clone(),
        }
    }
}

pub async fn preview_email(
    Json(payload): Json<EmailPreviewPayload>,
) -> Result<Json<RenderedEmail>, AppError> {
    payload.validate()?;
    Ok(Json(payload.template().render(&payload.values)))
}

#[derive(Debug, Deserialize, Validate)]
pub struct SendEmailPayload {
    #[validate(email(message = "Invalid email address"))]
    pub to: String,
    #[validate(length(min = 1, message = "Subject must not be empty"))]
    pub subject: String,
    #[validate(length(min = 1, message = "Body must not be empty"))]
    pub body: String,
    #[serde(default)]
    pub values: HashMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct SendEmailResponse {
    pub delivery: Delivery,
    pub rendered: RenderedEmail,
}

pub async fn send_email(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<SendEmailPayload>,
) -> Result<(StatusCode, Json<SendEmailResponse>), AppError> {
    payload.validate()?;
    let template = EmailTemplate {
        subject: payload.subject,
        body: payload.body,
    };
    let email = state.email.clone();
    let to = payload.to.clone();
    let values = payload.values;

    // SMTP delivery blocks.
    let (rendered, delivery) =
        tokio::task::spawn_blocking(move || email.send_templated(&to, &template, &values))
            .await
            .map_err(|err| AppError::InternalServerError(err.into()))??;

    tracing::info!(admin_id = %user.id, to = %payload.to, ?delivery, "admin email processed");
    Ok((
        StatusCode::ACCEPTED,
        Json(SendEmailResponse { delivery, rendered }),
    ))
}
