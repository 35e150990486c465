use std::sync::Arc;

use axum::{
    body::Bytes,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Extension, Json, Router,
};

use crate::{
    models::{response::MessageResponse, users::UpdateUserDto},
    AppState, Result,
};

use super::parse_body;

pub fn users_handler() -> Router {
    Router::new().route("/user", any(update_user))
}

async fn update_user(
    Extension(app_state): Extension<Arc<AppState>>,
    method: Method,
    body: Bytes,
) -> Result<Response> {
    if method != Method::PUT {
        return Ok((StatusCode::METHOD_NOT_ALLOWED, "Only PUT allowed").into_response());
    }

    let update: UpdateUserDto = parse_body(&body)?;
    let message = app_state
        .users_service
        .update_profile(&update.display_name());

    Ok((StatusCode::OK, Json(MessageResponse { message })).into_response())
}
