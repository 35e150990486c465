use std::sync::Arc;

use axum::{
    body::Bytes,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Extension, Json, Router,
};
use tracing::info;
use validator::Validate;

use crate::{
    models::{
        posts::{CreatePostDto, DeletePostDto, UpdatePostDto},
        response::{MessageResponse, PostResponse},
    },
    AppState, Error, Result,
};

use super::{blog_headers, parse_body};

pub fn posts_handler() -> Router {
    Router::new().route("/posts", any(handle_posts))
}

async fn handle_posts(
    Extension(app_state): Extension<Arc<AppState>>,
    method: Method,
    body: Bytes,
) -> Result<Response> {
    if app_state.config.table_name.is_none() {
        return Err(Error::MissingConfig("TABLE_NAME"));
    }

    info!("Processing {} request", method);

    match method {
        Method::POST => create_post(&app_state, &body).await,
        Method::GET => get_posts(&app_state).await,
        Method::PUT => update_post(&app_state, &body).await,
        Method::DELETE => delete_post(&app_state, &body).await,
        _ => Err(Error::MethodNotAllowed),
    }
}

async fn create_post(app_state: &AppState, body: &Bytes) -> Result<Response> {
    let new_post: CreatePostDto = parse_body(body)?;
    new_post
        .validate()
        .map_err(|_| Error::BadRequest("Title and content are required".to_string()))?;

    let (Some(title), Some(content)) = (new_post.title, new_post.content) else {
        return Err(Error::BadRequest("Title and content are required".to_string()));
    };

    let post = app_state.posts_service.create_post(title, content).await?;

    Ok((
        StatusCode::CREATED,
        blog_headers(),
        Json(PostResponse {
            message: "Post created",
            post,
        }),
    )
        .into_response())
}

async fn get_posts(app_state: &AppState) -> Result<Response> {
    let posts = app_state.posts_service.get_posts().await?;
    Ok((StatusCode::OK, blog_headers(), Json(posts)).into_response())
}

async fn update_post(app_state: &AppState, body: &Bytes) -> Result<Response> {
    let update: UpdatePostDto = parse_body(body)?;
    let missing = || Error::BadRequest("Id, title, and content are required".to_string());
    update.validate().map_err(|_| missing())?;

    let (Some(id), Some(title), Some(content)) = (update.id, update.title, update.content) else {
        return Err(missing());
    };

    let post = app_state
        .posts_service
        .replace_post(id, title, content)
        .await?;

    Ok((
        StatusCode::OK,
        blog_headers(),
        Json(PostResponse {
            message: "Post updated",
            post,
        }),
    )
        .into_response())
}

async fn delete_post(app_state: &AppState, body: &Bytes) -> Result<Response> {
    let delete: DeletePostDto = parse_body(body)?;
    delete
        .validate()
        .map_err(|_| Error::BadRequest("Id is required".to_string()))?;

    let Some(id) = delete.id else {
        return Err(Error::BadRequest("Id is required".to_string()));
    };

    app_state.posts_service.delete_post(&id).await?;

    Ok((
        StatusCode::OK,
        blog_headers(),
        Json(MessageResponse {
            message: "Post deleted".to_string(),
        }),
    )
        .into_response())
}
