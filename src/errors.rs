use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::handlers::blog_headers;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    BadRequest(String),
    MethodNotAllowed,
    MissingConfig(&'static str),
    MalformedBody(serde_json::Error),
    Store(String),
    Internal(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest(msg) => write!(f, "{}", msg),
            Self::MethodNotAllowed => write!(f, "Method Not Allowed"),
            Self::MissingConfig(key) => write!(f, "{} environment variable is not set", key),
            Self::MalformedBody(err) => write!(f, "{}", err),
            Self::Store(msg) => write!(f, "{}", msg),
            Self::Internal(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, json!({ "message": msg })),
            Self::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                json!({ "message": "Method Not Allowed" }),
            ),
            ref internal => {
                error!("Error: {}", internal);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "message": "Internal server error",
                        "error": internal.to_string(),
                    }),
                )
            }
        };

        (status, blog_headers(), Json(body)).into_response()
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedBody(err)
    }
}
