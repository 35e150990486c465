use serde::Serialize;

use super::posts::Post;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub message: &'static str,
    pub post: Post,
}
