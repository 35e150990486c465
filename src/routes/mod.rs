use std::sync::Arc;

use axum::{Extension, Router};
use tower_http::trace::TraceLayer;

use crate::{
    handlers::{cors::configure_cors, posts::posts_handler, user::users_handler},
    AppState,
};

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let cors_enabled = app_state.config.cors_enabled;

    let router = Router::new()
        .merge(posts_handler())
        .merge(users_handler())
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    if cors_enabled {
        router.layer(configure_cors())
    } else {
        router
    }
}
