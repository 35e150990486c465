use std::sync::Arc;

use axum::Router;
use tracing::info;

use config::{Config, StoreBackend};
use repositories::{DynamoRepo, MemoryRepo, PostsRepository};
use services::{posts::PostsService, user::UserService};

pub use self::errors::{Error, Result};

pub mod config;
pub mod errors;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod stack;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub posts_service: PostsService,
    pub users_service: UserService,
}

impl AppState {
    pub fn new(config: Config, repo: Arc<dyn PostsRepository>) -> Self {
        Self {
            posts_service: PostsService::new(repo),
            users_service: UserService::new(config.user_pool_id.clone()),
            config,
        }
    }
}

/// Builds the store named by the config and wires the front door around it.
pub async fn create_app(config: Config) -> Router {
    let repo: Arc<dyn PostsRepository> = match config.store_backend {
        StoreBackend::DynamoDb => {
            info!("Using DynamoDB table {:?}", config.table_name);
            Arc::new(DynamoRepo::from_env(config.table_name.clone()).await)
        }
        StoreBackend::Memory => {
            info!("Using in-memory post store");
            Arc::new(MemoryRepo::new(config.table_name.clone()))
        }
    };

    routes::create_router(Arc::new(AppState::new(config, repo)))
}
