use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::{
    models::posts::{Item, Post},
    repositories::PostsRepository,
    Result,
};

#[derive(Clone)]
pub struct PostsService {
    repo: Arc<dyn PostsRepository>,
}

impl PostsService {
    pub fn new(repo: Arc<dyn PostsRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_post(&self, title: String, content: String) -> Result<Post> {
        let post = Post {
            id: Uuid::new_v4().to_string(),
            title,
            content,
            created_at: Some(Utc::now()),
            updated_at: None,
        };

        self.repo.put_item(post.clone().into_item()).await?;
        info!("Created post {}", post.id);

        Ok(post)
    }

    pub async fn get_posts(&self) -> Result<Vec<Item>> {
        self.repo.scan().await
    }

    /// Replaces the whole record. Fields not in the request (`createdAt`) are dropped.
    pub async fn replace_post(&self, id: String, title: String, content: String) -> Result<Post> {
        let post = Post {
            id,
            title,
            content,
            created_at: None,
            updated_at: Some(Utc::now()),
        };

        self.repo.put_item(post.clone().into_item()).await?;
        info!("Replaced post {}", post.id);

        Ok(post)
    }

    pub async fn delete_post(&self, id: &str) -> Result<()> {
        self.repo.delete_item(id).await?;
        info!("Deleted post {}", id);
        Ok(())
    }
}
