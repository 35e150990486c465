use async_trait::async_trait;

use crate::{models::posts::Item, Result};

mod conversions;
pub mod dynamo_repo;
pub mod memory_repo;

pub use dynamo_repo::DynamoRepo;
pub use memory_repo::MemoryRepo;

/// Single-table store keyed by `id`. Every method is one atomic store call.
#[async_trait]
pub trait PostsRepository: Sync + Send {
    /// Writes the item wholesale, replacing whatever was stored under its `id`.
    async fn put_item(&self, item: Item) -> Result<()>;
    /// Every stored item, in no particular order.
    async fn scan(&self) -> Result<Vec<Item>>;
    /// Removes the item if present. Deleting an unknown id is not an error.
    async fn delete_item(&self, id: &str) -> Result<()>;
}
