use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{models::posts::Item, Error, Result};

use super::PostsRepository;

/// Process-local table for development and tests.
#[derive(Clone, Default)]
pub struct MemoryRepo {
    table_name: Option<String>,
    items: Arc<RwLock<HashMap<String, Item>>>,
}

impl MemoryRepo {
    pub fn new(table_name: Option<String>) -> Self {
        Self {
            table_name,
            items: Arc::default(),
        }
    }

    fn check_table(&self) -> Result<()> {
        self.table_name
            .as_ref()
            .map(|_| ())
            .ok_or(Error::MissingConfig("TABLE_NAME"))
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl PostsRepository for MemoryRepo {
    async fn put_item(&self, item: Item) -> Result<()> {
        self.check_table()?;
        let id = item
            .get("id")
            .and_then(|v| v.as_str())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::Store("item is missing its id key".to_string()))?
            .to_string();

        self.items.write().await.insert(id, item);
        Ok(())
    }

    async fn scan(&self) -> Result<Vec<Item>> {
        self.check_table()?;
        Ok(self.items.read().await.values().cloned().collect())
    }

    async fn delete_item(&self, id: &str) -> Result<()> {
        self.check_table()?;
        self.items.write().await.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    fn item(value: Value) -> Item {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[tokio::test]
    async fn put_replaces_existing_item() {
        let repo = MemoryRepo::new(Some("posts".to_string()));
        repo.put_item(item(json!({ "id": "1", "title": "old", "extra": true })))
            .await
            .unwrap();
        repo.put_item(item(json!({ "id": "1", "title": "new" })))
            .await
            .unwrap();

        let items = repo.scan().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["title"], "new");
        assert!(!items[0].contains_key("extra"));
    }

    #[tokio::test]
    async fn delete_of_unknown_id_succeeds() {
        let repo = MemoryRepo::new(Some("posts".to_string()));
        repo.delete_item("missing").await.unwrap();
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn missing_table_name_fails_every_call() {
        let repo = MemoryRepo::new(None);
        assert!(matches!(
            repo.scan().await,
            Err(Error::MissingConfig("TABLE_NAME"))
        ));
    }
}
