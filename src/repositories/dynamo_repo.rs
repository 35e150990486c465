use async_trait::async_trait;
use aws_sdk_dynamodb::{error::DisplayErrorContext, types::AttributeValue, Client};
use tracing::debug;

use crate::{models::posts::Item, Error, Result};

use super::{
    conversions::{attributes_to_item, item_to_attributes},
    PostsRepository,
};

#[derive(Clone)]
pub struct DynamoRepo {
    client: Client,
    table_name: Option<String>,
}

impl DynamoRepo {
    pub fn new(client: Client, table_name: Option<String>) -> Self {
        Self { client, table_name }
    }

    /// Builds a client from the ambient AWS configuration (env, profile, or Lambda role).
    pub async fn from_env(table_name: Option<String>) -> Self {
        let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&sdk_config), table_name)
    }

    fn table(&self) -> Result<&str> {
        self.table_name
            .as_deref()
            .ok_or(Error::MissingConfig("TABLE_NAME"))
    }
}

fn store_error<E>(err: E) -> Error
where
    E: std::error::Error,
{
    Error::Store(DisplayErrorContext(err).to_string())
}

#[async_trait]
impl PostsRepository for DynamoRepo {
    async fn put_item(&self, item: Item) -> Result<()> {
        let table = self.table()?;

        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(item_to_attributes(item)))
            .send()
            .await
            .map_err(store_error)?;

        Ok(())
    }

    async fn scan(&self) -> Result<Vec<Item>> {
        let table = self.table()?;
        let mut items = Vec::new();
        let mut start_key = None;

        loop {
            let output = self
                .client
                .scan()
                .table_name(table)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(store_error)?;

            for attributes in output.items() {
                items.push(attributes_to_item(attributes)?);
            }

            match output.last_evaluated_key() {
                Some(key) if !key.is_empty() => {
                    debug!("Scan of {} continues after {} items", table, items.len());
                    start_key = Some(key.clone());
                }
                _ => break,
            }
        }

        Ok(items)
    }

    async fn delete_item(&self, id: &str) -> Result<()> {
        let table = self.table()?;

        self.client
            .delete_item()
            .table_name(table)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(store_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use aws_sdk_dynamodb::{
        operation::{
            delete_item::DeleteItemOutput,
            put_item::PutItemOutput,
            scan::{ScanError, ScanOutput},
        },
        types::error::ResourceNotFoundException,
    };
    use aws_smithy_mocks::{mock, mock_client, RuleMode};
    use serde_json::{json, Value};

    use super::*;

    fn stored(id: &str) -> HashMap<String, AttributeValue> {
        HashMap::from([
            ("id".to_string(), AttributeValue::S(id.to_string())),
            ("title".to_string(), AttributeValue::S(format!("post {}", id))),
        ])
    }

    fn repo(client: Client) -> DynamoRepo {
        DynamoRepo::new(client, Some("posts".to_string()))
    }

    #[tokio::test]
    async fn scan_follows_last_evaluated_key() {
        let first_page = mock!(Client::scan)
            .match_requests(|req| {
                req.table_name() == Some("posts") && req.exclusive_start_key().is_none()
            })
            .then_output(|| {
                ScanOutput::builder()
                    .items(stored("1"))
                    .last_evaluated_key("id", AttributeValue::S("1".to_string()))
                    .build()
            });
        let second_page = mock!(Client::scan)
            .match_requests(|req| {
                req.table_name() == Some("posts")
                    && req.exclusive_start_key().and_then(|key| key.get("id"))
                        == Some(&AttributeValue::S("1".to_string()))
            })
            .then_output(|| ScanOutput::builder().items(stored("2")).build());

        let client = mock_client!(
            aws_sdk_dynamodb,
            RuleMode::MatchAny,
            [&first_page, &second_page]
        );

        let items = repo(client).scan().await.unwrap();

        let ids: Vec<&Value> = items.iter().map(|item| &item["id"]).collect();
        assert_eq!(ids, vec![&json!("1"), &json!("2")]);
        assert_eq!(first_page.num_calls(), 1);
        assert_eq!(second_page.num_calls(), 1);
    }

    #[tokio::test]
    async fn delete_keys_by_string_id() {
        let delete = mock!(Client::delete_item)
            .match_requests(|req| {
                req.table_name() == Some("posts")
                    && req.key().map(|key| key.len()) == Some(1)
                    && req.key().and_then(|key| key.get("id"))
                        == Some(&AttributeValue::S("abc".to_string()))
            })
            .then_output(|| DeleteItemOutput::builder().build());

        let client = mock_client!(aws_sdk_dynamodb, [&delete]);

        repo(client).delete_item("abc").await.unwrap();
        assert_eq!(delete.num_calls(), 1);
    }

    #[tokio::test]
    async fn put_writes_item_attributes() {
        let put = mock!(Client::put_item)
            .match_requests(|req| {
                req.table_name() == Some("posts")
                    && req.item().and_then(|item| item.get("title"))
                        == Some(&AttributeValue::S("A".to_string()))
            })
            .then_output(|| PutItemOutput::builder().build());

        let client = mock_client!(aws_sdk_dynamodb, [&put]);

        let Value::Object(item) = json!({ "id": "x", "title": "A" }) else {
            unreachable!()
        };
        repo(client).put_item(item).await.unwrap();
        assert_eq!(put.num_calls(), 1);
    }

    #[tokio::test]
    async fn sdk_failures_become_store_errors() {
        let missing_table = mock!(Client::scan).then_error(|| {
            ScanError::ResourceNotFoundException(
                ResourceNotFoundException::builder()
                    .message("Requested resource not found")
                    .build(),
            )
        });

        let client = mock_client!(aws_sdk_dynamodb, [&missing_table]);

        let err = repo(client).scan().await.unwrap_err();
        assert!(matches!(err, Error::Store(ref msg) if msg.contains("Requested resource not found")));
    }

    #[tokio::test]
    async fn missing_table_name_skips_the_call() {
        let delete = mock!(Client::delete_item).then_output(|| DeleteItemOutput::builder().build());
        let client = mock_client!(aws_sdk_dynamodb, [&delete]);

        let err = DynamoRepo::new(client, None).delete_item("abc").await.unwrap_err();
        assert!(matches!(err, Error::MissingConfig("TABLE_NAME")));
        assert_eq!(delete.num_calls(), 0);
    }
}
