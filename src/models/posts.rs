use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use validator::Validate;

/// A raw stored record. The store only cares about the `id` key.
pub type Item = serde_json::Map<String, Value>;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(
        rename = "createdAt",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_timestamp"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        rename = "updatedAt",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_timestamp"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Post {
    pub fn into_item(self) -> Item {
        let mut item = Item::new();
        item.insert("id".to_string(), Value::String(self.id));
        item.insert("title".to_string(), Value::String(self.title));
        item.insert("content".to_string(), Value::String(self.content));
        if let Some(created_at) = self.created_at {
            item.insert("createdAt".to_string(), Value::String(timestamp(created_at)));
        }
        if let Some(updated_at) = self.updated_at {
            item.insert("updatedAt".to_string(), Value::String(timestamp(updated_at)));
        }
        item
    }
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

fn serialize_timestamp<S>(at: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match at {
        Some(at) => serializer.serialize_str(&timestamp(*at)),
        None => serializer.serialize_none(),
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreatePostDto {
    #[serde(default, deserialize_with = "string_only")]
    #[validate(required, length(min = 1))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "string_only")]
    #[validate(required, length(min = 1))]
    pub content: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdatePostDto {
    #[serde(default, deserialize_with = "string_only")]
    #[validate(required, length(min = 1))]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "string_only")]
    #[validate(required, length(min = 1))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "string_only")]
    #[validate(required, length(min = 1))]
    pub content: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct DeletePostDto {
    #[serde(default, deserialize_with = "string_only")]
    #[validate(required, length(min = 1))]
    pub id: Option<String>,
}

// Non-string values count as absent so they fail `required` instead of the parse.
fn string_only<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn create_dto_requires_both_fields() {
        let dto: CreatePostDto = serde_json::from_value(json!({ "title": "A" })).unwrap();
        assert!(dto.validate().is_err());

        let dto: CreatePostDto =
            serde_json::from_value(json!({ "title": "A", "content": "B" })).unwrap();
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn empty_and_mistyped_fields_count_as_missing() {
        let dto: UpdatePostDto =
            serde_json::from_value(json!({ "id": "", "title": "A", "content": "B" })).unwrap();
        assert!(dto.validate().is_err());

        let dto: DeletePostDto = serde_json::from_value(json!({ "id": 42 })).unwrap();
        assert_eq!(dto.id, None);
        assert!(dto.validate().is_err());
    }

    #[test]
    fn item_omits_unset_timestamps() {
        let item = Post {
            id: "x".to_string(),
            title: "A".to_string(),
            content: "B".to_string(),
            created_at: None,
            updated_at: Some(Utc::now()),
        }
        .into_item();

        assert!(!item.contains_key("createdAt"));
        assert!(item["updatedAt"].as_str().unwrap().ends_with('Z'));
    }
}
