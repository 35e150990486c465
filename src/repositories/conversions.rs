use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::{Number, Value};

use crate::{models::posts::Item, Error, Result};

pub(crate) fn item_to_attributes(item: Item) -> HashMap<String, AttributeValue> {
    item.into_iter()
        .map(|(key, value)| (key, value_to_attribute(value)))
        .collect()
}

pub(crate) fn attributes_to_item(attributes: &HashMap<String, AttributeValue>) -> Result<Item> {
    attributes
        .iter()
        .map(|(key, value)| Ok((key.clone(), attribute_to_value(value)?)))
        .collect()
}

fn value_to_attribute(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s),
        Value::Array(values) => {
            AttributeValue::L(values.into_iter().map(value_to_attribute).collect())
        }
        Value::Object(map) => AttributeValue::M(item_to_attributes(map)),
    }
}

fn attribute_to_value(attribute: &AttributeValue) -> Result<Value> {
    let value = match attribute {
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::N(n) => Value::Number(parse_number(n)?),
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::Ss(values) => {
            Value::Array(values.iter().cloned().map(Value::String).collect())
        }
        AttributeValue::Ns(values) => Value::Array(
            values
                .iter()
                .map(|n| parse_number(n).map(Value::Number))
                .collect::<Result<_>>()?,
        ),
        AttributeValue::L(values) => Value::Array(
            values
                .iter()
                .map(attribute_to_value)
                .collect::<Result<_>>()?,
        ),
        AttributeValue::M(map) => Value::Object(attributes_to_item(map)?),
        other => {
            return Err(Error::Store(format!(
                "unsupported attribute type in stored item: {:?}",
                other
            )))
        }
    };
    Ok(value)
}

fn parse_number(n: &str) -> Result<Number> {
    n.parse::<Number>()
        .map_err(|_| Error::Store(format!("invalid number attribute: {}", n)))
}

#[cfg(test)]
mod tests {
    use aws_sdk_dynamodb::primitives::Blob;
    use serde_json::json;

    use super::*;

    #[test]
    fn nested_json_survives_attribute_conversion() {
        let item = json!({
            "id": "p-1",
            "title": "A",
            "views": 12,
            "rating": 4.5,
            "draft": false,
            "tags": ["rust", "aws"],
            "meta": { "author": null },
        });
        let Value::Object(item) = item else { unreachable!() };

        let attributes = item_to_attributes(item.clone());
        assert_eq!(attributes["id"], AttributeValue::S("p-1".to_string()));
        assert_eq!(attributes["views"], AttributeValue::N("12".to_string()));

        assert_eq!(attributes_to_item(&attributes).unwrap(), item);
    }

    #[test]
    fn string_sets_read_back_as_arrays() {
        let attributes = HashMap::from([(
            "tags".to_string(),
            AttributeValue::Ss(vec!["a".to_string(), "b".to_string()]),
        )]);

        let item = attributes_to_item(&attributes).unwrap();
        assert_eq!(item["tags"], json!(["a", "b"]));
    }

    #[test]
    fn binary_attributes_are_rejected() {
        let attributes = HashMap::from([(
            "blob".to_string(),
            AttributeValue::B(Blob::new(vec![1, 2, 3])),
        )]);

        assert!(matches!(attributes_to_item(&attributes), Err(Error::Store(_))));
    }
}
