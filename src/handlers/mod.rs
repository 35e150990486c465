use axum::{
    body::Bytes,
    http::{header, HeaderName},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{Error, Result};

pub mod cors;
pub mod posts;
pub mod user;

/// Headers attached to every blog response.
pub fn blog_headers() -> [(HeaderName, &'static str); 3] {
    [
        (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        (header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true"),
        (header::CONTENT_TYPE, "application/json"),
    ]
}

/// Parses a request body into `T`. An absent body reads as `{}`; a JSON value
/// that is not an object carries no fields.
pub(crate) fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T> {
    let value: Value = if body.is_empty() {
        Value::Object(Default::default())
    } else {
        serde_json::from_slice(body)?
    };

    let fields = match value {
        Value::Object(fields) => fields,
        Value::Null => {
            return Err(Error::Internal(
                "request body must not be null".to_string(),
            ))
        }
        _ => Default::default(),
    };

    Ok(serde_json::from_value(Value::Object(fields))?)
}

#[cfg(test)]
mod tests {
    use crate::models::posts::CreatePostDto;

    use super::*;

    #[test]
    fn empty_body_reads_as_empty_object() {
        let dto: CreatePostDto = parse_body(&Bytes::new()).unwrap();
        assert!(dto.title.is_none());
    }

    #[test]
    fn malformed_json_is_an_internal_error() {
        let result = parse_body::<CreatePostDto>(&Bytes::from_static(b"{title:"));
        assert!(matches!(result, Err(Error::MalformedBody(_))));
    }

    #[test]
    fn null_body_is_an_internal_error() {
        let result = parse_body::<CreatePostDto>(&Bytes::from_static(b"null"));
        assert!(matches!(result, Err(Error::Internal(_))));
    }

    #[test]
    fn whitespace_body_is_malformed() {
        let result = parse_body::<CreatePostDto>(&Bytes::from_static(b"   "));
        assert!(matches!(result, Err(Error::MalformedBody(_))));
    }

    #[test]
    fn non_object_values_carry_no_fields() {
        for body in [&b"[]"[..], b"5", b"\"x\"", b"true"] {
            let dto: CreatePostDto = parse_body(&Bytes::copy_from_slice(body)).unwrap();
            assert!(dto.title.is_none() && dto.content.is_none());
        }
    }
}
