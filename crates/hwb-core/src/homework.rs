//! Status poller port and response validation.

use async_trait::async_trait;
use serde_json::Value;

use crate::{domain::StatusQuery, errors::Error, Result};

/// Hexagonal port for the remote homework-review API.
///
/// Implementations return the raw decoded body; shape checks happen in
/// [`validate_response`].
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch_statuses(&self, query: StatusQuery) -> Result<Value>;
}

/// Check the response shape and return the `homeworks` list unchanged.
pub fn validate_response(response: Value) -> Result<Vec<Value>> {
    tracing::debug!("validating api response");

    let mut body = match response {
        Value::Object(body) => body,
        other => {
            return Err(Error::TypeMismatch {
                what: "ответ API",
                expected: "object",
                found: json_kind(&other),
            })
        }
    };

    let homeworks = body
        .remove("homeworks")
        .ok_or(Error::MissingField("homeworks"))?;

    match homeworks {
        Value::Array(list) => {
            tracing::debug!(count = list.len(), "api response is valid");
            Ok(list)
        }
        other => Err(Error::TypeMismatch {
            what: "homeworks",
            expected: "array",
            found: json_kind(&other),
        }),
    }
}

/// `current_date` reported by the API, used as the next lower bound.
pub fn current_date(response: &Value) -> Option<i64> {
    response.get("current_date").and_then(Value::as_i64)
}

pub(crate) fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
