//! User record and the request-side shapes that feed the store.

use crate::error::AppError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use utoipa::ToSchema;
use uuid::Uuid;

/// A stored user row. `id` is assigned by the database.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub age: Option<i32>,
}

/// Field values accepted by create and update.
///
/// Each field has three states: `None` when the key is absent (column left
/// alone), `Some(None)` for an explicit `null` (column set to NULL), and
/// `Some(Some(v))` for a value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct UserFields {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present_age")]
    #[schema(value_type = Option<i32>)]
    pub age: Option<Option<i32>>,
}

/// Only runs for keys present in the body, so `null` becomes `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Like `present`, but also takes integral floats such as `30.0`.
fn present_age<'de, D>(deserializer: D) -> Result<Option<Option<i32>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(n) = Option::<f64>::deserialize(deserializer)? else {
        return Ok(Some(None));
    };
    if n.fract() != 0.0 || n < f64::from(i32::MIN) || n > f64::from(i32::MAX) {
        return Err(D::Error::custom(format!("age must be a 32-bit integer, got {}", n)));
    }
    Ok(Some(Some(n as i32)))
}

impl UserFields {
    /// Read fields from a JSON request body. Unknown keys are ignored.
    pub fn from_body(body: &Value) -> Result<Self, AppError> {
        if !body.is_object() {
            return Err(AppError::BadRequest("body must be a JSON object".into()));
        }
        serde_json::from_value(body.clone()).map_err(|e| AppError::BadRequest(e.to_string()))
    }
}

/// Exact-match filter for listing. Only keys present in the query string are set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
}

impl UserFilter {
    /// Build from raw query parameters; keys other than `name`, `email` and `age` are ignored.
    pub fn from_query(params: &HashMap<String, String>) -> Result<Self, AppError> {
        let age = match params.get("age") {
            Some(s) => Some(
                s.trim()
                    .parse::<i32>()
                    .map_err(|_| AppError::BadRequest(format!("invalid age: {}", s)))?,
            ),
            None => None,
        };
        Ok(UserFilter {
            name: params.get("name").cloned(),
            email: params.get("email").cloned(),
            age,
        })
    }
}
