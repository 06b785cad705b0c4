//! # Typed Field Access Over Host JSON
//!
//! Every payload the host hands back is JSON text; every domain decoder in
//! [`crate::model`] is a composition of the accessors in this module. The
//! strict accessors distinguish the three outcomes the legacy runtime
//! collapsed into one: field present and decoded, field absent, and field
//! present with the wrong kind.
//!
//! The lenient [`field`] accessor survives for schemaless table rows, where
//! "absent reads as empty" is the documented contract.

use serde_json::{Map, Value};
use thiserror::Error;

/// A parsed JSON object, as returned by table selects and entity fetches.
pub type JsonObject = Map<String, Value>;

/// Separator the host uses to flatten array-typed fields into text. There is
/// no escape for it; see [`join_list`].
pub const LIST_SEPARATOR: char = ';';

/// The three field kinds the host store understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Int64,
    Text,
    List,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Int64 => "int64",
            FieldKind::Text => "string",
            FieldKind::List => "array",
        }
    }
}

#[derive(Debug, Error)]
pub enum JsonError {
    #[error("malformed JSON: {0}")]
    Syntax(#[from] serde_json::Error),
    #[error("expected a JSON object")]
    NotAnObject,
    #[error("expected a JSON array")]
    NotAnArray,
    #[error("field `{field}` is missing")]
    Missing { field: String },
    #[error("field `{field}` is not of kind {expected}")]
    Kind { field: String, expected: &'static str },
}

fn kind_error(field: &str, expected: FieldKind) -> JsonError {
    JsonError::Kind {
        field: field.to_owned(),
        expected: expected.as_str(),
    }
}

pub fn parse_object(body: &str) -> Result<JsonObject, JsonError> {
    match serde_json::from_str::<Value>(body)? {
        Value::Object(map) => Ok(map),
        _ => Err(JsonError::NotAnObject),
    }
}

pub fn parse_array(body: &str) -> Result<Vec<Value>, JsonError> {
    match serde_json::from_str::<Value>(body)? {
        Value::Array(items) => Ok(items),
        _ => Err(JsonError::NotAnArray),
    }
}

/// Decimal form of a scalar array element. Arrays of objects or nested
/// arrays are not a list in the host's sense.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// 64-bit integer field.
pub fn int_field(obj: &JsonObject, field: &str) -> Result<i64, JsonError> {
    match obj.get(field) {
        None => Err(JsonError::Missing {
            field: field.to_owned(),
        }),
        Some(Value::Number(n)) => n.as_i64().ok_or_else(|| kind_error(field, FieldKind::Int64)),
        Some(_) => Err(kind_error(field, FieldKind::Int64)),
    }
}

/// String field.
pub fn text_field(obj: &JsonObject, field: &str) -> Result<String, JsonError> {
    match obj.get(field) {
        None => Err(JsonError::Missing {
            field: field.to_owned(),
        }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(kind_error(field, FieldKind::Text)),
    }
}

/// Homogeneous array-of-scalars field.
pub fn list_field(obj: &JsonObject, field: &str) -> Result<Vec<String>, JsonError> {
    match obj.get(field) {
        None => Err(JsonError::Missing {
            field: field.to_owned(),
        }),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| scalar_text(item).ok_or_else(|| kind_error(field, FieldKind::List)))
            .collect(),
        Some(_) => Err(kind_error(field, FieldKind::List)),
    }
}

/// Absent-tolerant integer read: missing is `None`, a wrong kind is still an
/// error.
pub fn opt_int(obj: &JsonObject, field: &str) -> Result<Option<i64>, JsonError> {
    match int_field(obj, field) {
        Ok(v) => Ok(Some(v)),
        Err(JsonError::Missing { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

pub fn opt_text(obj: &JsonObject, field: &str) -> Result<Option<String>, JsonError> {
    match text_field(obj, field) {
        Ok(v) => Ok(Some(v)),
        Err(JsonError::Missing { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

pub fn opt_list(obj: &JsonObject, field: &str) -> Result<Option<Vec<String>>, JsonError> {
    match list_field(obj, field) {
        Ok(v) => Ok(Some(v)),
        Err(JsonError::Missing { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Legacy row accessor: an absent or mismatched field reads as the empty
/// string. `Int64` renders the decimal form, `List` the
/// [`LIST_SEPARATOR`]-joined form.
///
/// Table rows are schemaless JSON objects, so this is the accessor contract
/// for everything selected through a table façade.
pub fn field(obj: &JsonObject, name: &str, kind: FieldKind) -> String {
    let decoded = match kind {
        FieldKind::Int64 => int_field(obj, name).map(|v| v.to_string()),
        FieldKind::Text => text_field(obj, name),
        FieldKind::List => list_field(obj, name).map(|items| join_list(&items)),
    };
    decoded.unwrap_or_default()
}

/// Join scalars with [`LIST_SEPARATOR`].
///
/// Known limitation: the wire format has no escape for the separator, so an
/// element containing `;` does not survive [`split_list`].
pub fn join_list(items: &[String]) -> String {
    items.join(&LIST_SEPARATOR.to_string())
}

/// Inverse of [`join_list`]. The empty string is the empty list.
pub fn split_list(joined: &str) -> Vec<String> {
    if joined.is_empty() {
        return Vec::new();
    }
    joined.split(LIST_SEPARATOR).map(str::to_owned).collect()
}
