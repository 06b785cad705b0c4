//! Table schemas, write values, and their host JSON encodings.
//!
//! Declarations and literal values are distinct types: a [`ColumnDef`] pairs
//! a column name with a storage type tag, a [`ColumnValue`] pairs one with
//! the literal to match or write. Both encode to the same single-level JSON
//! object shape, which is the only structure the host store accepts.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Storage type tags the host understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Int64,
    Text,
}

impl ColumnType {
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnType::Int64 => "int64",
            ColumnType::Text => "string",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One column declaration in a table schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub ty: ColumnType,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// One literal column value, used in conditions and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnValue {
    pub name: String,
    pub value: String,
}

impl ColumnValue {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Table-creation metadata.
///
/// `primary_key` must name a declared column; that is not checked here and a
/// violation surfaces as the host rejecting the create call. Indexes are
/// btree; `medium_texts` names columns stored as medium text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableOptions {
    pub primary_key: String,
    pub indexes: Vec<String>,
    pub medium_texts: Vec<String>,
}

impl TableOptions {
    pub fn new(primary_key: impl Into<String>) -> Self {
        Self {
            primary_key: primary_key.into(),
            indexes: Vec::new(),
            medium_texts: Vec::new(),
        }
    }

    pub fn index(mut self, column: impl Into<String>) -> Self {
        self.indexes.push(column.into());
        self
    }

    pub fn medium_text(mut self, column: impl Into<String>) -> Self {
        self.medium_texts.push(column.into());
        self
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("table options serialize")
    }
}

/// Encode a schema as the single-level JSON object the host expects. A later
/// duplicate name overwrites an earlier one.
pub fn schema_json(columns: &[ColumnDef]) -> String {
    let mut obj = Map::new();
    for column in columns {
        obj.insert(
            column.name.clone(),
            Value::String(column.ty.as_str().to_owned()),
        );
    }
    Value::Object(obj).to_string()
}

/// Encode a condition or value set the same way.
pub fn values_json(values: &[ColumnValue]) -> String {
    let mut obj = Map::new();
    for value in values {
        obj.insert(value.name.clone(), Value::String(value.value.clone()));
    }
    Value::Object(obj).to_string()
}
