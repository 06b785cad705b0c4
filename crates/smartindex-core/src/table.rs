//! Table façade over the host store.

use crate::error::{Error, Result};
use smartindex_support::host::HostEnv;
use smartindex_support::json::{self, JsonObject};
use smartindex_support::schema::{schema_json, values_json, ColumnDef, ColumnValue, TableOptions};

/// One selected row, keyed by column name. Rows are schemaless; read them
/// with [`json::field`] or the strict accessors.
pub type Row = JsonObject;

/// A declared table: a name bound to its column schema.
///
/// `Table` is plain data; every operation takes the host port explicitly, so
/// one host serves any number of tables and tests can inject a double.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    schema: Vec<ColumnDef>,
}

impl Table {
    pub fn new(name: impl Into<String>, schema: Vec<ColumnDef>) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &[ColumnDef] {
        &self.schema
    }

    /// Create the table in the host store. The options' primary key must
    /// name a schema column; the host rejects the call otherwise.
    pub fn init<H: HostEnv>(&self, host: &mut H, options: &TableOptions) -> Result<()> {
        let created = host.create_table(
            &self.name,
            &options.primary_key,
            &schema_json(&self.schema),
            &options.to_json(),
        )?;
        self.committed(created, "create")
    }

    /// Select the single row matching `condition`. A row with no match is
    /// the empty object, whose fields all read as empty.
    pub fn select<H: HostEnv>(&self, host: &mut H, condition: &[ColumnValue]) -> Result<Row> {
        let body = host.select_item(&self.name, &values_json(condition))?;
        Ok(json::parse_object(&body)?)
    }

    pub fn insert<H: HostEnv>(&self, host: &mut H, values: &[ColumnValue]) -> Result<()> {
        let ok = host.insert_item(&self.name, &values_json(values))?;
        self.committed(ok, "insert")
    }

    pub fn update<H: HostEnv>(
        &self,
        host: &mut H,
        condition: &[ColumnValue],
        values: &[ColumnValue],
    ) -> Result<()> {
        let ok = host.update_item(&self.name, &values_json(condition), &values_json(values))?;
        self.committed(ok, "update")
    }

    pub fn delete<H: HostEnv>(&self, host: &mut H, condition: &[ColumnValue]) -> Result<()> {
        let ok = host.delete_item(&self.name, &values_json(condition))?;
        self.committed(ok, "delete")
    }

    fn committed(&self, ok: bool, operation: &'static str) -> Result<()> {
        if ok {
            Ok(())
        } else {
            Err(Error::Rejected {
                operation,
                table: self.name.clone(),
            })
        }
    }
}
