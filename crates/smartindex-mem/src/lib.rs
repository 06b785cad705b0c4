//! In-memory host double for exercising the SDK without a sandbox.
//!
//! [`MemHost`] implements the full [`HostEnv`] port: a schema-checked table
//! store with equality-condition matching for the CRUD surface, and scripted
//! chain fixtures (blocks, transaction stubs, outpoints, versioned
//! transaction arrays) for the query surface. Fixture JSON goes in exactly
//! as the real host would serve it, so decoders see the genuine wire shapes.
//!
//! Behavior notes:
//! - `select_item` with no matching row answers `"{}"`; every field of the
//!   decoded row then reads as empty, which is the documented absent-field
//!   contract.
//! - `create_table` on an existing name and `insert_item` duplicating the
//!   primary key answer `false`, so tests can observe flag propagation.
//! - CRUD against an undeclared table is [`HostError::MissingTable`].

use serde_json::{Map, Value};
use smartindex_support::host::{HostEnv, HostError};
use smartindex_support::json::{self, JsonObject};
use std::collections::{BTreeMap, HashMap};

struct MemTable {
    primary_key: String,
    rows: Vec<JsonObject>,
}

impl MemTable {
    fn primary_key_taken(&self, values: &JsonObject) -> bool {
        match values.get(&self.primary_key) {
            Some(key) => self
                .rows
                .iter()
                .any(|row| row.get(&self.primary_key) == Some(key)),
            None => false,
        }
    }
}

fn matches(row: &JsonObject, condition: &JsonObject) -> bool {
    condition.iter().all(|(name, value)| row.get(name) == Some(value))
}

fn parse(call: &'static str, body: &str) -> Result<JsonObject, HostError> {
    json::parse_object(body).map_err(|e| HostError::Call {
        call,
        detail: e.to_string(),
    })
}

/// An in-memory stand-in for the host store and block index.
#[derive(Default)]
pub struct MemHost {
    tables: HashMap<String, MemTable>,
    blocks: BTreeMap<u64, Value>,
    transactions: HashMap<String, Value>,
    outpoints: HashMap<String, Value>,
    v1s: HashMap<u64, Value>,
    v2s: HashMap<u64, Value>,
    by_hash: HashMap<String, Value>,
    network: String,
    contract_address: String,
    /// Payloads handed back through `value_return`, oldest first.
    pub value_returns: Vec<String>,
}

impl MemHost {
    pub fn new() -> Self {
        Self {
            network: "regtest".to_owned(),
            ..Self::default()
        }
    }

    pub fn set_network(&mut self, network: impl Into<String>) {
        self.network = network.into();
    }

    pub fn set_contract_address(&mut self, address: impl Into<String>) {
        self.contract_address = address.into();
    }

    /// Index a block fixture at `height`. The chain tip follows the highest
    /// indexed height.
    pub fn add_block(&mut self, height: u64, block: Value) {
        self.blocks.insert(height, block);
    }

    /// Transaction stubs served for a block hash, in block order.
    pub fn add_transactions(&mut self, block_hash: impl Into<String>, stubs: Value) {
        self.transactions.insert(block_hash.into(), stubs);
    }

    /// Outpoint rows served for a transaction hash, in host order.
    pub fn add_outpoints(&mut self, tx_hash: impl Into<String>, outpoints: Value) {
        self.outpoints.insert(tx_hash.into(), outpoints);
    }

    pub fn add_transaction_v1s(&mut self, height: u64, transactions: Value) {
        self.v1s.insert(height, transactions);
    }

    pub fn add_transaction_v2s(&mut self, height: u64, transactions: Value) {
        self.v2s.insert(height, transactions);
    }

    /// By-hash lookup fixture; hashes never added answer the `"null"`
    /// sentinel.
    pub fn add_transaction(&mut self, hash: impl Into<String>, transaction: Value) {
        self.by_hash.insert(hash.into(), transaction);
    }

    /// Current rows of a declared table, for assertions.
    pub fn rows(&self, table: &str) -> Option<&[JsonObject]> {
        self.tables.get(table).map(|t| t.rows.as_slice())
    }

    fn table_mut(&mut self, name: &str) -> Result<&mut MemTable, HostError> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| HostError::MissingTable(name.to_owned()))
    }
}

impl HostEnv for MemHost {
    fn create_table(
        &mut self,
        table: &str,
        primary_key: &str,
        schema_json: &str,
        _options_json: &str,
    ) -> Result<bool, HostError> {
        if self.tables.contains_key(table) {
            log::debug!("create_table {table}: already exists");
            return Ok(false);
        }
        // Validated for shape only; the double does not type-check writes.
        parse("createTable", schema_json)?;
        log::debug!("create_table {table} pk={primary_key}");
        self.tables.insert(
            table.to_owned(),
            MemTable {
                primary_key: primary_key.to_owned(),
                rows: Vec::new(),
            },
        );
        Ok(true)
    }

    fn insert_item(&mut self, table: &str, values_json: &str) -> Result<bool, HostError> {
        let values = parse("insertItem", values_json)?;
        let target = self.table_mut(table)?;
        if target.primary_key_taken(&values) {
            log::debug!("insert_item {table}: duplicate primary key");
            return Ok(false);
        }
        target.rows.push(values);
        Ok(true)
    }

    fn update_item(
        &mut self,
        table: &str,
        condition_json: &str,
        values_json: &str,
    ) -> Result<bool, HostError> {
        let condition = parse("updateItem", condition_json)?;
        let values = parse("updateItem", values_json)?;
        let target = self.table_mut(table)?;
        for row in target.rows.iter_mut().filter(|row| matches(row, &condition)) {
            for (name, value) in &values {
                row.insert(name.clone(), value.clone());
            }
        }
        Ok(true)
    }

    fn delete_item(&mut self, table: &str, condition_json: &str) -> Result<bool, HostError> {
        let condition = parse("deleteItem", condition_json)?;
        let target = self.table_mut(table)?;
        target.rows.retain(|row| !matches(row, &condition));
        Ok(true)
    }

    fn select_item(&mut self, table: &str, condition_json: &str) -> Result<String, HostError> {
        let condition = parse("selectItem", condition_json)?;
        let target = self.table_mut(table)?;
        let row = target
            .rows
            .iter()
            .find(|row| matches(row, &condition))
            .cloned()
            .unwrap_or_else(Map::new);
        Ok(Value::Object(row).to_string())
    }

    fn select_native(&mut self, statement: &str, args_json: &str) -> Result<String, HostError> {
        // The double has no query engine; native selects answer empty.
        log::debug!("select_native unsupported: {statement} {args_json}");
        Ok("[]".to_owned())
    }

    fn block_by_height(&mut self, height: u64) -> Result<String, HostError> {
        Ok(self
            .blocks
            .get(&height)
            .map(Value::to_string)
            .unwrap_or_else(|| "{}".to_owned()))
    }

    fn transactions_by_block_hash(&mut self, block_hash: &str) -> Result<String, HostError> {
        Ok(self
            .transactions
            .get(block_hash)
            .map(Value::to_string)
            .unwrap_or_else(|| "[]".to_owned()))
    }

    fn outpoints_by_transaction_hash(&mut self, tx_hash: &str) -> Result<String, HostError> {
        Ok(self
            .outpoints
            .get(tx_hash)
            .map(Value::to_string)
            .unwrap_or_else(|| "[]".to_owned()))
    }

    fn transaction_v1s_by_block_height(&mut self, height: u64) -> Result<String, HostError> {
        Ok(self
            .v1s
            .get(&height)
            .map(Value::to_string)
            .unwrap_or_else(|| "[]".to_owned()))
    }

    fn transaction_v2s_by_block_height(&mut self, height: u64) -> Result<String, HostError> {
        Ok(self
            .v2s
            .get(&height)
            .map(Value::to_string)
            .unwrap_or_else(|| "[]".to_owned()))
    }

    fn transaction_by_hash(&mut self, hash: &str) -> Result<String, HostError> {
        Ok(self
            .by_hash
            .get(hash)
            .map(Value::to_string)
            .unwrap_or_else(|| "null".to_owned()))
    }

    fn last_height(&mut self) -> Result<String, HostError> {
        let tip = self.blocks.keys().next_back().copied().unwrap_or(0);
        Ok(tip.to_string())
    }

    fn network(&mut self) -> Result<String, HostError> {
        Ok(self.network.clone())
    }

    fn contract_address(&mut self) -> Result<String, HostError> {
        Ok(self.contract_address.clone())
    }

    fn log(&mut self, message: &str) {
        log::debug!(target: "memhost", "{message}");
    }

    fn value_return(&mut self, payload: &str) {
        self.value_returns.push(payload.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declared(host: &mut MemHost) {
        host.create_table(
            "ordinals",
            "id",
            r#"{"id":"int64","address":"string"}"#,
            r#"{"primaryKey":"id","indexes":[],"mediumTexts":[]}"#,
        )
        .unwrap();
    }

    #[test]
    fn create_insert_select() {
        let mut host = MemHost::new();
        declared(&mut host);
        assert!(host
            .insert_item("ordinals", r#"{"id":"0","address":"bc1qabc"}"#)
            .unwrap());
        let row = host.select_item("ordinals", r#"{"id":"0"}"#).unwrap();
        let decoded = json::parse_object(&row).unwrap();
        assert_eq!(decoded["address"], "bc1qabc");
    }

    #[test]
    fn duplicate_table_and_primary_key_are_rejected() {
        let mut host = MemHost::new();
        declared(&mut host);
        assert!(!host
            .create_table("ordinals", "id", "{}", "{}")
            .unwrap());
        host.insert_item("ordinals", r#"{"id":"0"}"#).unwrap();
        assert!(!host.insert_item("ordinals", r#"{"id":"0"}"#).unwrap());
    }

    #[test]
    fn missing_table_is_an_error() {
        let mut host = MemHost::new();
        assert!(matches!(
            host.insert_item("nope", "{}"),
            Err(HostError::MissingTable(_))
        ));
    }

    #[test]
    fn update_merges_and_delete_removes() {
        let mut host = MemHost::new();
        declared(&mut host);
        host.insert_item("ordinals", r#"{"id":"0","address":"a"}"#)
            .unwrap();
        host.update_item("ordinals", r#"{"id":"0"}"#, r#"{"address":"b"}"#)
            .unwrap();
        let row = host.select_item("ordinals", r#"{"id":"0"}"#).unwrap();
        assert!(row.contains("\"address\":\"b\""));

        host.delete_item("ordinals", r#"{"id":"0"}"#).unwrap();
        assert_eq!(host.select_item("ordinals", r#"{"id":"0"}"#).unwrap(), "{}");
        assert!(host.rows("ordinals").unwrap().is_empty());
    }

    #[test]
    fn value_returns_are_captured_in_order() {
        let mut host = MemHost::new();
        host.log("processing block 189");
        host.value_return("{\"ok\":true}");
        host.value_return("{\"ok\":false}");
        assert_eq!(host.value_returns, vec!["{\"ok\":true}", "{\"ok\":false}"]);
    }

    #[test]
    fn tip_follows_highest_block() {
        let mut host = MemHost::new();
        assert_eq!(host.last_height().unwrap(), "0");
        host.add_block(7, serde_json::json!({"hash": "h7"}));
        host.add_block(3, serde_json::json!({"hash": "h3"}));
        assert_eq!(host.last_height().unwrap(), "7");
    }
}
