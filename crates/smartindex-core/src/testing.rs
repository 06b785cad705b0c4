//! Canned host for unit tests: scripted response bodies, recorded calls.

use smartindex_support::host::{HostEnv, HostError};
use std::collections::HashMap;

#[derive(Default)]
pub struct ScriptedHost {
    pub blocks: HashMap<u64, String>,
    pub txs_by_block: HashMap<String, String>,
    pub outpoints: HashMap<String, String>,
    pub v1s: HashMap<u64, String>,
    pub v2s: HashMap<u64, String>,
    pub by_hash: HashMap<String, String>,
    pub selects: HashMap<String, String>,
    pub native: String,
    pub last_height: String,
    pub network: String,
    pub address: String,
    pub accept_mutations: bool,
    pub calls: Vec<String>,
    pub logged: Vec<String>,
    pub returned: Vec<String>,
}

impl ScriptedHost {
    /// A host that accepts every mutation.
    pub fn accepting() -> Self {
        Self {
            accept_mutations: true,
            ..Self::default()
        }
    }

    fn or(body: Option<&String>, fallback: &str) -> String {
        body.cloned().unwrap_or_else(|| fallback.to_owned())
    }
}

impl HostEnv for ScriptedHost {
    fn create_table(
        &mut self,
        table: &str,
        primary_key: &str,
        schema_json: &str,
        options_json: &str,
    ) -> Result<bool, HostError> {
        self.calls.push(format!(
            "createTable {table} {primary_key} {schema_json} {options_json}"
        ));
        Ok(self.accept_mutations)
    }

    fn insert_item(&mut self, table: &str, values_json: &str) -> Result<bool, HostError> {
        self.calls.push(format!("insertItem {table} {values_json}"));
        Ok(self.accept_mutations)
    }

    fn update_item(
        &mut self,
        table: &str,
        condition_json: &str,
        values_json: &str,
    ) -> Result<bool, HostError> {
        self.calls
            .push(format!("updateItem {table} {condition_json} {values_json}"));
        Ok(self.accept_mutations)
    }

    fn delete_item(&mut self, table: &str, condition_json: &str) -> Result<bool, HostError> {
        self.calls
            .push(format!("deleteItem {table} {condition_json}"));
        Ok(self.accept_mutations)
    }

    fn select_item(&mut self, table: &str, condition_json: &str) -> Result<String, HostError> {
        self.calls
            .push(format!("selectItem {table} {condition_json}"));
        Ok(Self::or(self.selects.get(table), "{}"))
    }

    fn select_native(&mut self, statement: &str, args_json: &str) -> Result<String, HostError> {
        self.calls
            .push(format!("selectNative {statement} {args_json}"));
        if self.native.is_empty() {
            Ok("[]".to_owned())
        } else {
            Ok(self.native.clone())
        }
    }

    fn block_by_height(&mut self, height: u64) -> Result<String, HostError> {
        Ok(Self::or(self.blocks.get(&height), "{}"))
    }

    fn transactions_by_block_hash(&mut self, block_hash: &str) -> Result<String, HostError> {
        Ok(Self::or(self.txs_by_block.get(block_hash), "[]"))
    }

    fn outpoints_by_transaction_hash(&mut self, tx_hash: &str) -> Result<String, HostError> {
        Ok(Self::or(self.outpoints.get(tx_hash), "[]"))
    }

    fn transaction_v1s_by_block_height(&mut self, height: u64) -> Result<String, HostError> {
        Ok(Self::or(self.v1s.get(&height), "[]"))
    }

    fn transaction_v2s_by_block_height(&mut self, height: u64) -> Result<String, HostError> {
        Ok(Self::or(self.v2s.get(&height), "[]"))
    }

    fn transaction_by_hash(&mut self, hash: &str) -> Result<String, HostError> {
        Ok(Self::or(self.by_hash.get(hash), "null"))
    }

    fn last_height(&mut self) -> Result<String, HostError> {
        if self.last_height.is_empty() {
            Ok("0".to_owned())
        } else {
            Ok(self.last_height.clone())
        }
    }

    fn network(&mut self) -> Result<String, HostError> {
        if self.network.is_empty() {
            Ok("regtest".to_owned())
        } else {
            Ok(self.network.clone())
        }
    }

    fn contract_address(&mut self) -> Result<String, HostError> {
        Ok(self.address.clone())
    }

    fn log(&mut self, message: &str) {
        self.logged.push(message.to_owned());
    }

    fn value_return(&mut self, payload: &str) {
        self.returned.push(payload.to_owned());
    }
}
