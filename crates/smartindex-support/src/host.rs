//! The host capability port.
//!
//! Everything the sandbox host can do for a module is one method on
//! [`HostEnv`]. SDK operations are generic over this trait: the WASM build
//! wires it to the raw `env` imports, and tests inject an in-memory double.
//! Calls are synchronous round trips; there is no retry or timeout at this
//! layer.
//!
//! Mutating calls return the host's success flag so the caller can act on a
//! rejected write instead of silently treating it as committed.

use crate::buffer::BufferError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error(transparent)]
    Buffer(#[from] BufferError),
    #[error("table `{0}` does not exist")]
    MissingTable(String),
    #[error("host call `{call}` failed: {detail}")]
    Call { call: &'static str, detail: String },
}

pub trait HostEnv {
    /// Declare a table. `schema_json` and `options_json` are the encodings
    /// produced by [`crate::schema`].
    fn create_table(
        &mut self,
        table: &str,
        primary_key: &str,
        schema_json: &str,
        options_json: &str,
    ) -> Result<bool, HostError>;

    fn insert_item(&mut self, table: &str, values_json: &str) -> Result<bool, HostError>;

    fn update_item(
        &mut self,
        table: &str,
        condition_json: &str,
        values_json: &str,
    ) -> Result<bool, HostError>;

    fn delete_item(&mut self, table: &str, condition_json: &str) -> Result<bool, HostError>;

    /// One JSON object.
    fn select_item(&mut self, table: &str, condition_json: &str) -> Result<String, HostError>;

    /// A JSON array of rows for a native query string.
    fn select_native(&mut self, statement: &str, args_json: &str) -> Result<String, HostError>;

    /// Block JSON for a height.
    fn block_by_height(&mut self, height: u64) -> Result<String, HostError>;

    /// JSON array of transaction stubs for a block hash.
    fn transactions_by_block_hash(&mut self, block_hash: &str) -> Result<String, HostError>;

    /// JSON array of outpoint records for a transaction hash.
    fn outpoints_by_transaction_hash(&mut self, tx_hash: &str) -> Result<String, HostError>;

    fn transaction_v1s_by_block_height(&mut self, height: u64) -> Result<String, HostError>;

    fn transaction_v2s_by_block_height(&mut self, height: u64) -> Result<String, HostError>;

    /// JSON object for a transaction hash, or the literal `"null"` when the
    /// host has no such transaction.
    fn transaction_by_hash(&mut self, hash: &str) -> Result<String, HostError>;

    /// Chain tip height as a decimal string.
    fn last_height(&mut self) -> Result<String, HostError>;

    /// Network identifier (`mainnet`, `testnet`, `signet`, `regtest`).
    fn network(&mut self) -> Result<String, HostError>;

    /// Address of the contract this module runs as.
    fn contract_address(&mut self) -> Result<String, HostError>;

    /// Append a line to the host console.
    fn log(&mut self, message: &str);

    /// Hand a result payload back to the invoking caller.
    fn value_return(&mut self, payload: &str);
}
