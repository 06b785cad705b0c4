//! Chain queries and derived traversals.
//!
//! Thin typed wrappers over the host's block index: each function issues one
//! or more host calls, decodes the JSON bodies through the domain decoders,
//! and preserves the host's ordering. Host order is per-block transaction
//! order and per-transaction outpoint order; concatenations keep both.

use crate::error::{Error, Result};
use bitcoin::Network;
use serde_json::Value;
use smartindex_support::host::HostEnv;
use smartindex_support::json::{self, JsonError, JsonObject};
use smartindex_support::model::{
    Block, TransactionOutpoints, TransactionV1, TransactionV2, TransactionV3, Utxo,
};

/// Sentinel body for an absent entity.
const NULL_BODY: &str = "null";

pub fn contract_address<H: HostEnv>(host: &mut H) -> Result<String> {
    Ok(host.contract_address()?)
}

/// Network the host indexes. Unknown identifiers map to regtest.
pub fn network<H: HostEnv>(host: &mut H) -> Result<Network> {
    Ok(match host.network()?.as_str() {
        "mainnet" => Network::Bitcoin,
        "testnet" => Network::Testnet,
        "signet" => Network::Signet,
        _ => Network::Regtest,
    })
}

/// Chain tip height. A malformed scalar is an error, not zero.
pub fn last_height<H: HostEnv>(host: &mut H) -> Result<u64> {
    let raw = host.last_height()?;
    raw.trim().parse().map_err(|_| Error::Scalar {
        what: "height",
        value: raw,
    })
}

pub fn block_by_height<H: HostEnv>(host: &mut H, height: u64) -> Result<Block> {
    let body = host.block_by_height(height)?;
    Ok(Block::from_json(&json::parse_object(&body)?)?)
}

/// Hashes of the block's transactions, in the host's block order.
pub fn tx_hashes_by_block_height<H: HostEnv>(host: &mut H, height: u64) -> Result<Vec<String>> {
    let block = block_by_height(host, height)?;
    let body = host.transactions_by_block_hash(&block.hash)?;
    let stubs = json::parse_array(&body)?;
    let mut hashes = Vec::with_capacity(stubs.len());
    for stub in &stubs {
        hashes.push(json::text_field(as_object(stub)?, "hash")?);
    }
    Ok(hashes)
}

pub fn utxos_by_transaction_hash<H: HostEnv>(host: &mut H, tx_hash: &str) -> Result<Vec<Utxo>> {
    let body = host.outpoints_by_transaction_hash(tx_hash)?;
    decode_entities(&body, Utxo::from_json)
}

/// All outpoints touched by the block at `height`: the per-transaction
/// outpoint decodings concatenated in transaction order.
pub fn tx_utxos_by_block_height<H: HostEnv>(host: &mut H, height: u64) -> Result<Vec<Utxo>> {
    let mut utxos = Vec::new();
    for hash in tx_hashes_by_block_height(host, height)? {
        utxos.extend(utxos_by_transaction_hash(host, &hash)?);
    }
    Ok(utxos)
}

/// Same traversal as [`tx_utxos_by_block_height`], grouped per transaction.
pub fn txs_by_block_height<H: HostEnv>(
    host: &mut H,
    height: u64,
) -> Result<Vec<TransactionOutpoints>> {
    let mut groups = Vec::new();
    for hash in tx_hashes_by_block_height(host, height)? {
        let utxos = utxos_by_transaction_hash(host, &hash)?;
        groups.push(TransactionOutpoints {
            tx_hash: hash,
            utxos,
        });
    }
    Ok(groups)
}

pub fn transaction_v1s_by_block_height<H: HostEnv>(
    host: &mut H,
    height: u64,
) -> Result<Vec<TransactionV1>> {
    let body = host.transaction_v1s_by_block_height(height)?;
    decode_entities(&body, TransactionV1::from_json)
}

pub fn transaction_v2s_by_block_height<H: HostEnv>(
    host: &mut H,
    height: u64,
) -> Result<Vec<TransactionV2>> {
    let body = host.transaction_v2s_by_block_height(height)?;
    decode_entities(&body, TransactionV2::from_json)
}

/// Block-position summary for a transaction hash, or `None` when the host
/// answers with the `"null"` sentinel. An empty or malformed body is a
/// decode error, not absence.
pub fn transaction_by_hash<H: HostEnv>(
    host: &mut H,
    hash: &str,
) -> Result<Option<TransactionV3>> {
    let body = host.transaction_by_hash(hash)?;
    if body == NULL_BODY {
        return Ok(None);
    }
    Ok(Some(TransactionV3::from_json(&json::parse_object(&body)?)?))
}

/// Run a native query string with positional arguments; rows come back as
/// schemaless objects.
pub fn select_native<H: HostEnv>(
    host: &mut H,
    statement: &str,
    args: &[&str],
) -> Result<Vec<JsonObject>> {
    let args_json = Value::Array(
        args.iter()
            .map(|arg| Value::String((*arg).to_owned()))
            .collect(),
    )
    .to_string();
    let body = host.select_native(statement, &args_json)?;
    json::parse_array(&body)?
        .iter()
        .map(|row| Ok(as_object(row)?.clone()))
        .collect()
}

fn decode_entities<T>(
    body: &str,
    decode: impl Fn(&JsonObject) -> std::result::Result<T, JsonError>,
) -> Result<Vec<T>> {
    json::parse_array(body)?
        .iter()
        .map(|item| Ok(decode(as_object(item)?)?))
        .collect()
}

fn as_object(value: &Value) -> Result<&JsonObject> {
    value.as_object().ok_or(Error::Json(JsonError::NotAnObject))
}
