//! # Blockchain Domain Records
//!
//! Strongly typed records decoded from the JSON payloads the host serves:
//! block headers, outpoint (UTXO) rows, and the three schema generations of
//! transaction records. Each record is constructed only by its `from_json`
//! decoder and is immutable afterward; the host store stays the system of
//! record.
//!
//! Decoding policy: a field the source omits decodes to its zero value; a
//! field present with the wrong JSON kind is an error. The three transaction
//! generations live behind the tagged [`Transaction`] enum so their decoders
//! cannot drift apart silently.

use crate::json::{self, JsonError, JsonObject};
use serde_json::Value;

fn u32_field(obj: &JsonObject, field: &str) -> Result<u32, JsonError> {
    Ok(json::opt_int(obj, field)?.unwrap_or(0) as u32)
}

fn u64_field(obj: &JsonObject, field: &str) -> Result<u64, JsonError> {
    Ok(json::opt_int(obj, field)?.unwrap_or(0) as u64)
}

fn i64_field(obj: &JsonObject, field: &str) -> Result<i64, JsonError> {
    Ok(json::opt_int(obj, field)?.unwrap_or(0))
}

fn text_or_empty(obj: &JsonObject, field: &str) -> Result<String, JsonError> {
    Ok(json::opt_text(obj, field)?.unwrap_or_default())
}

/// Script-asm lists arrive either as a JSON array of opcodes or already
/// flattened to the `;`-joined wire form; both decode to the same sequence.
fn asm_list(obj: &JsonObject, field: &str) -> Result<Vec<String>, JsonError> {
    match obj.get(field) {
        None => Ok(Vec::new()),
        Some(Value::String(joined)) => Ok(json::split_list(joined)),
        Some(Value::Array(_)) => json::list_field(obj, field),
        Some(_) => Err(JsonError::Kind {
            field: field.to_owned(),
            expected: "array",
        }),
    }
}

fn bool_field(obj: &JsonObject, field: &str) -> Result<bool, JsonError> {
    match obj.get(field) {
        None => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(Value::Number(n)) => Ok(n.as_i64().unwrap_or(0) != 0),
        Some(_) => Err(JsonError::Kind {
            field: field.to_owned(),
            expected: "bool",
        }),
    }
}

/// Nested entity array: absent decodes as empty, and every element must be
/// an object.
fn object_array<'a>(obj: &'a JsonObject, field: &str) -> Result<Vec<&'a JsonObject>, JsonError> {
    match obj.get(field) {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_object().ok_or_else(|| JsonError::Kind {
                    field: field.to_owned(),
                    expected: "array",
                })
            })
            .collect(),
        Some(_) => Err(JsonError::Kind {
            field: field.to_owned(),
            expected: "array",
        }),
    }
}

/// V1 witness items ride in a single comma-joined string field, unlike the
/// `;`-joined array-kind script lists.
fn split_csv(joined: &str) -> Vec<String> {
    if joined.is_empty() {
        return Vec::new();
    }
    joined.split(',').map(str::to_owned).collect()
}

/// Block header row as the host indexes it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    pub id: u64,
    pub hash: String,
    pub height: u64,
    pub previous_block: String,
    pub merkle_root: String,
    pub time: i64,
    pub nonce: u32,
    pub bits: u32,
    pub version: u32,
}

impl Block {
    pub fn from_json(obj: &JsonObject) -> Result<Self, JsonError> {
        Ok(Self {
            id: u64_field(obj, "id")?,
            hash: text_or_empty(obj, "hash")?,
            height: u64_field(obj, "height")?,
            previous_block: text_or_empty(obj, "previous_block")?,
            merkle_root: text_or_empty(obj, "merkle_root")?,
            time: i64_field(obj, "time")?,
            nonce: u32_field(obj, "nonce")?,
            bits: u32_field(obj, "bits")?,
            version: u32_field(obj, "version")?,
        })
    }
}

/// One outpoint row: where the output was funded and, once spent, where it
/// was consumed. Spending-side linkage is the zero value while unspent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Utxo {
    pub id: u64,
    pub value: u64,
    pub spending_tx_hash: String,
    pub spending_tx_index: i64,
    pub spending_block_hash: String,
    pub spending_block_height: i64,
    pub spending_block_tx_index: i64,
    pub sequence: u64,
    pub funding_tx_hash: String,
    pub funding_tx_index: i64,
    pub funding_block_hash: String,
    pub funding_block_height: i64,
    pub funding_block_tx_index: i64,
    pub signature_script: String,
    pub pk_script: String,
    pub witness: String,
    pub spender: String,
    /// Output classification; wire key `type`.
    pub kind: String,
    pub p2sh_asm_scripts: Vec<String>,
    pub pk_asm_scripts: Vec<String>,
    pub witness_asm_scripts: Vec<String>,
}

impl Utxo {
    pub fn from_json(obj: &JsonObject) -> Result<Self, JsonError> {
        Ok(Self {
            id: u64_field(obj, "id")?,
            value: u64_field(obj, "value")?,
            spending_tx_hash: text_or_empty(obj, "spending_tx_hash")?,
            spending_tx_index: i64_field(obj, "spending_tx_index")?,
            spending_block_hash: text_or_empty(obj, "spending_block_hash")?,
            spending_block_height: i64_field(obj, "spending_block_height")?,
            spending_block_tx_index: i64_field(obj, "spending_block_tx_index")?,
            sequence: u64_field(obj, "sequence")?,
            funding_tx_hash: text_or_empty(obj, "funding_tx_hash")?,
            funding_tx_index: i64_field(obj, "funding_tx_index")?,
            funding_block_hash: text_or_empty(obj, "funding_block_hash")?,
            funding_block_height: i64_field(obj, "funding_block_height")?,
            funding_block_tx_index: i64_field(obj, "funding_block_tx_index")?,
            signature_script: text_or_empty(obj, "signature_script")?,
            pk_script: text_or_empty(obj, "pk_script")?,
            witness: text_or_empty(obj, "witness")?,
            spender: text_or_empty(obj, "spender")?,
            kind: text_or_empty(obj, "type")?,
            p2sh_asm_scripts: asm_list(obj, "p2sh_asm_scripts")?,
            pk_asm_scripts: asm_list(obj, "pk_asm_scripts")?,
            witness_asm_scripts: asm_list(obj, "witness_asm_scripts")?,
        })
    }

    pub fn is_spent(&self) -> bool {
        !self.spending_tx_hash.is_empty()
    }

    /// Raw locking script; the wire carries it hex-encoded.
    pub fn pk_script_bytes(&self) -> Result<Vec<u8>, hex::FromHexError> {
        hex::decode(&self.pk_script)
    }

    pub fn signature_script_bytes(&self) -> Result<Vec<u8>, hex::FromHexError> {
        hex::decode(&self.signature_script)
    }
}

/// Minimal first-generation input shape.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VinV1 {
    pub tx_hash: String,
    pub index: u32,
    pub value: u64,
    pub witness: Vec<String>,
}

impl VinV1 {
    pub fn from_json(obj: &JsonObject) -> Result<Self, JsonError> {
        Ok(Self {
            tx_hash: text_or_empty(obj, "tx_hash")?,
            index: u32_field(obj, "index")?,
            value: u64_field(obj, "value")?,
            witness: split_csv(&text_or_empty(obj, "witness")?),
        })
    }
}

/// Minimal first-generation output shape.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VoutV1 {
    pub tx_hash: String,
    pub index: u32,
    pub address: String,
    pub pk_script: String,
    pub value: u64,
}

impl VoutV1 {
    pub fn from_json(obj: &JsonObject) -> Result<Self, JsonError> {
        Ok(Self {
            tx_hash: text_or_empty(obj, "tx_hash")?,
            index: u32_field(obj, "index")?,
            address: text_or_empty(obj, "address")?,
            pk_script: text_or_empty(obj, "pk_script")?,
            value: u64_field(obj, "value")?,
        })
    }
}

/// Second-generation input: the spend side of an outpoint row, with block
/// linkage, the funding reference, and decompiled script lists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VinV2 {
    pub tx_hash: String,
    pub index: u32,
    pub value: u64,
    pub sequence: u64,
    pub block_hash: String,
    pub block_height: i64,
    pub block_tx_index: i64,
    pub funding_tx_hash: String,
    pub funding_tx_index: i64,
    pub signature_script: String,
    pub witness: String,
    pub spender: String,
    /// Wire key `type`.
    pub kind: String,
    pub p2sh_asm_scripts: Vec<String>,
    pub witness_asm_scripts: Vec<String>,
}

impl VinV2 {
    pub fn from_json(obj: &JsonObject) -> Result<Self, JsonError> {
        Ok(Self {
            tx_hash: text_or_empty(obj, "tx_hash")?,
            index: u32_field(obj, "index")?,
            value: u64_field(obj, "value")?,
            sequence: u64_field(obj, "sequence")?,
            block_hash: text_or_empty(obj, "block_hash")?,
            block_height: i64_field(obj, "block_height")?,
            block_tx_index: i64_field(obj, "block_tx_index")?,
            funding_tx_hash: text_or_empty(obj, "funding_tx_hash")?,
            funding_tx_index: i64_field(obj, "funding_tx_index")?,
            signature_script: text_or_empty(obj, "signature_script")?,
            witness: text_or_empty(obj, "witness")?,
            spender: text_or_empty(obj, "spender")?,
            kind: text_or_empty(obj, "type")?,
            p2sh_asm_scripts: asm_list(obj, "p2sh_asm_scripts")?,
            witness_asm_scripts: asm_list(obj, "witness_asm_scripts")?,
        })
    }
}

/// Second-generation output: the funding side, with block linkage and the
/// spending reference once consumed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VoutV2 {
    pub tx_hash: String,
    pub index: u32,
    pub value: u64,
    pub address: String,
    pub pk_script: String,
    pub block_hash: String,
    pub block_height: i64,
    pub block_tx_index: i64,
    pub spending_tx_hash: String,
    pub spending_tx_index: i64,
    pub spender: String,
    /// Wire key `type`.
    pub kind: String,
    pub pk_asm_scripts: Vec<String>,
}

impl VoutV2 {
    pub fn from_json(obj: &JsonObject) -> Result<Self, JsonError> {
        Ok(Self {
            tx_hash: text_or_empty(obj, "tx_hash")?,
            index: u32_field(obj, "index")?,
            value: u64_field(obj, "value")?,
            address: text_or_empty(obj, "address")?,
            pk_script: text_or_empty(obj, "pk_script")?,
            block_hash: text_or_empty(obj, "block_hash")?,
            block_height: i64_field(obj, "block_height")?,
            block_tx_index: i64_field(obj, "block_tx_index")?,
            spending_tx_hash: text_or_empty(obj, "spending_tx_hash")?,
            spending_tx_index: i64_field(obj, "spending_tx_index")?,
            spender: text_or_empty(obj, "spender")?,
            kind: text_or_empty(obj, "type")?,
            pk_asm_scripts: asm_list(obj, "pk_asm_scripts")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransactionV1 {
    pub hash: String,
    pub lock_time: u32,
    pub version: u32,
    pub vins: Vec<VinV1>,
    pub vouts: Vec<VoutV1>,
}

impl TransactionV1 {
    pub fn from_json(obj: &JsonObject) -> Result<Self, JsonError> {
        Ok(Self {
            hash: text_or_empty(obj, "hash")?,
            lock_time: u32_field(obj, "lock_time")?,
            version: u32_field(obj, "version")?,
            vins: object_array(obj, "vins")?
                .into_iter()
                .map(VinV1::from_json)
                .collect::<Result<_, _>>()?,
            vouts: object_array(obj, "vouts")?
                .into_iter()
                .map(VoutV1::from_json)
                .collect::<Result<_, _>>()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransactionV2 {
    pub hash: String,
    pub lock_time: u32,
    pub version: u32,
    pub vins: Vec<VinV2>,
    pub vouts: Vec<VoutV2>,
}

impl TransactionV2 {
    pub fn from_json(obj: &JsonObject) -> Result<Self, JsonError> {
        Ok(Self {
            hash: text_or_empty(obj, "hash")?,
            lock_time: u32_field(obj, "lock_time")?,
            version: u32_field(obj, "version")?,
            vins: object_array(obj, "vins")?
                .into_iter()
                .map(VinV2::from_json)
                .collect::<Result<_, _>>()?,
            vouts: object_array(obj, "vouts")?
                .into_iter()
                .map(VoutV2::from_json)
                .collect::<Result<_, _>>()?,
        })
    }

    /// Downgrade to the first-generation shape, dropping the block linkage
    /// and classification fields.
    pub fn to_v1(&self) -> TransactionV1 {
        TransactionV1 {
            hash: self.hash.clone(),
            lock_time: self.lock_time,
            version: self.version,
            vins: self
                .vins
                .iter()
                .map(|vin| VinV1 {
                    tx_hash: vin.tx_hash.clone(),
                    index: vin.index,
                    value: vin.value,
                    witness: split_csv(&vin.witness),
                })
                .collect(),
            vouts: self
                .vouts
                .iter()
                .map(|vout| VoutV1 {
                    tx_hash: vout.tx_hash.clone(),
                    index: vout.index,
                    address: vout.address.clone(),
                    pk_script: vout.pk_script.clone(),
                    value: vout.value,
                })
                .collect(),
        }
    }
}

/// Block-position summary of a transaction, with no input/output detail.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransactionV3 {
    pub hash: String,
    pub lock_time: u32,
    pub version: u32,
    pub safe: bool,
    pub block_id: u32,
    pub block_hash: String,
    pub block_height: u64,
    pub block_index: u32,
}

impl TransactionV3 {
    pub fn from_json(obj: &JsonObject) -> Result<Self, JsonError> {
        Ok(Self {
            hash: text_or_empty(obj, "hash")?,
            lock_time: u32_field(obj, "lock_time")?,
            version: u32_field(obj, "version")?,
            safe: bool_field(obj, "safe")?,
            block_id: u32_field(obj, "block_id")?,
            block_hash: text_or_empty(obj, "block_hash")?,
            block_height: u64_field(obj, "block_height")?,
            block_index: u32_field(obj, "block_index")?,
        })
    }
}

/// A transaction record of any schema generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    V1(TransactionV1),
    V2(TransactionV2),
    V3(TransactionV3),
}

impl Transaction {
    pub fn hash(&self) -> &str {
        match self {
            Transaction::V1(tx) => &tx.hash,
            Transaction::V2(tx) => &tx.hash,
            Transaction::V3(tx) => &tx.hash,
        }
    }

    pub fn lock_time(&self) -> u32 {
        match self {
            Transaction::V1(tx) => tx.lock_time,
            Transaction::V2(tx) => tx.lock_time,
            Transaction::V3(tx) => tx.lock_time,
        }
    }

    pub fn version(&self) -> u32 {
        match self {
            Transaction::V1(tx) => tx.version,
            Transaction::V2(tx) => tx.version,
            Transaction::V3(tx) => tx.version,
        }
    }
}

impl From<TransactionV1> for Transaction {
    fn from(tx: TransactionV1) -> Self {
        Transaction::V1(tx)
    }
}

impl From<TransactionV2> for Transaction {
    fn from(tx: TransactionV2) -> Self {
        Transaction::V2(tx)
    }
}

impl From<TransactionV3> for Transaction {
    fn from(tx: TransactionV3) -> Self {
        Transaction::V3(tx)
    }
}

/// Outpoints grouped under the transaction that funded them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransactionOutpoints {
    pub tx_hash: String,
    pub utxos: Vec<Utxo>,
}
