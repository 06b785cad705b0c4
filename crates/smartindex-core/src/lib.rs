//! Guest-side SDK for smartindex sandbox modules
//!
//! This crate is the module half of the host/module contract: contract logic
//! links against it to declare relational tables, run CRUD queries against
//! the host-managed store, and fetch typed blockchain records (blocks,
//! transactions, outpoints) from the host index.
//!
//! # Architecture
//!
//! - [`table`]: the [`Table`] façade binding a name and schema to
//!   `init`/`select`/`insert`/`update`/`delete`.
//! - [`queries`]: chain queries and the derived traversals (block height to
//!   transaction hashes to outpoints).
//! - [`memory`]: the response arena behind the `allocate` export; every
//!   host-written buffer is length-validated before it is decoded.
//! - `wasm` / `imports`: the live [`HostEnv`] binding over the sandbox
//!   `env` imports (`wasm32` builds only).
//! - `stdio` / `compat`: console output and panic reporting through the
//!   host log (`wasm32` builds only).
//!
//! Every operation takes the host port as `&mut impl HostEnv`, so the same
//! code runs against the sandbox imports in a deployed module and against an
//! in-memory double in tests.

pub mod error;
pub mod memory;
pub mod queries;
pub mod table;

#[cfg(target_arch = "wasm32")]
pub mod compat;
#[cfg(target_arch = "wasm32")]
pub mod imports;
#[cfg(target_arch = "wasm32")]
pub mod stdio;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use error::{Error, Result};
pub use table::{Row, Table};

// The support-crate types every caller needs alongside the façade.
pub use smartindex_support::host::{HostEnv, HostError};
pub use smartindex_support::json::{field, FieldKind, JsonObject};
pub use smartindex_support::model::{
    Block, Transaction, TransactionOutpoints, TransactionV1, TransactionV2, TransactionV3, Utxo,
    VinV1, VinV2, VoutV1, VoutV2,
};
pub use smartindex_support::schema::{ColumnDef, ColumnType, ColumnValue, TableOptions};

#[cfg(test)]
pub(crate) mod testing;
