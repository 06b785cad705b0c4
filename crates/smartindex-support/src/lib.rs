//! Support library for the smartindex WASM SDK
//!
//! This crate holds everything the SDK needs that is independent of the
//! actual sandbox bindings: the length-prefixed buffer convention used to
//! move strings across the module/host boundary, the typed JSON field
//! accessors every domain decoder is built from, the table schema and
//! condition encoders, the blockchain domain records, and the [`host::HostEnv`]
//! capability trait the rest of the SDK is generic over.
//!
//! Keeping these pieces free of `wasm32`-only code means they can be unit
//! tested natively and reused by host-side doubles.

pub mod buffer;
pub mod host;
pub mod json;
pub mod model;
pub mod schema;

// Re-export commonly used items
pub use buffer::{BufferArena, BufferError, HostBuffer};
pub use host::{HostEnv, HostError};
pub use json::{FieldKind, JsonError, JsonObject};
pub use schema::{ColumnDef, ColumnType, ColumnValue, TableOptions};
