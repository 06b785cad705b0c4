//! SDK error taxonomy.

use smartindex_support::buffer::BufferError;
use smartindex_support::host::HostError;
use smartindex_support::json::JsonError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Host(#[from] HostError),
    #[error(transparent)]
    Json(#[from] JsonError),
    #[error(transparent)]
    Buffer(#[from] BufferError),
    /// The host reported a failed mutation. The flag is surfaced instead of
    /// being discarded, so a rejected write never reads as committed.
    #[error("host rejected {operation} on table `{table}`")]
    Rejected {
        operation: &'static str,
        table: String,
    },
    /// A scalar result (height, identifier) that did not parse.
    #[error("host returned malformed {what}: `{value}`")]
    Scalar { what: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, Error>;
