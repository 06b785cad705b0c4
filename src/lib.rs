//! Workspace umbrella for the smartindex SDK integration suite.
//!
//! The member crates under `crates/` are the product; this package exists to
//! run the end-to-end tests in `tests/` against the in-memory host.

pub use smartindex_core as sdk;
pub use smartindex_mem as mem;
pub use smartindex_support as support;
