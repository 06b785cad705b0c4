//! [`HostEnv`] over the raw `env` imports.

use crate::{imports, memory};
use smartindex_support::buffer::{to_length_prefixed, LENGTH_PREFIX};
use smartindex_support::host::{HostEnv, HostError};

/// The live host binding used inside the sandbox. Zero-sized; all state
/// lives on the host side or in the response arena.
#[derive(Debug, Default, Clone, Copy)]
pub struct WasmHost;

/// Pointer to the payload of an outgoing length-prefixed buffer. The buffer
/// must stay alive for the duration of the call.
fn passback_ptr(buffer: &mut Vec<u8>) -> i32 {
    buffer.as_mut_ptr() as usize as i32 + LENGTH_PREFIX as i32
}

fn read(handle: i32) -> Result<String, HostError> {
    Ok(memory::take_response(handle)?)
}

impl HostEnv for WasmHost {
    fn create_table(
        &mut self,
        table: &str,
        primary_key: &str,
        schema_json: &str,
        options_json: &str,
    ) -> Result<bool, HostError> {
        let mut table = to_length_prefixed(table.as_bytes());
        let mut primary_key = to_length_prefixed(primary_key.as_bytes());
        let mut schema = to_length_prefixed(schema_json.as_bytes());
        let mut options = to_length_prefixed(options_json.as_bytes());
        let ok = unsafe {
            imports::create_table(
                passback_ptr(&mut table),
                passback_ptr(&mut primary_key),
                passback_ptr(&mut schema),
                passback_ptr(&mut options),
            )
        };
        Ok(ok != 0)
    }

    fn insert_item(&mut self, table: &str, values_json: &str) -> Result<bool, HostError> {
        let mut table = to_length_prefixed(table.as_bytes());
        let mut values = to_length_prefixed(values_json.as_bytes());
        let ok = unsafe { imports::insert_item(passback_ptr(&mut table), passback_ptr(&mut values)) };
        Ok(ok != 0)
    }

    fn update_item(
        &mut self,
        table: &str,
        condition_json: &str,
        values_json: &str,
    ) -> Result<bool, HostError> {
        let mut table = to_length_prefixed(table.as_bytes());
        let mut condition = to_length_prefixed(condition_json.as_bytes());
        let mut values = to_length_prefixed(values_json.as_bytes());
        let ok = unsafe {
            imports::update_item(
                passback_ptr(&mut table),
                passback_ptr(&mut condition),
                passback_ptr(&mut values),
            )
        };
        Ok(ok != 0)
    }

    fn delete_item(&mut self, table: &str, condition_json: &str) -> Result<bool, HostError> {
        let mut table = to_length_prefixed(table.as_bytes());
        let mut condition = to_length_prefixed(condition_json.as_bytes());
        let ok =
            unsafe { imports::delete_item(passback_ptr(&mut table), passback_ptr(&mut condition)) };
        Ok(ok != 0)
    }

    fn select_item(&mut self, table: &str, condition_json: &str) -> Result<String, HostError> {
        let mut table = to_length_prefixed(table.as_bytes());
        let mut condition = to_length_prefixed(condition_json.as_bytes());
        let handle =
            unsafe { imports::select_item(passback_ptr(&mut table), passback_ptr(&mut condition)) };
        read(handle)
    }

    fn select_native(&mut self, statement: &str, args_json: &str) -> Result<String, HostError> {
        let mut statement = to_length_prefixed(statement.as_bytes());
        let mut args = to_length_prefixed(args_json.as_bytes());
        let handle =
            unsafe { imports::select_native(passback_ptr(&mut statement), passback_ptr(&mut args)) };
        read(handle)
    }

    fn block_by_height(&mut self, height: u64) -> Result<String, HostError> {
        read(unsafe { imports::get_block_by_height(height) })
    }

    fn transactions_by_block_hash(&mut self, block_hash: &str) -> Result<String, HostError> {
        let mut block_hash = to_length_prefixed(block_hash.as_bytes());
        read(unsafe { imports::get_transactions_by_block_hash(passback_ptr(&mut block_hash)) })
    }

    fn outpoints_by_transaction_hash(&mut self, tx_hash: &str) -> Result<String, HostError> {
        let mut tx_hash = to_length_prefixed(tx_hash.as_bytes());
        read(unsafe { imports::get_outpoints_by_transaction_hash(passback_ptr(&mut tx_hash)) })
    }

    fn transaction_v1s_by_block_height(&mut self, height: u64) -> Result<String, HostError> {
        read(unsafe { imports::get_transaction_v1s_by_block_height(height) })
    }

    fn transaction_v2s_by_block_height(&mut self, height: u64) -> Result<String, HostError> {
        read(unsafe { imports::get_transaction_v2s_by_block_height(height) })
    }

    fn transaction_by_hash(&mut self, hash: &str) -> Result<String, HostError> {
        let mut hash = to_length_prefixed(hash.as_bytes());
        read(unsafe { imports::get_transaction_by_hash(passback_ptr(&mut hash)) })
    }

    fn last_height(&mut self) -> Result<String, HostError> {
        read(unsafe { imports::get_last_height() })
    }

    fn network(&mut self) -> Result<String, HostError> {
        read(unsafe { imports::get_network() })
    }

    fn contract_address(&mut self) -> Result<String, HostError> {
        read(unsafe { imports::contract_address() })
    }

    fn log(&mut self, message: &str) {
        let mut message = to_length_prefixed(message.as_bytes());
        unsafe { imports::console_log(passback_ptr(&mut message)) }
    }

    fn value_return(&mut self, payload: &str) {
        let mut payload = to_length_prefixed(payload.as_bytes());
        unsafe { imports::value_return(passback_ptr(&mut payload)) }
    }
}
