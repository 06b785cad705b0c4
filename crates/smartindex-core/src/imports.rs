//! Raw imports from the sandbox `env` module.
//!
//! String arguments and results cross as length-prefixed buffers: the `i32`
//! passed or returned addresses the payload, with the length word at
//! `ptr - 4`. Result buffers are obtained by the host through the module's
//! `allocate` export.

#[link(wasm_import_module = "env")]
extern "C" {
    #[link_name = "consoleLog"]
    pub fn console_log(message: i32);
    #[link_name = "valueReturn"]
    pub fn value_return(payload: i32);
    #[link_name = "createTable"]
    pub fn create_table(table: i32, primary_key: i32, schema: i32, options: i32) -> i32;
    #[link_name = "insertItem"]
    pub fn insert_item(table: i32, values: i32) -> i32;
    #[link_name = "updateItem"]
    pub fn update_item(table: i32, condition: i32, values: i32) -> i32;
    #[link_name = "deleteItem"]
    pub fn delete_item(table: i32, condition: i32) -> i32;
    #[link_name = "selectItem"]
    pub fn select_item(table: i32, condition: i32) -> i32;
    #[link_name = "selectNative"]
    pub fn select_native(statement: i32, args: i32) -> i32;
    #[link_name = "getBlockByHeight"]
    pub fn get_block_by_height(height: u64) -> i32;
    #[link_name = "getTransactionsByBlockHash"]
    pub fn get_transactions_by_block_hash(block_hash: i32) -> i32;
    #[link_name = "getOutpointsByTransactionHash"]
    pub fn get_outpoints_by_transaction_hash(tx_hash: i32) -> i32;
    #[link_name = "getTransactionV1sByBlockHeight"]
    pub fn get_transaction_v1s_by_block_height(height: u64) -> i32;
    #[link_name = "getTransactionV2sByBlockHeight"]
    pub fn get_transaction_v2s_by_block_height(height: u64) -> i32;
    #[link_name = "getTransactionByHash"]
    pub fn get_transaction_by_hash(hash: i32) -> i32;
    #[link_name = "getLastHeight"]
    pub fn get_last_height() -> i32;
    #[link_name = "getNetwork"]
    pub fn get_network() -> i32;
    #[link_name = "contractAddress"]
    pub fn contract_address() -> i32;
}
