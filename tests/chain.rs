//! End-to-end chain traversals against the in-memory host.

use anyhow::Result;
use bitcoin::Network;
use serde_json::json;
use smartindex_core::queries;
use smartindex_mem::MemHost;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// One block at height 189 with two transactions, each with its own
/// outpoints, mirroring the shapes the real host serves.
fn indexed_chain() -> MemHost {
    let mut host = MemHost::new();
    host.set_network("signet");
    host.set_contract_address("bc1qcontract");
    host.add_block(
        189,
        json!({
            "id": 190,
            "hash": "h1",
            "height": 189,
            "previous_block": "h0",
            "merkle_root": "m1",
            "time": 1231006505000i64,
            "nonce": 2083236893u32,
            "bits": 486604799u32,
            "version": 1
        }),
    );
    host.add_transactions(
        "h1",
        json!([
            {"hash": "t1", "block_hash": "h1", "block_id": 190},
            {"hash": "t2", "block_hash": "h1", "block_id": 190}
        ]),
    );
    host.add_outpoints(
        "t1",
        json!([
            {"id": 1, "value": 600, "funding_tx_hash": "t1", "funding_tx_index": 0,
             "pk_script": "0014ab", "type": "witness_v0_keyhash",
             "pk_asm_scripts": ["OP_0", "ab"]},
            {"id": 2, "value": 400, "funding_tx_hash": "t1", "funding_tx_index": 1}
        ]),
    );
    host.add_outpoints(
        "t2",
        json!([
            {"id": 3, "value": 250, "funding_tx_hash": "t2", "funding_tx_index": 0,
             "spending_tx_hash": "t9", "spending_block_height": 200}
        ]),
    );
    host
}

#[test]
fn block_traversal_concatenates_outpoints_in_order() -> Result<()> {
    init_logging();
    let mut host = indexed_chain();
    let utxos = queries::tx_utxos_by_block_height(&mut host, 189)?;
    assert_eq!(utxos.iter().map(|u| u.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(utxos[0].pk_asm_scripts, vec!["OP_0", "ab"]);
    assert!(!utxos[1].is_spent());
    assert!(utxos[2].is_spent());
    Ok(())
}

#[test]
fn grouped_traversal_preserves_transaction_order() -> Result<()> {
    init_logging();
    let mut host = indexed_chain();
    let groups = queries::txs_by_block_height(&mut host, 189)?;
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].tx_hash, "t1");
    assert_eq!(groups[0].utxos.len(), 2);
    assert_eq!(groups[1].tx_hash, "t2");
    assert_eq!(groups[1].utxos.len(), 1);
    Ok(())
}

#[test]
fn block_decodes_header_fields() -> Result<()> {
    init_logging();
    let mut host = indexed_chain();
    let block = queries::block_by_height(&mut host, 189)?;
    assert_eq!(block.hash, "h1");
    assert_eq!(block.height, 189);
    assert_eq!(block.previous_block, "h0");
    assert_eq!(block.nonce, 2083236893);
    Ok(())
}

#[test]
fn unindexed_block_yields_no_outpoints() -> Result<()> {
    init_logging();
    let mut host = indexed_chain();
    // Height 500 was never indexed: the empty block decodes with an empty
    // hash, which in turn has no transactions.
    let utxos = queries::tx_utxos_by_block_height(&mut host, 500)?;
    assert!(utxos.is_empty());
    Ok(())
}

#[test]
fn transaction_by_hash_sentinel_and_decode() -> Result<()> {
    init_logging();
    let mut host = indexed_chain();
    host.add_transaction(
        "t1",
        json!({
            "hash": "t1",
            "lock_time": 0,
            "version": 1,
            "safe": 1,
            "block_id": 190,
            "block_hash": "h1",
            "block_height": 189,
            "block_index": 0
        }),
    );

    assert!(queries::transaction_by_hash(&mut host, "missing")?.is_none());

    let tx = queries::transaction_by_hash(&mut host, "t1")?.expect("indexed");
    assert_eq!(tx.hash, "t1");
    assert_eq!(tx.block_hash, "h1");
    assert_eq!(tx.block_height, 189);
    assert_eq!(tx.block_index, 0);
    assert!(tx.safe);
    Ok(())
}

#[test]
fn versioned_transaction_arrays_decode() -> Result<()> {
    init_logging();
    let mut host = indexed_chain();
    host.add_transaction_v1s(
        189,
        json!([{
            "hash": "t1",
            "lock_time": 0,
            "version": 2,
            "vins": [{"tx_hash": "p0", "index": 0, "value": 700, "witness": "3044,02ab"}],
            "vouts": [{"tx_hash": "t1", "index": 0, "address": "bc1qxyz",
                       "pk_script": "0014ab", "value": 600}]
        }]),
    );
    host.add_transaction_v2s(
        189,
        json!([{
            "hash": "t1",
            "lock_time": 0,
            "version": 2,
            "vins": [{"tx_hash": "p0", "index": 0, "value": 700,
                      "block_hash": "h0", "block_height": 188,
                      "funding_tx_hash": "p0", "funding_tx_index": 0,
                      "type": "witness_v0_keyhash",
                      "witness_asm_scripts": ["3044", "02ab"]}],
            "vouts": [{"tx_hash": "t1", "index": 0, "value": 600,
                       "address": "bc1qxyz", "pk_script": "0014ab",
                       "pk_asm_scripts": "OP_0;ab"}]
        }]),
    );

    let v1s = queries::transaction_v1s_by_block_height(&mut host, 189)?;
    assert_eq!(v1s.len(), 1);
    assert_eq!(v1s[0].vins[0].witness, vec!["3044", "02ab"]);
    assert_eq!(v1s[0].vouts[0].address, "bc1qxyz");

    let v2s = queries::transaction_v2s_by_block_height(&mut host, 189)?;
    assert_eq!(v2s[0].vins[0].block_height, 188);
    assert_eq!(v2s[0].vouts[0].pk_asm_scripts, vec!["OP_0", "ab"]);

    // The downgraded view matches the host's own V1 serving.
    assert_eq!(v2s[0].to_v1().vouts, v1s[0].vouts);
    Ok(())
}

#[test]
fn scalar_queries() -> Result<()> {
    init_logging();
    let mut host = indexed_chain();
    assert_eq!(queries::last_height(&mut host)?, 189);
    assert_eq!(queries::network(&mut host)?, Network::Signet);
    assert_eq!(queries::contract_address(&mut host)?, "bc1qcontract");
    Ok(())
}
