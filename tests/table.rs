//! End-to-end CRUD behavior against the in-memory host.

use anyhow::Result;
use smartindex_core::{
    field, ColumnDef, ColumnType, ColumnValue, Error, FieldKind, Table, TableOptions,
};
use smartindex_mem::MemHost;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn ordinals() -> Table {
    Table::new(
        "ordinals",
        vec![
            ColumnDef::new("id", ColumnType::Int64),
            ColumnDef::new("address", ColumnType::Text),
            ColumnDef::new("value", ColumnType::Int64),
        ],
    )
}

fn seeded() -> Result<(MemHost, Table)> {
    let mut host = MemHost::new();
    let table = ordinals();
    table.init(&mut host, &TableOptions::new("id").index("address"))?;
    table.insert(
        &mut host,
        &[
            ColumnValue::new("id", "0"),
            ColumnValue::new("address", "bc1q0d4836j3ekmm9cz7v3kcf0sdsxtmzg4ttpu7dm"),
            ColumnValue::new("value", "1000"),
        ],
    )?;
    Ok((host, table))
}

#[test]
fn select_decodes_the_seeded_row() -> Result<()> {
    init_logging();
    let (mut host, table) = seeded()?;
    let row = table.select(&mut host, &[ColumnValue::new("id", "0")])?;
    assert_eq!(
        field(&row, "address", FieldKind::Text),
        "bc1q0d4836j3ekmm9cz7v3kcf0sdsxtmzg4ttpu7dm"
    );
    assert_eq!(field(&row, "value", FieldKind::Text), "1000");
    Ok(())
}

#[test]
fn insert_then_select_by_primary_key() -> Result<()> {
    init_logging();
    let (mut host, table) = seeded()?;
    table.insert(
        &mut host,
        &[
            ColumnValue::new("id", "1"),
            ColumnValue::new("address", "bc1qjr4gcelycyck4yxcnx5xt3w26u28veyu7meley"),
            ColumnValue::new("value", "250"),
        ],
    )?;
    let row = table.select(&mut host, &[ColumnValue::new("id", "1")])?;
    assert_eq!(
        field(&row, "address", FieldKind::Text),
        "bc1qjr4gcelycyck4yxcnx5xt3w26u28veyu7meley"
    );
    Ok(())
}

#[test]
fn update_is_visible_to_the_next_select() -> Result<()> {
    init_logging();
    let (mut host, table) = seeded()?;
    table.update(
        &mut host,
        &[ColumnValue::new("id", "0")],
        &[ColumnValue::new("address", "bc1qjr4gcelycyck4yxcnx5xt3w26u28veyu7meley")],
    )?;
    let row = table.select(&mut host, &[ColumnValue::new("id", "0")])?;
    assert_eq!(
        field(&row, "address", FieldKind::Text),
        "bc1qjr4gcelycyck4yxcnx5xt3w26u28veyu7meley"
    );
    // Untouched columns survive the merge.
    assert_eq!(field(&row, "value", FieldKind::Text), "1000");
    Ok(())
}

#[test]
fn delete_leaves_an_empty_row_behind() -> Result<()> {
    init_logging();
    let (mut host, table) = seeded()?;
    table.delete(&mut host, &[ColumnValue::new("id", "0")])?;
    let row = table.select(&mut host, &[ColumnValue::new("id", "0")])?;
    assert!(row.is_empty());
    assert_eq!(field(&row, "address", FieldKind::Text), "");
    Ok(())
}

#[test]
fn rejected_mutations_become_errors() -> Result<()> {
    init_logging();
    let (mut host, table) = seeded()?;

    // Second create of the same table is host-rejected.
    let err = table
        .init(&mut host, &TableOptions::new("id"))
        .unwrap_err();
    assert!(matches!(err, Error::Rejected { operation: "create", .. }));

    // Duplicate primary key is host-rejected.
    let err = table
        .insert(&mut host, &[ColumnValue::new("id", "0")])
        .unwrap_err();
    assert!(matches!(err, Error::Rejected { operation: "insert", .. }));
    Ok(())
}

#[test]
fn undeclared_table_is_a_host_error() {
    init_logging();
    let mut host = MemHost::new();
    let table = ordinals();
    assert!(table
        .insert(&mut host, &[ColumnValue::new("id", "0")])
        .is_err());
}
