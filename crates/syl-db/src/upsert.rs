//! Natural-key upsert engine.
//!
//! One primitive for every table: insert-or-overwrite by natural key, then
//! read the row's identifier back with a second query on the same key. The
//! read-back never relies on `last_insert_rowid()`, which is meaningless when
//! the conflict branch updated an existing row.

use libsql::{Connection, Value, params_from_iter};
use tracing::debug;

use crate::error::DatabaseError;
use crate::schema::TableDef;

/// Upsert one row of `table` and return its `id_column` value.
///
/// `key` binds the natural-key columns and `attributes` the non-key columns,
/// both in `TableDef` order. Every attribute is overwritten on conflict.
/// Takes a `Connection` so callers can pass a `Transaction` (which derefs to
/// one) and keep both statements inside their batch.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` if the value counts do not match the
/// table definition, `DatabaseError::NoResult` if the row cannot be read back,
/// and `DatabaseError::LibSql` for statement failures.
pub async fn upsert(
    conn: &Connection,
    table: &TableDef,
    key: Vec<Value>,
    attributes: Vec<Value>,
) -> Result<Value, DatabaseError> {
    if table.natural_key.is_empty() {
        return Err(DatabaseError::InvalidState(format!(
            "{} has no natural key",
            table.name
        )));
    }
    if key.len() != table.natural_key.len() || attributes.len() != table.attributes.len() {
        return Err(DatabaseError::InvalidState(format!(
            "{} expects {} key and {} attribute values, got {} and {}",
            table.name,
            table.natural_key.len(),
            table.attributes.len(),
            key.len(),
            attributes.len()
        )));
    }

    let lookup = key.clone();
    conn.execute(
        &table.upsert_sql(),
        params_from_iter(key.into_iter().chain(attributes)),
    )
    .await?;

    let mut rows = conn
        .query(&table.select_id_sql(), params_from_iter(lookup))
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    let id = row.get_value(0)?;
    debug!(table = table.name, id = ?id, "upsert");
    Ok(id)
}

/// [`upsert`] for tables with an integer surrogate key.
///
/// # Errors
///
/// See [`upsert`]; also `DatabaseError::InvalidState` if the id is not an integer.
pub async fn upsert_id(
    conn: &Connection,
    table: &TableDef,
    key: Vec<Value>,
    attributes: Vec<Value>,
) -> Result<i64, DatabaseError> {
    match upsert(conn, table, key, attributes).await? {
        Value::Integer(id) => Ok(id),
        other => Err(DatabaseError::InvalidState(format!(
            "{}.{} is not an integer: {other:?}",
            table.name, table.id_column
        ))),
    }
}

/// [`upsert`] for tables keyed by a text primary key.
///
/// # Errors
///
/// See [`upsert`]; also `DatabaseError::InvalidState` if the key is not text.
pub async fn upsert_key(
    conn: &Connection,
    table: &TableDef,
    key: Vec<Value>,
    attributes: Vec<Value>,
) -> Result<String, DatabaseError> {
    match upsert(conn, table, key, attributes).await? {
        Value::Text(id) => Ok(id),
        other => Err(DatabaseError::InvalidState(format!(
            "{}.{} is not text: {other:?}",
            table.name, table.id_column
        ))),
    }
}
