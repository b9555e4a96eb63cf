//! Keyed row mutations.
//!
//! The grid view edits one row at a time, addressed by a key column. Values
//! are always bound as parameters; only identifiers are interpolated, and
//! only after validation.
//!
//! ```ignore
//! use pgdesk::dml;
//! use pgdesk::stmt::Param;
//!
//! dml::update_by_key(&client, "products", "id", 42i64, &[
//!     ("name", Param::new("Widget".to_string())),
//!     ("price", Param::new(9.5f64)),
//! ]).await?;
//! ```

use crate::client::GenericClient;
use crate::error::{DeskError, DeskResult};
use crate::ident::{validate_identifier, validate_identifiers};
use crate::stmt::{Param, ParamList};
use tokio_postgres::types::ToSql;

/// `UPDATE table SET a = $1, ... WHERE key_col = $n`
pub fn update_by_key_sql(
    table: &str,
    key_col: &str,
    assignments: &[(&str, Param)],
) -> DeskResult<String> {
    validate_identifiers([table, key_col])?;
    if assignments.is_empty() {
        return Err(DeskError::validation("update requires at least one assignment"));
    }
    let mut sets = Vec::with_capacity(assignments.len());
    for (i, (col, _)) in assignments.iter().enumerate() {
        validate_identifier(col)?;
        sets.push(format!("{col} = ${}", i + 1));
    }
    Ok(format!(
        "UPDATE {table} SET {} WHERE {key_col} = ${}",
        sets.join(", "),
        assignments.len() + 1
    ))
}

/// `DELETE FROM table WHERE key_col = $1`
pub fn delete_by_key_sql(table: &str, key_col: &str) -> DeskResult<String> {
    validate_identifiers([table, key_col])?;
    Ok(format!("DELETE FROM {table} WHERE {key_col} = $1"))
}

/// Update the row whose `key_col` equals `key`.
///
/// Returns `DeskError::NotFound` (with context) when no row matched.
pub async fn update_by_key<K>(
    conn: &impl GenericClient,
    table: &str,
    key_col: &str,
    key: K,
    assignments: &[(&str, Param)],
) -> DeskResult<u64>
where
    K: ToSql + Send + Sync + 'static,
{
    let sql = update_by_key_sql(table, key_col, assignments)?;
    let mut params = ParamList::new();
    for (_, value) in assignments {
        params.push_param(value.clone());
    }
    params.push_param(Param::new(key));
    let what = format!("update {table} by {key_col}");
    run_keyed(conn, &sql, &params, &what).await
}

/// Delete the row whose `key_col` equals `key`.
///
/// Returns `DeskError::NotFound` (with context) when no row matched.
pub async fn delete_by_key<K>(
    conn: &impl GenericClient,
    table: &str,
    key_col: &str,
    key: K,
) -> DeskResult<u64>
where
    K: ToSql + Send + Sync + 'static,
{
    let sql = delete_by_key_sql(table, key_col)?;
    let mut params = ParamList::new();
    params.push_param(Param::new(key));
    let what = format!("delete from {table} by {key_col}");
    run_keyed(conn, &sql, &params, &what).await
}

async fn run_keyed(
    conn: &impl GenericClient,
    sql: &str,
    params: &ParamList,
    what: &str,
) -> DeskResult<u64> {
    tracing::debug!(target: "pgdesk.sql", sql = %sql, params = params.len(), "executing statement");
    let affected = match conn.execute(sql, &params.as_refs()).await {
        Ok(n) => n,
        Err(e) => {
            tracing::warn!(target: "pgdesk.sql", error = %e, "{what} failed");
            return Err(e.context(what.to_string()));
        }
    };
    if affected == 0 {
        return Err(DeskError::not_found("no row matched the key").context(what.to_string()));
    }
    tracing::debug!(target: "pgdesk.sql", affected, "{what}");
    Ok(affected)
}
