//! DDL statement helpers.
//!
//! Each helper comes in two halves: a pure `*_sql` renderer that validates
//! every identifier before interpolating it, and an async runner that
//! executes the rendered statement through a [`GenericClient`].
//!
//! Identifiers must match `[A-Za-z_][A-Za-z0-9_]*`. Types, constraint
//! clauses, CHECK expressions and view bodies are free-form SQL and are not
//! inspected.
//!
//! # Example
//! ```ignore
//! use pgdesk::ddl::{self, AlterTable};
//!
//! ddl::alter_table(&client, &AlterTable::AddColumn {
//!     table: "products".into(),
//!     column: "sku".into(),
//!     data_type: "TEXT".into(),
//!     constraints: "UNIQUE".into(),
//! }).await?;
//! ```

mod custom_type;
mod table;
mod view;

pub use custom_type::{
    add_enum_value, add_enum_value_sql, create_composite_type, create_composite_type_sql,
    create_enum_type, create_enum_type_sql, drop_type, drop_type_sql,
};
pub use table::{AlterTable, ColumnDef, alter_table, create_table, create_table_sql};
pub use view::{
    create_materialized_view, create_materialized_view_sql, create_or_replace_view,
    create_or_replace_view_sql, create_view, create_view_sql, drop_materialized_view,
    drop_materialized_view_sql, drop_view, drop_view_sql, refresh_materialized_view,
    refresh_materialized_view_sql,
};

use crate::client::GenericClient;
use crate::error::{DeskError, DeskResult};

/// Reject empty free-form inputs (types, expressions, queries).
pub(crate) fn require(value: &str, what: &str) -> DeskResult<()> {
    if value.trim().is_empty() {
        return Err(DeskError::validation(format!("{what} cannot be empty")));
    }
    Ok(())
}

/// Execute one DDL statement; `what` names the operation in logs and errors.
pub(crate) async fn run_ddl(conn: &impl GenericClient, sql: &str, what: &str) -> DeskResult<()> {
    tracing::debug!(target: "pgdesk.sql", sql = %sql, "executing DDL");
    match conn.execute(sql, &[]).await {
        Ok(_) => {
            tracing::info!(target: "pgdesk.ddl", "{what}");
            Ok(())
        }
        Err(e) => {
            tracing::warn!(target: "pgdesk.ddl", error = %e, "{what} failed");
            Err(e.context(what.to_string()))
        }
    }
}
