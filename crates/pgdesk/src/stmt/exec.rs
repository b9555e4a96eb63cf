//! Executing built statements.
//!
//! The builder renders; the [`GenericClient`] runs. A deadline, if any, comes
//! from the [`ExecConfig`] passed by the caller.

use super::builder::StatementBuilder;
use super::cte::WithStatement;
use super::param::ParamList;
use crate::client::GenericClient;
use crate::config::ExecConfig;
use crate::error::{DeskError, DeskResult};
use crate::grid::ResultGrid;
use std::future::Future;
use std::time::Instant;

/// Apply the configured deadline to a database call.
pub(crate) async fn with_timeout<T, F>(config: &ExecConfig, fut: F) -> DeskResult<T>
where
    F: Future<Output = DeskResult<T>>,
{
    match config.query_timeout {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| DeskError::Timeout(limit))?,
        None => fut.await,
    }
}

async fn fetch_grid(
    conn: &impl GenericClient,
    sql: &str,
    params: &ParamList,
) -> DeskResult<ResultGrid> {
    let refs = params.as_refs();
    if conn.supports_prepared_statements() {
        // Column descriptions give a header even for zero rows.
        let stmt = conn.prepare_statement(sql).await?;
        let header = stmt.columns().iter().map(|c| c.name().to_string()).collect();
        let rows = conn.query_prepared(&stmt, &refs).await?;
        ResultGrid::from_rows(header, &rows)
    } else {
        let rows = conn.query(sql, &refs).await?;
        ResultGrid::from_rows_only(&rows)
    }
}

/// Run `sql` and map the result to a [`ResultGrid`].
///
/// Failures are logged and returned with `what` as context.
pub(crate) async fn run_query(
    conn: &impl GenericClient,
    sql: &str,
    params: &ParamList,
    config: &ExecConfig,
    what: &str,
) -> DeskResult<ResultGrid> {
    if config.log_sql {
        tracing::debug!(
            target: "pgdesk.sql",
            sql = %config.loggable_sql(sql),
            params = params.len(),
            "executing statement"
        );
    }

    let start = Instant::now();
    match with_timeout(config, fetch_grid(conn, sql, params)).await {
        Ok(grid) => {
            tracing::debug!(
                target: "pgdesk.sql",
                rows = grid.row_count(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "statement finished"
            );
            Ok(grid)
        }
        Err(e) => {
            tracing::warn!(
                target: "pgdesk.sql",
                error = %e,
                sql = %config.loggable_sql(sql),
                "statement failed"
            );
            Err(e.context(what.to_string()))
        }
    }
}

impl StatementBuilder {
    /// Build, execute and return the grid (header + rows as text).
    pub async fn execute(&self, conn: &impl GenericClient) -> DeskResult<ResultGrid> {
        self.execute_with(conn, &ExecConfig::default()).await
    }

    /// Like [`execute`](Self::execute) with an explicit timeout/logging config.
    pub async fn execute_with(
        &self,
        conn: &impl GenericClient,
        config: &ExecConfig,
    ) -> DeskResult<ResultGrid> {
        self.validate()?;
        let (sql, params) = self.build_with_params();
        run_query(conn, &sql, &params, config, &format!("query {}", self.relation())).await
    }
}

impl WithStatement {
    pub async fn execute(&self, conn: &impl GenericClient) -> DeskResult<ResultGrid> {
        self.execute_with(conn, &ExecConfig::default()).await
    }

    pub async fn execute_with(
        &self,
        conn: &impl GenericClient,
        config: &ExecConfig,
    ) -> DeskResult<ResultGrid> {
        self.validate()?;
        let (sql, params) = self.build_with_params();
        let what = format!("query {} with {}", self.main().relation(), self.cte_names().join(", "));
        run_query(conn, &sql, &params, config, &what).await
    }
}
