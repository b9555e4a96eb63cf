//! Database collaborator seam.
//!
//! The statement builder never talks to the network itself: it renders SQL
//! and hands it to a [`GenericClient`]. Direct connections, transactions and
//! pooled clients all implement it.

use crate::error::{DeskError, DeskResult};
use tokio_postgres::Row;
use tokio_postgres::Statement;
use tokio_postgres::types::ToSql;

/// A trait that unifies database clients and transactions.
pub trait GenericClient: Send + Sync {
    /// Execute a query and return all rows.
    fn query(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = DeskResult<Vec<Row>>> + Send;

    /// Execute a query and return the **first** row.
    ///
    /// Returns [`DeskError::NotFound`] if no rows are returned.
    fn query_one(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = DeskResult<Row>> + Send {
        async move {
            let rows = self.query(sql, params).await?;
            rows.into_iter()
                .next()
                .ok_or_else(|| DeskError::not_found("Expected one row, got none"))
        }
    }

    /// Execute a query and return the first row, if any.
    fn query_opt(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = DeskResult<Option<Row>>> + Send {
        async move {
            let rows = self.query(sql, params).await?;
            Ok(rows.into_iter().next())
        }
    }

    /// Execute a statement and return the number of affected rows.
    fn execute(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = DeskResult<u64>> + Send;

    /// Whether this client supports prepared statement APIs.
    ///
    /// Prepared statements expose column descriptions, which is how result
    /// headers are known even when a query returns zero rows.
    fn supports_prepared_statements(&self) -> bool {
        false
    }

    /// Prepare a statement on this connection.
    fn prepare_statement(
        &self,
        sql: &str,
    ) -> impl std::future::Future<Output = DeskResult<Statement>> + Send {
        let _ = sql;
        async {
            Err(DeskError::Other(
                "prepared statements are not supported by this client".to_string(),
            ))
        }
    }

    /// Execute a prepared statement and return all rows.
    fn query_prepared(
        &self,
        stmt: &Statement,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = DeskResult<Vec<Row>>> + Send {
        let _ = stmt;
        let _ = params;
        async {
            Err(DeskError::Other(
                "prepared statements are not supported by this client".to_string(),
            ))
        }
    }
}

impl GenericClient for tokio_postgres::Client {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> DeskResult<Vec<Row>> {
        tokio_postgres::Client::query(self, sql, params)
            .await
            .map_err(DeskError::from_db_error)
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> DeskResult<u64> {
        tokio_postgres::Client::execute(self, sql, params)
            .await
            .map_err(DeskError::from_db_error)
    }

    fn supports_prepared_statements(&self) -> bool {
        true
    }

    async fn prepare_statement(&self, sql: &str) -> DeskResult<Statement> {
        tokio_postgres::Client::prepare(self, sql)
            .await
            .map_err(DeskError::from_db_error)
    }

    async fn query_prepared(
        &self,
        stmt: &Statement,
        params: &[&(dyn ToSql + Sync)],
    ) -> DeskResult<Vec<Row>> {
        tokio_postgres::Client::query(self, stmt, params)
            .await
            .map_err(DeskError::from_db_error)
    }
}

impl GenericClient for tokio_postgres::Transaction<'_> {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> DeskResult<Vec<Row>> {
        tokio_postgres::Transaction::query(self, sql, params)
            .await
            .map_err(DeskError::from_db_error)
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> DeskResult<u64> {
        tokio_postgres::Transaction::execute(self, sql, params)
            .await
            .map_err(DeskError::from_db_error)
    }

    fn supports_prepared_statements(&self) -> bool {
        true
    }

    async fn prepare_statement(&self, sql: &str) -> DeskResult<Statement> {
        tokio_postgres::Transaction::prepare(self, sql)
            .await
            .map_err(DeskError::from_db_error)
    }

    async fn query_prepared(
        &self,
        stmt: &Statement,
        params: &[&(dyn ToSql + Sync)],
    ) -> DeskResult<Vec<Row>> {
        tokio_postgres::Transaction::query(self, stmt, params)
            .await
            .map_err(DeskError::from_db_error)
    }
}

// ===== deadpool-postgres support =====

#[cfg(feature = "pool")]
impl GenericClient for deadpool_postgres::Client {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> DeskResult<Vec<Row>> {
        // Delegate to the deref target (ClientWrapper -> tokio_postgres::Client).
        let client: &tokio_postgres::Client = self;
        GenericClient::query(client, sql, params).await
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> DeskResult<u64> {
        let client: &tokio_postgres::Client = self;
        GenericClient::execute(client, sql, params).await
    }

    fn supports_prepared_statements(&self) -> bool {
        true
    }

    async fn prepare_statement(&self, sql: &str) -> DeskResult<Statement> {
        // The wrapper's statement cache is reused across checkouts.
        self.prepare_cached(sql)
            .await
            .map_err(DeskError::from_db_error)
    }

    async fn query_prepared(
        &self,
        stmt: &Statement,
        params: &[&(dyn ToSql + Sync)],
    ) -> DeskResult<Vec<Row>> {
        let client: &tokio_postgres::Client = self;
        GenericClient::query_prepared(client, stmt, params).await
    }
}
