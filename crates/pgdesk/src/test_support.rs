//! In-memory client for exercising execution paths without a database.

use crate::client::GenericClient;
use crate::error::{DeskError, DeskResult};
use std::sync::Mutex;
use std::time::Duration;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// Records every statement it receives and answers with no rows.
#[derive(Default)]
pub(crate) struct RecordingClient {
    calls: Mutex<Vec<(String, usize)>>,
    delay: Option<Duration>,
    failure: Option<String>,
    affected: u64,
}

impl RecordingClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn affecting(mut self, rows: u64) -> Self {
        self.affected = rows;
        self
    }

    pub(crate) fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub(crate) fn slow(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// `(sql, bound parameter count)` for each call, in order.
    pub(crate) fn calls(&self) -> Vec<(String, usize)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn last_sql(&self) -> Option<String> {
        self.calls().pop().map(|(sql, _)| sql)
    }

    async fn record(&self, sql: &str, params: usize) -> DeskResult<()> {
        self.calls.lock().unwrap().push((sql.to_string(), params));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.failure {
            Some(msg) => Err(DeskError::Other(msg.clone())),
            None => Ok(()),
        }
    }
}

impl GenericClient for RecordingClient {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> DeskResult<Vec<Row>> {
        self.record(sql, params.len()).await?;
        Ok(Vec::new())
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> DeskResult<u64> {
        self.record(sql, params.len()).await?;
        Ok(self.affected)
    }
}
