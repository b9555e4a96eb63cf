//! The state one interactive session carries between commands.

use pgdesk::{DeskResult, ExecConfig, GenericClient, ResultGrid, StatementBuilder};

/// Owns the most recent result grid and the SQL executed so far.
#[derive(Debug, Default)]
pub struct Session {
    config: ExecConfig,
    grid: Option<ResultGrid>,
    history: Vec<String>,
}

impl Session {
    pub fn new(config: ExecConfig) -> Self {
        Self {
            config,
            grid: None,
            history: Vec::new(),
        }
    }

    /// Execute `qb`, replacing the current grid on success.
    ///
    /// The SQL is recorded even when execution fails.
    pub async fn run_query(
        &mut self,
        conn: &impl GenericClient,
        qb: &StatementBuilder,
    ) -> DeskResult<&ResultGrid> {
        self.history.push(qb.build());
        let grid = qb.execute_with(conn, &self.config).await?;
        Ok(self.grid.insert(grid))
    }

    /// Record a statement executed outside `run_query` (DDL).
    pub fn record(&mut self, sql: impl Into<String>) {
        self.history.push(sql.into());
    }

    pub fn grid(&self) -> Option<&ResultGrid> {
        self.grid.as_ref()
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Drop the current grid; history is kept.
    pub fn clear_grid(&mut self) {
        self.grid = None;
    }
}
