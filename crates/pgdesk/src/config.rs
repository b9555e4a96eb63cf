use std::time::Duration;

/// Options attached to a single `execute_with` call.
///
/// Statement builders own no deadline: whoever executes the statement decides
/// how long to wait and how much of the SQL to log.
#[derive(Debug, Clone)]
pub struct ExecConfig {
    /// Query timeout duration. `None` means no timeout (default).
    pub query_timeout: Option<Duration>,
    /// Whether executed SQL is emitted as a `tracing` debug event.
    pub log_sql: bool,
    /// Truncate logged SQL (in bytes). `None` means no truncation.
    pub max_logged_sql_len: Option<usize>,
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            query_timeout: None,
            log_sql: true,
            max_logged_sql_len: Some(500),
        }
    }
}

impl ExecConfig {
    /// Create a new configuration with defaults (no timeout, SQL logged).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the query timeout duration.
    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = Some(timeout);
        self
    }

    /// Enable or disable SQL logging.
    pub fn log_sql(mut self, enabled: bool) -> Self {
        self.log_sql = enabled;
        self
    }

    /// Set maximum SQL length to log.
    pub fn max_logged_sql_len(mut self, len: usize) -> Self {
        self.max_logged_sql_len = Some(len);
        self
    }

    /// Disable SQL truncation in logs.
    pub fn no_truncate(mut self) -> Self {
        self.max_logged_sql_len = None;
        self
    }

    pub(crate) fn loggable_sql<'a>(&self, sql: &'a str) -> std::borrow::Cow<'a, str> {
        match self.max_logged_sql_len {
            Some(max) if sql.len() > max => {
                format!("{}...", truncate_sql_bytes(sql, max)).into()
            }
            _ => sql.into(),
        }
    }
}

/// Truncate to at most `max_bytes`, backing off to a char boundary.
pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}
