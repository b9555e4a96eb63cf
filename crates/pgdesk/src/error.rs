//! Error types for pgdesk

use thiserror::Error;

/// Result type alias for pgdesk operations
pub type DeskResult<T> = Result<T, DeskError>;

/// Coarse classification of a [`DeskError`], stable enough for a UI layer to
/// pick an icon or message template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Connection,
    Query,
    NotFound,
    InvalidIdentifier,
    Validation,
    Constraint,
    Decode,
    Timeout,
    Other,
}

/// Error types for statement building and database operations
#[derive(Debug, Error)]
pub enum DeskError {
    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution error reported by the driver
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// No row matched (e.g. UPDATE/DELETE by key affected zero rows)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Identifier rejected before being interpolated into SQL
    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    /// Unique constraint violation
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// Foreign key constraint violation
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Check constraint violation
    #[error("Check constraint violation: {0}")]
    CheckViolation(String),

    /// Cell decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Validation error (empty required input, bad option value)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Pool error
    #[cfg(feature = "pool")]
    #[error("Pool error: {0}")]
    Pool(String),

    /// Query timeout error
    #[error("Query timeout after {0:?}")]
    Timeout(std::time::Duration),

    /// An error annotated with the operation that produced it
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<DeskError>,
    },

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl DeskError {
    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Wrap this error with a description of the failed operation.
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping any context layers.
    pub fn root(&self) -> &DeskError {
        match self {
            Self::Context { source, .. } => source.root(),
            other => other,
        }
    }

    /// Classify this error (context layers are transparent).
    pub fn kind(&self) -> ErrorKind {
        match self.root() {
            Self::Connection(_) => ErrorKind::Connection,
            Self::Query(_) => ErrorKind::Query,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::InvalidIdentifier(_) => ErrorKind::InvalidIdentifier,
            Self::UniqueViolation(_) | Self::ForeignKeyViolation(_) | Self::CheckViolation(_) => {
                ErrorKind::Constraint
            }
            Self::Decode { .. } => ErrorKind::Decode,
            Self::Validation(_) => ErrorKind::Validation,
            #[cfg(feature = "pool")]
            Self::Pool(_) => ErrorKind::Connection,
            Self::Timeout(_) => ErrorKind::Timeout,
            Self::Context { .. } | Self::Other(_) => ErrorKind::Other,
        }
    }

    /// Check if this is a unique violation error
    pub fn is_unique_violation(&self) -> bool {
        matches!(self.root(), Self::UniqueViolation(_))
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self.root(), Self::NotFound(_))
    }

    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self.root(), Self::Timeout(_))
    }

    /// Parse a tokio_postgres error into a more specific DeskError
    pub fn from_db_error(err: tokio_postgres::Error) -> Self {
        if let Some(db_err) = err.as_db_error() {
            let constraint = db_err.constraint().unwrap_or("unknown");
            let message = db_err.message();

            match db_err.code().code() {
                "23505" => return Self::UniqueViolation(format!("{}: {}", constraint, message)),
                "23503" => {
                    return Self::ForeignKeyViolation(format!("{}: {}", constraint, message));
                }
                "23514" => return Self::CheckViolation(format!("{}: {}", constraint, message)),
                _ => {}
            }
        }
        if err.is_closed() {
            return Self::Connection(err.to_string());
        }
        Self::Query(err)
    }
}

#[cfg(feature = "pool")]
impl From<deadpool_postgres::PoolError> for DeskError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}
