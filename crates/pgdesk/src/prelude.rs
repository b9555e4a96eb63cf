//! Convenient imports for typical `pgdesk` usage.
//!
//! ```ignore
//! use pgdesk::prelude::*;
//! ```

pub use crate::{
    AggregateFunc, Case, DeskError, DeskResult, ExecConfig, GenericClient, Param, ResultGrid,
    SimpleCase, StatementBuilder, WithStatement, select,
};

pub use crate::ddl::{AlterTable, ColumnDef};

#[cfg(feature = "pool")]
pub use crate::{create_pool, create_pool_with_config};
