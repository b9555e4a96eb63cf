//! # pgdesk
//!
//! The SQL core of a PostgreSQL desktop client.
//!
//! ## Features
//!
//! - **Fluent SELECT builder**: clauses accumulate in any call order and render
//!   in a fixed order (`stmt` module)
//! - **Expression helpers**: string functions, CASE, COALESCE, ROLLUP/CUBE,
//!   grouping sets, CTE wrapping
//! - **Bound parameters**: `where_bind` keeps user values out of SQL text, with
//!   `$n` numbering that survives nested subqueries
//! - **Result grids**: every result set maps to a header plus rows of display
//!   text, ready for a table view
//! - **DDL helpers**: tables, ALTER TABLE, ENUM/composite types and views, with
//!   identifier validation before anything is rendered
//! - **Transaction-friendly**: pass a transaction anywhere a `GenericClient` is
//!   expected
//!
//! ## Statement builder
//!
//! ```ignore
//! use pgdesk::stmt::{self, AggregateFunc};
//!
//! let grid = stmt::select("products")
//!     .select(&["category"])
//!     .aggregate("price", AggregateFunc::Avg)
//!     .where_bind("price", ">", 100i32)
//!     .group_by(&["category"])
//!     .order_by(&["category"])
//!     .limit(50)
//!     .execute(&client)
//!     .await?;
//!
//! for row in grid.to_matrix() {
//!     println!("{}", row.join(" | "));
//! }
//! ```
//!
//! ## DDL
//!
//! ```ignore
//! use pgdesk::ddl::{self, ColumnDef};
//!
//! ddl::create_table(&client, "products", &[
//!     ColumnDef::new("id", "SERIAL").constraints("PRIMARY KEY"),
//!     ColumnDef::new("name", "TEXT").constraints("NOT NULL"),
//! ], &[]).await?;
//! ```

pub mod cell;
pub mod client;
pub mod config;
pub mod ddl;
pub mod dml;
pub mod error;
pub mod grid;
pub mod ident;
pub mod prelude;
pub mod stmt;

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(test)]
mod test_support;

pub use cell::{CellText, NULL_TEXT};
pub use client::GenericClient;
pub use config::ExecConfig;
pub use error::{DeskError, DeskResult, ErrorKind};
pub use grid::ResultGrid;
pub use ident::{is_identifier, validate_identifier};

pub use stmt::{
    AggregateFunc, Case, JoinKind, JoinSpec, Param, SimpleCase, StatementBuilder, WithStatement,
    select,
};

#[cfg(feature = "pool")]
pub use pool::{DEFAULT_POOL_SIZE, create_pool, create_pool_with_config};

// Re-export so callers can name driver types without a separate dependency.
pub use tokio_postgres;

#[cfg(feature = "pool")]
pub use deadpool_postgres;
