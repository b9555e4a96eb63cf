//! SELECT statement builder.
//!
//! A [`StatementBuilder`] is bound to one base relation and accumulates
//! clause fragments through chained calls. `build()` assembles them in a
//! fixed clause order; nothing is parsed or validated beyond dropping
//! whitespace-only conditions.
//!
//! # Usage
//!
//! ```ignore
//! use pgdesk::stmt::{self, AggregateFunc};
//!
//! let sql = stmt::select("products")
//!     .select(&["category"])
//!     .aggregate("price", AggregateFunc::Sum)
//!     .where_gt("price", "100")
//!     .group_by(&["category"])
//!     .having("SUM(price) > 1000")
//!     .build();
//! // SELECT category, SUM(price) FROM products WHERE price > 100
//! //   GROUP BY category HAVING SUM(price) > 1000
//!
//! // Values from users should be bound, not interpolated:
//! let grid = stmt::select("products")
//!     .where_bind("name", "=", input)
//!     .execute(&client)
//!     .await?;
//! ```
//!
//! Subqueries are passed by value and rendered inline:
//!
//! ```ignore
//! let sub = stmt::select("orders o").select(&["1"]).where_raw("o.customer_id = c.id");
//! let q = stmt::select("customers c").where_exists(sub);
//! ```

mod aggregate;
mod builder;
mod case;
mod cte;
mod exec;
pub mod expr;
mod fragment;
pub mod grouping;
mod join;
mod param;
mod predicate;

pub use aggregate::AggregateFunc;
pub use builder::StatementBuilder;
pub use case::{Case, SimpleCase};
pub use cte::WithStatement;
pub use fragment::Fragment;
pub use join::{JoinKind, JoinSpec};
pub use param::{Param, ParamList};

/// Create a statement builder reading from `relation`.
///
/// # Example
/// ```ignore
/// let qb = pgdesk::stmt::select("products").where_eq("category", "books");
/// ```
pub fn select(relation: &str) -> StatementBuilder {
    StatementBuilder::new(relation)
}
