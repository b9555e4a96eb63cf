//! CTE (WITH clause) support.
//!
//! [`WithStatement`] wraps one main [`StatementBuilder`] with zero or more
//! named common table expressions.
//!
//! # Example
//! ```ignore
//! use pgdesk::stmt::{select, WithStatement};
//!
//! let sql = WithStatement::new(select("recent").select(&["customer_id"]))
//!     .cte("recent", "SELECT * FROM orders WHERE created_at > now() - interval '7 days'")
//!     .build();
//! // WITH recent AS (SELECT * FROM orders WHERE ...) SELECT customer_id FROM recent
//! ```

use super::builder::StatementBuilder;
use super::fragment::Fragment;
use super::param::ParamList;
use crate::error::{DeskError, DeskResult};
use std::fmt;

#[derive(Debug, Clone)]
struct CteDefinition {
    name: String,
    columns: Vec<String>,
    query: Fragment,
    /// Set when the body came from a builder that fails validation.
    body_error: Option<String>,
}

/// A main query prefixed by `WITH name [(cols)] AS (query), ...`.
#[derive(Debug, Clone)]
#[must_use]
pub struct WithStatement {
    ctes: Vec<CteDefinition>,
    recursive: bool,
    main: StatementBuilder,
}

impl WithStatement {
    pub fn new(main: StatementBuilder) -> Self {
        Self {
            ctes: Vec::new(),
            recursive: false,
            main,
        }
    }

    /// Add a CTE whose body is raw SQL text.
    pub fn cte(self, name: &str, query: &str) -> Self {
        self.push(name, &[], Fragment::raw(query), None)
    }

    /// Add a CTE with an explicit column list: `name (a, b) AS (query)`.
    pub fn cte_with_columns(self, name: &str, columns: &[&str], query: &str) -> Self {
        self.push(name, columns, Fragment::raw(query), None)
    }

    /// Add a CTE whose body is another builder. Its bound values are kept.
    pub fn cte_builder(self, name: &str, query: StatementBuilder) -> Self {
        let body_error = query.first_error().map(str::to_string);
        self.push(name, &[], query.to_fragment(), body_error)
    }

    fn push(
        mut self,
        name: &str,
        columns: &[&str],
        query: Fragment,
        body_error: Option<String>,
    ) -> Self {
        self.ctes.push(CteDefinition {
            name: name.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            query,
            body_error,
        });
        self
    }

    /// Render `WITH RECURSIVE`.
    pub fn recursive(mut self) -> Self {
        self.recursive = true;
        self
    }

    pub fn main(&self) -> &StatementBuilder {
        &self.main
    }

    pub fn cte_names(&self) -> Vec<&str> {
        self.ctes.iter().map(|c| c.name.as_str()).collect()
    }

    /// The main query must be valid and every CTE needs a name and a body.
    pub fn validate(&self) -> DeskResult<()> {
        self.main.validate()?;
        for cte in &self.ctes {
            if cte.name.trim().is_empty() {
                return Err(DeskError::validation("CTE name cannot be empty"));
            }
            if let Some(err) = &cte.body_error {
                return Err(DeskError::validation(format!("CTE {}: {err}", cte.name)));
            }
            if cte.query.is_blank() {
                return Err(DeskError::validation(format!(
                    "CTE {} has an empty query",
                    cte.name
                )));
            }
        }
        Ok(())
    }

    pub fn to_fragment(&self) -> Fragment {
        if self.ctes.is_empty() {
            return self.main.to_fragment();
        }

        let mut out = Fragment::raw(if self.recursive { "WITH RECURSIVE " } else { "WITH " });
        for (i, cte) in self.ctes.iter().enumerate() {
            if i > 0 {
                out.push_sql(", ");
            }
            out.push_sql(cte.name.as_str());
            if !cte.columns.is_empty() {
                out.push_sql(format!(" ({})", cte.columns.join(", ")));
            }
            out.push_sql(" AS (");
            out.push_fragment(cte.query.clone());
            out.push_sql(")");
        }
        out.push_sql(" ");
        out.push_fragment(self.main.to_fragment());
        out
    }

    pub fn build(&self) -> String {
        self.to_fragment().to_sql()
    }

    pub fn build_with_params(&self) -> (String, ParamList) {
        let mut params = ParamList::new();
        let sql = self.to_fragment().render(&mut params);
        (sql, params)
    }
}

impl fmt::Display for WithStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stmt::select;

    #[test]
    fn no_ctes_is_the_main_query() {
        let main = select("products").where_gt("price", "10");
        let expected = main.build();
        assert_eq!(WithStatement::new(main).recursive().build(), expected);
    }

    #[test]
    fn several_ctes_in_order() {
        let sql = WithStatement::new(select("a").inner_join("b", "a.id = b.id"))
            .cte("a", "SELECT 1 AS id")
            .cte_with_columns("b", &["id", "label"], "SELECT 1, 'x'")
            .build();
        assert_eq!(
            sql,
            "WITH a AS (SELECT 1 AS id), b (id, label) AS (SELECT 1, 'x') \
             SELECT * FROM a INNER JOIN b ON a.id = b.id"
        );
    }

    #[test]
    fn recursive_keyword() {
        let sql = WithStatement::new(select("tree"))
            .cte(
                "tree",
                "SELECT id, parent_id FROM nodes WHERE parent_id IS NULL \
                 UNION ALL SELECT n.id, n.parent_id FROM nodes n JOIN tree t ON n.parent_id = t.id",
            )
            .recursive()
            .build();
        assert!(sql.starts_with("WITH RECURSIVE tree AS (SELECT id"));
        assert!(sql.ends_with(") SELECT * FROM tree"));
    }

    #[test]
    fn builder_bodies_keep_bound_values() {
        let stmt = WithStatement::new(select("big").where_bind("total", "<", 10_000i64))
            .cte_builder("big", select("orders").where_bind("total", ">", 500i64));
        let (sql, params) = stmt.build_with_params();
        assert_eq!(
            sql,
            "WITH big AS (SELECT * FROM orders WHERE total > $1) SELECT * FROM big WHERE total < $2"
        );
        assert_eq!(params.len(), 2);
        assert_eq!(stmt.cte_names(), ["big"]);
    }

    #[test]
    fn validation() {
        let bad = WithStatement::new(select("x")).cte("", "SELECT 1");
        assert!(matches!(bad.validate(), Err(DeskError::Validation(_))));
        let bad = WithStatement::new(select("x")).cte("x", "  ");
        assert!(bad.validate().is_err());
        assert!(WithStatement::new(select("x")).cte("x", "SELECT 1").validate().is_ok());
    }
}
