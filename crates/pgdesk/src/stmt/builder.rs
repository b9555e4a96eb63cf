//! The SELECT statement accumulator and its render pass.

use super::aggregate::AggregateFunc;
use super::fragment::Fragment;
use super::join::{JoinKind, JoinSpec};
use super::param::ParamList;
use crate::error::{DeskError, DeskResult};
use std::fmt;

/// Mutable, chainable SELECT builder bound to one base relation.
///
/// Every mutator consumes and returns the builder. Fragments are accepted
/// verbatim; only whitespace-only WHERE/HAVING conditions are dropped.
/// `build()` may be called any number of times and reflects the state at
/// that instant.
#[derive(Clone, Debug)]
#[must_use]
pub struct StatementBuilder {
    relation: String,
    distinct: bool,
    columns: Vec<String>,
    predicates: Vec<Fragment>,
    group_terms: Vec<String>,
    having: Vec<Fragment>,
    order_terms: Vec<String>,
    joins: Vec<JoinSpec>,
    /// Insertion-ordered; re-assigning a key keeps its slot.
    aggregates: Vec<(String, AggregateFunc)>,
    limit: Option<i64>,
    offset: Option<i64>,
    build_error: Option<String>,
    /// Errors carried in from nested WHERE subqueries.
    subquery_errors: Vec<String>,
}

impl StatementBuilder {
    /// Create a builder reading from `relation`.
    ///
    /// A blank relation is reported by [`validate`](Self::validate) and by
    /// `execute`, before any I/O.
    pub fn new(relation: &str) -> Self {
        let build_error = relation
            .trim()
            .is_empty()
            .then(|| "base relation cannot be empty".to_string());
        Self {
            relation: relation.to_string(),
            distinct: false,
            columns: Vec::new(),
            predicates: Vec::new(),
            group_terms: Vec::new(),
            having: Vec::new(),
            order_terms: Vec::new(),
            joins: Vec::new(),
            aggregates: Vec::new(),
            limit: None,
            offset: None,
            build_error,
            subquery_errors: Vec::new(),
        }
    }

    /// The base relation this builder reads from.
    pub fn relation(&self) -> &str {
        &self.relation
    }

    // ==================== SELECT list ====================

    /// Append projection terms. Cumulative; an empty slice is a no-op.
    pub fn select(mut self, cols: &[&str]) -> Self {
        self.columns.extend(cols.iter().map(|c| c.to_string()));
        self
    }

    /// Replace the projection list.
    pub fn set_select_columns(mut self, cols: &[&str]) -> Self {
        self.columns = cols.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Render `SELECT DISTINCT`. Independent of when `select` is called.
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    pub(crate) fn push_column(mut self, term: String) -> Self {
        self.columns.push(term);
        self
    }

    // ==================== WHERE / HAVING storage ====================

    pub(crate) fn push_predicate(mut self, cond: Fragment) -> Self {
        if !cond.is_blank() {
            self.predicates.push(cond);
        }
        self
    }

    /// Add a raw HAVING condition, ANDed with the others.
    pub fn having(self, cond: &str) -> Self {
        self.push_having(Fragment::raw(cond))
    }

    /// Like [`push_predicate`](Self::push_predicate), but a nested builder
    /// that would fail [`validate`](Self::validate) makes this one fail too.
    pub(crate) fn push_subquery_predicate(mut self, cond: Fragment, sub: &StatementBuilder) -> Self {
        if let Some(err) = sub.first_error() {
            self.subquery_errors.push(format!("subquery: {err}"));
        }
        self.push_predicate(cond)
    }

    pub(crate) fn push_having(mut self, cond: Fragment) -> Self {
        if !cond.is_blank() {
            self.having.push(cond);
        }
        self
    }

    /// Drop every WHERE condition.
    pub fn clear_conditions(mut self) -> Self {
        self.predicates.clear();
        self.subquery_errors.clear();
        self
    }

    // ==================== GROUP BY / aggregates ====================

    /// Append plain GROUP BY columns.
    pub fn group_by(mut self, cols: &[&str]) -> Self {
        self.group_terms.extend(cols.iter().map(|c| c.to_string()));
        self
    }

    pub(crate) fn push_group_term(mut self, term: String) -> Self {
        self.group_terms.push(term);
        self
    }

    /// Drop every GROUP BY term, including ROLLUP/CUBE/GROUPING SETS.
    pub fn clear_group_by(mut self) -> Self {
        self.group_terms.clear();
        self
    }

    /// Project `FN(col)` after the plain columns. Last write wins per column.
    pub fn aggregate(mut self, col: &str, func: AggregateFunc) -> Self {
        match self.aggregates.iter_mut().find(|(c, _)| c == col) {
            Some(slot) => slot.1 = func,
            None => self.aggregates.push((col.to_string(), func)),
        }
        self
    }

    // ==================== ORDER BY ====================

    /// Append ORDER BY terms verbatim.
    pub fn order_by(mut self, terms: &[&str]) -> Self {
        self.order_terms.extend(terms.iter().map(|t| t.to_string()));
        self
    }

    /// Append `col ASC` for each column.
    pub fn order_by_asc(mut self, cols: &[&str]) -> Self {
        self.order_terms
            .extend(cols.iter().map(|c| format!("{c} ASC")));
        self
    }

    /// Append `col DESC` for each column.
    pub fn order_by_desc(mut self, cols: &[&str]) -> Self {
        self.order_terms
            .extend(cols.iter().map(|c| format!("{c} DESC")));
        self
    }

    // ==================== JOIN ====================

    /// Append a join; joins render in call order.
    pub fn join(mut self, spec: JoinSpec) -> Self {
        self.joins.push(spec);
        self
    }

    /// `INNER JOIN relation ON on`
    pub fn inner_join(self, relation: &str, on: &str) -> Self {
        self.join(JoinSpec::new(JoinKind::Inner, relation, on))
    }

    /// `LEFT JOIN relation ON on`
    pub fn left_join(self, relation: &str, on: &str) -> Self {
        self.join(JoinSpec::new(JoinKind::Left, relation, on))
    }

    /// `RIGHT JOIN relation ON on`
    pub fn right_join(self, relation: &str, on: &str) -> Self {
        self.join(JoinSpec::new(JoinKind::Right, relation, on))
    }

    /// `FULL JOIN relation ON on`
    pub fn full_join(self, relation: &str, on: &str) -> Self {
        self.join(JoinSpec::new(JoinKind::Full, relation, on))
    }

    // ==================== Pagination ====================

    /// Set LIMIT. Values <= 0 are kept but not rendered.
    pub fn limit(mut self, n: i64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Set OFFSET. Values <= 0 are kept but not rendered.
    pub fn offset(mut self, n: i64) -> Self {
        self.offset = Some(n);
        self
    }

    // ==================== Lifecycle ====================

    /// Clear every clause, keeping the base relation.
    pub fn reset(self) -> Self {
        Self::new(&self.relation)
    }

    /// Independent deep copy; mutating either side never affects the other.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    // ==================== Accessors ====================

    /// Projection terms in call order, aggregates excluded.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Whether `SELECT DISTINCT` is rendered.
    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    /// WHERE conditions as text, placeholders numbered across the list.
    pub fn conditions(&self) -> Vec<String> {
        render_each(&self.predicates)
    }

    /// GROUP BY terms, including ROLLUP/CUBE/GROUPING SETS.
    pub fn group_terms(&self) -> &[String] {
        &self.group_terms
    }

    /// HAVING conditions as text. Placeholders continue after the WHERE
    /// ones, matching [`build_with_params`](Self::build_with_params).
    pub fn having_conditions(&self) -> Vec<String> {
        let mut params = ParamList::new();
        for cond in &self.predicates {
            cond.render(&mut params);
        }
        self.having.iter().map(|c| c.render(&mut params)).collect()
    }

    /// ORDER BY terms with their direction suffix.
    pub fn order_terms(&self) -> &[String] {
        &self.order_terms
    }

    /// `(column, function)` pairs in insertion order.
    pub fn aggregates(&self) -> &[(String, AggregateFunc)] {
        &self.aggregates
    }

    /// Joins in call order.
    pub fn joins(&self) -> &[JoinSpec] {
        &self.joins
    }

    /// LIMIT as set, even when it will not render.
    pub fn limit_value(&self) -> Option<i64> {
        self.limit
    }

    /// OFFSET as set, even when it will not render.
    pub fn offset_value(&self) -> Option<i64> {
        self.offset
    }

    // ==================== Build ====================

    /// Check construction-time requirements, including those of nested subqueries.
    pub fn validate(&self) -> DeskResult<()> {
        match self.first_error() {
            Some(err) => Err(DeskError::Validation(err.to_string())),
            None => Ok(()),
        }
    }

    pub(crate) fn first_error(&self) -> Option<&str> {
        self.build_error
            .iter()
            .chain(&self.subquery_errors)
            .map(String::as_str)
            .next()
    }

    /// Render the whole statement, bound values still attached.
    ///
    /// Clause order is fixed: SELECT, FROM, JOIN, WHERE, GROUP BY, HAVING,
    /// ORDER BY, LIMIT, OFFSET. Empty clauses are omitted.
    pub fn to_fragment(&self) -> Fragment {
        let mut sql = String::from("SELECT ");
        if self.distinct {
            sql.push_str("DISTINCT ");
        }

        if self.columns.is_empty() && self.aggregates.is_empty() {
            sql.push('*');
        } else {
            sql.push_str(&self.columns.join(", "));
            if !self.aggregates.is_empty() {
                if !self.columns.is_empty() {
                    sql.push_str(", ");
                }
                let aggs: Vec<String> = self
                    .aggregates
                    .iter()
                    .map(|(col, func)| func.apply(col))
                    .collect();
                sql.push_str(&aggs.join(", "));
            }
        }

        sql.push_str(" FROM ");
        sql.push_str(&self.relation);

        for join in &self.joins {
            sql.push(' ');
            sql.push_str(&join.to_string());
        }

        let mut out = Fragment::raw(sql);

        if !self.predicates.is_empty() {
            out.push_sql(" WHERE ");
            out.push_joined(self.predicates.iter().cloned(), " AND ");
        }

        if !self.group_terms.is_empty() {
            out.push_sql(format!(" GROUP BY {}", self.group_terms.join(", ")));
        }

        if !self.having.is_empty() {
            out.push_sql(" HAVING ");
            out.push_joined(self.having.iter().cloned(), " AND ");
        }

        if !self.order_terms.is_empty() {
            out.push_sql(format!(" ORDER BY {}", self.order_terms.join(", ")));
        }

        if let Some(n) = self.limit.filter(|n| *n > 0) {
            out.push_sql(format!(" LIMIT {n}"));
        }

        if let Some(n) = self.offset.filter(|n| *n > 0) {
            out.push_sql(format!(" OFFSET {n}"));
        }

        out
    }

    /// Render the statement text.
    ///
    /// Bound values (from `where_bind`/`having_bind`) appear as `$n`; use
    /// [`build_with_params`](Self::build_with_params) to get them too.
    pub fn build(&self) -> String {
        self.to_fragment().to_sql()
    }

    /// Render the statement text and its bound values in placeholder order.
    pub fn build_with_params(&self) -> (String, ParamList) {
        let mut params = ParamList::new();
        let sql = self.to_fragment().render(&mut params);
        (sql, params)
    }
}

fn render_each(frags: &[Fragment]) -> Vec<String> {
    let mut params = ParamList::new();
    frags.iter().map(|f| f.render(&mut params)).collect()
}

impl fmt::Display for StatementBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}
