//! WHERE predicates.
//!
//! Literal-value predicates interpolate text as given. Equality, inequality,
//! LIKE, regex and SIMILAR TO wrap the value in single quotes; comparisons,
//! IN lists, BETWEEN bounds and array containment insert it verbatim. Nothing
//! is escaped. For untrusted input use [`where_bind`](StatementBuilder::where_bind),
//! which sends the value as a bound parameter.

use super::builder::StatementBuilder;
use super::fragment::Fragment;
use super::param::Param;
use tokio_postgres::types::ToSql;

impl StatementBuilder {
    /// Add a raw WHERE condition. Whitespace-only input is ignored.
    pub fn where_raw(self, cond: &str) -> Self {
        self.push_predicate(Fragment::raw(cond))
    }

    fn where_text(self, cond: String) -> Self {
        self.push_predicate(Fragment::raw(cond))
    }

    // ==================== Comparisons ====================

    /// `col = 'value'`
    pub fn where_eq(self, col: &str, value: &str) -> Self {
        self.where_text(format!("{col} = '{value}'"))
    }

    /// `col != 'value'`
    pub fn where_ne(self, col: &str, value: &str) -> Self {
        self.where_text(format!("{col} != '{value}'"))
    }

    /// `col > value`
    pub fn where_gt(self, col: &str, value: &str) -> Self {
        self.where_text(format!("{col} > {value}"))
    }

    /// `col < value`
    pub fn where_lt(self, col: &str, value: &str) -> Self {
        self.where_text(format!("{col} < {value}"))
    }

    /// `col >= value`
    pub fn where_gte(self, col: &str, value: &str) -> Self {
        self.where_text(format!("{col} >= {value}"))
    }

    /// `col <= value`
    pub fn where_lte(self, col: &str, value: &str) -> Self {
        self.where_text(format!("{col} <= {value}"))
    }

    /// `col LIKE 'pattern'`
    pub fn where_like(self, col: &str, pattern: &str) -> Self {
        self.where_text(format!("{col} LIKE '{pattern}'"))
    }

    /// `col IN (values)`; `values` is a pre-rendered comma-separated list.
    pub fn where_in(self, col: &str, values: &str) -> Self {
        self.where_text(format!("{col} IN ({values})"))
    }

    /// `col BETWEEN start AND end`
    pub fn where_between(self, col: &str, start: &str, end: &str) -> Self {
        self.where_text(format!("{col} BETWEEN {start} AND {end}"))
    }

    /// `col NOT BETWEEN start AND end`
    pub fn where_not_between(self, col: &str, start: &str, end: &str) -> Self {
        self.where_text(format!("{col} NOT BETWEEN {start} AND {end}"))
    }

    pub fn where_is_null(self, col: &str) -> Self {
        self.where_text(format!("{col} IS NULL"))
    }

    pub fn where_is_not_null(self, col: &str) -> Self {
        self.where_text(format!("{col} IS NOT NULL"))
    }

    /// `value = ANY(col)` for an array column.
    pub fn where_array_contains(self, col: &str, value: &str) -> Self {
        self.where_text(format!("{value} = ANY({col})"))
    }

    /// `COALESCE(c1, c2, ...) op value`. No-op when `cols` is empty.
    pub fn where_coalesce(self, cols: &[&str], op: &str, value: &str) -> Self {
        if cols.is_empty() {
            return self;
        }
        self.where_text(format!("COALESCE({}) {op} {value}", cols.join(", ")))
    }

    // ==================== Pattern matching ====================

    /// `col ~ 'pattern'` (POSIX, case-sensitive)
    pub fn where_regex(self, col: &str, pattern: &str) -> Self {
        self.where_text(format!("{col} ~ '{pattern}'"))
    }

    /// `col ~* 'pattern'`
    pub fn where_regex_no_case(self, col: &str, pattern: &str) -> Self {
        self.where_text(format!("{col} ~* '{pattern}'"))
    }

    /// `col !~ 'pattern'`
    pub fn where_not_regex(self, col: &str, pattern: &str) -> Self {
        self.where_text(format!("{col} !~ '{pattern}'"))
    }

    /// `col !~* 'pattern'`
    pub fn where_not_regex_no_case(self, col: &str, pattern: &str) -> Self {
        self.where_text(format!("{col} !~* '{pattern}'"))
    }

    /// `col SIMILAR TO 'pattern'`
    pub fn where_similar_to(self, col: &str, pattern: &str) -> Self {
        self.where_text(format!("{col} SIMILAR TO '{pattern}'"))
    }

    // ==================== Subqueries ====================

    fn where_subquery(self, prefix: String, sub: &StatementBuilder) -> Self {
        let mut cond = Fragment::raw(prefix);
        cond.push_sql("(");
        cond.push_fragment(sub.to_fragment());
        cond.push_sql(")");
        self.push_subquery_predicate(cond, sub)
    }

    /// `col op ANY (subquery)`
    pub fn where_any(self, col: &str, op: &str, sub: StatementBuilder) -> Self {
        self.where_subquery(format!("{col} {op} ANY "), &sub)
    }

    /// `col op ALL (subquery)`
    pub fn where_all(self, col: &str, op: &str, sub: StatementBuilder) -> Self {
        self.where_subquery(format!("{col} {op} ALL "), &sub)
    }

    /// `EXISTS (subquery)`
    pub fn where_exists(self, sub: StatementBuilder) -> Self {
        self.where_subquery("EXISTS ".to_string(), &sub)
    }

    /// `NOT EXISTS (subquery)`
    pub fn where_not_exists(self, sub: StatementBuilder) -> Self {
        self.where_subquery("NOT EXISTS ".to_string(), &sub)
    }

    /// `col IN (subquery)`
    pub fn where_in_subquery(self, col: &str, sub: StatementBuilder) -> Self {
        self.where_subquery(format!("{col} IN "), &sub)
    }

    // ==================== Bound parameters ====================

    /// `col op $n` with `value` sent as a bound parameter.
    ///
    /// # Example
    /// ```ignore
    /// let qb = pgdesk::select("products").where_bind("name", "=", user_input);
    /// let (sql, params) = qb.build_with_params(); // "... WHERE name = $1"
    /// ```
    pub fn where_bind<T: ToSql + Send + Sync + 'static>(self, col: &str, op: &str, value: T) -> Self {
        self.push_predicate(bound(col, op, value))
    }

    /// HAVING `expr op $n` with `value` sent as a bound parameter.
    pub fn having_bind<T: ToSql + Send + Sync + 'static>(self, expr: &str, op: &str, value: T) -> Self {
        self.push_having(bound(expr, op, value))
    }
}

fn bound<T: ToSql + Send + Sync + 'static>(lhs: &str, op: &str, value: T) -> Fragment {
    let mut f = Fragment::raw(format!("{lhs} {op} "));
    f.push_param(Param::new(value));
    f
}
