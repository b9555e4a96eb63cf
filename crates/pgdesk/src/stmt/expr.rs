//! Expression renderers.
//!
//! The free functions are pure: inputs in, SQL text out, nothing validated.
//! The `select_*` methods render the same expressions into the projection
//! list, with `AS alias` appended when `alias` is non-empty.

use super::aggregate::AggregateFunc;
use super::builder::StatementBuilder;

pub const CURRENT_DATE: &str = "CURRENT_DATE";
pub const CURRENT_TIMESTAMP: &str = "CURRENT_TIMESTAMP";

/// `expr AS alias`, or `expr` unchanged when `alias` is empty.
pub fn with_alias(expr: String, alias: &str) -> String {
    if alias.is_empty() {
        expr
    } else {
        format!("{expr} AS {alias}")
    }
}

// ==================== String functions ====================

pub fn upper(col: &str) -> String {
    format!("UPPER({col})")
}

pub fn lower(col: &str) -> String {
    format!("LOWER({col})")
}

pub fn trim(col: &str) -> String {
    format!("TRIM({col})")
}

pub fn ltrim(col: &str) -> String {
    format!("LTRIM({col})")
}

pub fn rtrim(col: &str) -> String {
    format!("RTRIM({col})")
}

pub fn substring(col: &str, start: i64, len: i64) -> String {
    format!("SUBSTRING({col}, {start}, {len})")
}

/// `LPAD(col, len, 'ch')`
pub fn lpad(col: &str, len: i64, pad: &str) -> String {
    format!("LPAD({col}, {len}, '{pad}')")
}

/// `RPAD(col, len, 'ch')`
pub fn rpad(col: &str, len: i64, pad: &str) -> String {
    format!("RPAD({col}, {len}, '{pad}')")
}

/// Space-separated `||` concatenation. `None` for no columns.
pub fn concat(cols: &[&str]) -> Option<String> {
    (!cols.is_empty()).then(|| cols.join(" || ' ' || "))
}

pub fn char_length(col: &str) -> String {
    format!("CHAR_LENGTH({col})")
}

/// `POSITION(sub IN col)`
pub fn position(col: &str, sub: &str) -> String {
    format!("POSITION({sub} IN {col})")
}

pub fn replace(col: &str, from: &str, to: &str) -> String {
    format!("REPLACE({col}, {from}, {to})")
}

// ==================== Types and dates ====================

/// `CAST(col AS ty)`
pub fn cast(col: &str, ty: &str) -> String {
    format!("CAST({col} AS {ty})")
}

/// `EXTRACT(field FROM col)`
pub fn extract(col: &str, field: &str) -> String {
    format!("EXTRACT({field} FROM {col})")
}

// ==================== Conditionals ====================

/// Two-way conditional rendered as `CASE WHEN cond THEN t ELSE f END`.
pub fn if_then_else(cond: &str, then: &str, otherwise: &str) -> String {
    format!("CASE WHEN {cond} THEN {then} ELSE {otherwise} END")
}

/// `COALESCE(a, b, ...)`. `None` for no arguments.
pub fn coalesce(cols: &[&str]) -> Option<String> {
    (!cols.is_empty()).then(|| format!("COALESCE({})", cols.join(", ")))
}

pub fn nullif(a: &str, b: &str) -> String {
    format!("NULLIF({a}, {b})")
}

/// `FN(col) FILTER (WHERE cond)`
pub fn aggregate_with_filter(func: &str, col: &str, cond: &str) -> String {
    format!("{func}({col}) FILTER (WHERE {cond})")
}

impl StatementBuilder {
    fn select_expr(self, expr: String, alias: &str) -> Self {
        self.push_column(with_alias(expr, alias))
    }

    pub fn select_upper(self, col: &str, alias: &str) -> Self {
        self.select_expr(upper(col), alias)
    }

    pub fn select_lower(self, col: &str, alias: &str) -> Self {
        self.select_expr(lower(col), alias)
    }

    pub fn select_trim(self, col: &str, alias: &str) -> Self {
        self.select_expr(trim(col), alias)
    }

    pub fn select_ltrim(self, col: &str, alias: &str) -> Self {
        self.select_expr(ltrim(col), alias)
    }

    pub fn select_rtrim(self, col: &str, alias: &str) -> Self {
        self.select_expr(rtrim(col), alias)
    }

    pub fn select_substring(self, col: &str, start: i64, len: i64, alias: &str) -> Self {
        self.select_expr(substring(col, start, len), alias)
    }

    pub fn select_lpad(self, col: &str, len: i64, pad: &str, alias: &str) -> Self {
        self.select_expr(lpad(col, len, pad), alias)
    }

    pub fn select_rpad(self, col: &str, len: i64, pad: &str, alias: &str) -> Self {
        self.select_expr(rpad(col, len, pad), alias)
    }

    /// No-op when `cols` is empty.
    pub fn select_concat(self, cols: &[&str], alias: &str) -> Self {
        match concat(cols) {
            Some(expr) => self.select_expr(expr, alias),
            None => self,
        }
    }

    pub fn select_char_length(self, col: &str, alias: &str) -> Self {
        self.select_expr(char_length(col), alias)
    }

    pub fn select_position(self, col: &str, sub: &str, alias: &str) -> Self {
        self.select_expr(position(col, sub), alias)
    }

    pub fn select_replace(self, col: &str, from: &str, to: &str, alias: &str) -> Self {
        self.select_expr(replace(col, from, to), alias)
    }

    pub fn select_cast(self, col: &str, ty: &str, alias: &str) -> Self {
        self.select_expr(cast(col, ty), alias)
    }

    pub fn select_current_date(self, alias: &str) -> Self {
        self.select_expr(CURRENT_DATE.to_string(), alias)
    }

    pub fn select_current_timestamp(self, alias: &str) -> Self {
        self.select_expr(CURRENT_TIMESTAMP.to_string(), alias)
    }

    pub fn select_extract(self, col: &str, field: &str, alias: &str) -> Self {
        self.select_expr(extract(col, field), alias)
    }

    pub fn select_if(self, cond: &str, then: &str, otherwise: &str, alias: &str) -> Self {
        self.select_expr(if_then_else(cond, then, otherwise), alias)
    }

    /// No-op when `cols` is empty.
    pub fn select_coalesce(self, cols: &[&str], alias: &str) -> Self {
        match coalesce(cols) {
            Some(expr) => self.select_expr(expr, alias),
            None => self,
        }
    }

    pub fn select_nullif(self, a: &str, b: &str, alias: &str) -> Self {
        self.select_expr(nullif(a, b), alias)
    }

    pub fn select_aggregate_with_filter(self, func: &str, col: &str, cond: &str, alias: &str) -> Self {
        self.select_expr(aggregate_with_filter(func, col, cond), alias)
    }

    /// Project `COALESCE(FN(col), default)`.
    pub fn aggregate_with_coalesce(self, col: &str, func: AggregateFunc, default: &str) -> Self {
        self.push_column(format!("COALESCE({}, {default})", func.apply(col)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stmt::select;

    #[test]
    fn pure_renderers() {
        assert_eq!(upper("name"), "UPPER(name)");
        assert_eq!(substring("name", 1, 3), "SUBSTRING(name, 1, 3)");
        assert_eq!(lpad("id", 5, "0"), "LPAD(id, 5, '0')");
        assert_eq!(position("email", "'@'"), "POSITION('@' IN email)");
        assert_eq!(cast("price", "INTEGER"), "CAST(price AS INTEGER)");
        assert_eq!(extract("created_at", "YEAR"), "EXTRACT(YEAR FROM created_at)");
        assert_eq!(
            aggregate_with_filter("COUNT", "id", "status = 'paid'"),
            "COUNT(id) FILTER (WHERE status = 'paid')"
        );
        assert_eq!(concat(&[]), None);
        assert_eq!(coalesce(&[]), None);
    }

    #[test]
    fn alias_is_optional() {
        assert_eq!(with_alias(upper("name"), ""), "UPPER(name)");
        assert_eq!(with_alias(upper("name"), "n"), "UPPER(name) AS n");
    }

    #[test]
    fn string_functions_in_projection() {
        let qb = select("users")
            .select_upper("name", "")
            .select_lower("email", "email_lc")
            .select_trim("bio", "")
            .select_ltrim("a", "")
            .select_rtrim("b", "")
            .select_rpad("code", 8, "x", "")
            .select_concat(&["first_name", "last_name"], "full_name")
            .select_concat(&[], "ignored")
            .select_char_length("name", "len")
            .select_replace("phone", "'-'", "''", "digits");
        assert_eq!(
            qb.columns(),
            [
                "UPPER(name)",
                "LOWER(email) AS email_lc",
                "TRIM(bio)",
                "LTRIM(a)",
                "RTRIM(b)",
                "RPAD(code, 8, 'x')",
                "first_name || ' ' || last_name AS full_name",
                "CHAR_LENGTH(name) AS len",
                "REPLACE(phone, '-', '') AS digits",
            ]
        );
    }

    #[test]
    fn conditional_and_date_expressions() {
        let qb = select("orders")
            .select_current_date("today")
            .select_current_timestamp("")
            .select_if("total > 100", "'big'", "'small'", "size")
            .select_coalesce(&["note", "'-'"], "note")
            .select_coalesce(&[], "skipped")
            .select_nullif("status", "'void'", "");
        assert_eq!(
            qb.build(),
            "SELECT CURRENT_DATE AS today, CURRENT_TIMESTAMP, \
             CASE WHEN total > 100 THEN 'big' ELSE 'small' END AS size, \
             COALESCE(note, '-') AS note, NULLIF(status, 'void') FROM orders"
        );
    }

    #[test]
    fn aggregate_helpers() {
        let qb = select("orders")
            .select(&["customer_id"])
            .aggregate_with_coalesce("total", AggregateFunc::Sum, "0")
            .select_aggregate_with_filter("SUM", "total", "status = 'paid'", "paid")
            .group_by(&["customer_id"]);
        assert_eq!(
            qb.build(),
            "SELECT customer_id, COALESCE(SUM(total), 0), \
             SUM(total) FILTER (WHERE status = 'paid') AS paid FROM orders GROUP BY customer_id"
        );
    }
}
