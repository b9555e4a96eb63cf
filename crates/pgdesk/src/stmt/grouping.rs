//! Grouping constructs: ROLLUP, CUBE, GROUPING SETS and the GROUPING()
//! functions. Each renders one GROUP BY term and composes with plain
//! `group_by` columns.

use super::builder::StatementBuilder;
use super::expr::with_alias;

pub fn rollup(cols: &[&str]) -> Option<String> {
    (!cols.is_empty()).then(|| format!("ROLLUP({})", cols.join(", ")))
}

pub fn cube(cols: &[&str]) -> Option<String> {
    (!cols.is_empty()).then(|| format!("CUBE({})", cols.join(", ")))
}

/// `GROUPING SETS ((a, b), (c))`. Empty sets are skipped; `None` if none remain.
pub fn grouping_sets(sets: &[&[&str]]) -> Option<String> {
    let rendered: Vec<String> = sets
        .iter()
        .filter(|set| !set.is_empty())
        .map(|set| format!("({})", set.join(", ")))
        .collect();
    (!rendered.is_empty()).then(|| format!("GROUPING SETS ({})", rendered.join(", ")))
}

impl StatementBuilder {
    /// Add `ROLLUP(cols)` to GROUP BY. No-op when `cols` is empty.
    pub fn rollup(self, cols: &[&str]) -> Self {
        match rollup(cols) {
            Some(term) => self.push_group_term(term),
            None => self,
        }
    }

    /// Add `CUBE(cols)` to GROUP BY. No-op when `cols` is empty.
    pub fn cube(self, cols: &[&str]) -> Self {
        match cube(cols) {
            Some(term) => self.push_group_term(term),
            None => self,
        }
    }

    /// Add `GROUPING SETS (...)` to GROUP BY.
    pub fn grouping_sets(self, sets: &[&[&str]]) -> Self {
        match grouping_sets(sets) {
            Some(term) => self.push_group_term(term),
            None => self,
        }
    }

    /// Project `GROUPING(col)`.
    pub fn select_grouping(self, col: &str, alias: &str) -> Self {
        self.push_column(with_alias(format!("GROUPING({col})"), alias))
    }

    /// Project `GROUPING_ID(cols)`. No-op when `cols` is empty.
    pub fn select_grouping_id(self, cols: &[&str], alias: &str) -> Self {
        if cols.is_empty() {
            return self;
        }
        self.push_column(with_alias(format!("GROUPING_ID({})", cols.join(", ")), alias))
    }
}
