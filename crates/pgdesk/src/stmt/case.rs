//! CASE expression builders.
//!
//! Both builders render to a single fragment that is then placed in the
//! projection list; they keep no link to the statement afterwards.

use super::builder::StatementBuilder;
use super::expr::with_alias;

/// Searched CASE: `CASE WHEN c1 THEN r1 ... [ELSE e] END`.
///
/// WHEN clauses render in insertion order (first match wins).
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct Case {
    whens: Vec<(String, String)>,
    otherwise: Option<String>,
}

impl Case {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn when(mut self, cond: &str, result: &str) -> Self {
        self.whens.push((cond.to_string(), result.to_string()));
        self
    }

    pub fn otherwise(mut self, value: &str) -> Self {
        self.otherwise = Some(value.to_string());
        self
    }

    /// Rendered expression, or an empty string when no WHEN was added.
    pub fn build(&self) -> String {
        render(None, &self.whens, self.otherwise.as_deref())
    }
}

/// Simple CASE on one column: `CASE col WHEN v1 THEN r1 ... [ELSE e] END`.
///
/// Values keep insertion order; re-adding a value replaces its result in
/// place.
#[derive(Debug, Clone)]
#[must_use]
pub struct SimpleCase {
    column: String,
    whens: Vec<(String, String)>,
    otherwise: Option<String>,
}

impl SimpleCase {
    pub fn new(column: &str) -> Self {
        Self {
            column: column.to_string(),
            whens: Vec::new(),
            otherwise: None,
        }
    }

    pub fn when(mut self, value: &str, result: &str) -> Self {
        match self.whens.iter_mut().find(|(v, _)| v == value) {
            Some(slot) => slot.1 = result.to_string(),
            None => self.whens.push((value.to_string(), result.to_string())),
        }
        self
    }

    pub fn otherwise(mut self, value: &str) -> Self {
        self.otherwise = Some(value.to_string());
        self
    }

    /// Rendered expression, or an empty string when no WHEN was added.
    pub fn build(&self) -> String {
        render(Some(&self.column), &self.whens, self.otherwise.as_deref())
    }
}

fn render(subject: Option<&str>, whens: &[(String, String)], otherwise: Option<&str>) -> String {
    if whens.is_empty() {
        return String::new();
    }
    let mut out = String::from("CASE");
    if let Some(col) = subject {
        out.push(' ');
        out.push_str(col);
    }
    for (cond, result) in whens {
        out.push_str(&format!(" WHEN {cond} THEN {result}"));
    }
    // An empty ELSE is treated as absent.
    if let Some(e) = otherwise.filter(|e| !e.is_empty()) {
        out.push_str(&format!(" ELSE {e}"));
    }
    out.push_str(" END");
    out
}

impl StatementBuilder {
    /// Project a searched CASE. A CASE without WHEN adds nothing.
    pub fn select_case(self, case: &Case, alias: &str) -> Self {
        match case.build() {
            sql if sql.is_empty() => self,
            sql => self.push_column(with_alias(sql, alias)),
        }
    }

    /// Project a simple CASE. A CASE without WHEN adds nothing.
    pub fn select_simple_case(self, case: &SimpleCase, alias: &str) -> Self {
        match case.build() {
            sql if sql.is_empty() => self,
            sql => self.push_column(with_alias(sql, alias)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stmt::select;

    #[test]
    fn searched_case_keeps_when_order() {
        let case = Case::new()
            .when("price > 1000", "'premium'")
            .when("price > 100", "'regular'")
            .otherwise("'budget'");
        assert_eq!(
            case.build(),
            "CASE WHEN price > 1000 THEN 'premium' WHEN price > 100 THEN 'regular' ELSE 'budget' END"
        );
    }

    #[test]
    fn simple_case_is_deterministic() {
        let case = SimpleCase::new("status")
            .when("'active'", "'Active'")
            .when("'blocked'", "'Blocked'")
            .when("'active'", "'On'");
        let first = case.build();
        assert_eq!(
            first,
            "CASE status WHEN 'active' THEN 'On' WHEN 'blocked' THEN 'Blocked' END"
        );
        for _ in 0..10 {
            assert_eq!(case.build(), first);
        }
    }

    #[test]
    fn empty_case_is_not_projected() {
        let qb = select("users")
            .select_case(&Case::new().otherwise("1"), "x")
            .select_simple_case(&SimpleCase::new("status"), "y");
        assert!(qb.columns().is_empty());
        assert_eq!(qb.build(), "SELECT * FROM users");
    }

    #[test]
    fn projected_with_alias() {
        let qb = select("users")
            .select(&["id"])
            .select_case(&Case::new().when("age >= 18", "true").otherwise("false"), "adult");
        assert_eq!(
            qb.build(),
            "SELECT id, CASE WHEN age >= 18 THEN true ELSE false END AS adult FROM users"
        );
    }
}
