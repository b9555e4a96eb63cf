use crate::error::DeskError;
use std::fmt;
use std::str::FromStr;

/// Aggregate functions accepted by `aggregate()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateFunc {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl AggregateFunc {
    pub const ALL: [AggregateFunc; 5] = [
        AggregateFunc::Count,
        AggregateFunc::Sum,
        AggregateFunc::Avg,
        AggregateFunc::Min,
        AggregateFunc::Max,
    ];

    pub fn as_sql(self) -> &'static str {
        match self {
            AggregateFunc::Count => "COUNT",
            AggregateFunc::Sum => "SUM",
            AggregateFunc::Avg => "AVG",
            AggregateFunc::Min => "MIN",
            AggregateFunc::Max => "MAX",
        }
    }

    /// `FN(expr)`
    pub fn apply(self, expr: &str) -> String {
        format!("{}({})", self.as_sql(), expr)
    }
}

impl fmt::Display for AggregateFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for AggregateFunc {
    type Err = DeskError;

    /// Case-insensitive: `count`, `Sum`, `AVG` ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        AggregateFunc::ALL
            .into_iter()
            .find(|f| f.as_sql().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                DeskError::validation(format!(
                    "unknown aggregate function {s:?} (expected COUNT, SUM, AVG, MIN or MAX)"
                ))
            })
    }
}
