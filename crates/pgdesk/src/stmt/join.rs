//! JOIN clause model.

use std::fmt;

/// Kind of JOIN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
}

impl JoinKind {
    /// SQL keyword preceding `JOIN`.
    pub fn as_sql(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER",
            JoinKind::Left => "LEFT",
            JoinKind::Right => "RIGHT",
            JoinKind::Full => "FULL",
        }
    }
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// One appended JOIN. Immutable once added to a builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinSpec {
    pub kind: JoinKind,
    pub relation: String,
    pub on: String,
}

impl JoinSpec {
    pub fn new(kind: JoinKind, relation: impl Into<String>, on: impl Into<String>) -> Self {
        Self {
            kind,
            relation: relation.into(),
            on: on.into(),
        }
    }
}

/// Renders `KIND JOIN relation ON condition`.
impl fmt::Display for JoinSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} JOIN {} ON {}", self.kind, self.relation, self.on)
    }
}
