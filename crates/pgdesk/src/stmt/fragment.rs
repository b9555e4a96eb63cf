//! SQL text with interleaved bound values.
//!
//! Literal fragments and bound values are kept apart until render time, when
//! each bound value gets its `$n` placeholder. Numbering follows output order,
//! so a fragment can be nested inside another statement (EXISTS, ANY/ALL, CTE
//! bodies) without renumbering strings after the fact.

use super::param::{Param, ParamList};

#[derive(Clone, Debug)]
enum Segment {
    Sql(String),
    Param(Param),
}

/// A piece of SQL that may carry bound parameters.
#[derive(Clone, Debug, Default)]
pub struct Fragment {
    segments: Vec<Segment>,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fragment of literal SQL text.
    pub fn raw(sql: impl Into<String>) -> Self {
        let mut f = Self::new();
        f.push_sql(sql);
        f
    }

    pub fn push_sql(&mut self, sql: impl Into<String>) {
        let sql = sql.into();
        if sql.is_empty() {
            return;
        }
        // Adjacent text merges into one segment.
        if let Some(Segment::Sql(last)) = self.segments.last_mut() {
            last.push_str(&sql);
        } else {
            self.segments.push(Segment::Sql(sql));
        }
    }

    pub fn push_param(&mut self, param: Param) {
        self.segments.push(Segment::Param(param));
    }

    /// Append another fragment, bound values included.
    pub fn push_fragment(&mut self, other: Fragment) {
        for seg in other.segments {
            match seg {
                Segment::Sql(s) => self.push_sql(s),
                Segment::Param(p) => self.push_param(p),
            }
        }
    }

    /// Append `items` separated by `sep`.
    pub fn push_joined(&mut self, items: impl IntoIterator<Item = Fragment>, sep: &str) {
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.push_sql(sep);
            }
            self.push_fragment(item);
        }
    }

    /// True when there are no bound values and the text is whitespace only.
    pub fn is_blank(&self) -> bool {
        self.segments.iter().all(|s| match s {
            Segment::Sql(sql) => sql.trim().is_empty(),
            Segment::Param(_) => false,
        })
    }

    /// Render to SQL text, pushing bound values onto `params` and numbering
    /// their placeholders after whatever `params` already holds.
    pub fn render(&self, params: &mut ParamList) -> String {
        let mut out = String::new();
        for seg in &self.segments {
            match seg {
                Segment::Sql(sql) => out.push_str(sql),
                Segment::Param(p) => {
                    let idx = params.push_param(p.clone());
                    out.push('$');
                    out.push_str(&idx.to_string());
                }
            }
        }
        out
    }

    /// Render standalone, numbering placeholders from `$1`.
    pub fn to_sql(&self) -> String {
        self.render(&mut ParamList::new())
    }
}

impl From<&str> for Fragment {
    fn from(sql: &str) -> Self {
        Fragment::raw(sql)
    }
}

impl From<String> for Fragment {
    fn from(sql: String) -> Self {
        Fragment::raw(sql)
    }
}
