//! Uniform string-matrix view of a result set.

use crate::cell::CellText;
use crate::error::{DeskError, DeskResult};
use tokio_postgres::Row;
use tokio_postgres::types::Type;

/// Column names plus every row rendered as text (NULL shown as `NULL`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultGrid {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ResultGrid {
    pub fn new(header: Vec<String>) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    /// Decode driver rows under a known header.
    ///
    /// # Errors
    /// [`DeskError::Decode`] naming the column whose value could not be read.
    pub fn from_rows(header: Vec<String>, rows: &[Row]) -> DeskResult<Self> {
        let rows = rows.iter().map(row_to_strings).collect::<DeskResult<Vec<_>>>()?;
        Ok(Self { header, rows })
    }

    /// Decode driver rows, taking the header from the first row.
    ///
    /// With zero rows the header is empty; prefer [`from_rows`](Self::from_rows)
    /// with prepared-statement column names when those are available.
    pub fn from_rows_only(rows: &[Row]) -> DeskResult<Self> {
        let header = rows.first().map(header_of).unwrap_or_default();
        Self::from_rows(header, rows)
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Text of one cell, `None` outside the grid or past a short row.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Header row first, then the data rows.
    pub fn to_matrix(&self) -> Vec<Vec<String>> {
        let mut out = Vec::with_capacity(self.rows.len() + 1);
        out.push(self.header.clone());
        out.extend(self.rows.iter().cloned());
        out
    }
}

fn header_of(row: &Row) -> Vec<String> {
    row.columns().iter().map(|c| c.name().to_string()).collect()
}

/// Render every cell of `row` as text.
pub fn row_to_strings(row: &Row) -> DeskResult<Vec<String>> {
    row.columns()
        .iter()
        .enumerate()
        .map(|(idx, col)| {
            row.try_get::<_, CellText>(idx)
                .map(CellText::into_display)
                .map_err(|e| DeskError::decode(column_label(col.name(), col.type_()), e.to_string()))
        })
        .collect()
}

fn column_label(name: &str, ty: &Type) -> String {
    format!("{name} ({})", ty.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> ResultGrid {
        let mut g = ResultGrid::new(vec!["id".into(), "name".into()]);
        g.push_row(vec!["1".into(), "laptop".into()]);
        g.push_row(vec!["2".into(), "NULL".into()]);
        g
    }

    #[test]
    fn matrix_puts_header_first() {
        let m = grid().to_matrix();
        assert_eq!(m.len(), 3);
        assert_eq!(m[0], ["id", "name"]);
        assert_eq!(m[2], ["2", "NULL"]);
    }

    #[test]
    fn lookups() {
        let g = grid();
        assert_eq!(g.cell(0, 1), Some("laptop"));
        assert_eq!(g.cell(5, 0), None);
        assert_eq!((g.row_count(), g.column_count()), (2, 2));
    }

    #[test]
    fn empty_header_only_grid() {
        let g = ResultGrid::new(vec!["id".into()]);
        assert!(g.is_empty());
        assert_eq!(g.to_matrix(), vec![vec!["id".to_string()]]);
        assert!(ResultGrid::from_rows_only(&[]).unwrap().header.is_empty());
    }
}
